//! Ordered phase/date-type table
//!
//! Priority-ordered sequence of `(phase, date type)` pairs. A date type may
//! be listed under several phases; lookups resolve to the first entry.

use serde::{Deserialize, Serialize};

use crate::date_type::DateType;
use crate::phase::PhaseId;

/// One row of the ordered table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDateTypeEntry {
    /// Owning phase
    pub phase_id: PhaseId,
    /// Date type owned by the phase
    pub date_type_id: DateType,
}

impl PhaseDateTypeEntry {
    /// Create new entry
    #[must_use]
    pub const fn new(phase_id: PhaseId, date_type_id: DateType) -> Self {
        Self {
            phase_id,
            date_type_id,
        }
    }
}

/// Ordered phase/date-type table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedPhaseDateTypes(Vec<PhaseDateTypeEntry>);

impl OrderedPhaseDateTypes {
    /// Create table from entries in priority order
    #[must_use]
    pub fn new(entries: Vec<PhaseDateTypeEntry>) -> Self {
        Self(entries)
    }

    /// Phase of the first entry listing `date_type`.
    #[must_use]
    pub fn phase_for(&self, date_type: DateType) -> Option<PhaseId> {
        self.0
            .iter()
            .find(|entry| entry.date_type_id == date_type)
            .map(|entry| entry.phase_id)
    }

    /// Every entry, in priority order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[PhaseDateTypeEntry] {
        &self.0
    }

    /// Iterate entries in priority order
    pub fn iter(&self) -> std::slice::Iter<'_, PhaseDateTypeEntry> {
        self.0.iter()
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<PhaseDateTypeEntry> for OrderedPhaseDateTypes {
    fn from_iter<I: IntoIterator<Item = PhaseDateTypeEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OrderedPhaseDateTypes {
    type Item = &'a PhaseDateTypeEntry;
    type IntoIter = std::slice::Iter<'a, PhaseDateTypeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
