//! `demos-dates` binary

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let matches = demos_cli::cli().get_matches();
    match demos_cli::run(&matches).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
