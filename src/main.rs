//! modelsum - Checksums for ML model files
//!
//! Entry point for the modelsum CLI application.

use clap::Parser;
use modelsum::{
    cli::Cli,
    error::{find_integrity_error, ExitCode, StructuredError},
    logging::init_logging,
};

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    init_logging(cli.verbose, cli.quiet);

    match modelsum::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;

            let plain = match find_integrity_error(&err) {
                Some(cause) => format!(
                    "[{}] Error ({}): {:#}",
                    exit_code.code_prefix(),
                    cause.kind(),
                    err
                ),
                None => format!("[{}] Error: {:#}", exit_code.code_prefix(), err),
            };

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                match serde_json::to_string_pretty(&structured) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("{}", plain),
                }
            } else {
                eprintln!("{}", plain);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
