//! RAX FTP Client - Entry Point
//!
//! Connects to the server named by the remote target, logs in, executes
//! exactly one operation, and quits. Exit code 0 on success, 1 on any
//! failure.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::error::ErrorKind;
use log::{debug, error};

use rax_ftp_client::cli;
use rax_ftp_client::config::ClientConfig;
use rax_ftp_client::error::{FtpClientError, StorageError};
use rax_ftp_client::session::{self, ControlSession, OperationOutcome};

fn main() -> ExitCode {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let matches = match cli::build_command().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let kind = e.kind();
            let _ = e.print();
            return match kind {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Operation failed: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> Result<(), FtpClientError> {
    let invocation = cli::parse_invocation(matches)?;
    let config = ClientConfig::load()?;
    debug!("Loaded configuration: {:?}", config);

    let remote = invocation.remote_target().clone();
    let mut control = ControlSession::connect(remote, config)?;
    control.login()?;

    let outcome = session::execute(&mut control, &invocation)?;
    if let OperationOutcome::Listing(listing) = &outcome {
        io::stdout()
            .write_all(listing)
            .map_err(|e| StorageError::WriteFailed("<stdout>".to_string(), e))?;
    }

    control.quit()?;
    Ok(())
}
