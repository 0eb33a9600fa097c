//! Operation execution
//!
//! Translates each requested operation into its sequence of protocol
//! verbs, reply checks, and data-channel transfers. Operations are never
//! retried; the first failure abandons the run.

use log::{debug, warn};

use crate::address::RemoteTarget;
use crate::cli::{Invocation, Operation};
use crate::error::{FtpClientError, UsageError};
use crate::protocol::commands::Command;
use crate::session::control::ControlSession;
use crate::session::results::OperationOutcome;
use crate::storage;

/// Executes the requested operation over an authenticated session.
pub fn execute(
    session: &mut ControlSession,
    invocation: &Invocation,
) -> Result<OperationOutcome, FtpClientError> {
    debug!("Executing {}", invocation.operation.name());

    match invocation.operation {
        Operation::List => list(session, &invocation.source),
        Operation::MakeDirectory => {
            make_directory(session, &invocation.source).map(|_| OperationOutcome::Completed)
        }
        Operation::Remove => {
            remove_remote(session, &invocation.source).map(|_| OperationOutcome::Completed)
        }
        Operation::RemoveDirectory => {
            remove_directory(session, &invocation.source).map(|_| OperationOutcome::Completed)
        }
        Operation::Copy => {
            let dest = second_operand(invocation)?;
            copy(session, &invocation.source, dest).map(|_| OperationOutcome::Completed)
        }
        Operation::Move => {
            let dest = second_operand(invocation)?;
            move_entry(session, &invocation.source, dest).map(|_| OperationOutcome::Completed)
        }
    }
}

/// Lists a remote directory, returning the raw listing bytes.
fn list(
    session: &mut ControlSession,
    target: &RemoteTarget,
) -> Result<OperationOutcome, FtpClientError> {
    let mut data = session.open_data_channel()?;
    session.send_command(&Command::List(target.path.clone()))?;

    let listing = data.receive_all()?;
    session.read_reply()?;
    data.close();

    Ok(OperationOutcome::Listing(listing))
}

fn make_directory(
    session: &mut ControlSession,
    target: &RemoteTarget,
) -> Result<(), FtpClientError> {
    session.send_command(&Command::Mkd(target.path.clone()))?;
    session.read_reply()?;
    Ok(())
}

fn remove_directory(
    session: &mut ControlSession,
    target: &RemoteTarget,
) -> Result<(), FtpClientError> {
    session.send_command(&Command::Rmd(target.path.clone()))?;
    session.read_reply()?;
    Ok(())
}

/// Deletes a file on the server. The user-facing remove operation always
/// addresses the remote target; local deletion exists only as move's
/// cleanup step.
fn remove_remote(
    session: &mut ControlSession,
    target: &RemoteTarget,
) -> Result<(), FtpClientError> {
    session.send_command(&Command::Dele(target.path.clone()))?;
    session.read_reply()?;
    Ok(())
}

/// Copies a file between the server and the local filesystem, in either
/// direction. Exactly one of the operands is remote.
fn copy(
    session: &mut ControlSession,
    src: &RemoteTarget,
    dest: &RemoteTarget,
) -> Result<(), FtpClientError> {
    let mut data = session.open_data_channel()?;

    if src.is_remote {
        session.send_command(&Command::Retr(src.path.clone()))?;
        let content = data.receive_all()?;
        storage::write_file(&dest.path, &content)?;
    } else {
        session.send_command(&Command::Stor(dest.path.clone()))?;
        let content = storage::read_file(&src.path)?;
        data.send_all(&content)?;
    }

    session.read_reply()?;
    data.close();
    Ok(())
}

/// Moves a file as copy-then-delete. Not atomic: when the copy succeeds
/// but the deletion fails, both copies are left extant and the outcome
/// is surfaced as `MoveIncomplete`.
fn move_entry(
    session: &mut ControlSession,
    src: &RemoteTarget,
    dest: &RemoteTarget,
) -> Result<(), FtpClientError> {
    copy(session, src, dest)?;

    // The source is only removed once the copy's completion reply has
    // been read.
    if let Err(cause) = remove_source(session, src) {
        warn!(
            "Copy to {} succeeded but source {} was not removed",
            dest.path, src.path
        );
        return Err(FtpClientError::MoveIncomplete {
            source_path: src.path.clone(),
            cause: Box::new(cause),
        });
    }
    Ok(())
}

fn remove_source(
    session: &mut ControlSession,
    src: &RemoteTarget,
) -> Result<(), FtpClientError> {
    if src.is_remote {
        remove_remote(session, src)
    } else {
        storage::remove_file(&src.path).map_err(FtpClientError::from)
    }
}

fn second_operand(invocation: &Invocation) -> Result<&RemoteTarget, FtpClientError> {
    invocation
        .dest
        .as_ref()
        .ok_or_else(|| {
            UsageError::WrongOperandCount {
                operation: invocation.operation.name(),
                expected: 2,
                got: 1,
            }
            .into()
        })
}
