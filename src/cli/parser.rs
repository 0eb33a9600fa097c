//! Module `parser`
//!
//! Builds the command-line surface and validates the parsed invocation:
//! single-operand operations take exactly one target which must be
//! remote, two-operand operations take two targets of which exactly one
//! is remote.

use clap::{Arg, ArgMatches, Command};

use crate::address::RemoteTarget;
use crate::error::{FtpClientError, UsageError};

/// The closed set of operations the client performs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    List,
    MakeDirectory,
    Remove,
    RemoveDirectory,
    Copy,
    Move,
}

impl Operation {
    /// Maps the command-line name onto the operation.
    pub fn from_name(name: &str) -> Result<Self, UsageError> {
        match name {
            "ls" => Ok(Operation::List),
            "mkdir" => Ok(Operation::MakeDirectory),
            "rm" => Ok(Operation::Remove),
            "rmdir" => Ok(Operation::RemoveDirectory),
            "cp" => Ok(Operation::Copy),
            "mv" => Ok(Operation::Move),
            other => Err(UsageError::UnknownOperation(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::List => "ls",
            Operation::MakeDirectory => "mkdir",
            Operation::Remove => "rm",
            Operation::RemoveDirectory => "rmdir",
            Operation::Copy => "cp",
            Operation::Move => "mv",
        }
    }

    /// How many targets the operation takes.
    pub fn operand_count(&self) -> usize {
        match self {
            Operation::Copy | Operation::Move => 2,
            _ => 1,
        }
    }
}

/// A validated invocation: the operation plus its parsed targets.
///
/// Single-operand operations carry no second target.
#[derive(Debug)]
pub struct Invocation {
    pub operation: Operation,
    pub source: RemoteTarget,
    pub dest: Option<RemoteTarget>,
}

impl Invocation {
    /// The remote operand; validation guarantees exactly one exists.
    pub fn remote_target(&self) -> &RemoteTarget {
        if self.source.is_remote {
            &self.source
        } else if let Some(dest) = &self.dest {
            dest
        } else {
            &self.source
        }
    }
}

/// Builds the clap command-line surface.
pub fn build_command() -> Command {
    Command::new("rax-ftp-client")
        .version(env!("CARGO_PKG_VERSION"))
        .about("FTP client for single file and directory operations")
        .arg(
            Arg::new("operation")
                .value_name("OPERATION")
                .required(true)
                .help("One of: ls, mkdir, rm, rmdir, cp, mv"),
        )
        .arg(
            Arg::new("target")
                .value_name("TARGET")
                .required(true)
                .help("FTP URL (ftp://[user[:password]@]host[:port][/path]) or local path"),
        )
        .arg(
            Arg::new("target2")
                .value_name("TARGET2")
                .help("Second FTP URL or local path (cp and mv only)"),
        )
}

/// Validates the matches into an `Invocation`.
pub fn parse_invocation(matches: &ArgMatches) -> Result<Invocation, FtpClientError> {
    let operation = Operation::from_name(
        matches
            .get_one::<String>("operation")
            .map(String::as_str)
            .unwrap_or(""),
    )?;

    let raw_source = matches
        .get_one::<String>("target")
        .map(String::as_str)
        .unwrap_or("");
    let raw_dest = matches.get_one::<String>("target2").map(String::as_str);

    let given = 1 + usize::from(raw_dest.is_some());
    if given != operation.operand_count() {
        return Err(UsageError::WrongOperandCount {
            operation: operation.name(),
            expected: operation.operand_count(),
            got: given,
        }
        .into());
    }

    let source = RemoteTarget::parse(raw_source)?;
    match raw_dest {
        None => {
            if !source.is_remote {
                return Err(UsageError::RemoteOperandRequired(operation.name()).into());
            }
            Ok(Invocation {
                operation,
                source,
                dest: None,
            })
        }
        Some(raw) => {
            let dest = RemoteTarget::parse(raw)?;
            if source.is_remote == dest.is_remote {
                return Err(UsageError::ExactlyOneRemoteRequired.into());
            }
            Ok(Invocation {
                operation,
                source,
                dest: Some(dest),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invocation_for(args: &[&str]) -> Result<Invocation, FtpClientError> {
        let mut argv = vec!["rax-ftp-client"];
        argv.extend_from_slice(args);
        let matches = build_command().try_get_matches_from(argv).unwrap();
        parse_invocation(&matches)
    }

    #[test]
    fn test_single_operand_operations() {
        for op in ["ls", "mkdir", "rm", "rmdir"] {
            let invocation = invocation_for(&[op, "ftp://host.example/dir"]).unwrap();
            assert_eq!(invocation.operation.name(), op);
            assert!(invocation.source.is_remote);
            assert!(invocation.dest.is_none());
        }
    }

    #[test]
    fn test_copy_remote_to_local() {
        let invocation = invocation_for(&["cp", "ftp://host.example/f", "/tmp/f"]).unwrap();
        assert_eq!(invocation.operation, Operation::Copy);
        assert!(invocation.source.is_remote);
        assert!(!invocation.dest.as_ref().unwrap().is_remote);
        assert!(invocation.remote_target().is_remote);
    }

    #[test]
    fn test_move_local_to_remote() {
        let invocation = invocation_for(&["mv", "/tmp/f", "ftp://host.example/f"]).unwrap();
        assert_eq!(invocation.operation, Operation::Move);
        assert!(!invocation.source.is_remote);
        assert!(invocation.remote_target().is_remote);
    }

    #[test]
    fn test_unknown_operation() {
        assert!(matches!(
            invocation_for(&["stat", "ftp://host.example/f"]),
            Err(FtpClientError::Usage(UsageError::UnknownOperation(_)))
        ));
    }

    #[test]
    fn test_single_operand_must_be_remote() {
        assert!(matches!(
            invocation_for(&["ls", "/local/dir"]),
            Err(FtpClientError::Usage(UsageError::RemoteOperandRequired(_)))
        ));
    }

    #[test]
    fn test_single_operand_rejects_second_target() {
        assert!(matches!(
            invocation_for(&["ls", "ftp://host.example/d", "/tmp/x"]),
            Err(FtpClientError::Usage(UsageError::WrongOperandCount { .. }))
        ));
    }

    #[test]
    fn test_copy_requires_two_targets() {
        assert!(matches!(
            invocation_for(&["cp", "ftp://host.example/f"]),
            Err(FtpClientError::Usage(UsageError::WrongOperandCount { .. }))
        ));
    }

    #[test]
    fn test_both_remote_rejected() {
        assert!(matches!(
            invocation_for(&["cp", "ftp://a.example/f", "ftp://b.example/f"]),
            Err(FtpClientError::Usage(UsageError::ExactlyOneRemoteRequired))
        ));
    }

    #[test]
    fn test_both_local_rejected() {
        assert!(matches!(
            invocation_for(&["mv", "/tmp/a", "/tmp/b"]),
            Err(FtpClientError::Usage(UsageError::ExactlyOneRemoteRequired))
        ));
    }
}
