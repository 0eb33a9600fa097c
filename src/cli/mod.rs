//! Command-line interface
//!
//! Parses the invocation and validates the operation/operand pairing
//! before any connection is attempted.

pub mod parser;

pub use parser::{Invocation, Operation, build_command, parse_invocation};
