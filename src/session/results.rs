//! Session result types
//!
//! Defines the outcome returned by operation execution.

/// What an executed operation produced.
#[derive(Debug, PartialEq)]
pub enum OperationOutcome {
    /// Directory listing bytes received over the data channel
    Listing(Vec<u8>),
    /// The operation completed with no output
    Completed,
}
