//! Error types
//!
//! Defines domain-specific error types for each module of the FTP client.

use std::fmt;
use std::io;

/// Address parsing errors
#[derive(Debug)]
pub enum AddressError {
    UnsupportedScheme(String),
    MissingHost(String),
    InvalidSyntax(String, url::ParseError),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::UnsupportedScheme(s) => {
                write!(f, "Unsupported scheme '{}': must be an FTP URL or a local path", s)
            }
            AddressError::MissingHost(a) => write!(f, "FTP address has no host: {}", a),
            AddressError::InvalidSyntax(a, e) => write!(f, "Invalid address syntax '{}': {}", a, e),
        }
    }
}

impl std::error::Error for AddressError {}

/// Command-line invocation errors
#[derive(Debug)]
pub enum UsageError {
    UnknownOperation(String),
    WrongOperandCount {
        operation: &'static str,
        expected: usize,
        got: usize,
    },
    RemoteOperandRequired(&'static str),
    ExactlyOneRemoteRequired,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::UnknownOperation(op) => {
                write!(f, "Unknown operation '{}': must be one of ls, mkdir, rm, rmdir, cp, mv", op)
            }
            UsageError::WrongOperandCount {
                operation,
                expected,
                got,
            } => write!(
                f,
                "Operation '{}' takes {} target(s), {} given",
                operation, expected, got
            ),
            UsageError::RemoteOperandRequired(op) => {
                write!(f, "Operation '{}' requires a server address", op)
            }
            UsageError::ExactlyOneRemoteRequired => {
                write!(f, "Exactly one target must be a server address")
            }
        }
    }
}

impl std::error::Error for UsageError {}

/// Connection errors on either channel
#[derive(Debug)]
pub enum ConnectionError {
    ConnectFailed(String, io::Error),
    HostResolutionFailed(String, io::Error),
    NoAddressForHost(String),
    Io(io::Error),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectFailed(endpoint, e) => {
                write!(f, "Failed to connect to {}: {}", endpoint, e)
            }
            ConnectionError::HostResolutionFailed(host, e) => {
                write!(f, "Failed to resolve {}: {}", host, e)
            }
            ConnectionError::NoAddressForHost(host) => {
                write!(f, "No usable address for {}", host)
            }
            ConnectionError::Io(e) => write!(f, "I/O failure on connection: {}", e),
        }
    }
}

impl std::error::Error for ConnectionError {}

/// Control-channel protocol errors
#[derive(Debug)]
pub enum ProtocolError {
    UnexpectedGreeting(String),
    MalformedReply(String),
    TruncatedReply,
    PassiveRefused(String),
    InvalidPassiveEndpoint(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnexpectedGreeting(r) => {
                write!(f, "Did not receive expected greeting from server: {}", r)
            }
            ProtocolError::MalformedReply(r) => write!(f, "Malformed server reply: {}", r),
            ProtocolError::TruncatedReply => {
                write!(f, "Connection closed before a complete reply was received")
            }
            ProtocolError::PassiveRefused(r) => {
                write!(f, "Server refused data transfer: {}", r)
            }
            ProtocolError::InvalidPassiveEndpoint(r) => {
                write!(f, "Server did not provide a valid data endpoint: {}", r)
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Authentication errors during login
#[derive(Debug)]
pub enum AuthError {
    PasswordRequired,
    InvalidCredentials(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::PasswordRequired => {
                write!(f, "Password required by server and none provided")
            }
            AuthError::InvalidCredentials(r) => write!(f, "Invalid credentials: {}", r),
        }
    }
}

impl std::error::Error for AuthError {}

/// Local filesystem errors
#[derive(Debug)]
pub enum StorageError {
    ReadFailed(String, io::Error),
    WriteFailed(String, io::Error),
    RemoveFailed(String, io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed(p, e) => write!(f, "Failed to read local file {}: {}", p, e),
            StorageError::WriteFailed(p, e) => write!(f, "Failed to write local file {}: {}", p, e),
            StorageError::RemoveFailed(p, e) => {
                write!(f, "Failed to remove local file {}: {}", p, e)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// General FTP client error that encompasses all error types
#[derive(Debug)]
pub enum FtpClientError {
    Address(AddressError),
    Usage(UsageError),
    Config(config::ConfigError),
    Connection(ConnectionError),
    Protocol(ProtocolError),
    Auth(AuthError),
    /// Server replied with a 4xx/5xx status code
    Server { code: u16, message: String },
    Storage(StorageError),
    /// The copy step of a move succeeded but the source was not removed,
    /// leaving both copies extant
    MoveIncomplete {
        source_path: String,
        cause: Box<FtpClientError>,
    },
}

impl fmt::Display for FtpClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpClientError::Address(e) => write!(f, "Address error: {}", e),
            FtpClientError::Usage(e) => write!(f, "Usage error: {}", e),
            FtpClientError::Config(e) => write!(f, "Configuration error: {}", e),
            FtpClientError::Connection(e) => write!(f, "Connection error: {}", e),
            FtpClientError::Protocol(e) => write!(f, "Protocol error: {}", e),
            FtpClientError::Auth(e) => write!(f, "Authentication error: {}", e),
            FtpClientError::Server { message, .. } => write!(f, "Server error: {}", message),
            FtpClientError::Storage(e) => write!(f, "Storage error: {}", e),
            FtpClientError::MoveIncomplete { source_path, cause } => write!(
                f,
                "Move incomplete: copy succeeded but source '{}' was not removed: {}",
                source_path, cause
            ),
        }
    }
}

impl std::error::Error for FtpClientError {}

// Implement conversions from specific errors to FtpClientError
impl From<AddressError> for FtpClientError {
    fn from(error: AddressError) -> Self {
        FtpClientError::Address(error)
    }
}

impl From<UsageError> for FtpClientError {
    fn from(error: UsageError) -> Self {
        FtpClientError::Usage(error)
    }
}

impl From<config::ConfigError> for FtpClientError {
    fn from(error: config::ConfigError) -> Self {
        FtpClientError::Config(error)
    }
}

impl From<ConnectionError> for FtpClientError {
    fn from(error: ConnectionError) -> Self {
        FtpClientError::Connection(error)
    }
}

impl From<ProtocolError> for FtpClientError {
    fn from(error: ProtocolError) -> Self {
        FtpClientError::Protocol(error)
    }
}

impl From<AuthError> for FtpClientError {
    fn from(error: AuthError) -> Self {
        FtpClientError::Auth(error)
    }
}

impl From<StorageError> for FtpClientError {
    fn from(error: StorageError) -> Self {
        FtpClientError::Storage(error)
    }
}
