//! Module `commands`
//!
//! Defines the FTP commands the client issues on the control channel and
//! their wire rendering.

use std::fmt;

/// Represents an FTP command sent to the server.
///
/// Commands that take an argument store it as a `String` variant.
#[derive(Debug, PartialEq)]
pub enum Command {
    User(String), // Username for login
    Pass(String), // Password for login
    TypeImage,    // TYPE I - binary transfer type
    ModeStream,   // MODE S - stream transfer mode
    StruFile,     // STRU F - file structure
    Pasv,         // Enter passive mode
    List(String), // List directory contents
    Mkd(String),  // Make directory
    Rmd(String),  // Remove directory
    Dele(String), // Delete file
    Retr(String), // Retrieve/download file
    Stor(String), // Store/upload file
    Quit,
}

impl Command {
    /// Renders the command as sent on the wire, terminated by CRLF.
    pub fn to_wire(&self) -> String {
        match self {
            Command::User(name) => format!("USER {}\r\n", name),
            Command::Pass(password) => format!("PASS {}\r\n", password),
            Command::TypeImage => "TYPE I\r\n".to_string(),
            Command::ModeStream => "MODE S\r\n".to_string(),
            Command::StruFile => "STRU F\r\n".to_string(),
            Command::Pasv => "PASV\r\n".to_string(),
            Command::List(path) => format!("LIST {}\r\n", path),
            Command::Mkd(path) => format!("MKD {}\r\n", path),
            Command::Rmd(path) => format!("RMD {}\r\n", path),
            Command::Dele(path) => format!("DELE {}\r\n", path),
            Command::Retr(path) => format!("RETR {}\r\n", path),
            Command::Stor(path) => format!("STOR {}\r\n", path),
            Command::Quit => "QUIT\r\n".to_string(),
        }
    }
}

/// Log-safe form of the command. Credentials are never written to logs.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Pass(_) => write!(f, "PASS ****"),
            other => write!(f, "{}", other.to_wire().trim_end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_rendering() {
        assert_eq!(Command::User("bob".to_string()).to_wire(), "USER bob\r\n");
        assert_eq!(Command::Pass("secret".to_string()).to_wire(), "PASS secret\r\n");
        assert_eq!(Command::TypeImage.to_wire(), "TYPE I\r\n");
        assert_eq!(Command::ModeStream.to_wire(), "MODE S\r\n");
        assert_eq!(Command::StruFile.to_wire(), "STRU F\r\n");
        assert_eq!(Command::Pasv.to_wire(), "PASV\r\n");
        assert_eq!(Command::List("/dir".to_string()).to_wire(), "LIST /dir\r\n");
        assert_eq!(Command::Retr("/f.txt".to_string()).to_wire(), "RETR /f.txt\r\n");
        assert_eq!(Command::Quit.to_wire(), "QUIT\r\n");
    }

    #[test]
    fn test_display_redacts_password() {
        let cmd = Command::Pass("hunter2".to_string());
        assert_eq!(cmd.to_string(), "PASS ****");
        assert!(!cmd.to_string().contains("hunter2"));
    }

    #[test]
    fn test_display_matches_wire_for_other_commands() {
        assert_eq!(Command::Mkd("/d".to_string()).to_string(), "MKD /d");
        assert_eq!(Command::Quit.to_string(), "QUIT");
    }
}
