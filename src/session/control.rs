//! Module `control`
//!
//! Manages the command connection's lifecycle: connect, login, send
//! commands, read and classify replies, and negotiate passive-mode data
//! channels. Any failure abandons the session; the stream is released by
//! drop on every exit path.

use log::{debug, info};
use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use crate::address::RemoteTarget;
use crate::config::ClientConfig;
use crate::error::{AuthError, ConnectionError, FtpClientError, ProtocolError, UsageError};
use crate::protocol::commands::Command;
use crate::protocol::passive::parse_passive_reply;
use crate::protocol::reply::{self, Reply};
use crate::transfer::DataChannel;

/// The authenticated command-channel connection.
///
/// Created once per invocation and driven through the fixed sequence
/// connect, login, execute, quit.
pub struct ControlSession {
    stream: TcpStream,
    target: RemoteTarget,
    config: ClientConfig,
}

impl ControlSession {
    /// Opens the control connection to the target's host and port.
    pub fn connect(
        target: RemoteTarget,
        config: ClientConfig,
    ) -> Result<Self, FtpClientError> {
        let host = target
            .host
            .as_deref()
            .ok_or(UsageError::RemoteOperandRequired("connect"))?;
        let endpoint = format!("{}:{}", host, target.port);

        let addr = resolve(&endpoint)?;
        let stream = TcpStream::connect_timeout(&addr, config.connect_timeout())
            .map_err(|e| ConnectionError::ConnectFailed(endpoint.clone(), e))?;
        stream
            .set_read_timeout(Some(config.read_timeout()))
            .map_err(ConnectionError::Io)?;

        info!("Control channel connected to {} ({})", endpoint, addr);
        Ok(Self {
            stream,
            target,
            config,
        })
    }

    /// Logs in and sets the transfer parameters.
    ///
    /// Requires the 220 greeting, then runs the USER/PASS exchange: a 331
    /// with no stored password aborts before any PASS is sent, a 230
    /// skips the password step entirely. Afterwards binary type, stream
    /// mode, and file structure are set in fixed order.
    pub fn login(&mut self) -> Result<(), FtpClientError> {
        let greeting = self.read_reply()?;
        if greeting.code != reply::READY {
            return Err(ProtocolError::UnexpectedGreeting(greeting.message().to_string()).into());
        }

        self.send_command(&Command::User(self.target.user.clone()))?;
        let user_reply = self.login_reply()?;

        match user_reply.code {
            reply::PASSWORD_REQUIRED if self.target.password.is_empty() => {
                return Err(AuthError::PasswordRequired.into());
            }
            reply::LOGIN_SUCCESS => {
                debug!("Server accepted USER without a password");
            }
            _ => {
                self.send_command(&Command::Pass(self.target.password.clone()))?;
                self.login_reply()?;
            }
        }

        for command in [Command::TypeImage, Command::ModeStream, Command::StruFile] {
            self.send_command(&command)?;
            self.read_reply()?;
        }

        info!("Logged in as {}", self.target.user);
        Ok(())
    }

    /// Writes one command to the control channel. Replies are read
    /// separately so commands whose reply arrives only after a
    /// data-channel event can interleave the two.
    pub fn send_command(&mut self, command: &Command) -> Result<(), FtpClientError> {
        debug!("--> {}", command);
        self.stream
            .write_all(command.to_wire().as_bytes())
            .map_err(ConnectionError::Io)?;
        self.stream.flush().map_err(ConnectionError::Io)?;
        Ok(())
    }

    /// Reads and classifies one reply from the control channel.
    pub fn read_reply(&mut self) -> Result<Reply, FtpClientError> {
        let parsed = reply::read_reply(&mut self.stream)?;
        debug!("<-- {}", parsed.message());
        Ok(parsed)
    }

    // During login a 530 means rejected credentials rather than a generic
    // server failure.
    fn login_reply(&mut self) -> Result<Reply, FtpClientError> {
        match self.read_reply() {
            Err(FtpClientError::Server {
                code: reply::AUTH_FAILED,
                message,
            }) => Err(AuthError::InvalidCredentials(message).into()),
            other => other,
        }
    }

    /// Negotiates passive mode and connects a fresh data channel to the
    /// endpoint the server advertises. Called anew for every transfer;
    /// passive addresses are never cached.
    pub fn open_data_channel(&mut self) -> Result<DataChannel, FtpClientError> {
        self.send_command(&Command::Pasv)?;
        let pasv_reply = self.read_reply()?;
        let addr = parse_passive_reply(&pasv_reply)?;
        DataChannel::connect(addr, &self.config)
    }

    /// Ends the session: QUIT, read its reply, close the connection.
    pub fn quit(mut self) -> Result<(), FtpClientError> {
        self.send_command(&Command::Quit)?;
        self.read_reply()?;
        info!("Control session closed");
        Ok(())
    }

    /// The remote target this session authenticated against.
    pub fn target(&self) -> &RemoteTarget {
        &self.target
    }
}

fn resolve(endpoint: &str) -> Result<SocketAddr, FtpClientError> {
    let mut addrs = endpoint
        .to_socket_addrs()
        .map_err(|e| ConnectionError::HostResolutionFailed(endpoint.to_string(), e))?;
    addrs
        .next()
        .ok_or_else(|| ConnectionError::NoAddressForHost(endpoint.to_string()).into())
}
