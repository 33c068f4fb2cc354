// FTP connection management
// Connect, login and change into the site directory; quit on every exit path

use crate::config::FtpConfig;
use crate::errors::RemoteError;
use crate::models::RemoteEntry;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use suppaftp::{FtpError, FtpResult, FtpStream};
use tracing::{debug, error, info, instrument};

use super::operations;
use super::{RemoteSession, RemoteSource};

/// Opens FTP sessions against the configured radar host
#[derive(Debug, Clone)]
pub struct FtpSource {
    config: FtpConfig,
}

impl FtpSource {
    pub fn new(config: FtpConfig) -> Self {
        Self { config }
    }
}

impl RemoteSource for FtpSource {
    fn open(&self, site: &str) -> Result<Box<dyn RemoteSession>, RemoteError> {
        let session = FtpSession::open(&self.config, site)?;
        Ok(Box::new(session))
    }
}

/// FTP control connection positioned in one site directory
pub struct FtpSession {
    stream: Option<FtpStream>,
    site: String,
}

impl FtpSession {
    /// Establish an FTP session for `site`
    #[instrument(skip(config), fields(host = %config.host, port = config.port))]
    pub fn open(config: &FtpConfig, site: &str) -> Result<Self, RemoteError> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let addr = resolve(&config.host, config.port)?;

        let stream = FtpStream::connect_timeout(addr, timeout)
            .map_err(|e| {
                error!(error = %e, addr = %addr, "Failed to connect");
                RemoteError::ConnectFailed(format!("Failed to connect to {}: {}", addr, e))
            })?
            .passive_stream_builder(move |data_addr| open_data_channel(data_addr, timeout));

        let mut session = Self {
            stream: Some(stream),
            site: site.to_string(),
        };

        // The control socket is live from here on; any failure must quit it
        if let Err(e) = session.prepare(config, timeout) {
            session.close();
            return Err(e);
        }

        info!(site = %site, "FTP session established");
        Ok(session)
    }

    fn prepare(&mut self, config: &FtpConfig, timeout: Duration) -> Result<(), RemoteError> {
        let stream = self.stream_mut(RemoteError::ConnectFailed)?;

        let socket = stream.get_ref();
        socket
            .set_read_timeout(Some(timeout))
            .and_then(|_| socket.set_write_timeout(Some(timeout)))
            .map_err(|e| {
                RemoteError::ConnectFailed(format!("Failed to set socket timeouts: {}", e))
            })?;

        stream
            .login(config.username.as_str(), config.password.as_str())
            .map_err(|e| {
                error!(error = %e, username = %config.username, "FTP login failed");
                RemoteError::AuthFailed(format!(
                    "Login failed for user {}: {}",
                    config.username, e
                ))
            })?;

        let directory = config.directory_for(&self.site);
        let stream = self.stream_mut(RemoteError::DirectoryFailed)?;
        stream.cwd(directory.as_str()).map_err(|e| {
            error!(error = %e, directory = %directory, "Failed to change directory");
            RemoteError::DirectoryFailed(format!(
                "Failed to change into {}: {}",
                directory, e
            ))
        })?;

        debug!(directory = %directory, "Changed into site directory");
        Ok(())
    }

    fn stream_mut(
        &mut self,
        fault: fn(String) -> RemoteError,
    ) -> Result<&mut FtpStream, RemoteError> {
        self.stream
            .as_mut()
            .ok_or_else(|| fault("FTP session already closed".to_string()))
    }
}

impl RemoteSession for FtpSession {
    fn list(&mut self) -> Result<Vec<RemoteEntry>, RemoteError> {
        let stream = self.stream_mut(RemoteError::ListingFailed)?;
        operations::list_entries(stream)
    }

    fn retrieve(&mut self, name: &str) -> Result<Vec<u8>, RemoteError> {
        let stream = self.stream_mut(RemoteError::RetrieveFailed)?;
        operations::retrieve_file(stream, name)
    }

    fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            match stream.quit() {
                Ok(()) => debug!(site = %self.site, "FTP session closed"),
                Err(e) => debug!(site = %self.site, error = %e, "FTP quit failed; dropping connection"),
            }
        }
    }
}

impl Drop for FtpSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// Passive data connections get the same bounds as the control socket,
/// so a stalled LIST or RETR fails instead of blocking forever
fn open_data_channel(addr: SocketAddr, timeout: Duration) -> FtpResult<TcpStream> {
    let stream = TcpStream::connect_timeout(&addr, timeout).map_err(FtpError::ConnectionError)?;
    stream
        .set_read_timeout(Some(timeout))
        .and_then(|_| stream.set_write_timeout(Some(timeout)))
        .map_err(FtpError::ConnectionError)?;
    Ok(stream)
}

fn resolve(host: &str, port: u16) -> Result<SocketAddr, RemoteError> {
    (host, port)
        .to_socket_addrs()
        .map_err(|e| {
            error!(error = %e, host = %host, "Failed to resolve FTP host");
            RemoteError::ConnectFailed(format!("Failed to resolve {}:{}: {}", host, port, e))
        })?
        .next()
        .ok_or_else(|| RemoteError::ConnectFailed(format!("No address for {}:{}", host, port)))
}
