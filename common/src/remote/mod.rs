// Remote session management
// A session is opened per request, positioned in one site directory, and always closed

mod connection;
mod operations;

pub use connection::{FtpSession, FtpSource};
pub use operations::parse_listing;

use crate::errors::{RemoteError, ResolveError};
use crate::models::RemoteEntry;
use crate::telemetry;
use tracing::warn;

/// Factory for sessions against the remote data source
pub trait RemoteSource: Send + Sync {
    /// Connect, authenticate and change into the directory for `site`.
    ///
    /// A connection that fails after connecting is closed before the fault
    /// is returned.
    fn open(&self, site: &str) -> Result<Box<dyn RemoteSession>, RemoteError>;
}

/// A live connection scoped to one site directory
pub trait RemoteSession: Send {
    fn list(&mut self) -> Result<Vec<RemoteEntry>, RemoteError>;

    /// Read the whole file `name` from the current directory
    fn retrieve(&mut self, name: &str) -> Result<Vec<u8>, RemoteError>;

    /// Terminate the session. Calling it more than once is harmless.
    fn close(&mut self);
}

/// Run `f` against a freshly opened session for `site`.
///
/// The session is closed exactly once after `f` returns, whether it
/// succeeded or not.
pub fn with_session<T, F>(source: &dyn RemoteSource, site: &str, f: F) -> Result<T, ResolveError>
where
    F: FnOnce(&mut dyn RemoteSession) -> Result<T, ResolveError>,
{
    let mut session = source.open(site).map_err(|e| {
        warn!(site = %site, kind = e.kind(), detail = e.detail(), "Failed to open remote session");
        telemetry::record_remote_fault(e.kind());
        e
    })?;
    telemetry::record_session_opened();

    let result = f(session.as_mut());
    session.close();

    if let Err(ResolveError::Remote(e)) = &result {
        warn!(site = %site, kind = e.kind(), detail = e.detail(), "Remote operation failed");
        telemetry::record_remote_fault(e.kind());
    }
    result
}
