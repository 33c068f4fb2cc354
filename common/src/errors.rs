// Error handling framework
// Remote faults and resolution errors, classified into client and server errors

use thiserror::Error;

/// Faults raised by the remote data source.
///
/// The `Display` text is the short message shown to HTTP clients; the
/// wrapped string carries the transport detail and is only logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Unable to connect")]
    ConnectFailed(String),

    #[error("Unable to login")]
    AuthFailed(String),

    #[error("Unable to chdir")]
    DirectoryFailed(String),

    #[error("Unable to lookup directory")]
    ListingFailed(String),

    #[error("Unable to start transfer")]
    RetrieveFailed(String),

    #[error("Failed to read data file")]
    ReadFailed(String),
}

impl RemoteError {
    /// Stable label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteError::ConnectFailed(_) => "connect_failed",
            RemoteError::AuthFailed(_) => "auth_failed",
            RemoteError::DirectoryFailed(_) => "directory_failed",
            RemoteError::ListingFailed(_) => "listing_failed",
            RemoteError::RetrieveFailed(_) => "retrieve_failed",
            RemoteError::ReadFailed(_) => "read_failed",
        }
    }

    /// Transport-level detail behind the fault
    pub fn detail(&self) -> &str {
        match self {
            RemoteError::ConnectFailed(d)
            | RemoteError::AuthFailed(d)
            | RemoteError::DirectoryFailed(d)
            | RemoteError::ListingFailed(d)
            | RemoteError::RetrieveFailed(d)
            | RemoteError::ReadFailed(d) => d,
        }
    }
}

/// Errors produced while resolving a radar request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No radar site provided")]
    MissingSite,

    #[error("No product provided")]
    MissingProduct,

    #[error("No filename provided")]
    MissingFilename,

    #[error("Invalid radar site")]
    InvalidSite(String),

    #[error("Invalid product type")]
    InvalidProduct(String),

    #[error("Invalid URL format")]
    InvalidFilename(String),

    #[error("No data available")]
    NoContent,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ResolveError {
    /// Client errors are detected locally, before any remote call
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ResolveError::MissingSite
                | ResolveError::MissingProduct
                | ResolveError::MissingFilename
                | ResolveError::InvalidSite(_)
                | ResolveError::InvalidProduct(_)
                | ResolveError::InvalidFilename(_)
        )
    }

    /// Stable label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            ResolveError::MissingSite => "missing_site",
            ResolveError::MissingProduct => "missing_product",
            ResolveError::MissingFilename => "missing_filename",
            ResolveError::InvalidSite(_) => "invalid_site",
            ResolveError::InvalidProduct(_) => "invalid_product",
            ResolveError::InvalidFilename(_) => "invalid_filename",
            ResolveError::NoContent => "no_content",
            ResolveError::Remote(e) => e.kind(),
        }
    }
}
