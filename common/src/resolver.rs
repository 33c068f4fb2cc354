// Resolution service
// Maps "latest" and "before" requests onto concrete remote sequence files

use crate::errors::ResolveError;
use crate::models::{FetchedFile, RemoteEntry, Resolution};
use crate::remote::{with_session, RemoteSource};
use crate::sequence::{decode_index, predecessor_name};
use crate::snapshot::DirectorySnapshot;
use crate::telemetry;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Resolves radar requests against a remote source.
///
/// Every method validates its input before touching the network and
/// opens at most one session, which is closed before it returns.
#[derive(Clone)]
pub struct Resolver {
    source: Arc<dyn RemoteSource>,
    product: String,
}

impl Resolver {
    pub fn new(source: Arc<dyn RemoteSource>, product: impl Into<String>) -> Self {
        Self {
            source,
            product: product.into(),
        }
    }

    /// Fetch the newest file for `site`, unless the client already holds it
    #[instrument(skip(self))]
    pub fn resolve_latest(
        &self,
        site: &str,
        product: &str,
        reference: Option<&str>,
    ) -> Result<Resolution, ResolveError> {
        let result = self.latest_inner(site, product, reference);
        let outcome = match &result {
            Ok(Resolution::Fetched(_)) => "ok",
            Ok(Resolution::Unchanged) => "unchanged",
            Err(e) => outcome_label(e),
        };
        telemetry::record_resolution("latest", outcome);
        result
    }

    fn latest_inner(
        &self,
        site: &str,
        product: &str,
        reference: Option<&str>,
    ) -> Result<Resolution, ResolveError> {
        self.validate_product(product)?;
        if let Some(reference) = reference {
            if decode_index(reference).is_none() {
                return Err(ResolveError::InvalidFilename(reference.to_string()));
            }
        }
        validate_site(site)?;

        with_session(self.source.as_ref(), site, |session| {
            let snapshot = DirectorySnapshot::build(session.list()?);
            let latest = snapshot.latest().ok_or(ResolveError::NoContent)?;
            debug!(site = %site, entries = snapshot.len(), latest = %latest.name, "Resolved latest entry");

            if reference == Some(latest.name.as_str()) {
                info!(site = %site, filename = %latest.name, "Client already has latest file");
                return Ok(Resolution::Unchanged);
            }

            let filename = latest.name.clone();
            let payload = session.retrieve(&filename)?;
            telemetry::record_payload_size(payload.len());
            info!(site = %site, filename = %filename, size = payload.len(), "Fetched latest file");

            Ok(Resolution::Fetched(FetchedFile {
                previous: predecessor_name(&filename),
                filename,
                payload,
            }))
        })
    }

    /// Fetch the file immediately preceding `excluded` in the sequence.
    ///
    /// The target is computed from the index alone; the directory is not
    /// listed.
    #[instrument(skip(self))]
    pub fn resolve_before(
        &self,
        site: &str,
        product: &str,
        excluded: &str,
    ) -> Result<FetchedFile, ResolveError> {
        let result = self.before_inner(site, product, excluded);
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => outcome_label(e),
        };
        telemetry::record_resolution("before", outcome);
        result
    }

    fn before_inner(
        &self,
        site: &str,
        product: &str,
        excluded: &str,
    ) -> Result<FetchedFile, ResolveError> {
        self.validate_product(product)?;
        let filename = predecessor_name(excluded)
            .ok_or_else(|| ResolveError::InvalidFilename(excluded.to_string()))?;
        let previous = predecessor_name(&filename);
        validate_site(site)?;

        let payload = with_session(self.source.as_ref(), site, |session| {
            Ok(session.retrieve(&filename)?)
        })?;
        telemetry::record_payload_size(payload.len());
        info!(site = %site, filename = %filename, size = payload.len(), "Fetched previous file");

        Ok(FetchedFile {
            filename,
            previous,
            payload,
        })
    }

    /// Ordered, sentinel-free listing of a site directory
    #[instrument(skip(self))]
    pub fn list_directory(&self, site: &str) -> Result<Vec<RemoteEntry>, ResolveError> {
        validate_site(site)?;
        let snapshot = with_session(self.source.as_ref(), site, |session| {
            Ok(DirectorySnapshot::build(session.list()?))
        })?;
        debug!(site = %site, entries = snapshot.len(), "Listed site directory");
        Ok(snapshot.into_entries())
    }

    fn validate_product(&self, product: &str) -> Result<(), ResolveError> {
        if product != self.product {
            return Err(ResolveError::InvalidProduct(product.to_string()));
        }
        Ok(())
    }
}

/// Sites are short station codes; anything else could escape the
/// templated directory
fn validate_site(site: &str) -> Result<(), ResolveError> {
    if site.is_empty() {
        return Err(ResolveError::MissingSite);
    }
    if !site.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ResolveError::InvalidSite(site.to_string()));
    }
    Ok(())
}

fn outcome_label(err: &ResolveError) -> &'static str {
    if err.is_client_error() {
        "client_error"
    } else {
        "server_error"
    }
}
