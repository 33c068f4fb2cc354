// Path segment parsing for the radar routes
// `/latest/{site}/{product}[/{reference}]` and `/before/{site}/{product}/{filename}`

use common::errors::ResolveError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRequest {
    pub site: String,
    pub product: String,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeforeRequest {
    pub site: String,
    pub product: String,
    pub excluded: String,
}

/// Segments after the route name; empty segments count as absent
fn segments(path: &str) -> Vec<Option<&str>> {
    path.trim_matches('/')
        .split('/')
        .skip(1)
        .map(|s| (!s.is_empty()).then_some(s))
        .collect()
}

fn segment<'a>(parts: &[Option<&'a str>], index: usize) -> Option<&'a str> {
    parts.get(index).copied().flatten()
}

fn site_and_product(parts: &[Option<&str>]) -> Result<(String, String), ResolveError> {
    let site = segment(parts, 0).ok_or(ResolveError::MissingSite)?;
    let product = segment(parts, 1).ok_or(ResolveError::MissingProduct)?;
    Ok((site.to_string(), product.to_string()))
}

pub fn parse_latest(path: &str) -> Result<LatestRequest, ResolveError> {
    let parts = segments(path);
    let (site, product) = site_and_product(&parts)?;
    Ok(LatestRequest {
        site,
        product,
        reference: segment(&parts, 2).map(str::to_string),
    })
}

pub fn parse_before(path: &str) -> Result<BeforeRequest, ResolveError> {
    let parts = segments(path);
    let (site, product) = site_and_product(&parts)?;
    let excluded = segment(&parts, 2).ok_or(ResolveError::MissingFilename)?;
    Ok(BeforeRequest {
        site,
        product,
        excluded: excluded.to_string(),
    })
}

/// Site for `/ls[/{site}]`, falling back to `default_site`
pub fn parse_listing(path: &str, default_site: &str) -> String {
    segment(&segments(path), 0)
        .unwrap_or(default_site)
        .to_string()
}
