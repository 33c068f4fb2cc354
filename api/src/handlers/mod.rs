pub mod health;
pub mod listing;
pub mod metrics;
pub mod radar;
pub mod root;

// Common response types
use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use common::errors::ResolveError;
use common::models::FetchedFile;
use tera::Context;
use thiserror::Error;

use crate::templates;

pub const FILENAME_HEADER: HeaderName = HeaderName::from_static("filename");
pub const PREVIOUS_FILENAME_HEADER: HeaderName = HeaderName::from_static("previous-filename");

/// Errors rendered as HTML error pages
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Internal error")]
    Task(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Resolve(e) if e.is_client_error() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut context = Context::new();
        context.insert("status", &status_line(status));
        context.insert("message", &self.to_string());

        (status, Html(templates::render("error.html", &context))).into_response()
    }
}

fn status_line(status: StatusCode) -> String {
    format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    )
}

/// Binary payload response carrying the sequence headers
pub struct FileResponse(pub FetchedFile);

impl IntoResponse for FileResponse {
    fn into_response(self) -> Response {
        let FetchedFile {
            filename,
            previous,
            payload,
        } = self.0;

        let headers = match file_headers(&filename, previous.as_deref().unwrap_or_default()) {
            Ok(headers) => headers,
            Err(e) => {
                tracing::error!(error = %e, filename = %filename, "Invalid header value");
                return ApiError::Task(e.to_string()).into_response();
            }
        };

        (StatusCode::OK, headers, payload).into_response()
    }
}

fn file_headers(
    filename: &str,
    previous: &str,
) -> Result<[(HeaderName, HeaderValue); 4], header::InvalidHeaderValue> {
    Ok([
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        ),
        (
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))?,
        ),
        (FILENAME_HEADER, HeaderValue::from_str(filename)?),
        (PREVIOUS_FILENAME_HEADER, HeaderValue::from_str(previous)?),
    ])
}

/// Run blocking remote work off the async executor
pub async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ResolveError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => {
            tracing::error!(error = %e, "Blocking resolution task failed");
            Err(ApiError::Task(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_client_error_page() {
        let response = ApiError::from(ResolveError::InvalidProduct("N0V".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(
            body_string(response).await,
            "<h1>404 Not Found</h1><h3>Invalid product type</h3>"
        );
    }

    #[tokio::test]
    async fn test_server_error_page() {
        let response = ApiError::from(ResolveError::NoContent).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(response).await,
            "<h1>500 Internal Server Error</h1><h3>No data available</h3>"
        );
    }

    #[tokio::test]
    async fn test_file_response_headers() {
        let response = FileResponse(FetchedFile {
            filename: "sn.0004".to_string(),
            previous: Some("sn.0003".to_string()),
            payload: vec![1, 2, 3],
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/octet-stream");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"sn.0004\""
        );
        assert_eq!(headers["filename"], "sn.0004");
        assert_eq!(headers["previous-filename"], "sn.0003");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], &[1, 2, 3]);
    }

    #[tokio::test]
    async fn test_file_response_without_previous() {
        let response = FileResponse(FetchedFile {
            filename: "README".to_string(),
            previous: None,
            payload: Vec::new(),
        })
        .into_response();

        assert_eq!(response.headers()["previous-filename"], "");
    }

    #[tokio::test]
    async fn test_run_blocking_maps_panics() {
        let result: Result<(), ApiError> = run_blocking(|| panic!("boom")).await;
        assert!(matches!(result, Err(ApiError::Task(_))));
    }
}
