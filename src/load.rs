//! Loading the schema document from a URL or the local filesystem.

use std::path::Path;

use reqwest::header;

use crate::error::{LoadError, SerdeError};
use crate::parse::Document;

/// Loads and parses the schema document.
///
/// `location` is an `http(s)` URL, a `file://` URL, or a plain file path.
/// The fetch is the run's only suspension point and is not retried; any
/// failure here aborts generation before anything is emitted.
pub async fn load(location: &str) -> Result<Document, LoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        load_remote(location).await
    } else {
        load_file(location)
    }
}

async fn load_remote(location: &str) -> Result<Document, LoadError> {
    let response = reqwest::Client::new()
        .get(location)
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|source| LoadError::Request {
            location: location.to_owned(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            location: location.to_owned(),
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("unrecognized status")
                .to_owned(),
        });
    }

    let body = response.text().await.map_err(|source| LoadError::Request {
        location: location.to_owned(),
        source,
    })?;
    Document::from_json(&body).map_err(|source| parse_error(location, source))
}

fn load_file(location: &str) -> Result<Document, LoadError> {
    let path = Path::new(location.strip_prefix("file://").unwrap_or(location));
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        location: location.to_owned(),
        source,
    })?;

    let result = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => Document::from_yaml(&contents),
        _ => Document::from_json(&contents),
    };
    result.map_err(|source| parse_error(location, source))
}

fn parse_error(location: &str, source: SerdeError) -> LoadError {
    LoadError::Parse {
        location: location.to_owned(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn load_remote_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/swagger/"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"tags": [{"name": "users"}], "paths": {"/users/": {"get": {"tags": ["users"]}}}}"#,
            ))
            .mount(&server)
            .await;

        let doc = load(&format!("{}/swagger/", server.uri())).await.unwrap();
        assert_eq!(doc.tags.len(), 1);
        assert_eq!(doc.paths.len(), 1);
    }

    #[tokio::test]
    async fn load_fails_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = load(&format!("{}/missing/", server.uri())).await.unwrap_err();
        match err {
            LoadError::Status { status, .. } => assert_eq!(status, 404),
            other => panic!("expected a status error, got {other}"),
        }
    }

    #[tokio::test]
    async fn load_fails_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = load(&server.uri()).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[tokio::test]
    async fn load_yaml_file_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "tags:\n  - name: users\npaths: {{}}").unwrap();

        let doc = load(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(doc.tags[0].name, "users");
    }

    #[tokio::test]
    async fn load_missing_file_reports_read_error() {
        let err = load("definitely/not/here.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }
}
