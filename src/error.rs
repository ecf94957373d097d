use std::io;

/// A failure deserializing the schema document, with the JSON path to the
/// offending value where available.
#[derive(Debug, thiserror::Error)]
pub enum SerdeError {
    #[error(transparent)]
    Json(#[from] serde_path_to_error::Error<serde_json::Error>),
    #[error(transparent)]
    Yaml(#[from] serde_path_to_error::Error<serde_yaml::Error>),
}

/// A failure loading the schema document. Any of these aborts the whole
/// generation run; no artifacts are written.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The request never produced a response.
    #[error("request for `{location}` failed: {source}")]
    Request {
        location: String,
        source: reqwest::Error,
    },
    /// The server answered outside the 2xx range.
    #[error("fetching `{location}` failed: {status} {reason}")]
    Status {
        location: String,
        status: u16,
        reason: String,
    },
    #[error("failed to read `{location}`: {source}")]
    Read { location: String, source: io::Error },
    #[error("failed to parse the document from `{location}`: {source}")]
    Parse {
        location: String,
        source: SerdeError,
    },
}
