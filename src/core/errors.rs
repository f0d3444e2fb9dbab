use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MyoSimError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Malformed projection: {0}")]
    MalformedProjection(String),

    #[error("MyoSimError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for MyoSimError {
    fn from(error: std::io::Error) -> Self {
        MyoSimError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for MyoSimError {
    fn from(error: reqwest::Error) -> Self {
        MyoSimError::Reqwest(Box::new(error))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connection,
    Timeout,
    Status,
    Malformed,
    Other,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Connection => "connection refused",
            FailureKind::Timeout => "timed out",
            FailureKind::Status => "service error",
            FailureKind::Malformed => "malformed response",
            FailureKind::Other => "request failed",
        }
    }
}

/// Cloneable failure outcome handed back from a background request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ProjectionFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl fmt::Display for ProjectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}

impl From<MyoSimError> for ProjectionFailure {
    fn from(error: MyoSimError) -> Self {
        let kind = match &error {
            MyoSimError::Reqwest(e) if e.is_timeout() => FailureKind::Timeout,
            MyoSimError::Reqwest(e) if e.is_connect() => FailureKind::Connection,
            MyoSimError::Reqwest(e) if e.is_decode() || e.is_body() => FailureKind::Malformed,
            MyoSimError::Reqwest(e) if e.is_status() => FailureKind::Status,
            MyoSimError::HttpStatus { .. } => FailureKind::Status,
            MyoSimError::Json(_) | MyoSimError::MalformedProjection(_) => FailureKind::Malformed,
            _ => FailureKind::Other,
        };
        ProjectionFailure::new(kind, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_mapping() {
        let malformed: ProjectionFailure =
            MyoSimError::MalformedProjection("probability 1.4 at index 2".to_string()).into();
        assert_eq!(malformed.kind, FailureKind::Malformed);

        let status: ProjectionFailure =
            MyoSimError::HttpStatus { status: 500, url: "http://127.0.0.1:8000/simulate".into() }
                .into();
        assert_eq!(status.kind, FailureKind::Status);
        assert!(status.to_string().starts_with("service error"));

        let json_err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let json: ProjectionFailure = MyoSimError::from(json_err).into();
        assert_eq!(json.kind, FailureKind::Malformed);

        let custom: ProjectionFailure = MyoSimError::Custom("boom".into()).into();
        assert_eq!(custom.kind, FailureKind::Other);
    }
}
