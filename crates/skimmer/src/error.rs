// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for skimmer operations

pub type Result<T> = std::result::Result<T, SkimmerError>;

#[derive(Debug, thiserror::Error)]
pub enum SkimmerError {
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    #[error("object not found: {path}")]
    NotFound { path: String },

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("source unreachable: {message}")]
    SourceUnreachable { message: String },

    #[error("unparseable source: {message}")]
    Format { message: String },

    #[error("query error: {0}")]
    Query(#[from] duckdb::Error),
}

impl SkimmerError {
    /// Transient failures are worth retrying; everything else in the
    /// taxonomy is deterministic.
    pub fn is_transient(&self) -> bool {
        matches!(self, SkimmerError::SourceUnreachable { .. })
    }
}

impl From<object_store::Error> for SkimmerError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { path, .. } => SkimmerError::NotFound { path },
            object_store::Error::Unauthenticated { .. }
            | object_store::Error::PermissionDenied { .. } => SkimmerError::Authentication {
                message: err.to_string(),
            },
            object_store::Error::InvalidPath { .. } => SkimmerError::InvalidRequest {
                message: err.to_string(),
            },
            other => SkimmerError::SourceUnreachable {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        let unreachable = SkimmerError::SourceUnreachable {
            message: "timed out".to_string(),
        };
        assert!(unreachable.is_transient());

        let auth = SkimmerError::Authentication {
            message: "no credentials".to_string(),
        };
        assert!(!auth.is_transient());

        let missing = SkimmerError::NotFound {
            path: "recipes.csv".to_string(),
        };
        assert!(!missing.is_transient());
    }
}
