// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Storage locators and the signed access tokens derived from them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::SkimmerError;

/// Identifies one object in cloud storage. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocator {
    bucket: String,
    path: String,
}

impl StorageLocator {
    pub fn new(bucket: impl Into<String>, path: impl Into<String>) -> crate::Result<Self> {
        let bucket = bucket.into();
        let path = path.into();
        if bucket.is_empty() {
            return Err(SkimmerError::InvalidRequest {
                message: "bucket name must not be empty".to_string(),
            });
        }
        if path.is_empty() {
            return Err(SkimmerError::InvalidRequest {
                message: "object path must not be empty".to_string(),
            });
        }
        Ok(Self { bucket, path })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for StorageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gs://{}/{}", self.bucket, self.path)
    }
}

impl FromStr for StorageLocator {
    type Err = SkimmerError;

    /// Parse a `gs://bucket/path/to/object` reference.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix("gs://")
            .ok_or_else(|| SkimmerError::InvalidRequest {
                message: format!("expected gs://bucket/path, got {s}"),
            })?;
        let (bucket, path) = rest
            .split_once('/')
            .ok_or_else(|| SkimmerError::InvalidRequest {
                message: format!("missing object path in {s}"),
            })?;
        Self::new(bucket, path)
    }
}

/// A time-limited signed URL for one object.
///
/// Owned by the caller that requested it. Becomes invalid (but is not
/// actively revoked) once `expires_at` passes.
#[derive(Debug, Clone)]
pub struct SignedAccess {
    pub url: Url,
    pub expires_at: DateTime<Utc>,
}

impl SignedAccess {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
