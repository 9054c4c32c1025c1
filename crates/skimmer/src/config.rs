// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Explicit configuration for the issuer and scanner.
//!
//! Credentials are carried in a plain struct handed to the constructors;
//! nothing here reads or writes process-global state after construction.

use std::path::PathBuf;
use std::time::Duration;

use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};
use serde::{Deserialize, Serialize};

use crate::error::SkimmerError;

/// Google Cloud Storage credentials.
///
/// Exactly one source is used, in order: an inline service-account key,
/// a service-account file path, then whatever the builder's environment
/// fallback finds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GcsConfig {
    /// Path to a service-account JSON file.
    pub service_account_path: Option<PathBuf>,
    /// Inline service-account JSON.
    pub service_account_key: Option<String>,
}

impl GcsConfig {
    /// Read credentials from the conventional environment variables:
    /// GOOGLE_SERVICE_ACCOUNT_KEY (inline JSON) or
    /// GOOGLE_APPLICATION_CREDENTIALS (file path).
    pub fn from_env() -> Self {
        Self {
            service_account_path: std::env::var("GOOGLE_APPLICATION_CREDENTIALS")
                .ok()
                .map(PathBuf::from),
            service_account_key: std::env::var("GOOGLE_SERVICE_ACCOUNT_KEY").ok(),
        }
    }

    /// Build a GCS client scoped to one bucket.
    pub(crate) fn store_for(&self, bucket: &str) -> crate::Result<GoogleCloudStorage> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);

        if let Some(key) = &self.service_account_key {
            builder = builder.with_service_account_key(key);
        } else if let Some(path) = &self.service_account_path {
            builder = builder.with_service_account_path(path.to_string_lossy());
        }

        builder.build().map_err(|e| SkimmerError::Authentication {
            message: format!("cannot build storage client for bucket {bucket}: {e}"),
        })
    }
}

/// Tuning for the remote tabular scanner.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Relation name used by `bind` when the caller does not pick one.
    pub default_relation: String,
    /// Per-request timeout applied to remote reads through httpfs.
    pub http_timeout: Duration,
    /// Retry count httpfs applies to failed remote reads.
    pub http_retries: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            default_relation: "csv_data".to_string(),
            http_timeout: Duration::from_secs(30),
            http_retries: 3,
        }
    }
}
