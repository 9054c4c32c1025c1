// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Signed URL issuance for private Google Cloud Storage objects.
//!
//! Issuing a [`SignedAccess`] never moves object bytes through this
//! process: the object is probed with a HEAD request and the URL itself is
//! produced by V4 signing. Two calls with identical inputs produce
//! different signatures because signing includes the current time.

use backon::{ExponentialBuilder, Retryable};
use bytes::Bytes;
use chrono::Utc;
use diagnostics::{log_debug, log_info};
use http::Method;
use object_store::ObjectStore;
use object_store::path::Path;
use object_store::signer::Signer;

use crate::config::GcsConfig;
use crate::error::SkimmerError;
use crate::locator::{SignedAccess, StorageLocator};

pub struct SignedAccessIssuer {
    auth: GcsConfig,
}

impl SignedAccessIssuer {
    pub fn new(auth: GcsConfig) -> Self {
        Self { auth }
    }

    /// Issue a signed URL valid for `validity_secs` seconds.
    ///
    /// Fails with `InvalidRequest` before any remote call when
    /// `validity_secs` is zero or negative. Fails with `NotFound` when no
    /// object exists at the locator. No local ceiling is enforced on the
    /// validity; a service-side rejection of the expiry surfaces as
    /// `InvalidRequest`.
    pub async fn issue(
        &self,
        locator: &StorageLocator,
        validity_secs: i64,
    ) -> crate::Result<SignedAccess> {
        if validity_secs <= 0 {
            return Err(SkimmerError::InvalidRequest {
                message: format!("validity must be positive, got {validity_secs}s"),
            });
        }
        let validity = std::time::Duration::from_secs(validity_secs as u64);

        let store = self.auth.store_for(locator.bucket())?;
        let path = parse_path(locator)?;

        // HEAD probe so an absent object fails as NotFound, not as an
        // opaque fetch error at query time.
        retry_transient(|| async { Ok(store.head(&path).await?) }).await?;

        let url = store
            .signed_url(Method::GET, &path, validity)
            .await
            .map_err(|e| classify_signing_error(e, locator))?;
        let expires_at = Utc::now() + chrono::Duration::seconds(validity_secs);

        log_info!("issued signed URL for {locator}, expires {expires_at}",
            locator: locator.to_string(),
            expires_at: expires_at.to_rfc3339());

        Ok(SignedAccess { url, expires_at })
    }

    /// Whether an object exists at the locator.
    pub async fn exists(&self, locator: &StorageLocator) -> crate::Result<bool> {
        let store = self.auth.store_for(locator.bucket())?;
        let path = parse_path(locator)?;
        match retry_transient(|| async { Ok(store.head(&path).await?) }).await {
            Ok(_) => Ok(true),
            Err(SkimmerError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Download the whole object into memory.
    ///
    /// The direct-download path; prefer issuing a signed URL and letting
    /// the scanner read ranges when the object is large.
    pub async fn fetch(&self, locator: &StorageLocator) -> crate::Result<Bytes> {
        let store = self.auth.store_for(locator.bucket())?;
        let path = parse_path(locator)?;
        let bytes = retry_transient(|| async {
            let result = store.get(&path).await?;
            Ok(result.bytes().await?)
        })
        .await?;
        log_debug!("fetched {locator}: {len} bytes",
            locator: locator.to_string(),
            len: bytes.len());
        Ok(bytes)
    }
}

fn parse_path(locator: &StorageLocator) -> crate::Result<Path> {
    Path::parse(locator.path()).map_err(|e| SkimmerError::InvalidRequest {
        message: format!("invalid object path {}: {e}", locator.path()),
    })
}

/// Retry transient storage failures with exponential backoff. Deterministic
/// failures (authentication, missing object) pass through on first error.
async fn retry_transient<T, F, Fut>(op: F) -> crate::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = crate::Result<T>>,
{
    op.retry(ExponentialBuilder::default())
        .when(SkimmerError::is_transient)
        .notify(|err, dur| {
            log_debug!("retrying transient storage error in {wait_ms}ms: {err}",
                wait_ms: dur.as_millis() as u64,
                err: err.to_string().as_str());
        })
        .await
}

fn classify_signing_error(err: object_store::Error, locator: &StorageLocator) -> SkimmerError {
    let message = err.to_string();
    // GCS caps V4 signed URLs at seven days; the signing layer reports the
    // rejected expiry rather than a distinct error kind.
    if message.contains("expir") {
        SkimmerError::InvalidRequest {
            message: format!("signing rejected for {locator}: {message}"),
        }
    } else {
        err.into()
    }
}
