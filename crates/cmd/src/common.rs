// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Shared argument handling for subcommands that read a CSV source.

use anyhow::{Result, anyhow};
use clap::Args;
use skimmer::{GcsConfig, SignedAccessIssuer, StorageLocator};

/// Where the CSV lives: either a ready-to-use URL (signed or public), or a
/// bucket/path pair that gets a signed URL issued first.
#[derive(Args)]
pub struct SourceArgs {
    /// URL of the CSV resource (skips signing)
    #[arg(long, conflicts_with_all = ["bucket", "path"])]
    pub url: Option<String>,

    /// Bucket holding the object
    #[arg(long, requires = "path")]
    pub bucket: Option<String>,

    /// Object path within the bucket
    #[arg(long, requires = "bucket")]
    pub path: Option<String>,

    /// Validity of the issued signed URL in seconds
    #[arg(long, default_value_t = 3600)]
    pub expires_secs: i64,
}

impl SourceArgs {
    /// Resolve the arguments to a URL the scanner can bind, issuing a
    /// signed URL when a bucket/path pair was given.
    pub async fn resolve_url(&self) -> Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }
        match (&self.bucket, &self.path) {
            (Some(bucket), Some(path)) => {
                let locator = StorageLocator::new(bucket.clone(), path.clone())?;
                let issuer = SignedAccessIssuer::new(GcsConfig::from_env());
                let access = issuer.issue(&locator, self.expires_secs).await?;
                Ok(access.url.to_string())
            }
            _ => Err(anyhow!("provide either --url or --bucket with --path")),
        }
    }
}
