// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use skimmer::{GcsConfig, SignedAccessIssuer, StorageLocator};

/// Issue a signed URL and print it with its expiry.
pub async fn sign_command(bucket: &str, path: &str, expires_secs: i64) -> Result<()> {
    let locator = StorageLocator::new(bucket, path)?;
    let issuer = SignedAccessIssuer::new(GcsConfig::from_env());
    let access = issuer.issue(&locator, expires_secs).await?;

    println!("{}", access.url);
    println!("expires: {}", access.expires_at.to_rfc3339());
    Ok(())
}
