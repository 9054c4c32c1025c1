// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

use anyhow::Result;
use skimmer::{GcsConfig, SignedAccessIssuer, StorageLocator};

/// Download an object and write its bytes to stdout.
pub async fn cat_command(bucket: &str, path: &str) -> Result<()> {
    let locator = StorageLocator::new(bucket, path)?;
    let issuer = SignedAccessIssuer::new(GcsConfig::from_env());
    let bytes = issuer.fetch(&locator).await?;

    std::io::stdout().write_all(&bytes)?;
    Ok(())
}
