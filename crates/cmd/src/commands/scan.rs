// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use skimmer::RemoteTabularScanner;

use crate::common::SourceArgs;

/// Scan every column of the source for a substring and print the columns
/// that contain it, in schema order.
pub async fn scan_command(source: &SourceArgs, needle: &str) -> Result<()> {
    let url = source.resolve_url().await?;

    let scanner = RemoteTabularScanner::new()?;
    let relation = scanner.bind(&url)?;
    let report = scanner.find_columns_containing(&relation, needle)?;

    if report.is_empty() {
        println!("no columns contain {needle:?}");
    } else {
        println!("columns containing {needle:?}: {}", report.join(", "));
    }

    scanner.unbind(relation)?;
    Ok(())
}
