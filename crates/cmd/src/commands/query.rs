// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io;

use anyhow::{Result, anyhow};
use arrow::util::pretty::pretty_format_batches;
use arrow_csv::WriterBuilder;
use skimmer::RemoteTabularScanner;

use crate::common::SourceArgs;

/// Bind the source as a relation, run the SQL, print the result.
pub async fn query_command(
    source: &SourceArgs,
    sql: &str,
    relation_name: &str,
    output_format: &str,
) -> Result<()> {
    let url = source.resolve_url().await?;

    let scanner = RemoteTabularScanner::new()?;
    let relation = scanner.bind_as(&url, relation_name)?;
    let batches = scanner.query(&relation, sql)?;

    match output_format {
        "table" => {
            println!("{}", pretty_format_batches(&batches)?);
        }
        "csv" => {
            let mut writer = WriterBuilder::new().with_header(true).build(io::stdout());
            for batch in &batches {
                writer.write(batch)?;
            }
        }
        other => return Err(anyhow!("unknown output format: {other}")),
    }

    scanner.unbind(relation)?;
    Ok(())
}
