// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod common;

use common::SourceArgs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "skim")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a time-limited signed URL for a private storage object
    Sign {
        /// Bucket holding the object
        bucket: String,
        /// Object path within the bucket
        path: String,
        /// Validity of the signed URL in seconds
        #[arg(long, default_value_t = 3600)]
        expires_secs: i64,
    },
    /// Run SQL against a remote CSV resource
    Query {
        /// SQL statement; the source is bound as the --relation view
        sql: String,
        #[command(flatten)]
        source: SourceArgs,
        /// Relation name the SQL refers to
        #[arg(long, default_value = "csv_data")]
        relation: String,
        /// Output format: table or csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Report which columns of a remote CSV contain a substring
    Scan {
        /// Substring to look for (LIKE wildcards pass through)
        needle: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Write a storage object's bytes to stdout
    Cat {
        /// Bucket holding the object
        bucket: String,
        /// Object path within the bucket
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    diagnostics::init_diagnostics();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sign {
            bucket,
            path,
            expires_secs,
        } => commands::sign_command(&bucket, &path, expires_secs).await,
        Commands::Query {
            sql,
            source,
            relation,
            format,
        } => commands::query_command(&source, &sql, &relation, &format).await,
        Commands::Scan { needle, source } => commands::scan_command(&source, &needle).await,
        Commands::Cat { bucket, path } => commands::cat_command(&bucket, &path).await,
    }
}
