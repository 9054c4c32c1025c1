// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Skimmer - signed access to cloud storage objects and ad-hoc SQL over
//! remote CSV resources.
//!
//! Two components, composed linearly:
//! - [`SignedAccessIssuer`] turns a bucket/path locator into a time-limited
//!   signed URL without moving object bytes through this process.
//! - [`RemoteTabularScanner`] binds a URL (signed or plain) as a DuckDB
//!   relation and runs read-only SQL against it, including the column-wise
//!   substring scan.
//!
//! Set SKIMMER_LOG to control logging (off/error/warn/info/debug).

// Storage locators and signed access tokens
pub mod locator;

// Explicit configuration structs (no process-global credential state)
pub mod config;

// Error taxonomy
pub mod error;

// Signed URL issuance against Google Cloud Storage
pub mod issuer;

// DuckDB-backed remote CSV scanning
pub mod scanner;

#[cfg(test)]
mod tests;

// Re-export key types
pub use config::{GcsConfig, ScannerConfig};
pub use error::{Result, SkimmerError};
pub use issuer::SignedAccessIssuer;
pub use locator::{SignedAccess, StorageLocator};
pub use scanner::{ColumnMatchReport, RemoteRelation, RemoteTabularScanner};
