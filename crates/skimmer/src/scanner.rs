// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Remote tabular scanning over an embedded DuckDB connection.
//!
//! A CSV resource (signed URL, plain URL, or local path) is bound as a
//! named view over `read_csv_auto`, so schema inference and row reads are
//! the engine's concern and remote reads stay demand-driven through the
//! httpfs extension instead of downloading the whole object.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use diagnostics::{log_debug, log_info, log_warn};
use duckdb::arrow::record_batch::RecordBatch;
use duckdb::{Connection, params};

use crate::config::ScannerConfig;
use crate::error::SkimmerError;

/// Column names, in schema order, whose values contain a needle.
pub type ColumnMatchReport = Vec<String>;

/// A named view bound to one source URL for the lifetime of a scanner
/// session. No two relations with the same name may coexist in a session.
#[derive(Debug)]
pub struct RemoteRelation {
    name: String,
    url: String,
}

impl RemoteRelation {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

pub struct RemoteTabularScanner {
    conn: Connection,
    config: ScannerConfig,
    bound: RefCell<BTreeSet<String>>,
    httpfs_loaded: Cell<bool>,
}

impl RemoteTabularScanner {
    pub fn new() -> crate::Result<Self> {
        Self::with_config(ScannerConfig::default())
    }

    pub fn with_config(config: ScannerConfig) -> crate::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            config,
            bound: RefCell::new(BTreeSet::new()),
            httpfs_loaded: Cell::new(false),
        })
    }

    /// Bind a CSV resource under the configured default relation name.
    pub fn bind(&self, url: &str) -> crate::Result<RemoteRelation> {
        let name = self.config.default_relation.clone();
        self.bind_as(url, &name)
    }

    /// Bind a CSV resource as a named relation.
    ///
    /// Schema comes from the header row and the engine's sampling; binding
    /// does not download the full resource. An unreachable URL fails as
    /// `SourceUnreachable`, unparseable content as `Format`; a silently
    /// empty relation is never produced.
    pub fn bind_as(&self, url: &str, name: &str) -> crate::Result<RemoteRelation> {
        if name.is_empty() {
            return Err(SkimmerError::InvalidRequest {
                message: "relation name must not be empty".to_string(),
            });
        }
        if self.bound.borrow().contains(name) {
            return Err(SkimmerError::InvalidRequest {
                message: format!("relation {name} is already bound in this session"),
            });
        }
        if url.starts_with("http://") || url.starts_with("https://") {
            self.ensure_httpfs()?;
        }

        let sql = format!(
            "CREATE VIEW {} AS SELECT * FROM read_csv_auto({})",
            quote_ident(name),
            quote_literal(url)
        );
        self.conn
            .execute_batch(&sql)
            .map_err(|e| classify_bind_error(&e))?;
        self.bound.borrow_mut().insert(name.to_string());

        log_info!("bound relation {name} to {url}", name: name, url: url);
        Ok(RemoteRelation {
            name: name.to_string(),
            url: url.to_string(),
        })
    }

    /// Drop a relation and free its name for rebinding.
    ///
    /// The handle is consumed, so the name is released up front; a failed
    /// drop still leaves the name available for a fresh bind.
    pub fn unbind(&self, relation: RemoteRelation) -> crate::Result<()> {
        self.bound.borrow_mut().remove(&relation.name);
        let sql = format!("DROP VIEW IF EXISTS {}", quote_ident(&relation.name));
        self.conn.execute_batch(&sql)?;
        let name = relation.name.as_str();
        log_debug!("unbound relation {name}", name: name);
        Ok(())
    }

    /// Execute read-only SQL against a bound relation and return Arrow
    /// batches.
    ///
    /// Malformed SQL or unknown columns fail with `Query`. Repeating the
    /// same statement against an unexpired relation yields identical rows.
    pub fn query(
        &self,
        relation: &RemoteRelation,
        sql: &str,
    ) -> crate::Result<Vec<RecordBatch>> {
        self.check_bound(relation)?;
        log_debug!("executing SQL: {sql}", sql: sql);
        let mut stmt = self.conn.prepare(sql)?;
        let batches: Vec<RecordBatch> = stmt.query_arrow([])?.collect();
        Ok(batches)
    }

    /// Column names of a relation in schema order (one metadata query).
    pub fn columns(&self, relation: &RemoteRelation) -> crate::Result<Vec<String>> {
        self.check_bound(relation)?;
        let mut stmt = self.conn.prepare(
            "SELECT column_name FROM duckdb_columns() \
             WHERE table_name = ? ORDER BY column_index",
        )?;
        let columns = stmt
            .query_map(params![relation.name()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, duckdb::Error>>()?;
        Ok(columns)
    }

    /// Report which columns of the relation contain `needle` in at least
    /// one row, in schema order.
    ///
    /// Every column is scanned uniformly as text via `CAST(col AS
    /// VARCHAR) LIKE '%' || needle || '%'` (case-sensitive). LIKE
    /// metacharacters in the needle are not escaped and keep their
    /// engine-native meaning. A column whose scan errors is excluded from
    /// the report and logged at warn level; the report itself is not
    /// aborted. Nothing is cached between invocations.
    pub fn find_columns_containing(
        &self,
        relation: &RemoteRelation,
        needle: &str,
    ) -> crate::Result<ColumnMatchReport> {
        let mut report = Vec::new();
        for column in self.columns(relation)? {
            let sql = format!(
                "SELECT count(*) FROM {} WHERE CAST({} AS VARCHAR) LIKE '%' || ? || '%'",
                quote_ident(relation.name()),
                quote_ident(&column)
            );
            match self
                .conn
                .query_row(&sql, params![needle], |row| row.get::<_, i64>(0))
            {
                Ok(count) => {
                    log_debug!("column {column}: {count} matching rows",
                        column: column.as_str(), count: count);
                    if count > 0 {
                        report.push(column);
                    }
                }
                Err(e) => {
                    log_warn!("column {column} excluded from report: {err}",
                        column: column.as_str(), err: e.to_string().as_str());
                }
            }
        }
        Ok(report)
    }

    fn check_bound(&self, relation: &RemoteRelation) -> crate::Result<()> {
        if self.bound.borrow().contains(&relation.name) {
            Ok(())
        } else {
            Err(SkimmerError::InvalidRequest {
                message: format!("relation {} is not bound in this session", relation.name),
            })
        }
    }

    /// Install and load httpfs once per session, then apply the configured
    /// remote-read timeout and retry count so a stalled resource cannot
    /// block indefinitely.
    fn ensure_httpfs(&self) -> crate::Result<()> {
        if self.httpfs_loaded.get() {
            return Ok(());
        }
        self.conn
            .execute_batch("INSTALL httpfs; LOAD httpfs;")
            .map_err(|e| SkimmerError::SourceUnreachable {
                message: format!("cannot load httpfs extension: {e}"),
            })?;
        let tuning = format!(
            "SET http_timeout={}; SET http_retries={};",
            self.config.http_timeout.as_millis(),
            self.config.http_retries
        );
        self.conn.execute_batch(&tuning)?;
        self.httpfs_loaded.set(true);
        Ok(())
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// DuckDB reports one error type for view binding; split it into the
/// taxonomy by message. Parse-shaped failures are `Format`, everything
/// else (network, expired signature, missing file) is `SourceUnreachable`.
fn classify_bind_error(err: &duckdb::Error) -> SkimmerError {
    let message = err.to_string();
    let lower = message.to_lowercase();

    const UNREACHABLE: &[&str] = &[
        "http get error",
        "could not establish connection",
        "connection error",
        "unable to connect",
        "timed out",
        "timeout",
        "no files found",
        "404",
        "403",
        "401",
    ];
    const UNPARSEABLE: &[&str] = &[
        "sniff",
        "csv error",
        "delimiter",
        "invalid input",
        "invalid unicode",
        "utf-8",
        "conversion error",
    ];

    if UNREACHABLE.iter().any(|needle| lower.contains(needle)) {
        SkimmerError::SourceUnreachable { message }
    } else if UNPARSEABLE.iter().any(|needle| lower.contains(needle)) {
        SkimmerError::Format { message }
    } else {
        SkimmerError::SourceUnreachable { message }
    }
}
