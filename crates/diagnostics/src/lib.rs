// SPDX-FileCopyrightText: 2026 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Lightweight diagnostics for the pondskater workspace.
//!
//! All crates log through the macros below so the emitter is configured in
//! exactly one place. Verbosity comes from the SKIMMER_LOG environment
//! variable:
//! - SKIMMER_LOG=off (default) - silent
//! - SKIMMER_LOG=error / warn / info / debug - increasing detail

use std::sync::Once;

// Re-export emit so the macros expand against this crate's version.
pub use emit;

static INIT: Once = Once::new();

fn parse_level(value: &str) -> Option<emit::Level> {
    match value {
        "debug" => Some(emit::Level::Debug),
        "info" => Some(emit::Level::Info),
        "warn" => Some(emit::Level::Warn),
        "error" => Some(emit::Level::Error),
        _ => None,
    }
}

/// Initialize diagnostics from the SKIMMER_LOG environment variable.
///
/// Safe to call more than once; only the first call configures the emitter.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let requested = std::env::var("SKIMMER_LOG").unwrap_or_else(|_| "off".to_string());
        if requested == "off" {
            return;
        }

        let (level, unknown) = match parse_level(&requested) {
            Some(level) => (level, false),
            None => (emit::Level::Info, true),
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(level))
            .init();

        if unknown {
            emit::warn!("Unknown SKIMMER_LOG value {requested}, using info");
        }

        // The emitter lives for the whole process.
        std::mem::forget(rt);
    });
}

/// Log basic operations (signing, binding, queries).
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (generated SQL, per-column counts, retries).
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable conditions (skipped columns, fallbacks).
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that abort an operation.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

pub use init_diagnostics as init;
