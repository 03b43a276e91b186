//! Tracing configuration for the `dvc` binary.
//!
//! Supports three output formats controlled by `DVC_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one level per
//!   file and directive keyword
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Which directives resolved, per file
//! DVC_LOG=debug DVC_LOG_FORMAT=tree dvc Views/
//!
//! # Full traces for tooling
//! DVC_LOG=trace DVC_LOG_FORMAT=json dvc Views/Default.dothtml
//!
//! # Fine-grained filtering
//! DVC_LOG="dvc_directives=debug,dvc_types=trace" dvc Views/
//! ```
//!
//! The subscriber is only initialised when `DVC_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Flat text lines (default).
    Text,
    /// Indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a `DVC_LOG_FORMAT` value; anything unknown is `Text`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("DVC_LOG_FORMAT").unwrap_or_default())
    }
}

/// `DVC_LOG` takes precedence over `RUST_LOG`; both use `RUST_LOG` syntax.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("DVC_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `DVC_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr so it never mixes with diagnostics or `--json` output.
pub fn init_tracing() {
    let has_dvc_log = std::env::var("DVC_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_dvc_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
