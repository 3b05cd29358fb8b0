//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Initialize tracing with the human-readable formatter.
///
/// Reads `SYLLABUS_LOG` for per-target levels, e.g.
/// `SYLLABUS_LOG=syllabus_retrieval=debug,syllabus_embeddings=warn`.
/// Falls back to `syllabus=info` when unset or invalid.
///
/// Idempotent.
pub fn init_tracing() {
    init_with(&ObservabilityConfig::default());
}

/// Initialize tracing from the observability section of the config.
///
/// `SYLLABUS_LOG` still wins over `log_level` when set.
pub fn init_with(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("SYLLABUS_LOG")
            .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

        let registry = tracing_subscriber::registry().with(filter);
        if config.json_logs {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

/// Filter directives applying `level` to every workspace crate.
pub fn default_directives(level: &str) -> String {
    [
        "syllabus",
        "syllabus_core",
        "syllabus_corpus",
        "syllabus_embeddings",
        "syllabus_retrieval",
    ]
    .iter()
    .map(|target| format!("{target}={level}"))
    .collect::<Vec<_>>()
    .join(",")
}
