//! Common test infrastructure for Dyematch integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from the perspective of a single test file even though they're
//! used elsewhere.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod assertions;
pub mod fixtures;

pub use assertions::*;

use std::sync::{Arc, Once};

use dyematch::{Catalog, Matcher, MatcherConfig};

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness. Set `RUST_LOG` to see it.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .without_time()
            .try_init();
    });
}

/// A catalog loaded with `data`, panicking on a rejected load.
pub fn loaded_catalog(data: &serde_json::Value) -> Arc<Catalog> {
    init_tracing();
    let catalog = Arc::new(Catalog::new());
    catalog.load(data).expect("fixture catalog should load");
    catalog
}

/// A matcher with default settings over a catalog loaded with `data`.
pub fn matcher_for(data: &serde_json::Value) -> Matcher {
    Matcher::new(loaded_catalog(data), MatcherConfig::default())
}
