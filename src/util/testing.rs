//! Shared helpers for tests: one-time tracing setup and record builders.

use std::sync::Once;

use tracing::info;
use tracing_subscriber::{fmt, fmt::format::FmtSpan, prelude::*, EnvFilter};

use crate::domain::{PokemonType, Record, RecordId};

static TEST_SETUP: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// `RUST_LOG` overrides the default of tracing everything in this crate.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pokedex=trace"));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter);

        // another harness may have installed a subscriber already
        if tracing_subscriber::registry().with(layer).try_init().is_ok() {
            info!("Test tracing ready");
        }
    });
}

/// A plain NORMAL record named after its id, e.g. `r50`.
pub fn record(id: RecordId) -> Record {
    Record::new(id, format!("r{id}"), PokemonType::Normal, 10, 10, false)
}

/// Records with the given ids and names, in the given order.
pub fn named_records(entries: &[(RecordId, &str)]) -> Vec<Record> {
    entries
        .iter()
        .map(|(id, name)| Record::new(*id, *name, PokemonType::Normal, 10, 10, false))
        .collect()
}
