//! Telemetry helpers for hosts embedding `minichart`.
//!
//! The engine only emits `trace`/`debug` events; nothing is installed
//! implicitly. Hosts either call one of these helpers or wire their own
//! `tracing` subscriber.

/// Installs a compact subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Installs a compact subscriber using `RUST_LOG` when set, else `directive`.
///
/// Use `"minichart=trace"` to see every paint outcome.
#[must_use]
pub fn init_tracing_with_filter(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}
