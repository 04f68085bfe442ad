//! Observability setup for hiveplan: tracing subscriber initialisation.

pub mod tracing_setup;
