//! Observability for chatrelay: tracing subscriber setup with console and
//! log-file output and optional OpenTelemetry span export.

pub mod tracing_setup;
