// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod language;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod timing;
pub mod trace_init;
pub mod ui;
pub mod word_store;
