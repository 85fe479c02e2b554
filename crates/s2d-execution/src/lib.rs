//! Process-level setup for the Symptom2Disease binaries: logging and
//! dependency wiring.

pub mod bootstrap;
pub mod logging;

pub use bootstrap::{AppContext, BootstrapOptions, bootstrap, build_context, load_config};
pub use logging::init_logging;
