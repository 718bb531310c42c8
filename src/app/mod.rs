//! Application runtime composition modules.

pub(crate) mod config;
pub(crate) mod config_manager;
pub(crate) mod output;
pub(crate) mod progress_manager;
pub(crate) mod runtime;
pub(crate) mod terminal;
pub(crate) mod validation;
