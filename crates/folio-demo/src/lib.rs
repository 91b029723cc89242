#![forbid(unsafe_code)]

//! The `folio` command line: pointer-direction classification, simulated
//! scroll passes over the page scenes, seeded layouts, and motion config.

pub mod cli;
pub mod direction;
pub mod error;
pub mod layout;
pub mod scroll;
pub mod show_config;

pub use cli::run_from_env;
pub use error::{DemoError, Result};
