pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::session::{MenuChoice, Session};
pub use config::Settings;
pub use core::{library::Library, FixedClock, LendingPolicy, SystemClock};
pub use utils::error::{LibraryError, Result};
