#[macro_use]
extern crate lazy_static;

pub mod canvas;
pub mod array;
pub mod colormap;
pub mod config;
pub mod error;
pub mod function;
pub mod genetic;
pub mod grid;
pub mod plot;

pub use canvas::Canvas;
pub use config::PlotConfig;
pub use error::{Error, Result};
pub use plot::Figure;

/// Install the stderr log subscriber used by the binaries.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .try_init()
}
