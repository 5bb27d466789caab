pub mod config;
pub mod extract;
pub mod model;
pub mod util;

pub use config::ExtractConfig;
pub use extract::{ExtractError, SourceDocument};
