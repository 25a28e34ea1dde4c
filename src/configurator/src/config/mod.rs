mod config_loader;
mod defaults;

pub use config_loader::{ConfigLoader, ConfigOverrides, PmmConfig};
