//! Error types for svctree
//!
//! Store operations never fail; these cover configuration handling only.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}
