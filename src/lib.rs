pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod query;
pub mod server;
pub mod storage;
pub mod submission;

#[cfg(feature = "db")]
pub mod db;

pub use domain::Place;
pub use error::{AtlasError, Result};
