pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod session;
pub mod srs;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::BoxError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
