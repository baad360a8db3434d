//! CLI commands implementation

pub mod analyze;
pub mod init;
pub mod inspect;
pub mod scrape;

pub use analyze::*;
pub use init::*;
pub use inspect::*;
pub use scrape::*;
