pub mod base;
pub mod converter;
pub mod job;
pub mod logging;

pub use base::*;
pub use converter::*;
pub use job::*;
pub use logging::*;
