//! CLI command implementations.

pub mod check;
pub mod dtr;
pub mod gtp;
pub mod programs;
pub mod run;
pub mod sar;

mod session;

pub use session::Session;
