//! Logging infrastructure for structured console and file output.

mod logger;
pub mod style;
mod subscriber;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
