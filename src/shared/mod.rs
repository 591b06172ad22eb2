pub mod errors;
pub mod ids;
pub mod logging;

pub use errors::{ErrorKind, SmokeError};
pub use logging::EventLog;
