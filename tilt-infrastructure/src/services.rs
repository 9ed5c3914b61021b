pub mod log_sink;
pub mod session_agent;
pub mod webhook_sink;

pub use log_sink::*;
pub use session_agent::*;
pub use webhook_sink::*;
