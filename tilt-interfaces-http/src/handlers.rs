pub mod detection_handlers;
pub mod ops_handlers;
pub mod session_handlers;

pub use detection_handlers::*;
pub use ops_handlers::*;
pub use session_handlers::*;
