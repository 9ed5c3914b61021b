pub mod context;
pub mod lifecycle;
pub mod logging;

pub use context::AppContext;
pub use lifecycle::{run_assess, run_check, run_server, AssessSource};
pub use logging::init_tracing;
