pub mod alert_dispatcher;

pub use alert_dispatcher::*;
