// Domain entities
pub mod alert;
pub mod assessment;
pub mod detection_config;
pub mod event;
pub mod metrics;
pub mod model;
pub mod summary;

pub use alert::*;
pub use assessment::*;
pub use detection_config::*;
pub use event::*;
pub use metrics::*;
pub use model::*;
pub use summary::*;
