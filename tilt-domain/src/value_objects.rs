// Domain value objects
pub mod outcome;
pub mod recommendation;
pub mod risk_level;

pub use outcome::*;
pub use recommendation::*;
pub use risk_level::*;
