// Pure detection services
pub mod assessor;
pub mod recommendations;
pub mod rules;
pub mod scorer;

pub use assessor::*;
pub use recommendations::*;
pub use rules::*;
pub use scorer::*;
