pub mod detection_commands;
pub mod session_commands;
