pub mod sql_controller;
pub mod system_controller;
