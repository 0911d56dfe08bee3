pub mod sql_generation_service;
pub mod system_instruction;
