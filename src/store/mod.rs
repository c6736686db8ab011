pub mod memory_session_store;
pub mod persistent_session_store;
pub mod persistent_store;
pub mod session_store;
