pub mod dispatch;
pub mod error;
pub mod filename;
pub mod flow;
pub mod mime_types;
pub mod redirect;
pub mod upload;
