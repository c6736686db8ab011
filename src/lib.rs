//! Filename redirect and content dispatch for axum services.
//!
//! An [`action::Action`] calls [`action::ActionContext::set_filename`] to make
//! the browser see a chosen filename in the url, then
//! [`action::ActionContext::send`] to emit content whose type and disposition
//! follow from that filename. Uploaded files are moved into place with
//! [`action::ActionContext::move_uploaded_file`].

pub mod action;
pub mod actions;
pub mod app;
pub mod config;
pub mod content;
pub mod request;
pub mod routes;
pub mod routing;
pub mod session;
pub mod store;
pub mod utils;
