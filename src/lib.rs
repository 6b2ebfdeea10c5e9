//! eventpass - access policy engine for event management apps
//!
//! Maps an account's role and pass type to the views, capabilities, data
//! scope and navigation it gets, and serves that mapping over HTTP with a
//! session-scoped cache. It exposes all modules for testing purposes.

pub mod access;
pub mod errors;
pub mod session;
pub mod settings;
pub mod web;
