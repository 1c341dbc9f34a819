//! Schema and fixture tooling for the Heimdall blog's MongoDB store.
//!
//! [`schema`] declares the named indexes of the six blog collections and
//! applies them; [`fixtures`] wipes a development database and loads the
//! standard dataset into it.

pub mod config;
pub mod db;
pub mod errors;
pub mod fixtures;
pub mod logging;
pub mod schema;
pub mod types;
