//! Browser-independent core of the case desk: data model, field schemas, form drafts
//! and the CRUD panel state machine. Everything here is plain Rust and is tested
//! natively; the Yew front end only renders this state and performs its effects.

pub mod config;
pub mod crud;
pub mod draft;
pub mod error;
pub mod format;
pub mod model;
pub mod paths;
pub mod registration;
pub mod schema;
