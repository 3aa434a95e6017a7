//! Test helpers shared across crates.
//!
//! - [`capture`] records values handed to invoked functions.
//! - [`config`] builds in-memory configuration capabilities.
//! - [`figment`] runs closures inside a `figment::Jail`.

pub mod capture;
pub mod config;
pub mod figment;
