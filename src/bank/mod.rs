//! Bank service layer built on top of the record store

pub mod config;
pub mod core;

pub use config::*;
pub use core::*;
