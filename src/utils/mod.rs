//! Utility modules

pub mod auth;
pub mod parsers;
