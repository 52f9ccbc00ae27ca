//! Command handlers for the Graypack CLI.

pub mod config;
pub mod convert;
