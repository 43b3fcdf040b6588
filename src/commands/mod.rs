//! Command handlers for the smt-sync binary

pub mod diff;
pub mod input;
pub mod render;
pub mod save;
pub mod service;
pub mod show;
pub mod status;
