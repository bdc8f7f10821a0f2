//! Main module for rpsl library functionality

pub mod arguments;
pub mod attribute;
pub mod config;
pub mod engine;
pub mod error;
pub mod formats;
pub mod object;
pub mod scanning;
pub mod schema;
pub mod set;
pub mod spec;
pub mod store;
pub mod value;
