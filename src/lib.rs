pub mod config;
pub mod data_access;
pub mod error;
pub mod model;
