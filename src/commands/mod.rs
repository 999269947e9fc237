pub mod check_config;
pub mod failed;
pub mod filter;
pub mod passed;
pub mod report;
pub mod summary;
