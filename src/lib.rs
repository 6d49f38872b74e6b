pub mod agent;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod models;
pub mod providers;
pub mod roles;
pub mod tools;
