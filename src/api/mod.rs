pub mod client;
pub mod endpoints;
pub mod fixtures;
pub mod models;
