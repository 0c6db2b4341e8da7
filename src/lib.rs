// Library root: the prediction pipeline, shared by the CLI and the
// integration tests.

pub mod analysis;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod pipeline;
