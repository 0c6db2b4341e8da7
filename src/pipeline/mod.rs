pub mod mapper;
pub mod normalize;
pub mod partition;
pub mod repository;
pub mod service;
