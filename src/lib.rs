pub mod app;
pub mod config;
pub mod directory;
pub mod envelope;
pub mod operations;
pub mod resolver;
pub mod scenarios;
pub mod shared;
pub mod transport;
pub mod verdict;
