// Library exports for spmready
pub mod cli;
pub mod config;
pub mod fetch;
pub mod library;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod probe;
pub mod resolve;
