pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod analyzer;
pub mod builder;
pub mod export;
pub mod audit;
