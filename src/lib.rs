pub mod config;
pub mod error;
pub mod generator;
pub mod http;
pub mod llm;
pub mod persona;
pub mod pipeline;
