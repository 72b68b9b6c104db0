pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod global;
pub mod manifest;
pub mod orthography;
pub mod tokenizer;

pub use error::{PrepError, PrepResult, Rejection};
