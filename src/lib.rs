pub mod buffer;
pub mod classifier;
pub mod cli;
pub mod client;
pub mod config;
pub mod diff;
pub mod doc_block;
pub mod documenter;
pub mod edit_planner;
pub mod element;
pub mod generator;
pub mod language;
pub mod prompt_builder;
pub mod scanner;
pub mod span_extractor;
pub mod templates;

mod scanner_tests;

pub use config::Config;
pub use documenter::Documenter;
