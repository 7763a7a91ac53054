pub mod app;
pub mod config;
pub mod engine;
pub mod flow;
pub mod lead;
pub mod shared;
pub mod tui;
