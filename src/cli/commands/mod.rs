pub mod config;
pub mod models;
pub mod preview;
pub mod run;
