pub mod app;
pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod host;
pub mod library;
pub mod playback;
pub mod ui;
