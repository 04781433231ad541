pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod history;
pub mod keybindings;
pub mod storage;
pub mod ui;
pub mod utils;
