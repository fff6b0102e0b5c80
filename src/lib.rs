pub mod app;
pub mod audio;
pub mod config;
pub mod console;
pub mod core;
pub mod cursor;
pub mod demo;
pub mod error;
pub mod library;
pub mod model;
pub mod player;
pub mod playlist;
