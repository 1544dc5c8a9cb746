pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod playlist;
pub mod storage;
pub mod web;

pub use error::{Error, Result};
