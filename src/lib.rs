// src/lib.rs

//! Profile views library: badge counter extraction and persisted state.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
