// src/models/mod.rs

pub mod progress;
pub mod user;
