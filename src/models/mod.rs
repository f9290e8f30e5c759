// src/models/mod.rs

pub mod compose;
