// src/handlers/mod.rs

pub mod compose;
