// src/lib.rs

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod transform;
pub mod utils;

pub use routes::create_router;
pub use transform::transform_post_data;
