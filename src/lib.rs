// src/lib.rs

pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

pub use filter::Pipeline;
pub use routes::create_router;
