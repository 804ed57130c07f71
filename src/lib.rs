pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod model;
pub mod repo;
pub mod service;
pub mod similarity;
pub mod store;
pub mod util;
