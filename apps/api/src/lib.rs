pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod llm_client;
pub mod orientation;
pub mod routes;
pub mod state;
