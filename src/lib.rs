pub mod api;
pub mod calculator;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod parser;
pub mod routes;
pub mod store;
pub mod utils;
