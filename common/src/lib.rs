pub mod db;
pub mod error;
pub mod models;
pub mod status;
pub mod store;
