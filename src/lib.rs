// Library exports for minipress
// This allows integration tests and external code to use minipress modules

pub mod config;
pub mod db;
pub mod error;
pub mod repo;
pub mod routes;
pub mod state;
pub mod storage;
