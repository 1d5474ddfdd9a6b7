#![doc = "The `taskloom` library crate."]
#![doc = ""]
#![doc = "A multi-tenant task-management backend. This crate contains the core"]
#![doc = "auth and authorization logic (password hashing, bearer-token issuance"]
#![doc = "and verification, identity resolution, ownership enforcement), the"]
#![doc = "account and task services, the storage boundary with its Postgres and"]
#![doc = "in-memory implementations, and the HTTP routing glue. The binary"]
#![doc = "(`main.rs`) wires these together and runs the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

pub use crate::error::AppError;
pub use crate::state::AppState;
