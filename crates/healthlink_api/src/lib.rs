//! Types for communication between the backend and frontend.

pub mod request;
pub mod response;

pub const TOKEN_STORAGE_KEY: &str = "token";
pub const USER_STORAGE_KEY: &str = "user";
