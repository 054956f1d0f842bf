//! Todo Web — a small server-rendered to-do list.

pub mod config;
pub mod error;
pub mod store;
pub mod todos;
