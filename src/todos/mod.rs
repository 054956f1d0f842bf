//! Todo entity, handlers, and views.

pub mod model;
pub mod routes;
pub mod views;
