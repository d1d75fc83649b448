//! Serving of stored media files by their generated filenames.

pub mod handlers;
pub mod routes;
pub mod services;
