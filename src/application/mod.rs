//! Application layer: use cases composed from domain repositories.

pub mod services;
