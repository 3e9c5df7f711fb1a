//! Infrastructure adapters sitting behind the domain's repository traits.

pub mod persistence;
