//! Core domain model: entities, repository contracts, and the background
//! machinery built directly on top of them (click ingestion pipeline and
//! the expiration sweeper).

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod expiration_sweeper;
pub mod repositories;
