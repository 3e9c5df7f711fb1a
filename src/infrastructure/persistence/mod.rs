//! Storage engines implementing the domain repository traits.

pub mod memory_click_repository;
pub mod memory_link_repository;

pub use memory_click_repository::MemoryClickRepository;
pub use memory_link_repository::MemoryLinkRepository;
