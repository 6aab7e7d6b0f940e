//! Caching layer for upstream lookups.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`MemoryCache`] - Process-local TTL cache
//! - [`NullCache`] - No-op implementation for disabled caching
//!
//! [`run_cache_sweeper`] periodically drops expired entries to reclaim memory.

mod memory_cache;
mod null_cache;
mod service;
mod sweeper;

pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use service::CacheService;
pub use sweeper::run_cache_sweeper;
