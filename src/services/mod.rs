//! Service layer wiring providers, cache and use cases together
//!
//! - `ServiceFactory`: builds provider clients and the cache from configuration
//! - `LyricsService`: the lyrics lookup use case
//! - `AppServices`: shared container handed to HTTP handlers and CLI commands

pub mod factory;
pub mod lyrics;
pub mod simple_container;

#[cfg(test)]
pub mod mock;

pub use factory::ServiceFactory;
pub use lyrics::LyricsService;
pub use simple_container::AppServices;
