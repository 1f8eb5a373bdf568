//! Cross-cutting infrastructure
//!
//! - `cache`: bounded in-memory memo of finished lyrics lookups

pub mod cache;
