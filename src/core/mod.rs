//! Core functionality modules
//!
//! - `lyrics`: query normalization and the lyrics extraction heuristic
//! - `services`: Genius and TMDB clients behind provider traits
//! - `infrastructure`: the lyrics result cache

pub mod infrastructure;
pub mod lyrics;
pub mod services;
