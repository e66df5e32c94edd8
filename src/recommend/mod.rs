//! Recommendation engine, sampler and display throttle

mod engine;
pub mod sampler;
mod throttle;

pub use engine::{CandidatePool, EngineConfig, Recommendation, RecommendationEngine, SearchPolicy};
pub use sampler::{sample, sample_with};
pub use throttle::DisplayThrottle;
