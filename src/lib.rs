//! Konnect Match - influencer and business match scoring service
//!
//! This library provides the match scorer used by the Konnect marketplace.
//! It rates one business against one influencer from category overlap,
//! platform overlap and follower/revenue tier alignment, and ranks candidate
//! profiles for a subject profile.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, calculate_match_score_with_weights, Matcher};
pub use crate::models::{BusinessProfile, InfluencerProfile, MatchResult, ScoredMatch, ScoringWeights, SubjectType};
