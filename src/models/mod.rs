// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BusinessProfile, ContentCategory, FollowerRange, InfluencerProfile, MatchResult, Platform,
    RevenueRange, ScoredMatch, ScoringWeights, SubjectType, Tier,
};
pub use requests::MatchesQuery;
pub use responses::{ErrorResponse, HealthResponse, MatchesResponse};
