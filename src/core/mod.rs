// Core algorithm exports
pub mod matcher;
pub mod overlap;
pub mod scoring;
pub mod tiers;

pub use matcher::{sort_by_score, MatchOutcome, Matcher};
pub use overlap::{category_match, platform_match};
pub use scoring::{calculate_match_score, calculate_match_score_with_weights};
pub use tiers::{follower_revenue_match, revenue_impact_match, upper_bound, Reach};
