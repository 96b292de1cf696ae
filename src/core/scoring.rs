use crate::models::{BusinessProfile, InfluencerProfile, MatchResult, ScoringWeights};
use crate::core::{
    overlap::{category_match, platform_match},
    tiers::{follower_revenue_match, revenue_impact_match},
};

/// Calculate a match score (0-1) between a business and an influencer using
/// the default weights
pub fn calculate_match_score(
    business: &BusinessProfile,
    influencer: &InfluencerProfile,
) -> MatchResult {
    calculate_match_score_with_weights(business, influencer, &ScoringWeights::DEFAULT)
}

/// Calculate a match score (0-1) between a business and an influencer
///
/// Scoring formula:
/// score = (
///     category_score * 0.35 +      # Product categories the influencer covers
///     platform_score * 0.25 +      # Business platforms the influencer is on
///     follower_score * 0.20 +      # Peak audience fits business revenue tier
///     revenue_score  * 0.20        # Lead platform tier equals revenue tier
/// )
///
/// Only sub-scores above zero add a reason, in the order above. The total is
/// rounded to two decimals. The function is pure and never fails; unknown
/// labels simply score zero.
pub fn calculate_match_score_with_weights(
    business: &BusinessProfile,
    influencer: &InfluencerProfile,
    weights: &ScoringWeights,
) -> MatchResult {
    let mut match_reasons = Vec::new();
    let mut total_score = 0.0;

    let category_score = category_match(&business.product_categories, &influencer.content_categories);
    if category_score > 0.0 {
        total_score += category_score * weights.category;
        match_reasons.push(format!("{}% category alignment", as_percent(category_score)));
    }

    let platform_score = platform_match(business.platforms(), &influencer.platforms);
    if platform_score > 0.0 {
        total_score += platform_score * weights.platform;
        match_reasons.push(format!(
            "Present on {}% of desired platforms",
            as_percent(platform_score)
        ));
    }

    let follower_score = follower_revenue_match(
        business.estimated_revenue.as_ref(),
        &influencer.follower_counts,
    );
    if follower_score > 0.0 {
        total_score += follower_score * weights.follower;
        match_reasons.push("Follower count aligns with business scale".to_string());
    }

    // Compares a revenue tier with a follower tier by label; see core::tiers.
    let revenue_score = revenue_impact_match(
        business.estimated_revenue.as_ref(),
        influencer.lead_tier(),
    );
    if revenue_score > 0.0 {
        total_score += revenue_score * weights.revenue;
        match_reasons.push("Potential revenue impact alignment".to_string());
    }

    MatchResult {
        score: round_score(total_score),
        match_reasons,
    }
}

#[inline]
fn as_percent(ratio: f64) -> u32 {
    (ratio * 100.0).round() as u32
}

/// Round to two decimal places
#[inline]
fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
