//! Follower and revenue tier alignment.
//!
//! Follower ranges and revenue ranges share one label set (`0-10000`,
//! `10000-100000`, `100000+`). The revenue-impact sub-score compares a
//! revenue tier against a follower tier by label, which conflates dollar
//! buckets with audience buckets. That coupling is kept as-is until product
//! defines a real mapping between the two.

use std::collections::HashMap;

use crate::models::{FollowerRange, Platform, RevenueRange, Tier};

/// Boundary between the lowest and the middle tier
pub const SMALL_TIER_LIMIT: u64 = 10_000;

/// Boundary between the middle and the top tier
pub const MID_TIER_LIMIT: u64 = 100_000;

const ALIGNED: f64 = 1.0;
const PARTIAL: f64 = 0.5;
const UNDERSIZED: f64 = 0.3;

/// Upper bound of a follower tier
///
/// `Unbounded` orders above every `Bounded` value, so open-ended tiers such
/// as `100000+` exceed any finite threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Reach {
    Bounded(u64),
    Unbounded,
}

impl Reach {
    pub const ZERO: Reach = Reach::Bounded(0);
}

/// Parse the upper bound of a tier label
///
/// `"a-b"` yields `b`; `"n+"` is unbounded. Anything without a numeric upper
/// bound reads as zero.
pub fn upper_bound(label: &str) -> Reach {
    let mut parts = label.split('-');
    parts.next();

    match parts.next() {
        Some(upper) => upper
            .trim()
            .parse::<u64>()
            .map(Reach::Bounded)
            .unwrap_or(Reach::ZERO),
        None => match label.trim().strip_suffix('+') {
            Some(lower) if lower.parse::<u64>().is_ok() => Reach::Unbounded,
            _ => Reach::ZERO,
        },
    }
}

/// Largest upper bound across all of an influencer's platforms
pub fn peak_reach(follower_counts: &HashMap<Platform, FollowerRange>) -> Reach {
    follower_counts
        .values()
        .map(|tier| upper_bound(tier.as_str()))
        .fold(Reach::ZERO, Reach::max)
}

/// How well the influencer's peak audience fits the business's size (0-1)
pub fn follower_revenue_match(
    revenue: Option<&RevenueRange>,
    follower_counts: &HashMap<Platform, FollowerRange>,
) -> f64 {
    let revenue = match revenue {
        Some(revenue) => revenue,
        None => return 0.0,
    };

    let peak = peak_reach(follower_counts);
    let small = Reach::Bounded(SMALL_TIER_LIMIT);
    let mid = Reach::Bounded(MID_TIER_LIMIT);

    match revenue {
        Tier::ZeroTo10k => {
            if peak <= small { ALIGNED } else { PARTIAL }
        }
        Tier::TenKTo100k => {
            if peak > small && peak <= mid { ALIGNED } else { PARTIAL }
        }
        Tier::Over100k => {
            if peak > mid { ALIGNED } else { UNDERSIZED }
        }
        Tier::Unrecognized(_) => 0.0,
    }
}

/// Direct label comparison of the revenue tier and the lead follower tier (0-1)
///
/// `lead_tier` is the follower tier of the influencer's first listed platform.
pub fn revenue_impact_match(revenue: Option<&RevenueRange>, lead_tier: Option<&FollowerRange>) -> f64 {
    match (revenue, lead_tier) {
        (Some(revenue), Some(lead)) if revenue.is_recognized() => {
            if revenue == lead { ALIGNED } else { PARTIAL }
        }
        _ => 0.0,
    }
}
