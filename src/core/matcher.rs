use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{
    BusinessProfile, InfluencerProfile, MatchResult, ScoredMatch, ScoringWeights, SubjectType,
};
use crate::core::scoring::calculate_match_score_with_weights;

/// Result of ranking one subject against its candidates
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
    /// Candidate rows that could not be decoded into a profile
    pub skipped: usize,
}

/// Main matching orchestrator
///
/// Scores every candidate against the subject and ranks them. The scorer is
/// always called business-first, whichever side the subject is on.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single business/influencer pair
    pub fn score(&self, business: &BusinessProfile, influencer: &InfluencerProfile) -> MatchResult {
        calculate_match_score_with_weights(business, influencer, &self.weights)
    }

    /// Rank influencer candidates for a business
    ///
    /// Each candidate pairs the raw stored row (echoed back to the caller)
    /// with its decoded profile.
    pub fn rank_influencers<I>(&self, business: &BusinessProfile, candidates: I) -> Vec<ScoredMatch>
    where
        I: IntoIterator<Item = (Value, InfluencerProfile)>,
    {
        let mut matches: Vec<ScoredMatch> = candidates
            .into_iter()
            .map(|(row, influencer)| ScoredMatch::new(row, self.score(business, &influencer)))
            .collect();

        sort_by_score(&mut matches);
        matches
    }

    /// Rank business candidates for an influencer
    pub fn rank_businesses<I>(&self, influencer: &InfluencerProfile, candidates: I) -> Vec<ScoredMatch>
    where
        I: IntoIterator<Item = (Value, BusinessProfile)>,
    {
        let mut matches: Vec<ScoredMatch> = candidates
            .into_iter()
            .map(|(row, business)| ScoredMatch::new(row, self.score(&business, influencer)))
            .collect();

        sort_by_score(&mut matches);
        matches
    }

    /// Rank stored candidate rows for a stored subject row
    ///
    /// Fails only when the subject row itself cannot be decoded. Candidate
    /// rows that fail to decode are left out and counted in `skipped`.
    pub fn rank_records(
        &self,
        subject_type: SubjectType,
        subject: &Value,
        candidates: Vec<Value>,
    ) -> Result<MatchOutcome, serde_json::Error> {
        let total_candidates = candidates.len();

        let (matches, skipped) = match subject_type {
            SubjectType::Business => {
                let business: BusinessProfile = serde_json::from_value(subject.clone())?;
                let (decoded, skipped) = decode_candidates::<InfluencerProfile>(candidates);
                (self.rank_influencers(&business, decoded), skipped)
            }
            SubjectType::Influencer => {
                let influencer: InfluencerProfile = serde_json::from_value(subject.clone())?;
                let (decoded, skipped) = decode_candidates::<BusinessProfile>(candidates);
                (self.rank_businesses(&influencer, decoded), skipped)
            }
        };

        Ok(MatchOutcome {
            matches,
            total_candidates,
            skipped,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Sort by score, highest first
///
/// `sort_by` is stable, so candidates with equal scores keep their input
/// order.
pub fn sort_by_score(matches: &mut [ScoredMatch]) {
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn decode_candidates<P: DeserializeOwned>(rows: Vec<Value>) -> (Vec<(Value, P)>, usize) {
    let mut skipped = 0;
    let decoded = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<P>(row.clone()) {
            Ok(profile) => Some((row, profile)),
            Err(e) => {
                skipped += 1;
                let id = row.get("id").cloned().unwrap_or_default();
                tracing::warn!("Skipping candidate {}: {}", id, e);
                None
            }
        })
        .collect();

    (decoded, skipped)
}
