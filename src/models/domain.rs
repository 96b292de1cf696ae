use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Social network a business or influencer is present on
///
/// Labels outside the known set are kept as `Unrecognized` so stored rows
/// still decode; an unrecognized platform never matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    YouTube,
    Instagram,
    TikTok,
    Twitter,
    LinkedIn,
    Unrecognized(String),
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::YouTube,
        Platform::Instagram,
        Platform::TikTok,
        Platform::Twitter,
        Platform::LinkedIn,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::Unrecognized(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Platform::Unrecognized(_))
    }
}

impl From<String> for Platform {
    fn from(label: String) -> Self {
        match label.as_str() {
            "YouTube" => Platform::YouTube,
            "Instagram" => Platform::Instagram,
            "TikTok" => Platform::TikTok,
            "Twitter" => Platform::Twitter,
            "LinkedIn" => Platform::LinkedIn,
            _ => Platform::Unrecognized(label),
        }
    }
}

impl From<&str> for Platform {
    fn from(label: &str) -> Self {
        Platform::from(label.to_string())
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Unrecognized(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-bucket size tier shared by follower counts and business revenue
///
/// Follower ranges and revenue ranges use the exact same labels, and the
/// revenue-impact sub-score compares one against the other directly, so both
/// are modelled by this single type. See [`FollowerRange`] and [`RevenueRange`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tier {
    /// `0-10000`
    ZeroTo10k,
    /// `10000-100000`
    TenKTo100k,
    /// `100000+`
    Over100k,
    Unrecognized(String),
}

/// Follower-count bucket for one platform
pub type FollowerRange = Tier;

/// Estimated business revenue bucket
pub type RevenueRange = Tier;

impl Tier {
    pub fn as_str(&self) -> &str {
        match self {
            Tier::ZeroTo10k => "0-10000",
            Tier::TenKTo100k => "10000-100000",
            Tier::Over100k => "100000+",
            Tier::Unrecognized(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Tier::Unrecognized(_))
    }
}

impl From<String> for Tier {
    fn from(label: String) -> Self {
        match label.as_str() {
            "0-10000" => Tier::ZeroTo10k,
            "10000-100000" => Tier::TenKTo100k,
            "100000+" => Tier::Over100k,
            _ => Tier::Unrecognized(label),
        }
    }
}

impl From<&str> for Tier {
    fn from(label: &str) -> Self {
        Tier::from(label.to_string())
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Unrecognized(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content focus an influencer declares
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentCategory {
    Makeup,
    Beauty,
    Fitness,
    Education,
    Business,
    Technology,
    Fashion,
    Food,
    Travel,
    Lifestyle,
    Gaming,
    Entertainment,
    Unrecognized(String),
}

impl ContentCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ContentCategory::Makeup => "Makeup",
            ContentCategory::Beauty => "Beauty",
            ContentCategory::Fitness => "Fitness",
            ContentCategory::Education => "Education",
            ContentCategory::Business => "Business",
            ContentCategory::Technology => "Technology",
            ContentCategory::Fashion => "Fashion",
            ContentCategory::Food => "Food",
            ContentCategory::Travel => "Travel",
            ContentCategory::Lifestyle => "Lifestyle",
            ContentCategory::Gaming => "Gaming",
            ContentCategory::Entertainment => "Entertainment",
            ContentCategory::Unrecognized(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ContentCategory::Unrecognized(_))
    }
}

impl From<String> for ContentCategory {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Makeup" => ContentCategory::Makeup,
            "Beauty" => ContentCategory::Beauty,
            "Fitness" => ContentCategory::Fitness,
            "Education" => ContentCategory::Education,
            "Business" => ContentCategory::Business,
            "Technology" => ContentCategory::Technology,
            "Fashion" => ContentCategory::Fashion,
            "Food" => ContentCategory::Food,
            "Travel" => ContentCategory::Travel,
            "Lifestyle" => ContentCategory::Lifestyle,
            "Gaming" => ContentCategory::Gaming,
            "Entertainment" => ContentCategory::Entertainment,
            _ => ContentCategory::Unrecognized(label),
        }
    }
}

impl From<&str> for ContentCategory {
    fn from(label: &str) -> Self {
        ContentCategory::from(label.to_string())
    }
}

impl From<ContentCategory> for String {
    fn from(category: ContentCategory) -> Self {
        match category {
            ContentCategory::Unrecognized(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Business profile as stored in `business_profiles`
///
/// Accepts the camelCase API spelling and the snake_case column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    #[serde(rename = "businessName", alias = "business_name", default, deserialize_with = "null_as_default")]
    pub business_name: String,
    #[serde(rename = "websiteUrl", alias = "website_url", default, deserialize_with = "null_as_default")]
    pub website_url: String,
    #[serde(rename = "socialMediaLinks", alias = "social_media_links", default)]
    pub social_media_links: Option<HashMap<Platform, String>>,
    #[serde(rename = "estimatedRevenue", alias = "estimated_revenue", default)]
    pub estimated_revenue: Option<RevenueRange>,
    #[serde(rename = "productCategories", alias = "product_categories", default, deserialize_with = "null_as_default")]
    pub product_categories: Vec<String>,
}

impl BusinessProfile {
    /// Platforms the business lists social links for
    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        self.social_media_links.iter().flat_map(|links| links.keys())
    }
}

/// Influencer profile as stored in `influencer_profiles`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfluencerProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<Platform>,
    #[serde(rename = "followerCounts", alias = "follower_counts", default, deserialize_with = "null_as_default")]
    pub follower_counts: HashMap<Platform, FollowerRange>,
    #[serde(rename = "contentCategories", alias = "content_categories", default, deserialize_with = "null_as_default")]
    pub content_categories: Vec<ContentCategory>,
}

impl InfluencerProfile {
    /// Follower tier of the first platform the influencer lists
    pub fn lead_tier(&self) -> Option<&FollowerRange> {
        self.platforms
            .first()
            .and_then(|platform| self.follower_counts.get(platform))
    }
}

/// Which side of the marketplace a profile belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    Business,
    Influencer,
}

impl SubjectType {
    /// The side candidates are drawn from
    pub fn opposite(self) -> Self {
        match self {
            SubjectType::Business => SubjectType::Influencer,
            SubjectType::Influencer => SubjectType::Business,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubjectType::Business => "business",
            SubjectType::Influencer => "influencer",
        }
    }
}

impl FromStr for SubjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "business" => Ok(SubjectType::Business),
            "influencer" => Ok(SubjectType::Influencer),
            other => Err(format!("unknown subject type '{}', expected business or influencer", other)),
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring one business against one influencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

/// Ranked candidate returned by the matches endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub profile: serde_json::Value,
    pub score: f64,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

impl ScoredMatch {
    pub fn new(profile: serde_json::Value, result: MatchResult) -> Self {
        Self {
            profile,
            score: result.score,
            match_reasons: result.match_reasons,
        }
    }
}

/// Scoring weights
///
/// The four weights must sum to 1.0 so the final score stays within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub category: f64,
    pub platform: f64,
    pub follower: f64,
    pub revenue: f64,
}

impl ScoringWeights {
    pub const DEFAULT: ScoringWeights = ScoringWeights {
        category: 0.35,
        platform: 0.25,
        follower: 0.20,
        revenue: 0.20,
    };

    pub fn total(&self) -> f64 {
        self.category + self.platform + self.follower + self.revenue
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Treat an explicit `null` column the same as a missing one
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
