use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;
use crate::services::SupabaseTables;

/// Allowed drift of the weight sum from 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub tables: TableSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub service_key: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_business_table")]
    pub business_profiles: String,
    #[serde(default = "default_influencer_table")]
    pub influencer_profiles: String,
    #[serde(default = "default_id_column")]
    pub id_column: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            business_profiles: default_business_table(),
            influencer_profiles: default_influencer_table(),
            id_column: default_id_column(),
        }
    }
}

impl From<TableSettings> for SupabaseTables {
    fn from(tables: TableSettings) -> Self {
        Self {
            business_profiles: tables.business_profiles,
            influencer_profiles: tables.influencer_profiles,
            id_column: tables.id_column,
        }
    }
}

fn default_business_table() -> String { "business_profiles".to_string() }
fn default_influencer_table() -> String { "influencer_profiles".to_string() }
fn default_id_column() -> String { "user_id".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Redis L2 tier; L1 only when unset
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_category_weight")]
    pub category: f64,
    #[serde(default = "default_platform_weight")]
    pub platform: f64,
    #[serde(default = "default_follower_weight")]
    pub follower: f64,
    #[serde(default = "default_revenue_weight")]
    pub revenue: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            category: default_category_weight(),
            platform: default_platform_weight(),
            follower: default_follower_weight(),
            revenue: default_revenue_weight(),
        }
    }
}

fn default_category_weight() -> f64 { ScoringWeights::DEFAULT.category }
fn default_platform_weight() -> f64 { ScoringWeights::DEFAULT.platform }
fn default_follower_weight() -> f64 { ScoringWeights::DEFAULT.follower }
fn default_revenue_weight() -> f64 { ScoringWeights::DEFAULT.revenue }

impl WeightsConfig {
    /// Convert to scoring weights, rejecting sets that do not sum to 1.0
    pub fn to_weights(&self) -> Result<ScoringWeights, ConfigError> {
        let weights = ScoringWeights {
            category: self.category,
            platform: self.platform,
            follower: self.follower,
            revenue: self.revenue,
        };

        if [weights.category, weights.platform, weights.follower, weights.revenue]
            .iter()
            .any(|w| *w < 0.0)
        {
            return Err(ConfigError::Message(format!(
                "scoring weights must not be negative: {:?}",
                weights
            )));
        }

        if (weights.total() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::Message(format!(
                "scoring weights must sum to 1.0, got {}",
                weights.total()
            )));
        }

        Ok(weights)
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with KONNECT)
    /// 5. SUPABASE_URL / NEXT_PUBLIC_SUPABASE_URL and SUPABASE_SERVICE_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., KONNECT__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        Self::from_config(substitute_env_vars(settings)?)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::from_config(substitute_env_vars(settings)?)
    }

    /// Deserialize and validate an already built configuration
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        settings.scoring.weights.to_weights()?;
        Ok(settings)
    }

    /// Validated scoring weights
    pub fn weights(&self) -> Result<ScoringWeights, ConfigError> {
        self.scoring.weights.to_weights()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("KONNECT")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply the Supabase variables the web app already defines
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let supabase_url = env::var("SUPABASE_URL")
        .or_else(|_| env::var("NEXT_PUBLIC_SUPABASE_URL"))
        .ok();
    let service_key = env::var("SUPABASE_SERVICE_KEY").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = supabase_url {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Some(key) = service_key {
        builder = builder.set_override("supabase.service_key", key)?;
    }

    builder.build()
}
