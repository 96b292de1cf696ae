use crate::models::SubjectType;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid service key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names for the two profile types
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub business_profiles: String,
    pub influencer_profiles: String,
    /// Column the subject id is matched against
    pub id_column: String,
}

impl SupabaseTables {
    pub fn table_for(&self, subject_type: SubjectType) -> &str {
        match subject_type {
            SubjectType::Business => &self.business_profiles,
            SubjectType::Influencer => &self.influencer_profiles,
        }
    }
}

impl Default for SupabaseTables {
    fn default() -> Self {
        Self {
            business_profiles: "business_profiles".to_string(),
            influencer_profiles: "influencer_profiles".to_string(),
            id_column: "user_id".to_string(),
        }
    }
}

/// Read-only client for profile rows exposed through Supabase's PostgREST API
///
/// Rows are returned as raw JSON so the matches endpoint can echo the full
/// stored profile back to the caller.
pub struct SupabaseClient {
    base_url: String,
    service_key: String,
    client: Client,
    tables: SupabaseTables,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        service_key: String,
        tables: SupabaseTables,
        timeout: Duration,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            service_key,
            client,
            tables,
        })
    }

    pub fn tables(&self) -> &SupabaseTables {
        &self.tables
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authorized_get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Accept", "application/json")
    }

    /// Fetch a single profile row by id
    pub async fn get_profile(
        &self,
        subject_type: SubjectType,
        id: &str,
    ) -> Result<Value, SupabaseError> {
        let url = format!(
            "{}?select=*&{}=eq.{}&limit=1",
            self.table_url(self.tables.table_for(subject_type)),
            urlencoding::encode(&self.tables.id_column),
            urlencoding::encode(id)
        );

        tracing::debug!("Fetching {} profile: {}", subject_type, id);

        let rows = self.fetch_rows(&url).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| SupabaseError::NotFound(format!("{} profile {}", subject_type, id)))
    }

    /// Fetch every profile row of the given type
    pub async fn list_profiles(&self, subject_type: SubjectType) -> Result<Vec<Value>, SupabaseError> {
        let url = format!(
            "{}?select=*",
            self.table_url(self.tables.table_for(subject_type))
        );

        let rows = self.fetch_rows(&url).await?;

        tracing::debug!("Fetched {} {} profiles", rows.len(), subject_type);

        Ok(rows)
    }

    /// Health check against the business profile table
    pub async fn health_check(&self) -> Result<bool, SupabaseError> {
        let url = format!(
            "{}?select={}&limit=1",
            self.table_url(&self.tables.business_profiles),
            urlencoding::encode(&self.tables.id_column)
        );

        let response = self.authorized_get(&url).send().await?;

        Ok(response.status().is_success())
    }

    async fn fetch_rows(&self, url: &str) -> Result<Vec<Value>, SupabaseError> {
        let response = self.authorized_get(url).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Supabase request failed: {} - {}", status, body);
            return Err(SupabaseError::ApiError(format!("Request failed: {}", status)));
        }

        let json: Value = response.json().await?;

        match json {
            Value::Array(rows) => Ok(rows),
            _ => Err(SupabaseError::InvalidResponse("Expected an array of rows".into())),
        }
    }
}
