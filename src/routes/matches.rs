use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use validator::Validate;
use crate::models::{ErrorResponse, HealthResponse, MatchesQuery, MatchesResponse, SubjectType};
use crate::services::{CacheError, CacheKey, CacheManager, SupabaseClient, SupabaseError};
use crate::core::Matcher;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SupabaseClient>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::resource("/matches")
            .route(web::get().to(find_matches))
            .default_service(web::to(method_not_allowed)),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Profile store health check failed: {}", e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse::new(
        "Method not allowed",
        "Only GET is supported",
        405,
    ))
}

/// Find matches endpoint
///
/// GET /matches?subjectId={id}&subjectType={business|influencer}
///
/// Scores every profile of the opposite type against the subject and returns
/// them best first:
/// ```json
/// { "matches": [ { "profile": {}, "score": 0.91, "matchReasons": [] } ] }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    query: web::Query<MatchesQuery>,
) -> Result<HttpResponse, ErrorResponse> {
    let query = query.into_inner();

    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for matches request: {:?}", errors);
        return Err(ErrorResponse::bad_request("Validation failed", errors.to_string()));
    }

    let (subject_id, subject_type) = match (query.subject_id.as_deref(), query.subject_type.as_deref()) {
        (Some(id), Some(subject_type)) => (id, subject_type),
        _ => {
            return Err(ErrorResponse::bad_request(
                "Missing required parameters",
                "subjectId and subjectType query parameters are required",
            ));
        }
    };

    let subject_type = subject_type
        .parse::<SubjectType>()
        .map_err(|message: String| ErrorResponse::bad_request("Invalid subjectType", message))?;

    tracing::info!("Finding matches for {} {}", subject_type, subject_id);

    let subject = load_subject(&state, subject_type, subject_id)
        .await
        .map_err(|e| match e {
            SupabaseError::NotFound(message) => ErrorResponse::not_found("Profile not found", message),
            other => {
                tracing::error!("Failed to fetch {} profile {}: {}", subject_type, subject_id, other);
                ErrorResponse::internal("Failed to fetch subject profile", other.to_string())
            }
        })?;

    let candidates = load_candidates(&state, subject_type.opposite())
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch candidates for {}: {}", subject_id, e);
            ErrorResponse::internal("Failed to fetch potential matches", e.to_string())
        })?;

    let outcome = state
        .matcher
        .rank_records(subject_type, &subject, candidates)
        .map_err(|e| {
            tracing::error!("Stored {} profile {} is malformed: {}", subject_type, subject_id, e);
            ErrorResponse::internal("Malformed subject profile", e.to_string())
        })?;

    tracing::info!(
        "Returning {} matches for {} {} (from {} candidates, {} skipped)",
        outcome.matches.len(),
        subject_type,
        subject_id,
        outcome.total_candidates,
        outcome.skipped
    );

    Ok(HttpResponse::Ok().json(MatchesResponse {
        matches: outcome.matches,
    }))
}

/// Read-through lookup of the subject row
async fn load_subject(
    state: &AppState,
    subject_type: SubjectType,
    subject_id: &str,
) -> Result<Value, SupabaseError> {
    let key = CacheKey::profile(subject_type, subject_id);
    if let Some(row) = cached(&state.cache, &key).await {
        return Ok(row);
    }

    let row = state.store.get_profile(subject_type, subject_id).await?;
    store_in_cache(&state.cache, &key, &row).await;
    Ok(row)
}

/// Read-through lookup of every candidate row of one type
async fn load_candidates(
    state: &AppState,
    candidate_type: SubjectType,
) -> Result<Vec<Value>, SupabaseError> {
    let key = CacheKey::candidates(candidate_type);
    if let Some(rows) = cached(&state.cache, &key).await {
        return Ok(rows);
    }

    let rows = state.store.list_profiles(candidate_type).await?;
    store_in_cache(&state.cache, &key, &rows).await;
    Ok(rows)
}

async fn cached<T>(cache: &CacheManager, key: &str) -> Option<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    match cache.get(key).await {
        Ok(value) => Some(value),
        Err(CacheError::CacheMiss(_)) => None,
        Err(e) => {
            tracing::warn!("Cache read failed for {}, falling back to store: {}", key, e);
            None
        }
    }
}

async fn store_in_cache<T: serde::Serialize>(cache: &CacheManager, key: &str, value: &T) {
    if let Err(e) = cache.set(key, value).await {
        tracing::warn!("Failed to cache {}: {}", key, e);
    }
}
