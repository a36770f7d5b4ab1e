//! Federated full-text search.
//!
//! One query fanned out across characters, campaigns, maps and locations.
//! Results are merged in that fixed order with no cross-kind ranking;
//! per-kind order is whatever the store returns.

use axum::{
    extract::{Query, State},
    Json,
};
use uuid::Uuid;

use domain::models::search::{SearchHit, SearchKind, SearchQuery, SearchResponse};
use persistence::entities::SearchRowEntity;
use persistence::repositories::SearchRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

fn to_hits(rows: Vec<SearchRowEntity>, kind: SearchKind) -> impl Iterator<Item = SearchHit> {
    rows.into_iter().map(move |row| SearchHit {
        kind,
        id: row.id,
        name: row.name,
        description: row.description,
        campaign_id: row.campaign_id,
        map_id: row.map_id,
    })
}

/// Search across all entity kinds the user can read.
///
/// GET /api/v1/search?q=...
pub async fn search(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    shared::validation::validate_search_query(&query.q).map_err(|e| {
        ApiError::Validation(e.message.map(|m| m.to_string()).unwrap_or_default())
    })?;
    let text = query.q.trim().to_string();
    let user_id: Uuid = user_auth.user_id;

    let repo = SearchRepository::new(state.pool.clone());

    let characters = repo.search_characters(user_id, &text).await?;
    let campaigns = repo.search_campaigns(user_id, &text).await?;
    let maps = repo.search_maps(user_id, &text).await?;
    let locations = repo.search_locations(user_id, &text).await?;

    let data: Vec<SearchHit> = to_hits(characters, SearchKind::Character)
        .chain(to_hits(campaigns, SearchKind::Campaign))
        .chain(to_hits(maps, SearchKind::Map))
        .chain(to_hits(locations, SearchKind::Location))
        .collect();

    tracing::info!(
        user_id = %user_id,
        query = %text,
        hits = data.len(),
        "Search executed"
    );

    let count = data.len();
    Ok(Json(SearchResponse {
        query: text,
        data,
        count,
    }))
}
