use crate::error::{ServerError, ServerResult};
use crate::middleware::CurrentUser;
use crate::state::ServerState;
use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use lostfound::{
    CategoryFilter, ItemDetail, KindFilter, ListingFilter, NewItemReport, ScoredItem,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Listing query string. Absent or "All" values disable a predicate.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ListingParams {
    fn into_filter(self) -> ServerResult<ListingFilter> {
        let kind = match self.kind.as_deref() {
            Some(raw) => raw
                .parse::<KindFilter>()
                .map_err(|e| ServerError::BadRequest(e.to_string()))?,
            None => KindFilter::All,
        };
        let category = match self.category.as_deref() {
            Some(raw) => raw
                .parse::<CategoryFilter>()
                .map_err(|e| ServerError::BadRequest(e.to_string()))?,
            None => CategoryFilter::All,
        };

        Ok(ListingFilter::new()
            .with_search(self.search.unwrap_or_default())
            .with_kind(kind)
            .with_category(category))
    }
}

/// A scored item as one viewer sees it
#[derive(Debug, Serialize, Deserialize)]
pub struct ListingEntry {
    #[serde(flatten)]
    pub scored: ScoredItem,
    pub liked: bool,
}

/// Listing response
#[derive(Debug, Serialize, Deserialize)]
pub struct ListingResponse {
    pub total: usize,
    pub possible_matches: Vec<ListingEntry>,
    pub others: Vec<ListingEntry>,
}

/// Item detail as one viewer sees it
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    #[serde(flatten)]
    pub detail: ItemDetail,
    pub liked: bool,
}

/// Like toggle result
#[derive(Debug, Serialize, Deserialize)]
pub struct LikeResponse {
    pub id: u64,
    pub liked: bool,
}

fn with_likes(items: Vec<ScoredItem>, liked: &HashSet<u64>) -> Vec<ListingEntry> {
    items
        .into_iter()
        .map(|scored| ListingEntry {
            liked: liked.contains(&scored.id()),
            scored,
        })
        .collect()
}

/// GET /api/v1/items
pub async fn list_items(
    State(state): State<Arc<ServerState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<ListingParams>,
) -> ServerResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let buckets = state.catalog.query(&filter);
    let liked = state.catalog.liked_by(&user.id);

    metrics::counter!("lostfound_listing_queries_total").increment(1);
    tracing::debug!(
        search = %filter.search,
        total = buckets.total(),
        possible_matches = buckets.possible_matches.len(),
        "listing_query"
    );

    Ok(Json(ListingResponse {
        total: buckets.total(),
        possible_matches: with_likes(buckets.possible_matches, &liked),
        others: with_likes(buckets.others, &liked),
    }))
}

/// POST /api/v1/items
pub async fn submit_item(
    State(state): State<Arc<ServerState>>,
    Json(report): Json<NewItemReport>,
) -> ServerResult<impl IntoResponse> {
    let scored = state.catalog.submit(report)?;
    metrics::counter!("lostfound_reports_total", "type" => scored.item.kind.as_str())
        .increment(1);

    Ok((StatusCode::CREATED, Json(scored)))
}

/// GET /api/v1/items/{id}
pub async fn get_item(
    State(state): State<Arc<ServerState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    let detail = state.catalog.detail(id)?;
    let liked = state.catalog.liked_by(&user.id).contains(&id);

    Ok(Json(DetailResponse { detail, liked }))
}

/// POST /api/v1/items/{id}/like
pub async fn toggle_like(
    State(state): State<Arc<ServerState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> ServerResult<impl IntoResponse> {
    let liked = state.catalog.toggle_like(&user.id, id)?;
    Ok(Json(LikeResponse { id, liked }))
}

/// GET /api/v1/categories
pub async fn list_categories() -> impl IntoResponse {
    let names: Vec<String> = CategoryFilter::options()
        .into_iter()
        .map(|option| option.to_string())
        .collect();
    Json(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lostfound::Category;

    #[test]
    fn params_default_to_everything() {
        let filter = ListingParams::default().into_filter().unwrap();
        assert_eq!(filter, ListingFilter::new());
    }

    #[test]
    fn params_parse_case_insensitively() {
        let params = ListingParams {
            search: Some("wallet".into()),
            kind: Some("lost".into()),
            category: Some("accessories".into()),
        };
        let filter = params.into_filter().unwrap();
        assert_eq!(filter.kind, KindFilter::Lost);
        assert_eq!(filter.category, CategoryFilter::Only(Category::Accessories));
        assert_eq!(filter.search, "wallet");
    }

    #[test]
    fn unknown_category_is_a_bad_request() {
        let params = ListingParams {
            category: Some("Vehicles".into()),
            ..ListingParams::default()
        };
        let err = params.into_filter().unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
