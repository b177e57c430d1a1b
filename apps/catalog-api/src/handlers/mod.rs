//! HTTP request handlers for the Catalog API
//!
//! Provides handlers for:
//! - Health checks
//! - Question listing with facets, sorting and pagination
//! - Question detail, related questions and solutions
//! - Solution votes
//! - Bookmarks
//! - Company, category and stats listings

use axum::{
    extract::{Path, Query, State},
    Json,
};
use catalog_core::query::{FilterSet, SortKey, DEFAULT_RELATED_LIMIT};
use catalog_core::{CatalogError, CatalogStats, Vote};
use serde::{Deserialize, Serialize};
use shared_types::{Category, Company, Difficulty, Question, Solution};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

/// Query string for `GET /api/questions`
///
/// Multi-value facets are comma-separated, e.g. `companies=1,3`.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionListParams {
    #[serde(default)]
    pub search: String,
    pub companies: Option<String>,
    pub difficulties: Option<String>,
    pub categories: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

fn split_csv(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl QuestionListParams {
    pub fn to_filter_set(&self) -> Result<FilterSet, ApiError> {
        let difficulties = split_csv(self.difficulties.as_deref())
            .map(|d| {
                d.parse::<Difficulty>()
                    .map_err(|e| ApiError::InvalidRequest(e.to_string()))
            })
            .collect::<Result<_, _>>()?;

        Ok(FilterSet {
            search: self.search.clone(),
            companies: split_csv(self.companies.as_deref()).map(String::from).collect(),
            difficulties,
            categories: split_csv(self.categories.as_deref()).map(String::from).collect(),
            sort: self.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RelatedParams {
    #[serde(default = "default_related_limit")]
    pub limit: usize,
}

fn default_related_limit() -> usize {
    DEFAULT_RELATED_LIMIT
}

/// A question as shown to this session
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    #[serde(flatten)]
    pub question: Question,
    pub is_bookmarked: bool,
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub items: Vec<QuestionResponse>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub sort: SortKey,
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

#[derive(Debug, Serialize)]
pub struct SolutionListResponse {
    pub question_id: String,
    pub solutions: Vec<Solution>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub solution_id: String,
    pub upvotes: u64,
    pub downvotes: u64,
}

#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub question_id: String,
    pub bookmarked: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub questions: usize,
    pub timestamp: String,
}

fn present(state: &AppState, question: &Question) -> QuestionResponse {
    QuestionResponse {
        question: question.clone(),
        is_bookmarked: state.bookmarks.get(&question.id),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "catalog-api",
        version: env!("CARGO_PKG_VERSION"),
        questions: state.engine.corpus().len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Filtered, sorted, paginated question listing
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QuestionListParams>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let filters = params.to_filter_set()?;
    let per_page = state.config.clamp_page_size(params.per_page);
    let page = params.page.unwrap_or(1);

    info!(
        "List questions: search='{}', sort={}, page={}, per_page={}",
        filters.search, filters.sort, page, per_page
    );

    let result = state.engine.query(&filters, page, per_page);
    let total_pages = result.total_pages();

    Ok(Json(QuestionListResponse {
        items: result.items.iter().map(|q| present(&state, q)).collect(),
        total: result.total,
        page: result.page,
        per_page: result.page_size,
        total_pages,
        sort: filters.sort,
    }))
}

/// Get question by ID
pub async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<QuestionResponse>, ApiError> {
    debug!("Get question: id='{}'", id);
    let question = state.engine.get_by_id(&id)?;
    Ok(Json(present(&state, question)))
}

/// Questions sharing a category or company with the given one
pub async fn related_questions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<RelatedParams>,
) -> Json<ListResponse<QuestionResponse>> {
    let related: Vec<QuestionResponse> = state
        .engine
        .get_related(&id, params.limit)
        .into_iter()
        .map(|q| present(&state, q))
        .collect();

    Json(related.into())
}

/// Solutions for a question with this session's votes applied
pub async fn list_solutions(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SolutionListResponse>, ApiError> {
    state.engine.get_by_id(&id)?;

    let votes = state.votes.read().await;
    let solutions: Vec<Solution> = state
        .engine
        .solutions_for(&id)
        .into_iter()
        .map(|s| votes.apply(s))
        .collect();

    Ok(Json(SolutionListResponse {
        question_id: id,
        count: solutions.len(),
        solutions,
    }))
}

async fn cast_vote(state: &AppState, solution_id: &str, vote: Vote) -> Result<VoteResponse, ApiError> {
    let solution = state.engine.get_solution(solution_id)?;

    let mut votes = state.votes.write().await;
    votes.cast(solution_id, vote);
    let updated = votes.apply(solution);
    info!("Vote {:?} on solution {}", vote, solution_id);

    Ok(VoteResponse {
        solution_id: updated.id,
        upvotes: updated.upvotes,
        downvotes: updated.downvotes,
    })
}

pub async fn upvote_solution(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VoteResponse>, ApiError> {
    cast_vote(&state, &id, Vote::Up).await.map(Json)
}

pub async fn downvote_solution(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VoteResponse>, ApiError> {
    cast_vote(&state, &id, Vote::Down).await.map(Json)
}

/// Bookmarked questions in corpus order
pub async fn list_bookmarks(
    State(state): State<Arc<AppState>>,
) -> Json<ListResponse<QuestionResponse>> {
    let ids = state.bookmarks.list();
    let bookmarked: Vec<QuestionResponse> = state
        .engine
        .corpus()
        .questions()
        .iter()
        .filter(|q| ids.contains(&q.id))
        .map(|q| QuestionResponse {
            question: q.clone(),
            is_bookmarked: true,
        })
        .collect();

    Json(bookmarked.into())
}

/// File-backed stores write to disk, so the update runs on the blocking pool
async fn set_bookmark(
    state: &AppState,
    question_id: String,
    bookmarked: bool,
) -> Result<Json<BookmarkResponse>, ApiError> {
    if !state.engine.contains(&question_id) {
        return Err(CatalogError::question_not_found(&question_id).into());
    }

    let store = Arc::clone(&state.bookmarks);
    let id = question_id.clone();
    match tokio::task::spawn_blocking(move || store.set(&id, bookmarked)).await {
        Ok(result) => result?,
        Err(join_error) => {
            return Err(ApiError::Internal(anyhow::anyhow!(
                "Bookmark task panicked: {}",
                join_error
            )));
        }
    }
    info!("Bookmark {}: {}", question_id, bookmarked);

    Ok(Json(BookmarkResponse {
        question_id,
        bookmarked,
    }))
}

pub async fn add_bookmark(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    set_bookmark(&state, id, true).await
}

pub async fn remove_bookmark(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookmarkResponse>, ApiError> {
    set_bookmark(&state, id, false).await
}

pub async fn list_companies(State(state): State<Arc<AppState>>) -> Json<ListResponse<Company>> {
    Json(state.engine.companies().to_vec().into())
}

pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<ListResponse<Category>> {
    Json(state.engine.categories().to_vec().into())
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    Json(state.engine.stats())
}
