//! Query module - facet filtering, ordering and pagination over the corpus
//!
//! This module provides:
//! - `FilterSet` and `SortKey`, the inputs of a catalog query
//! - Facet matching (search text, company, difficulty, category)
//! - Stable ordering per sort key
//! - Page slicing with the pre-slice match count
//! - Related-question selection for detail views

pub mod filter;
pub mod related;
pub mod sort;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared_types::{Category, Company, Difficulty, Question, Solution};

use crate::corpus::Corpus;
use crate::error::{CatalogError, Result};
use crate::stats::CatalogStats;

pub use filter::Matcher;

/// Page size used when the caller does not pick one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Number of related questions shown next to a question
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Result ordering
///
/// Unknown names parse to [`SortKey::Recent`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SortKey {
    /// Newest first
    #[default]
    Recent,
    /// Most viewed first
    Views,
    /// Most bookmarked first
    Bookmarks,
    /// Easy, then Medium, then Hard
    DifficultyAsc,
    /// Hard, then Medium, then Easy
    DifficultyDesc,
    /// Title, ascending
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Recent,
        SortKey::Views,
        SortKey::Bookmarks,
        SortKey::DifficultyAsc,
        SortKey::DifficultyDesc,
        SortKey::Title,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Recent => "recent",
            SortKey::Views => "views",
            SortKey::Bookmarks => "bookmarks",
            SortKey::DifficultyAsc => "difficulty_asc",
            SortKey::DifficultyDesc => "difficulty_desc",
            SortKey::Title => "title",
        }
    }

    /// Lenient parse: anything unrecognised falls back to `Recent`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "views" => SortKey::Views,
            "bookmarks" => SortKey::Bookmarks,
            "difficulty_asc" => SortKey::DifficultyAsc,
            "difficulty_desc" => SortKey::DifficultyDesc,
            "title" => SortKey::Title,
            _ => SortKey::Recent,
        }
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        SortKey::parse(s)
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        SortKey::parse(&s)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facet constraints plus a sort key for one query
///
/// An empty search string or an empty set leaves that facet unconstrained.
/// Facets combine with AND; values inside one facet combine with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    pub search: String,
    pub companies: BTreeSet<String>,
    pub difficulties: BTreeSet<Difficulty>,
    pub categories: BTreeSet<String>,
    pub sort: SortKey,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    pub fn with_company(mut self, company_id: &str) -> Self {
        self.companies.insert(company_id.to_string());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulties.insert(difficulty);
        self
    }

    pub fn with_category(mut self, category_id: &str) -> Self {
        self.categories.insert(category_id.to_string());
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// True when no facet restricts the result set
    pub fn is_unconstrained(&self) -> bool {
        self.search.is_empty()
            && self.companies.is_empty()
            && self.difficulties.is_empty()
            && self.categories.is_empty()
    }
}

/// One page of query results
#[derive(Debug, Clone, Serialize)]
pub struct QueryPage<'a> {
    /// At most `page_size` questions
    pub items: Vec<&'a Question>,
    /// Number of matching questions before slicing
    pub total: usize,
    /// 1-based page number, after clamping
    pub page: usize,
    /// Page size, after clamping
    pub page_size: usize,
}

impl QueryPage<'_> {
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `ceil(total / page_size)`, zero when there is nothing to page
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Filter, order and slice `questions`
///
/// Pure function of its inputs. `page` is 1-based; values below 1 are
/// clamped to 1, and a `page_size` of 0 is clamped to 1. A page past the
/// end yields no items but still reports the full `total`.
pub fn query<'a>(
    questions: &'a [Question],
    filters: &FilterSet,
    page: usize,
    page_size: usize,
) -> QueryPage<'a> {
    let page = page.max(1);
    let page_size = page_size.max(1);

    let matcher = Matcher::new(filters);
    let mut matched: Vec<&Question> = questions.iter().filter(|q| matcher.matches(q)).collect();
    sort::sort_questions(&mut matched, filters.sort);

    let total = matched.len();
    let start = (page - 1).saturating_mul(page_size);
    let items: Vec<&Question> = matched.into_iter().skip(start).take(page_size).collect();

    tracing::debug!(
        "Query sort={} page={} page_size={}: {} matches, {} returned",
        filters.sort,
        page,
        page_size,
        total,
        items.len()
    );

    QueryPage {
        items,
        total,
        page,
        page_size,
    }
}

/// Read-only query surface over a loaded corpus
#[derive(Debug, Clone)]
pub struct QueryEngine {
    corpus: Arc<Corpus>,
    by_id: HashMap<String, usize>,
}

impl QueryEngine {
    pub fn new(corpus: Corpus) -> Self {
        Self::from_shared(Arc::new(corpus))
    }

    pub fn from_shared(corpus: Arc<Corpus>) -> Self {
        let by_id = corpus
            .questions()
            .iter()
            .enumerate()
            .map(|(idx, q)| (q.id.clone(), idx))
            .collect();

        Self { corpus, by_id }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// See [`query`]
    pub fn query(&self, filters: &FilterSet, page: usize, page_size: usize) -> QueryPage<'_> {
        query(self.corpus.questions(), filters, page, page_size)
    }

    /// Look up a question for a detail view
    pub fn get_by_id(&self, id: &str) -> Result<&Question> {
        self.by_id
            .get(id)
            .map(|&idx| &self.corpus.questions()[idx])
            .ok_or_else(|| CatalogError::question_not_found(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Best-effort recommendations; an unknown id gives an empty list
    pub fn get_related(&self, id: &str, limit: usize) -> Vec<&Question> {
        related::related(self.corpus.questions(), id, limit)
    }

    /// Solutions for a question, in catalog order
    pub fn solutions_for(&self, question_id: &str) -> Vec<&Solution> {
        self.corpus
            .solutions()
            .iter()
            .filter(|s| s.question_id == question_id)
            .collect()
    }

    pub fn get_solution(&self, id: &str) -> Result<&Solution> {
        self.corpus
            .solutions()
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CatalogError::solution_not_found(id))
    }

    pub fn companies(&self) -> &[Company] {
        self.corpus.companies()
    }

    pub fn categories(&self) -> &[Category] {
        self.corpus.categories()
    }

    /// Every question id in corpus order
    pub fn question_ids(&self) -> Vec<&str> {
        self.corpus.questions().iter().map(|q| q.id.as_str()).collect()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::from_corpus(&self.corpus)
    }
}
