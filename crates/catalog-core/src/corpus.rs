//! Corpus loading
//!
//! Reads the catalog file, resolves question and solution references into
//! denormalized records, and checks the corpus invariants:
//! - ids are unique within each table
//! - every question has a resolvable company and author
//! - every question has at least one category, all resolvable
//! - every solution points at a known question and author
//!
//! Question order in the file is the corpus order used for tie-breaking.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use shared_types::{
    Author, CatalogFile, Category, Company, Question, QuestionRecord, Solution, SolutionRecord,
};

use crate::error::{CatalogError, Result};

/// Catalog shipped with the crate
pub const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

/// The immutable question catalog
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    companies: Vec<Company>,
    categories: Vec<Category>,
    questions: Vec<Question>,
    solutions: Vec<Solution>,
}

impl Corpus {
    /// Build a corpus from already-resolved records, checking invariants
    pub fn new(
        companies: Vec<Company>,
        categories: Vec<Category>,
        questions: Vec<Question>,
        solutions: Vec<Solution>,
    ) -> Result<Self> {
        ensure_unique("company", companies.iter().map(|c| c.id.as_str()))?;
        ensure_unique("category", categories.iter().map(|c| c.id.as_str()))?;
        ensure_unique("question", questions.iter().map(|q| q.id.as_str()))?;
        ensure_unique("solution", solutions.iter().map(|s| s.id.as_str()))?;

        if let Some(q) = questions.iter().find(|q| q.categories.is_empty()) {
            return Err(CatalogError::InvalidCorpus(format!(
                "question {} has no categories",
                q.id
            )));
        }

        let question_ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        if let Some(s) = solutions
            .iter()
            .find(|s| !question_ids.contains(s.question_id.as_str()))
        {
            return Err(CatalogError::InvalidCorpus(format!(
                "solution {} references unknown question {}",
                s.id, s.question_id
            )));
        }

        Ok(Self {
            companies,
            categories,
            questions,
            solutions,
        })
    }

    /// Load the catalog bundled with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> Result<Self> {
        tracing::info!("Loading catalog from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_records(file)
    }

    /// Resolve id references in a parsed catalog file
    pub fn from_records(file: CatalogFile) -> Result<Self> {
        let CatalogFile {
            companies,
            categories,
            authors,
            questions,
            solutions,
        } = file;

        let (questions, solutions) = {
            let company_index = index_by_id("company", &companies, |c| &c.id)?;
            let category_index = index_by_id("category", &categories, |c| &c.id)?;
            let author_index = index_by_id("author", &authors, |a| &a.id)?;

            let questions = questions
                .into_iter()
                .map(|record| {
                    resolve_question(record, &company_index, &category_index, &author_index)
                })
                .collect::<Result<Vec<_>>>()?;

            let solutions = solutions
                .into_iter()
                .map(|record| resolve_solution(record, &author_index))
                .collect::<Result<Vec<_>>>()?;

            (questions, solutions)
        };

        let corpus = Self::new(companies, categories, questions, solutions)?;

        tracing::debug!(
            "Resolved catalog: {} questions, {} companies, {} categories, {} solutions",
            corpus.questions.len(),
            corpus.companies.len(),
            corpus.categories.len(),
            corpus.solutions.len()
        );

        Ok(corpus)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::InvalidCorpus(format!(
                "duplicate {} id: {}",
                kind, id
            )));
        }
    }
    Ok(())
}

fn index_by_id<'a, T>(
    kind: &str,
    items: &'a [T],
    id: impl Fn(&T) -> &String,
) -> Result<HashMap<&'a str, &'a T>> {
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        if index.insert(id(item).as_str(), item).is_some() {
            return Err(CatalogError::InvalidCorpus(format!(
                "duplicate {} id: {}",
                kind,
                id(item)
            )));
        }
    }
    Ok(index)
}

fn resolve_author(owner: &str, author_id: &str, authors: &HashMap<&str, &Author>) -> Result<Author> {
    authors
        .get(author_id)
        .map(|a| (*a).clone())
        .ok_or_else(|| {
            CatalogError::InvalidCorpus(format!("{} references unknown author {}", owner, author_id))
        })
}

fn resolve_question(
    record: QuestionRecord,
    companies: &HashMap<&str, &Company>,
    categories: &HashMap<&str, &Category>,
    authors: &HashMap<&str, &Author>,
) -> Result<Question> {
    let company = companies
        .get(record.company_id.as_str())
        .map(|c| (*c).clone())
        .ok_or_else(|| {
            CatalogError::InvalidCorpus(format!(
                "question {} references unknown company {}",
                record.id, record.company_id
            ))
        })?;

    if record.category_ids.is_empty() {
        return Err(CatalogError::InvalidCorpus(format!(
            "question {} has no categories",
            record.id
        )));
    }

    let resolved_categories = record
        .category_ids
        .iter()
        .map(|id| {
            categories.get(id.as_str()).map(|c| (*c).clone()).ok_or_else(|| {
                CatalogError::InvalidCorpus(format!(
                    "question {} references unknown category {}",
                    record.id, id
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let author = resolve_author(&format!("question {}", record.id), &record.author_id, authors)?;

    Ok(Question {
        id: record.id,
        title: record.title,
        description: record.description,
        company,
        difficulty: record.difficulty,
        categories: resolved_categories,
        tags: record.tags,
        view_count: record.view_count,
        solution_count: record.solution_count,
        bookmark_count: record.bookmark_count,
        created_at: record.created_at,
        author,
    })
}

fn resolve_solution(record: SolutionRecord, authors: &HashMap<&str, &Author>) -> Result<Solution> {
    let author = resolve_author(&format!("solution {}", record.id), &record.author_id, authors)?;

    Ok(Solution {
        id: record.id,
        question_id: record.question_id,
        title: record.title,
        explanation: record.explanation,
        code: record.code,
        language: record.language,
        time_complexity: record.time_complexity,
        space_complexity: record.space_complexity,
        upvotes: record.upvotes,
        downvotes: record.downvotes,
        created_at: record.created_at,
        author,
    })
}
