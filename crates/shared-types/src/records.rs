//! On-disk catalog records
//!
//! The bundled catalog file stores questions and solutions with id references
//! into the company, category and author tables. The loader in `catalog-core`
//! resolves them into [`crate::Question`] and [`crate::Solution`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Author, Category, Company, Difficulty};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    #[serde(default)]
    pub solutions: Vec<SolutionRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub company_id: String,
    pub difficulty: Difficulty,
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub solution_count: u64,
    #[serde(default)]
    pub bookmark_count: u64,
    pub created_at: DateTime<Utc>,
    pub author_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub id: String,
    pub question_id: String,
    pub title: String,
    pub explanation: String,
    pub code: String,
    pub language: String,
    pub time_complexity: String,
    pub space_complexity: String,
    #[serde(default)]
    pub upvotes: u64,
    #[serde(default)]
    pub downvotes: u64,
    pub created_at: DateTime<Utc>,
    pub author_id: String,
}
