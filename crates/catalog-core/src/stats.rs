use serde::{Deserialize, Serialize};
use shared_types::Difficulty;

use crate::corpus::Corpus;

/// Catalog-wide counts for dashboard headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_questions: usize,
    pub total_companies: usize,
    pub total_categories: usize,
    pub total_solutions: usize,
    pub by_difficulty: DifficultyBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyBreakdown {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl DifficultyBreakdown {
    pub fn get(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl CatalogStats {
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut by_difficulty = DifficultyBreakdown::default();
        for question in corpus.questions() {
            match question.difficulty {
                Difficulty::Easy => by_difficulty.easy += 1,
                Difficulty::Medium => by_difficulty.medium += 1,
                Difficulty::Hard => by_difficulty.hard += 1,
            }
        }

        Self {
            total_questions: corpus.len(),
            total_companies: corpus.companies().len(),
            total_categories: corpus.categories().len(),
            total_solutions: corpus.solutions().len(),
            by_difficulty,
        }
    }
}
