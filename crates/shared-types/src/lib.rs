pub mod records;
pub mod types;

pub use records::{CatalogFile, QuestionRecord, SolutionRecord};
pub use types::{
    Author, Category, Company, Difficulty, ParseDifficultyError, Question, Solution,
};
