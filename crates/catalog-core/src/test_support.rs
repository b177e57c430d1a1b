use chrono::{Duration, TimeZone, Utc};
use shared_types::{Author, Category, Company, Question};

/// Minimal question fixture; `created_at` is derived from the id so that
/// fixtures built in order are not all equal
pub fn question(id: &str, difficulty: &str, company_id: &str, category_ids: &[&str]) -> Question {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let offset = id.bytes().map(i64::from).sum::<i64>();

    Question {
        id: id.to_string(),
        title: format!("Question {}", id),
        description: String::new(),
        company: Company {
            id: company_id.to_string(),
            name: company_id.to_string(),
            logo: String::new(),
            description: String::new(),
            question_count: 0,
        },
        difficulty: difficulty.parse().unwrap(),
        categories: category_ids
            .iter()
            .map(|c| Category {
                id: c.to_string(),
                name: c.to_string(),
                icon: String::new(),
                description: String::new(),
                question_count: 0,
            })
            .collect(),
        tags: Vec::new(),
        view_count: 0,
        solution_count: 0,
        bookmark_count: 0,
        created_at: base + Duration::minutes(offset),
        author: Author {
            id: "a1".to_string(),
            name: "Test Author".to_string(),
            avatar: String::new(),
        },
    }
}
