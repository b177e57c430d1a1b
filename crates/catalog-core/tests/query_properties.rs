//! Property-based tests for the catalog query engine
//!
//! Generates small corpora with many key collisions so that tie-breaking,
//! facet composition and page slicing are all exercised.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::BTreeSet;

use catalog_core::query::{query, total_pages, FilterSet, SortKey};
use catalog_core::{Corpus, QueryEngine};
use shared_types::{Author, Category, Company, Difficulty, Question};

// ============================================================
// Fixtures
// ============================================================

const TITLES: [&str; 5] = ["Two Sum", "two sum", "Alpha Tree", "beta graph", "Sum Tree"];
const TAGS: [&str; 4] = ["hash-table", "DP", "graph", "two-pointers"];
const SEARCHES: [&str; 5] = ["", "sum", "TREE", "dp", "zzz"];

#[derive(Debug, Clone)]
struct Shape {
    difficulty: usize,
    company: usize,
    categories: BTreeSet<usize>,
    title: usize,
    tag: usize,
    views: u64,
    bookmarks: u64,
    age_days: i64,
}

fn shape() -> impl Strategy<Value = Shape> {
    (
        0usize..3,
        0usize..4,
        prop::collection::btree_set(0usize..5, 1..3),
        0usize..TITLES.len(),
        0usize..TAGS.len(),
        0u64..4,
        0u64..4,
        0i64..6,
    )
        .prop_map(
            |(difficulty, company, categories, title, tag, views, bookmarks, age_days)| Shape {
                difficulty,
                company,
                categories,
                title,
                tag,
                views,
                bookmarks,
                age_days,
            },
        )
}

fn build(shapes: &[Shape]) -> Vec<Question> {
    let base = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();

    shapes
        .iter()
        .enumerate()
        .map(|(i, s)| Question {
            id: format!("q{}", i),
            title: TITLES[s.title].to_string(),
            description: format!("Question number {}", i),
            company: Company {
                id: format!("c{}", s.company),
                name: format!("Company {}", s.company),
                logo: String::new(),
                description: String::new(),
                question_count: 0,
            },
            difficulty: Difficulty::ALL[s.difficulty],
            categories: s
                .categories
                .iter()
                .map(|c| Category {
                    id: format!("k{}", c),
                    name: format!("Category {}", c),
                    icon: String::new(),
                    description: String::new(),
                    question_count: 0,
                })
                .collect(),
            tags: vec![TAGS[s.tag].to_string()],
            view_count: s.views,
            solution_count: 0,
            bookmark_count: s.bookmarks,
            created_at: base - Duration::days(s.age_days),
            author: Author {
                id: "a1".to_string(),
                name: "Author".to_string(),
                avatar: String::new(),
            },
        })
        .collect()
}

fn filter_set() -> impl Strategy<Value = FilterSet> {
    (
        0usize..SEARCHES.len(),
        prop::collection::btree_set(0usize..4, 0..3),
        prop::collection::btree_set(0usize..3, 0..3),
        prop::collection::btree_set(0usize..5, 0..3),
        0usize..SortKey::ALL.len(),
    )
        .prop_map(|(search, companies, difficulties, categories, sort)| FilterSet {
            search: SEARCHES[search].to_string(),
            companies: companies.into_iter().map(|c| format!("c{}", c)).collect(),
            difficulties: difficulties.into_iter().map(|d| Difficulty::ALL[d]).collect(),
            categories: categories.into_iter().map(|c| format!("k{}", c)).collect(),
            sort: SortKey::ALL[sort],
        })
}

/// Straightforward restatement of the matching rules
fn expected_match(q: &Question, f: &FilterSet) -> bool {
    let needle = f.search.to_lowercase();
    let search_ok = f.search.is_empty()
        || q.title.to_lowercase().contains(&needle)
        || q.description.to_lowercase().contains(&needle)
        || q.tags.iter().any(|t| t.to_lowercase().contains(&needle));
    let company_ok = f.companies.is_empty() || f.companies.contains(&q.company.id);
    let difficulty_ok = f.difficulties.is_empty() || f.difficulties.contains(&q.difficulty);
    let category_ok =
        f.categories.is_empty() || q.categories.iter().any(|c| f.categories.contains(&c.id));
    search_ok && company_ok && difficulty_ok && category_ok
}

fn position(questions: &[Question], id: &str) -> usize {
    questions.iter().position(|q| q.id == id).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn total_is_independent_of_page(
        shapes in prop::collection::vec(shape(), 0..40),
        filters in filter_set(),
        page_size in 1usize..12,
    ) {
        let corpus = build(&shapes);
        let first = query(&corpus, &filters, 1, page_size).total;
        for page in 2..=6 {
            prop_assert_eq!(query(&corpus, &filters, page, page_size).total, first);
        }
    }

    #[test]
    fn total_counts_exact_matches(
        shapes in prop::collection::vec(shape(), 0..40),
        filters in filter_set(),
    ) {
        let corpus = build(&shapes);
        let expected = corpus.iter().filter(|q| expected_match(q, &filters)).count();
        let page = query(&corpus, &filters, 1, 10);
        prop_assert_eq!(page.total, expected);
        prop_assert!(page.items.iter().all(|q| expected_match(q, &filters)));
    }

    #[test]
    fn pages_partition_the_sorted_matches(
        shapes in prop::collection::vec(shape(), 0..40),
        filters in filter_set(),
        page_size in 1usize..12,
    ) {
        let corpus = build(&shapes);
        let everything: Vec<String> = query(&corpus, &filters, 1, corpus.len().max(1))
            .items
            .iter()
            .map(|q| q.id.clone())
            .collect();

        let pages = total_pages(everything.len(), page_size);
        let mut stitched = Vec::new();
        for page in 1..=pages {
            let result = query(&corpus, &filters, page, page_size);
            prop_assert!(result.items.len() <= page_size);
            stitched.extend(result.items.iter().map(|q| q.id.clone()));
        }

        prop_assert_eq!(&stitched, &everything);
        let unique: BTreeSet<&String> = stitched.iter().collect();
        prop_assert_eq!(unique.len(), stitched.len());
        prop_assert!(query(&corpus, &filters, pages + 1, page_size).items.is_empty());
    }

    #[test]
    fn equal_keys_keep_corpus_order(
        shapes in prop::collection::vec(shape(), 0..40),
        filters in filter_set(),
    ) {
        let corpus = build(&shapes);
        let result = query(&corpus, &filters, 1, corpus.len().max(1));

        for pair in result.items.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let tied = match filters.sort {
                SortKey::Recent => a.created_at == b.created_at,
                SortKey::Views => a.view_count == b.view_count,
                SortKey::Bookmarks => a.bookmark_count == b.bookmark_count,
                SortKey::DifficultyAsc | SortKey::DifficultyDesc => a.difficulty == b.difficulty,
                SortKey::Title => a.title == b.title,
            };
            if tied {
                prop_assert!(position(&corpus, &a.id) < position(&corpus, &b.id));
            }
        }
    }

    #[test]
    fn difficulty_orders_are_reversals(
        shapes in prop::collection::vec(shape(), 0..40),
        filters in filter_set(),
    ) {
        let corpus = build(&shapes);
        let size = corpus.len().max(1);

        let asc: Vec<Difficulty> = query(&corpus, &filters.clone().with_sort(SortKey::DifficultyAsc), 1, size)
            .items
            .iter()
            .map(|q| q.difficulty)
            .collect();
        let mut desc: Vec<Difficulty> = query(&corpus, &filters.clone().with_sort(SortKey::DifficultyDesc), 1, size)
            .items
            .iter()
            .map(|q| q.difficulty)
            .collect();
        desc.reverse();

        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn search_ignores_case(
        shapes in prop::collection::vec(shape(), 0..40),
        search in 0usize..SEARCHES.len(),
    ) {
        let corpus = build(&shapes);
        let needle = SEARCHES[search];
        let lower = FilterSet::new().with_search(&needle.to_lowercase());
        let upper = FilterSet::new().with_search(&needle.to_uppercase());

        let lower_ids: Vec<&str> = query(&corpus, &lower, 1, 50).items.iter().map(|q| q.id.as_str()).collect();
        let upper_ids: Vec<&str> = query(&corpus, &upper, 1, 50).items.iter().map(|q| q.id.as_str()).collect();
        prop_assert_eq!(lower_ids, upper_ids);
    }
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn twenty_five_easy_questions_page_as_20_5_0() {
    let mut shapes = Vec::new();
    for i in 0..25 {
        shapes.push(Shape {
            difficulty: 0,
            company: i % 4,
            categories: BTreeSet::from([i % 5]),
            title: i % TITLES.len(),
            tag: 0,
            views: 0,
            bookmarks: 0,
            age_days: (i % 6) as i64,
        });
    }
    for i in 0..7 {
        shapes.push(Shape {
            difficulty: 1 + i % 2,
            company: 0,
            categories: BTreeSet::from([0]),
            title: 0,
            tag: 1,
            views: 0,
            bookmarks: 0,
            age_days: 0,
        });
    }
    let corpus = build(&shapes);
    let easy = FilterSet::new().with_difficulty(Difficulty::Easy);

    let page1 = query(&corpus, &easy, 1, 20);
    let page2 = query(&corpus, &easy, 2, 20);
    let page3 = query(&corpus, &easy, 3, 20);

    assert_eq!((page1.items.len(), page1.total), (20, 25));
    assert_eq!((page2.items.len(), page2.total), (5, 25));
    assert_eq!((page3.items.len(), page3.total), (0, 25));
    assert_eq!(page1.total_pages(), 2);
}

#[test]
fn related_for_q1_in_bundled_catalog() {
    let engine = QueryEngine::new(Corpus::bundled().unwrap());
    let q1 = engine.get_by_id("q1").unwrap();
    let related = engine.get_related("q1", 4);

    assert!(related.len() <= 4);
    assert!(related.iter().all(|q| q.id != "q1"));
    assert!(related
        .iter()
        .all(|q| q.company.id == q1.company.id || q.shares_category_with(q1)));
    // q2 shares Arrays, q3 shares Google and Arrays, q6 shares Arrays, q10 shares Google
    let ids: Vec<&str> = related.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["q2", "q3", "q6", "q10"]);
}

#[test]
fn unknown_question_is_not_found() {
    let engine = QueryEngine::new(Corpus::bundled().unwrap());
    let err = engine.get_by_id("nonexistent").unwrap_err();
    assert!(err.is_not_found());
    assert!(engine.get_related("nonexistent", 4).is_empty());
}
