use shared_types::Question;

use super::SortKey;

/// Order matched questions in place
///
/// `sort_by` is stable, so questions with equal keys keep their corpus
/// order. Repeated queries therefore page identically.
pub fn sort_questions(questions: &mut [&Question], key: SortKey) {
    match key {
        SortKey::Recent => questions.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Views => questions.sort_by(|a, b| b.view_count.cmp(&a.view_count)),
        SortKey::Bookmarks => questions.sort_by(|a, b| b.bookmark_count.cmp(&a.bookmark_count)),
        SortKey::DifficultyAsc => questions.sort_by(|a, b| a.difficulty.cmp(&b.difficulty)),
        SortKey::DifficultyDesc => questions.sort_by(|a, b| b.difficulty.cmp(&a.difficulty)),
        SortKey::Title => questions.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}
