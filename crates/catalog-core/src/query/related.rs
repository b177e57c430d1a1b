use shared_types::Question;

/// Up to `limit` questions that share a category or the company with `id`
///
/// The question itself is excluded and corpus order is kept. An unknown id
/// yields an empty list.
pub fn related<'a>(questions: &'a [Question], id: &str, limit: usize) -> Vec<&'a Question> {
    let Some(target) = questions.iter().find(|q| q.id == id) else {
        tracing::debug!("No related questions: {} is not in the corpus", id);
        return Vec::new();
    };

    questions
        .iter()
        .filter(|q| q.id != target.id)
        .filter(|q| q.company.id == target.company.id || q.shares_category_with(target))
        .take(limit)
        .collect()
}
