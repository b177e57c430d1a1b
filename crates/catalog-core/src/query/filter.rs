use shared_types::Question;

use super::FilterSet;

/// Per-question facet check for one [`FilterSet`]
///
/// The search needle is lowercased once up front; question text is
/// lowercased per comparison.
pub struct Matcher<'f> {
    filters: &'f FilterSet,
    needle: Option<String>,
}

impl<'f> Matcher<'f> {
    pub fn new(filters: &'f FilterSet) -> Self {
        let needle = if filters.search.is_empty() {
            None
        } else {
            Some(filters.search.to_lowercase())
        };

        Self { filters, needle }
    }

    pub fn matches(&self, question: &Question) -> bool {
        self.matches_search(question)
            && self.matches_company(question)
            && self.matches_difficulty(question)
            && self.matches_category(question)
    }

    fn matches_search(&self, question: &Question) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };

        question.title.to_lowercase().contains(needle)
            || question.description.to_lowercase().contains(needle)
            || question
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }

    fn matches_company(&self, question: &Question) -> bool {
        self.filters.companies.is_empty() || self.filters.companies.contains(&question.company.id)
    }

    fn matches_difficulty(&self, question: &Question) -> bool {
        self.filters.difficulties.is_empty()
            || self.filters.difficulties.contains(&question.difficulty)
    }

    fn matches_category(&self, question: &Question) -> bool {
        self.filters.categories.is_empty()
            || question
                .categories
                .iter()
                .any(|c| self.filters.categories.contains(&c.id))
    }
}
