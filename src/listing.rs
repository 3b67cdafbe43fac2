//! List mode: search filtering and sentinel-driven pagination.

use crate::models::Question;

pub const PAGE_SIZE: usize = 20;

/// Text matches the markup case-insensitively; the id match is a plain
/// substring test.
pub fn matches(question: &Question, search: &str) -> bool {
    question
        .question
        .to_lowercase()
        .contains(&search.to_lowercase())
        || question.id.contains(search)
}

pub fn filter_questions(questions: &[Question], search: &str) -> Vec<usize> {
    questions
        .iter()
        .enumerate()
        .filter(|(_, question)| matches(question, search))
        .map(|(index, _)| index)
        .collect()
}

/// Subscription to sentinel visibility. It only exists while the list is
/// mounted; dropping it detaches the observer.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SentinelSubscription;

#[derive(Debug)]
pub struct ListView {
    search: String,
    loaded_count: usize,
    filtered: Vec<usize>,
    selected: usize,
    scroll: usize,
    sentinel: Option<SentinelSubscription>,
    sentinel_in_view: bool,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            search: String::new(),
            loaded_count: PAGE_SIZE,
            filtered: Vec::new(),
            selected: 0,
            scroll: 0,
            sentinel: None,
            sentinel_in_view: false,
        }
    }
}

impl ListView {
    pub fn new(questions: &[Question]) -> Self {
        let mut view = Self::default();
        view.refresh(questions);
        view
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Dataset indices currently rendered.
    pub fn displayed(&self) -> &[usize] {
        &self.filtered[..self.loaded_count.min(self.filtered.len())]
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_question(&self) -> Option<usize> {
        self.displayed().get(self.selected).copied()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn set_scroll(&mut self, scroll: usize) {
        self.scroll = scroll.min(self.displayed().len().saturating_sub(1));
    }

    /// Recomputes the filtered view, e.g. after the dataset changed.
    pub fn refresh(&mut self, questions: &[Question]) {
        self.filtered = filter_questions(questions, &self.search);
        self.clamp_selection();
    }

    pub fn set_search(&mut self, search: &str, questions: &[Question]) {
        if self.search == search {
            return;
        }
        self.search = search.to_string();
        self.filtered = filter_questions(questions, &self.search);
        self.reset_pagination();
    }

    pub fn push_search_char(&mut self, c: char, questions: &[Question]) {
        let mut search = self.search.clone();
        search.push(c);
        self.set_search(&search, questions);
    }

    pub fn pop_search_char(&mut self, questions: &[Question]) {
        let mut search = self.search.clone();
        search.pop();
        self.set_search(&search, questions);
    }

    pub fn reset_pagination(&mut self) {
        self.loaded_count = PAGE_SIZE;
        self.selected = 0;
        self.scroll = 0;
        self.sentinel_in_view = false;
    }

    /// Loads one more page, never past the filtered length.
    pub fn grow(&mut self) -> bool {
        if self.loaded_count < self.filtered.len() {
            self.loaded_count = (self.loaded_count + PAGE_SIZE).min(self.filtered.len());
            true
        } else {
            false
        }
    }

    pub fn mount(&mut self) {
        if self.sentinel.is_none() {
            self.sentinel = Some(SentinelSubscription);
        }
    }

    pub fn unmount(&mut self) {
        self.sentinel = None;
        self.sentinel_in_view = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.sentinel.is_some()
    }

    /// Recorded by the renderer for the frame just drawn.
    pub fn report_sentinel(&mut self, in_view: bool) {
        self.sentinel_in_view = in_view;
    }

    /// Post-draw visibility callback. Returns whether the list grew.
    pub fn deliver_sentinel(&mut self) -> bool {
        let in_view = std::mem::take(&mut self.sentinel_in_view);
        if in_view && self.sentinel.is_some() {
            self.grow()
        } else {
            false
        }
    }

    pub fn select_next(&mut self, step: usize) {
        let last = self.displayed().len().saturating_sub(1);
        self.selected = (self.selected + step).min(last);
    }

    pub fn select_prev(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.displayed().len().saturating_sub(1);
    }

    pub fn select(&mut self, position: usize) {
        if position < self.displayed().len() {
            self.selected = position;
        }
    }

    fn clamp_selection(&mut self) {
        let last = self.displayed().len().saturating_sub(1);
        self.selected = self.selected.min(last);
        self.scroll = self.scroll.min(last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, text: &str) -> Question {
        Question {
            id: id.to_string(),
            question: text.to_string(),
            answer: "answer".to_string(),
            has_image: false,
            image_path: None,
        }
    }

    fn dataset(n: usize) -> Vec<Question> {
        (1..=n)
            .map(|i| question(&i.to_string(), &format!("Question text {}", i)))
            .collect()
    }

    #[test]
    fn test_search_matches_id_substring() {
        let questions = vec![
            question("1", "Define a DFA"),
            question("2", "Define an NFA"),
            question("3", "Pumping lemma"),
        ];
        let mut view = ListView::new(&questions);
        view.set_search("2", &questions);
        assert_eq!(view.filtered(), &[1]);
        assert_eq!(view.displayed().len(), 1);
    }

    #[test]
    fn test_text_match_is_case_insensitive() {
        let questions = vec![
            question("1", "Define a <b>DFA</b>"),
            question("2", "Пример КОНЕЧНОГО автомата"),
        ];
        assert_eq!(filter_questions(&questions, "dfa"), vec![0]);
        assert_eq!(filter_questions(&questions, "конечного"), vec![1]);
    }

    #[test]
    fn test_id_match_is_case_sensitive() {
        let questions = vec![question("A1", "text")];
        assert_eq!(filter_questions(&questions, "A1"), vec![0]);
        // The body does not contain it either way, so only the id rule applies.
        assert!(filter_questions(&questions, "a1").is_empty());
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let questions = dataset(5);
        assert_eq!(filter_questions(&questions, "").len(), 5);
    }

    #[test]
    fn test_pagination_grows_and_clamps() {
        let questions = dataset(45);
        let mut view = ListView::new(&questions);
        assert_eq!(view.loaded_count(), 20);
        assert_eq!(view.displayed().len(), 20);

        assert!(view.grow());
        assert_eq!(view.loaded_count(), 40);
        assert!(view.grow());
        assert_eq!(view.loaded_count(), 45);
        assert!(!view.grow());
        assert_eq!(view.loaded_count(), 45);
        assert_eq!(view.displayed().len(), 45);
    }

    #[test]
    fn test_growth_never_exceeds_filtered_length() {
        let questions = dataset(100);
        let mut view = ListView::new(&questions);
        view.set_search("Question text 1", &questions);
        let k = view.filtered().len();
        for _ in 0..20 {
            view.grow();
        }
        assert!(view.loaded_count() <= k.max(PAGE_SIZE));
        assert_eq!(view.displayed().len(), k);
    }

    #[test]
    fn test_search_change_resets_pagination() {
        let questions = dataset(60);
        let mut view = ListView::new(&questions);
        view.grow();
        view.select_next(30);
        view.set_search("Question", &questions);
        assert_eq!(view.loaded_count(), PAGE_SIZE);
        assert_eq!(view.selected(), 0);
        assert_eq!(view.scroll(), 0);
    }

    #[test]
    fn test_sentinel_grows_only_while_mounted() {
        let questions = dataset(45);
        let mut view = ListView::new(&questions);

        view.report_sentinel(true);
        assert!(!view.deliver_sentinel());
        assert_eq!(view.loaded_count(), 20);

        view.mount();
        view.report_sentinel(true);
        assert!(view.deliver_sentinel());
        assert_eq!(view.loaded_count(), 40);

        view.report_sentinel(true);
        view.unmount();
        assert!(!view.deliver_sentinel());
        assert_eq!(view.loaded_count(), 40);
    }

    #[test]
    fn test_repeated_sentinel_visibility_is_idempotent_when_full() {
        let questions = dataset(25);
        let mut view = ListView::new(&questions);
        view.mount();
        for _ in 0..10 {
            view.report_sentinel(true);
            view.deliver_sentinel();
        }
        assert_eq!(view.loaded_count(), 25);
    }

    #[test]
    fn test_sentinel_out_of_view_does_nothing() {
        let questions = dataset(45);
        let mut view = ListView::new(&questions);
        view.mount();
        view.report_sentinel(false);
        assert!(!view.deliver_sentinel());
        assert_eq!(view.loaded_count(), 20);
    }

    #[test]
    fn test_selection_stays_within_displayed() {
        let questions = dataset(30);
        let mut view = ListView::new(&questions);
        view.select_next(100);
        assert_eq!(view.selected(), 19);
        view.select_prev(100);
        assert_eq!(view.selected(), 0);
        view.select_last();
        assert_eq!(view.selected_question(), Some(19));
        view.select(25);
        assert_eq!(view.selected(), 19);
    }

    #[test]
    fn test_search_editing() {
        let questions = dataset(30);
        let mut view = ListView::new(&questions);
        view.push_search_char('2', &questions);
        view.push_search_char('5', &questions);
        assert_eq!(view.search(), "25");
        assert_eq!(view.filtered().len(), 1);
        view.pop_search_char(&questions);
        assert_eq!(view.search(), "2");
        // ids 2, 12, 20..29 plus texts containing "2"
        assert_eq!(view.filtered().len(), 12);
    }
}
