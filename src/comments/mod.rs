use crate::models::Comment;
use crate::pagination::{
    navigate, page_range, page_window, PageNav, PageState, PaginationControl,
};
use std::collections::BTreeSet;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

pub(crate) const PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 20];

/// Choices of the comment form's `mood` field.
pub(crate) const MOODS: [&str; 5] = ["Happy", "Excited", "Calm", "Sad", "Angry"];

/// Target language of `/comments?languageCode=`. `Original` skips translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Display, IntoStaticStr, EnumIter)]
pub(crate) enum Language {
    #[default]
    #[strum(serialize = "original")]
    Original,
    #[strum(serialize = "en")]
    English,
    #[strum(serialize = "es")]
    Spanish,
    #[strum(serialize = "zh-CN")]
    ChineseSimplified,
    #[strum(serialize = "fr")]
    French,
}

impl Language {
    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Original => "Original",
            Language::English => "English",
            Language::Spanish => "Español",
            Language::ChineseSimplified => "中文 (简体)",
            Language::French => "Français",
        }
    }

    pub fn from_code(code: &str) -> Self {
        Language::iter()
            .find(|l| l.code() == code.trim())
            .unwrap_or_default()
    }
}

/// What the comments page has on screen: the fetched snapshot, the page
/// state, the pagination control and the rendered slice.
///
/// The page state is only changed through the pagination calculator.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CommentBoard {
    snapshot: Vec<Comment>,
    page: PageState,
    control: PaginationControl,
    visible: Vec<Comment>,
    /// Ids removed on this page view. A fetch that started before the delete
    /// answered still carries them, so every snapshot is filtered.
    deleted: BTreeSet<i64>,
}

impl CommentBoard {
    pub fn new(per_page: usize) -> Self {
        let page = PageState::new(per_page);
        Self {
            snapshot: Vec::new(),
            page,
            control: PaginationControl::build(1, page.active_page),
            visible: Vec::new(),
            deleted: BTreeSet::new(),
        }
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn control(&self) -> &PaginationControl {
        &self.control
    }

    pub fn visible(&self) -> &[Comment] {
        &self.visible
    }

    pub fn total(&self) -> usize {
        self.snapshot.len()
    }

    /// Full reload: corrects the active page against the new page count and
    /// rebuilds the pagination control.
    pub fn reload(&mut self, snapshot: Vec<Comment>) {
        let snapshot = self.without_deleted(snapshot);
        let window = page_window(snapshot.len(), self.page.per_page, self.page.active_page);
        self.page.active_page = window.active_page;
        self.control = PaginationControl::build(window.page_count, window.active_page);
        self.visible = snapshot[window.range()].to_vec();
        self.snapshot = snapshot;
    }

    /// Refresh after navigation or a language switch: the control is kept as
    /// it is and only the rendered slice follows the new snapshot.
    pub fn refresh(&mut self, snapshot: Vec<Comment>) {
        self.snapshot = self.without_deleted(snapshot);
        self.reslice();
    }

    /// Returns `false` for no-op clicks (Previous on page 1, Next on the last page).
    pub fn navigate(&mut self, nav: PageNav) -> bool {
        let Some(next) = navigate(self.page.active_page, self.control.page_count(), nav) else {
            return false;
        };
        self.page.active_page = next;
        self.control.set_active(next);
        self.reslice();
        true
    }

    /// Takes effect on the next [`CommentBoard::reload`].
    pub fn set_per_page(&mut self, per_page: usize) {
        self.page.set_per_page(per_page);
    }

    /// Drops one rendered comment after a successful delete. The pagination
    /// control is left untouched, and the id stays hidden from later snapshots.
    pub fn remove_rendered(&mut self, id: i64) -> bool {
        self.deleted.insert(id);
        let before = self.visible.len();
        self.visible.retain(|c| c.id != id);
        self.snapshot.retain(|c| c.id != id);
        self.visible.len() != before
    }

    /// Forgets tracked deletes once the store is known to be empty.
    pub fn clear_deleted(&mut self) {
        self.deleted.clear();
    }

    fn without_deleted(&self, mut snapshot: Vec<Comment>) -> Vec<Comment> {
        if !self.deleted.is_empty() {
            snapshot.retain(|c| !self.deleted.contains(&c.id));
        }
        snapshot
    }

    fn reslice(&mut self) {
        let (start, end) = page_range(
            self.snapshot.len(),
            self.page.per_page,
            self.page.active_page,
        );
        self.visible = self.snapshot[start..end].to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;

    fn comments(n: i64) -> Vec<Comment> {
        (1..=n)
            .map(|id| Comment {
                id,
                author: Author::Named(format!("user{id}")),
                mood: None,
                content: format!("comment {id}"),
                image: None,
                sentiment: None,
                timestamp_ms: 0,
            })
            .collect()
    }

    fn ids(board: &CommentBoard) -> Vec<i64> {
        board.visible().iter().map(|c| c.id).collect()
    }

    #[test]
    fn reload_renders_first_page_and_builds_control() {
        let mut board = CommentBoard::new(10);
        board.reload(comments(25));
        assert_eq!(board.control().page_count(), 3);
        assert_eq!(board.control().active_page(), 1);
        assert_eq!(ids(&board), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn reload_of_empty_collection_renders_nothing() {
        let mut board = CommentBoard::new(10);
        board.reload(Vec::new());
        assert_eq!(board.control().page_count(), 1);
        assert!(board.visible().is_empty());
    }

    #[test]
    fn navigation_reslices_without_rebuilding_pages() {
        let mut board = CommentBoard::new(10);
        board.reload(comments(25));

        assert!(board.navigate(PageNav::Page(3)));
        assert_eq!(ids(&board), (21..=25).collect::<Vec<_>>());
        assert_eq!(board.control().active_page(), 3);

        assert!(!board.navigate(PageNav::Next));
        assert!(board.navigate(PageNav::Previous));
        assert_eq!(board.page_state().active_page, 2);
        assert_eq!(ids(&board), (11..=20).collect::<Vec<_>>());
    }

    #[test]
    fn previous_from_first_page_changes_nothing() {
        let mut board = CommentBoard::new(10);
        board.reload(comments(25));
        let before = board.clone();
        assert!(!board.navigate(PageNav::Previous));
        assert_eq!(board, before);
    }

    #[test]
    fn reload_after_shrink_resets_to_first_page() {
        let mut board = CommentBoard::new(5);
        board.reload(comments(20));
        board.navigate(PageNav::Page(4));

        board.reload(comments(8));
        assert_eq!(board.page_state().active_page, 1);
        assert_eq!(board.control().page_count(), 2);
        assert_eq!(ids(&board), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn refresh_keeps_control_even_when_collection_shrinks() {
        let mut board = CommentBoard::new(5);
        board.reload(comments(20));
        board.navigate(PageNav::Page(4));
        let control = board.control().clone();

        board.refresh(comments(12));
        assert_eq!(board.control(), &control);
        assert!(board.visible().is_empty());
    }

    #[test]
    fn per_page_change_applies_on_reload() {
        let mut board = CommentBoard::new(5);
        board.reload(comments(20));
        board.set_per_page(10);
        assert_eq!(board.control().page_count(), 4);

        board.reload(comments(20));
        assert_eq!(board.control().page_count(), 2);
        assert_eq!(board.visible().len(), 10);
    }

    #[test]
    fn deleting_one_comment_removes_exactly_one_node() {
        let mut board = CommentBoard::new(5);
        board.reload(comments(7).split_off(2));
        assert_eq!(ids(&board), vec![3, 4, 5, 6, 7]);
        let control = board.control().clone();

        assert!(board.remove_rendered(7));
        assert_eq!(ids(&board), vec![3, 4, 5, 6]);
        assert_eq!(board.control(), &control);
    }

    #[test]
    fn late_refresh_does_not_bring_a_deleted_comment_back() {
        let mut board = CommentBoard::new(5);
        board.reload(comments(10));
        assert!(board.navigate(PageNav::Page(2)));
        let fetched_before_delete = comments(10);

        assert!(board.remove_rendered(7));
        board.refresh(fetched_before_delete);

        assert_eq!(ids(&board), vec![6, 8, 9, 10]);
        assert_eq!(board.total(), 9);
    }

    #[test]
    fn late_reload_does_not_bring_a_deleted_comment_back() {
        let mut board = CommentBoard::new(5);
        board.reload(comments(5));
        assert!(board.remove_rendered(3));

        board.reload(comments(5));
        assert_eq!(ids(&board), vec![1, 2, 4, 5]);

        board.clear_deleted();
        board.reload(comments(5));
        assert_eq!(ids(&board), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn deleting_unknown_id_is_a_noop() {
        let mut board = CommentBoard::new(5);
        board.reload(comments(5));
        assert!(!board.remove_rendered(42));
        assert_eq!(board.visible().len(), 5);
    }

    #[test]
    fn language_codes_round_trip() {
        for lang in Language::iter() {
            assert_eq!(Language::from_code(lang.code()), lang);
            assert_eq!(lang.to_string(), lang.code());
        }
        assert_eq!(Language::from_code("xx"), Language::Original);
        assert_eq!(Language::default().code(), "original");
    }
}
