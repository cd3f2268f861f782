//! Filterable list model
//!
//! Holds the installed items, the visible projection after fuzzy filtering,
//! and the cursor. Rendering lives in `ui::hosts`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::item::ListItem;
use super::keymap::ListKeys;

/// Rows taken by one item (title, description, spacing)
pub const ITEM_HEIGHT: u16 = 3;

/// Text filter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    #[default]
    Unfiltered,
    /// The user is typing a query
    Filtering,
    /// A query is set and the list is narrowed
    FilterApplied,
}

pub struct FilterList {
    items: Vec<ListItem>,
    visible: Vec<usize>,
    cursor: Option<usize>,
    filter_state: FilterState,
    query: String,
    matcher: SkimMatcherV2,
    keys: ListKeys,
    width: u16,
    height: u16,
}

impl std::fmt::Debug for FilterList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterList")
            .field("items", &self.items.len())
            .field("visible", &self.visible)
            .field("cursor", &self.cursor)
            .field("filter_state", &self.filter_state)
            .field("query", &self.query)
            .finish()
    }
}

impl FilterList {
    pub fn new(keys: ListKeys) -> Self {
        Self {
            items: Vec::new(),
            visible: Vec::new(),
            cursor: None,
            filter_state: FilterState::Unfiltered,
            query: String::new(),
            matcher: SkimMatcherV2::default(),
            keys,
            width: 0,
            height: 0,
        }
    }

    /// Replace all items. The query is re-applied and the cursor cleared.
    pub fn set_items(&mut self, items: Vec<ListItem>) {
        self.items = items;
        self.apply_filter();
        self.cursor = None;
    }

    /// All installed items, ignoring the filter
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    /// Items that pass the current filter, in display order
    pub fn visible_items(&self) -> impl Iterator<Item = &ListItem> {
        self.visible.iter().map(move |&i| &self.items[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Cursor position within the visible items
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.cursor = index.filter(|&i| i < self.visible.len());
    }

    pub fn selected_item(&self) -> Option<&ListItem> {
        self.cursor
            .and_then(|c| self.visible.get(c))
            .map(|&i| &self.items[i])
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn keys(&self) -> &ListKeys {
        &self.keys
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Items that fit on one page
    pub fn per_page(&self) -> usize {
        usize::from((self.height / ITEM_HEIGHT).max(1))
    }

    /// Index of the first visible item on the current page
    pub fn page_start(&self) -> usize {
        let per_page = self.per_page();
        self.cursor.map(|c| (c / per_page) * per_page).unwrap_or(0)
    }

    /// Handle navigation and filter input
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.filter_state == FilterState::Filtering {
            self.handle_filter_key(key);
            return;
        }

        if self.keys.filter.matches(&key) {
            self.filter_state = FilterState::Filtering;
            return;
        }

        if self.keys.clear_filter.matches(&key) {
            if self.filter_state == FilterState::FilterApplied {
                self.reset_filter();
            }
            return;
        }

        if self.visible.is_empty() {
            return;
        }

        let last = self.visible.len() - 1;
        let per_page = self.per_page();

        let Some(cursor) = self.cursor else {
            if self.is_navigation(&key) {
                self.cursor = Some(0);
            }
            return;
        };

        let next = if self.keys.up.matches(&key) {
            cursor.saturating_sub(1)
        } else if self.keys.down.matches(&key) {
            (cursor + 1).min(last)
        } else if self.keys.page_up.matches(&key) {
            cursor.saturating_sub(per_page)
        } else if self.keys.page_down.matches(&key) {
            (cursor + per_page).min(last)
        } else if self.keys.top.matches(&key) {
            0
        } else if self.keys.bottom.matches(&key) {
            last
        } else {
            cursor
        };

        self.cursor = Some(next);
    }

    fn is_navigation(&self, key: &KeyEvent) -> bool {
        [
            &self.keys.up,
            &self.keys.down,
            &self.keys.page_up,
            &self.keys.page_down,
            &self.keys.top,
            &self.keys.bottom,
        ]
        .iter()
        .any(|b| b.matches(key))
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }

        match key.code {
            KeyCode::Esc => self.reset_filter(),
            KeyCode::Enter => {
                self.filter_state = if self.query.is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::FilterApplied
                };
            }
            KeyCode::Up => {
                self.cursor = self.cursor.map(|c| c.saturating_sub(1));
            }
            KeyCode::Down => {
                if !self.visible.is_empty() {
                    let last = self.visible.len() - 1;
                    self.cursor = Some(self.cursor.map(|c| (c + 1).min(last)).unwrap_or(0));
                }
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter();
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.refilter();
            }
            _ => {}
        }
    }

    fn reset_filter(&mut self) {
        let selected = self.cursor.and_then(|c| self.visible.get(c).copied());

        self.query.clear();
        self.filter_state = FilterState::Unfiltered;
        self.apply_filter();

        // Keep the highlighted item when returning to the full list
        self.cursor = selected.and_then(|i| self.visible.iter().position(|&v| v == i));
    }

    fn refilter(&mut self) {
        self.apply_filter();
        self.cursor = if self.visible.is_empty() { None } else { Some(0) };
    }

    fn apply_filter(&mut self) {
        if self.query.is_empty() {
            self.visible = (0..self.items.len()).collect();
            return;
        }

        let query = self.query.as_str();
        let matcher = &self.matcher;
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| matcher.fuzzy_match(item.title(), query).is_some())
            .map(|(i, _)| i)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Host;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn list(titles: &[&str]) -> FilterList {
        let mut list = FilterList::new(ListKeys::default());
        list.set_items(
            titles
                .iter()
                .map(|t| ListItem::new(Host::new(t, "h")))
                .collect(),
        );
        list.set_size(80, 9);
        list
    }

    fn visible_titles(list: &FilterList) -> Vec<String> {
        list.visible_items().map(|i| i.title().to_string()).collect()
    }

    #[test]
    fn test_first_key_selects_first_item() {
        let mut list = list(&["a", "b", "c"]);
        assert_eq!(list.cursor(), None);

        list.handle_key(key(KeyCode::Char('j')));
        assert_eq!(list.cursor(), Some(0));

        list.handle_key(key(KeyCode::Char('j')));
        assert_eq!(list.selected_item().unwrap().title(), "b");
    }

    #[test]
    fn test_cursor_clamps() {
        let mut list = list(&["a", "b"]);
        list.select(Some(0));

        list.handle_key(key(KeyCode::Up));
        assert_eq!(list.cursor(), Some(0));

        list.handle_key(key(KeyCode::End));
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.cursor(), Some(1));
    }

    #[test]
    fn test_paging() {
        let mut list = list(&["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(list.per_page(), 3);
        list.select(Some(0));

        list.handle_key(key(KeyCode::PageDown));
        assert_eq!(list.cursor(), Some(3));
        assert_eq!(list.page_start(), 3);

        list.handle_key(key(KeyCode::PageDown));
        list.handle_key(key(KeyCode::PageDown));
        assert_eq!(list.cursor(), Some(6));

        list.handle_key(key(KeyCode::Home));
        assert_eq!(list.cursor(), Some(0));
    }

    #[test]
    fn test_empty_list_ignores_navigation() {
        let mut list = list(&[]);
        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.cursor(), None);
        assert!(list.selected_item().is_none());
    }

    #[test]
    fn test_select_out_of_range() {
        let mut list = list(&["a"]);
        list.select(Some(5));
        assert_eq!(list.cursor(), None);
    }

    #[test]
    fn test_filter_narrows_and_resets_cursor() {
        let mut list = list(&["alpha", "beta", "gamma", "alpine"]);
        list.select(Some(2));

        list.handle_key(key(KeyCode::Char('/')));
        assert!(list.is_filtering());

        list.handle_key(key(KeyCode::Char('a')));
        list.handle_key(key(KeyCode::Char('l')));
        list.handle_key(key(KeyCode::Char('p')));

        assert_eq!(visible_titles(&list), vec!["alpha", "alpine"]);
        assert_eq!(list.cursor(), Some(0));

        list.handle_key(key(KeyCode::Down));
        assert_eq!(list.selected_item().unwrap().title(), "alpine");
    }

    #[test]
    fn test_accept_and_clear_filter() {
        let mut list = list(&["alpha", "beta"]);
        list.handle_key(key(KeyCode::Char('/')));
        list.handle_key(key(KeyCode::Char('b')));
        list.handle_key(key(KeyCode::Enter));

        assert_eq!(list.filter_state(), FilterState::FilterApplied);
        assert_eq!(visible_titles(&list), vec!["beta"]);

        list.handle_key(key(KeyCode::Esc));
        assert_eq!(list.filter_state(), FilterState::Unfiltered);
        assert_eq!(visible_titles(&list), vec!["alpha", "beta"]);
        assert_eq!(list.selected_item().unwrap().title(), "beta");
    }

    #[test]
    fn test_accept_empty_query_unfilters() {
        let mut list = list(&["alpha"]);
        list.handle_key(key(KeyCode::Char('/')));
        list.handle_key(key(KeyCode::Enter));
        assert_eq!(list.filter_state(), FilterState::Unfiltered);
    }

    #[test]
    fn test_backspace_widens() {
        let mut list = list(&["alpha", "beta"]);
        list.handle_key(key(KeyCode::Char('/')));
        list.handle_key(key(KeyCode::Char('z')));
        assert_eq!(list.visible_len(), 0);
        assert_eq!(list.cursor(), None);

        list.handle_key(key(KeyCode::Backspace));
        assert_eq!(list.visible_len(), 2);
        assert_eq!(list.query(), "");
    }

    #[test]
    fn test_set_items_keeps_query() {
        let mut list = list(&["alpha", "beta"]);
        list.handle_key(key(KeyCode::Char('/')));
        list.handle_key(key(KeyCode::Char('b')));
        list.handle_key(key(KeyCode::Enter));

        list.set_items(vec![
            ListItem::new(Host::new("bravo", "h")),
            ListItem::new(Host::new("charlie", "h")),
        ]);

        assert_eq!(visible_titles(&list), vec!["bravo"]);
        assert_eq!(list.cursor(), None);
    }
}
