//! Search-to-jump.
//!
//! The annotated tree is flattened once per data load into a list of items,
//! each carrying its ancestor chain. Queries match case-insensitively against
//! a node's own name or any ancestor name, so typing a category name lists
//! everything underneath it.

use serde::Serialize;

use crate::tree::SunburstTree;

/// One searchable node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub id: String,
    pub name: String,
    pub value: Option<f64>,
    pub display_value: String,
    /// Ids from the level-1 category down to the parent.
    pub ancestor_ids: Vec<String>,
    pub ancestor_names: Vec<String>,
    pub level: u32,
}

impl SearchItem {
    /// Active path that selecting this item produces.
    pub fn path(&self) -> Vec<String> {
        let mut path = self.ancestor_ids.clone();
        path.push(self.id.clone());
        path
    }
}

/// Flattened, pre-lowercased view of the tree.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    items: Vec<SearchItem>,
    /// Lowercased own name followed by lowercased ancestor names.
    haystacks: Vec<Vec<String>>,
}

impl SearchIndex {
    /// Flatten every non-root node, depth-first with children in order.
    pub fn flatten(tree: &SunburstTree) -> Self {
        let mut items = Vec::with_capacity(tree.len().saturating_sub(1));
        let mut haystacks = Vec::with_capacity(items.capacity());

        for index in tree.descendants() {
            let node = tree.node(index);
            let ancestors = tree.ancestors(index);
            let ancestor_ids: Vec<String> = ancestors
                .iter()
                .map(|&a| tree.node(a).id.clone())
                .collect();
            let ancestor_names: Vec<String> = ancestors
                .iter()
                .map(|&a| tree.node(a).name.clone())
                .collect();

            let mut haystack = Vec::with_capacity(ancestor_names.len() + 1);
            haystack.push(node.name.to_lowercase());
            haystack.extend(ancestor_names.iter().map(|name| name.to_lowercase()));
            haystacks.push(haystack);

            items.push(SearchItem {
                id: node.id.clone(),
                name: node.name.clone(),
                value: node.value,
                display_value: node.display_value(),
                ancestor_ids,
                ancestor_names,
                level: node.level,
            });
        }

        Self { items, haystacks }
    }

    /// All items in flattened order.
    pub fn items(&self) -> &[SearchItem] {
        &self.items
    }

    /// Item at a flattened position.
    pub fn item(&self, position: usize) -> Option<&SearchItem> {
        self.items.get(position)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positions of matching items in flattened order.
    ///
    /// A query that is empty after trimming matches everything.
    pub fn search(&self, query: &str) -> Vec<usize> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return (0..self.items.len()).collect();
        }
        self.haystacks
            .iter()
            .enumerate()
            .filter(|(_, haystack)| haystack.iter().any(|text| text.contains(&needle)))
            .map(|(position, _)| position)
            .collect()
    }
}

/// Keyboard input for the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Next,
    Previous,
    Confirm,
    Cancel,
}

impl SearchKey {
    /// Map a DOM `KeyboardEvent.key` name. Other keys are not handled.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "Down" => Some(Self::Next),
            "ArrowUp" | "Up" => Some(Self::Previous),
            "Enter" => Some(Self::Confirm),
            "Escape" | "Esc" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Result of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nothing to do.
    Unhandled,
    /// The cursor moved (or was already at the boundary).
    Moved,
    /// An item was chosen; carries its flattened position.
    Selected(usize),
    /// The query was cleared and the list closed.
    Cancelled,
}

/// Snapshot of the result list for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub query: String,
    /// Displayed items, at most the display limit.
    pub items: Vec<SearchItem>,
    /// Full match count before truncation.
    pub total: usize,
    pub cursor: usize,
    pub open: bool,
    /// The list is open but nothing matched.
    pub empty: bool,
}

/// Query, matches and cursor of the search box.
#[derive(Debug, Clone)]
pub struct SearchState {
    query: String,
    matches: Vec<usize>,
    cursor: usize,
    open: bool,
    limit: usize,
}

impl SearchState {
    /// Create an empty, closed search box showing at most `limit` results.
    pub fn new(limit: usize) -> Self {
        Self {
            query: String::new(),
            matches: Vec::new(),
            cursor: 0,
            open: false,
            limit: limit.max(1),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn displayed(&self) -> usize {
        self.matches.len().min(self.limit)
    }

    /// Update the query text and open the list.
    pub fn set_query(&mut self, index: &SearchIndex, query: &str) {
        self.query = query.to_string();
        self.open = true;
        self.refresh(index);
    }

    /// Recompute matches for the current query, for example after new data.
    ///
    /// The cursor returns to the first result whenever the match set changes.
    /// A closed list holds no matches.
    pub fn refresh(&mut self, index: &SearchIndex) {
        if !self.open {
            return;
        }
        let matches = index.search(&self.query);
        if matches != self.matches {
            self.matches = matches;
            self.cursor = 0;
        }
    }

    /// Handle a key press.
    pub fn key(&mut self, key: SearchKey) -> SearchOutcome {
        match key {
            SearchKey::Next => {
                let last = self.displayed().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
                SearchOutcome::Moved
            }
            SearchKey::Previous => {
                self.cursor = self.cursor.saturating_sub(1);
                SearchOutcome::Moved
            }
            SearchKey::Confirm => match self.select(self.cursor) {
                Some(position) => SearchOutcome::Selected(position),
                None => SearchOutcome::Unhandled,
            },
            SearchKey::Cancel => {
                self.clear();
                SearchOutcome::Cancelled
            }
        }
    }

    /// Choose the `displayed_index`-th visible result. Clears the query and
    /// closes the list on success.
    pub fn select(&mut self, displayed_index: usize) -> Option<usize> {
        if !self.open || displayed_index >= self.displayed() {
            return None;
        }
        let position = self.matches[displayed_index];
        self.clear();
        Some(position)
    }

    /// Clear the query and close the list.
    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.open = false;
        self.cursor = 0;
    }

    /// Render the current result list.
    pub fn results(&self, index: &SearchIndex) -> SearchResults {
        let items: Vec<SearchItem> = self
            .matches
            .iter()
            .take(self.limit)
            .filter_map(|&position| index.item(position).cloned())
            .collect();

        SearchResults {
            query: self.query.clone(),
            total: self.matches.len(),
            cursor: self.cursor,
            open: self.open,
            empty: self.open && self.matches.is_empty(),
            items,
        }
    }
}
