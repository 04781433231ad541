use super::History;

pub const PLACEHOLDER: &str = "No clipboard history yet.";

/// One rendered entry. Copying it writes exactly `text` back to the clipboard,
/// even if the stored history has changed since the view was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HistoryView {
    #[default]
    Placeholder,
    Items(Vec<HistoryItem>),
}

impl HistoryView {
    /// Rebuilds the whole view from `history`; there is no incremental diffing.
    pub fn build(history: &History) -> Self {
        if history.is_empty() {
            return HistoryView::Placeholder;
        }

        let items = history
            .entries()
            .iter()
            .enumerate()
            .map(|(index, text)| HistoryItem {
                index,
                text: text.clone(),
            })
            .collect();

        HistoryView::Items(items)
    }

    pub fn items(&self) -> &[HistoryItem] {
        match self {
            HistoryView::Placeholder => &[],
            HistoryView::Items(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryItem> {
        self.items().get(index)
    }
}
