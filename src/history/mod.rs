pub mod list;
pub mod view;

pub use list::{History, MAX_HISTORY};
pub use view::{HistoryItem, HistoryView, PLACEHOLDER};
