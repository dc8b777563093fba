//! Latest known counter state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Count;

/// The single latest-state record, e.g.
/// `{"views": 9, "likes": 3, "date": "2024-01-02"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub views: Count,

    /// Manually incremented counter, never touched by view updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<Count>,

    pub date: NaiveDate,

    /// Fields this tool does not know about, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snapshot {
    pub fn new(views: Count, date: NaiveDate) -> Self {
        Self {
            views,
            likes: None,
            date,
            extra: Map::new(),
        }
    }

    /// Merge a new observation into an existing snapshot.
    ///
    /// `views` and `date` are replaced; `likes` and unknown fields are kept.
    pub fn observe(existing: Option<Snapshot>, views: Count, date: NaiveDate) -> Snapshot {
        match existing {
            Some(prev) => Snapshot { views, date, ..prev },
            None => Snapshot::new(views, date),
        }
    }

    /// Add one like, keeping the last known views and date.
    ///
    /// With no prior snapshot, starts from zero views on `date`.
    pub fn like(existing: Option<Snapshot>, date: NaiveDate) -> Snapshot {
        let mut snapshot = existing.unwrap_or_else(|| Snapshot::new(Count::default(), date));
        snapshot.likes = Some(snapshot.likes.unwrap_or_default().incremented());
        snapshot
    }
}
