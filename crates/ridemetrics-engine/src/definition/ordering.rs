//! ORDER BY items

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Where NULL sort keys go, independent of direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullPlacement {
    First,
    #[default]
    Last,
}

/// One `(field, direction, null-placement)` sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderByItem {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub nulls: NullPlacement,
}

impl OrderByItem {
    pub fn asc(field: impl Into<String>) -> Self {
        OrderByItem { field: field.into(), direction: SortDirection::Asc, nulls: NullPlacement::Last }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        OrderByItem { field: field.into(), direction: SortDirection::Desc, nulls: NullPlacement::Last }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullPlacement::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullPlacement::Last;
        self
    }
}
