//! The three promotion tabs on the GS25 event-goods page.
//!
//! Each tab has a stable code (the anchor id on the page and the
//! `event_types.event_id` key in the database), a display name used as the
//! product's category label, and a short description seeded into the
//! lookup table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A promotion tab, in crawl order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventTab {
    OneToOne,
    TwoToOne,
    Gift,
}

impl EventTab {
    /// Every tab, in the order the crawler visits them.
    pub const ALL: [EventTab; 3] = [EventTab::OneToOne, EventTab::TwoToOne, EventTab::Gift];

    /// Anchor id on the page and lookup-table key.
    pub fn code(self) -> &'static str {
        match self {
            EventTab::OneToOne => "ONE_TO_ONE",
            EventTab::TwoToOne => "TWO_TO_ONE",
            EventTab::Gift => "GIFT",
        }
    }

    /// Human-readable tab name, stored as the product's category.
    pub fn display_name(self) -> &'static str {
        match self {
            EventTab::OneToOne => "1+1 행사",
            EventTab::TwoToOne => "2+1 행사",
            EventTab::Gift => "덤증정 행사",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EventTab::OneToOne => "동일 상품 하나 더 증정",
            EventTab::TwoToOne => "동일 상품 2개 구매 시 하나 더 증정",
            EventTab::Gift => "상품 구매 시 다른 상품 증정",
        }
    }

    /// Exact match on [`EventTab::code`].
    pub fn from_code(code: &str) -> Option<EventTab> {
        Self::ALL.into_iter().find(|tab| tab.code() == code)
    }

    /// Map a free-form category label (e.g. `"2+1 행사"`) onto a tab.
    ///
    /// Substring checks run in order `1+1`, `2+1`, `덤증정`, so a label
    /// carrying more than one marker resolves to the first.
    pub fn from_category_label(label: &str) -> Option<EventTab> {
        if label.contains("1+1") {
            Some(EventTab::OneToOne)
        } else if label.contains("2+1") {
            Some(EventTab::TwoToOne)
        } else if label.contains("덤증정") {
            Some(EventTab::Gift)
        } else {
            None
        }
    }
}

impl fmt::Display for EventTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for EventTab {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventTab::from_code(s.trim()).ok_or_else(|| CoreError::UnknownEventTab {
            code: s.to_string(),
        })
    }
}
