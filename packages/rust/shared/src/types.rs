//! Core domain types for the channel dataset.

use serde::{Deserialize, Serialize};

/// Sentinel value in the author column meaning "intentionally no data".
/// The dataset uses the literal Russian label.
pub const NO_INFORMATION: &str = "Нет информации";

// ---------------------------------------------------------------------------
// ChannelType
// ---------------------------------------------------------------------------

/// The three recognized channel type labels.
///
/// The `type` column is free-form text; rows carrying any other value are
/// still valid (they count toward totals but land in no type bucket).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    /// A company-run channel (`Компания`).
    Company,
    /// A personal blog (`Персональный`).
    Personal,
    /// A channel that republishes/curates content from others (`Агрегатор`).
    Aggregator,
}

impl ChannelType {
    /// All recognized types, in summary-table order.
    pub const ALL: [ChannelType; 3] = [Self::Company, Self::Personal, Self::Aggregator];

    /// The literal label used in the dataset's type column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Company => "Компания",
            Self::Personal => "Персональный",
            Self::Aggregator => "Агрегатор",
        }
    }

    /// Parse a dataset type-column value. Unrecognized values yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl std::fmt::Display for ChannelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ChannelRecord
// ---------------------------------------------------------------------------

/// One row of the dataset: a messaging-platform channel or blog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Display name of the channel.
    pub name: String,
    /// Platform handle.
    pub username: String,
    /// Comma-separated contributor and/or organization names, or the
    /// [`NO_INFORMATION`] sentinel.
    pub author: String,
    /// Raw type-column value. Compare via [`ChannelType::from_label`] when a
    /// recognized bucket is needed.
    pub channel_type: String,
    /// Theme labels, possibly several embedded in one string.
    pub theme: String,
    /// "About" labels, same substring semantics as `theme`.
    pub about: String,
    /// Subscriber count.
    pub subscribers: u64,
    /// Original posts over the last 30 days.
    pub posts_30d: u64,
    /// Comments over the last 30 days.
    pub comments_30d: u64,
    /// Average comments per post.
    pub comments_per_post: f64,
    /// Free-text description, unbounded length.
    pub description: String,
}

impl ChannelRecord {
    /// The recognized type of this row, if any.
    pub fn recognized_type(&self) -> Option<ChannelType> {
        ChannelType::from_label(&self.channel_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_label_roundtrip() {
        for ty in ChannelType::ALL {
            assert_eq!(ChannelType::from_label(ty.label()), Some(ty));
        }
        assert_eq!(ChannelType::from_label("Дайджест"), None);
    }

    #[test]
    fn recognized_type_on_record() {
        let mut rec = sample();
        assert_eq!(rec.recognized_type(), Some(ChannelType::Company));
        rec.channel_type = "что-то другое".into();
        assert_eq!(rec.recognized_type(), None);
    }

    fn sample() -> ChannelRecord {
        ChannelRecord {
            name: "Продуктовый дайджест".into(),
            username: "@proddigest".into(),
            author: NO_INFORMATION.into(),
            channel_type: "Компания".into(),
            theme: "Продакт-менеджмент".into(),
            about: "Продукт".into(),
            subscribers: 1200,
            posts_30d: 14,
            comments_30d: 56,
            comments_per_post: 4.0,
            description: "Канал о продуктовой разработке.".into(),
        }
    }
}
