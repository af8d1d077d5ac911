//! Aggregator: summary counts over the working subset.

use std::collections::BTreeMap;

use channelscope_shared::{ChannelRecord, ChannelType};

/// Summary counts for a (possibly filtered) table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Total row count, including rows with unrecognized type values.
    pub total: usize,
    /// Count per recognized type. Always carries all three keys, zero for
    /// the empty table.
    pub by_type: BTreeMap<ChannelType, usize>,
}

impl Summary {
    /// Count of rows for one recognized type.
    pub fn count(&self, ty: ChannelType) -> usize {
        self.by_type.get(&ty).copied().unwrap_or(0)
    }
}

/// Compute summary counts. Rows whose type is none of the recognized three
/// count toward the total only; unrecognized values are not an error.
pub fn summarize(rows: &[&ChannelRecord]) -> Summary {
    let mut by_type: BTreeMap<ChannelType, usize> =
        ChannelType::ALL.into_iter().map(|t| (t, 0)).collect();

    for row in rows {
        if let Some(ty) = row.recognized_type() {
            *by_type.entry(ty).or_default() += 1;
        }
    }

    Summary {
        total: rows.len(),
        by_type,
    }
}
