//! The filter pipeline: five pure, independently correct stages.
//!
//! Every stage treats an empty selection as a pass-through, never as
//! "keep nothing". Stages only remove rows and no predicate depends on
//! which other rows remain, so any application order produces the same
//! final subset.

use std::collections::{BTreeSet, HashSet};

use channelscope_shared::ChannelRecord;

use crate::companies::split_authors;

/// A set of selected string values for one filter dimension.
pub type Selection = BTreeSet<String>;

// ---------------------------------------------------------------------------
// Filter stages
// ---------------------------------------------------------------------------

/// Search stage: keep rows whose name, username, or author exactly equals
/// one of the selected identifiers.
pub fn filter_search<'a>(
    rows: Vec<&'a ChannelRecord>,
    selection: &Selection,
) -> Vec<&'a ChannelRecord> {
    if selection.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|r| {
            selection.contains(&r.name)
                || selection.contains(&r.username)
                || selection.contains(&r.author)
        })
        .collect()
}

/// Company stage: keep rows where any comma-separated author token is a
/// selected company.
pub fn filter_companies<'a>(
    rows: Vec<&'a ChannelRecord>,
    selection: &Selection,
) -> Vec<&'a ChannelRecord> {
    if selection.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|r| split_authors(&r.author).any(|token| selection.contains(token)))
        .collect()
}

/// Type stage: exact membership on the type column.
pub fn filter_types<'a>(
    rows: Vec<&'a ChannelRecord>,
    selection: &Selection,
) -> Vec<&'a ChannelRecord> {
    if selection.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|r| selection.contains(&r.channel_type))
        .collect()
}

/// Theme stage: keep rows where any selected label occurs as a substring of
/// the theme column. Deliberately loose: a selected "AI" matches a theme
/// cell containing "AI" anywhere.
pub fn filter_theme<'a>(
    rows: Vec<&'a ChannelRecord>,
    selection: &Selection,
) -> Vec<&'a ChannelRecord> {
    filter_by_substring(rows, selection, |r| r.theme.as_str())
}

/// About stage: same substring containment as the theme stage, applied to
/// the "about" column.
pub fn filter_about<'a>(
    rows: Vec<&'a ChannelRecord>,
    selection: &Selection,
) -> Vec<&'a ChannelRecord> {
    filter_by_substring(rows, selection, |r| r.about.as_str())
}

fn filter_by_substring<'a>(
    rows: Vec<&'a ChannelRecord>,
    selection: &Selection,
    column: impl Fn(&ChannelRecord) -> &str,
) -> Vec<&'a ChannelRecord> {
    if selection.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|r| selection.iter().any(|label| column(r).contains(label.as_str())))
        .collect()
}

// ---------------------------------------------------------------------------
// FilterSelection
// ---------------------------------------------------------------------------

/// The full set of user selections across all five filter dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    /// Selected identifiers for the search stage.
    pub search: Selection,
    /// Selected company names.
    pub companies: Selection,
    /// Selected type values.
    pub types: Selection,
    /// Selected theme labels (substring semantics).
    pub themes: Selection,
    /// Selected "about" labels (substring semantics).
    pub about: Selection,
}

impl FilterSelection {
    /// Whether no dimension has an active selection.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.companies.is_empty()
            && self.types.is_empty()
            && self.themes.is_empty()
            && self.about.is_empty()
    }

    /// Apply all five stages in sequence, producing the working subset as a
    /// borrowed projection of `table`.
    pub fn apply<'a>(&self, table: &'a [ChannelRecord]) -> Vec<&'a ChannelRecord> {
        let rows: Vec<&ChannelRecord> = table.iter().collect();
        let rows = filter_search(rows, &self.search);
        let rows = filter_companies(rows, &self.companies);
        let rows = filter_types(rows, &self.types);
        let rows = filter_theme(rows, &self.themes);
        filter_about(rows, &self.about)
    }
}

// ---------------------------------------------------------------------------
// Select-all control
// ---------------------------------------------------------------------------

/// Whether a selection currently covers the whole option universe
/// (the derived state of the "select all" checkbox).
pub fn selection_is_full(selection: &Selection, universe: &[String]) -> bool {
    universe.iter().all(|opt| selection.contains(opt))
        && selection.len() == universe.iter().collect::<HashSet<_>>().len()
}

/// Apply a "select all" checkbox transition to a selection.
///
/// Checking the box while the selection is partial replaces it with the
/// full universe. Unchecking the box while the selection is already full
/// leaves the selection full: the control is independent of the selection
/// set and only the checkbox state flips. That asymmetry is intentional
/// and matches the shipped dashboard behavior.
pub fn apply_select_all(selection: &mut Selection, universe: &[String], checked: bool) {
    if checked && !selection_is_full(selection, universe) {
        *selection = universe.iter().cloned().collect();
    }
}

// ---------------------------------------------------------------------------
// Option universes
// ---------------------------------------------------------------------------

/// Distinct search identifiers (names, usernames, authors) in order of
/// first appearance, empty cells dropped.
pub fn search_options(rows: &[ChannelRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();

    let columns: [fn(&ChannelRecord) -> &str; 3] = [
        |r| r.name.as_str(),
        |r| r.username.as_str(),
        |r| r.author.as_str(),
    ];
    for column in columns {
        for row in rows {
            let value = column(row);
            if !value.is_empty() && seen.insert(value.to_string()) {
                options.push(value.to_string());
            }
        }
    }

    options
}

/// Distinct type values in order of first appearance.
pub fn type_options(rows: &[ChannelRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for row in rows {
        if !row.channel_type.is_empty() && seen.insert(row.channel_type.clone()) {
            options.push(row.channel_type.clone());
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        name: &str,
        username: &str,
        author: &str,
        channel_type: &str,
        theme: &str,
        about: &str,
    ) -> ChannelRecord {
        ChannelRecord {
            name: name.into(),
            username: username.into(),
            author: author.into(),
            channel_type: channel_type.into(),
            theme: theme.into(),
            about: about.into(),
            subscribers: 0,
            posts_30d: 0,
            comments_30d: 0,
            comments_per_post: 0.0,
            description: String::new(),
        }
    }

    fn table() -> Vec<ChannelRecord> {
        vec![
            record(
                "Канал Авито",
                "@avito",
                "Анна Иванова, Авито",
                "Компания",
                "AI, Data Science",
                "Продукт",
            ),
            record(
                "Блог Пети",
                "@petya",
                "Пётр Смирнов",
                "Персональный",
                "Карьера",
                "Менеджмент",
            ),
            record(
                "Дайджест",
                "@digest",
                "Нет информации",
                "Агрегатор",
                "Design",
                "Дизайн",
            ),
        ]
    }

    fn selection(values: &[&str]) -> Selection {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn names(rows: &[&ChannelRecord]) -> Vec<String> {
        rows.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn empty_selection_is_a_no_op_for_every_stage() {
        let table = table();
        let all: Vec<&ChannelRecord> = table.iter().collect();
        let empty = Selection::new();

        assert_eq!(filter_search(all.clone(), &empty).len(), table.len());
        assert_eq!(filter_companies(all.clone(), &empty).len(), table.len());
        assert_eq!(filter_types(all.clone(), &empty).len(), table.len());
        assert_eq!(filter_theme(all.clone(), &empty).len(), table.len());
        assert_eq!(filter_about(all, &empty).len(), table.len());
    }

    #[test]
    fn stages_are_idempotent() {
        let table = table();
        let all: Vec<&ChannelRecord> = table.iter().collect();
        let sel = selection(&["Компания", "Персональный"]);

        let once = filter_types(all, &sel);
        let twice = filter_types(once.clone(), &sel);
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn search_matches_name_username_or_author() {
        let table = table();
        let all: Vec<&ChannelRecord> = table.iter().collect();

        let by_name = filter_search(all.clone(), &selection(&["Блог Пети"]));
        assert_eq!(names(&by_name), vec!["Блог Пети"]);

        let by_username = filter_search(all.clone(), &selection(&["@avito"]));
        assert_eq!(names(&by_username), vec!["Канал Авито"]);

        let by_author = filter_search(all, &selection(&["Пётр Смирнов"]));
        assert_eq!(names(&by_author), vec!["Блог Пети"]);
    }

    #[test]
    fn company_stage_matches_author_tokens_exactly() {
        let table = table();
        let all: Vec<&ChannelRecord> = table.iter().collect();

        let kept = filter_companies(all.clone(), &selection(&["Авито"]));
        assert_eq!(names(&kept), vec!["Канал Авито"]);

        // Token equality, not substring: "Ави" selects nothing.
        let none = filter_companies(all, &selection(&["Ави"]));
        assert!(none.is_empty());
    }

    #[test]
    fn theme_stage_uses_substring_containment() {
        let table = table();
        let all: Vec<&ChannelRecord> = table.iter().collect();

        let kept = filter_theme(all.clone(), &selection(&["AI"]));
        assert_eq!(names(&kept), vec!["Канал Авито"]);

        // A selection that matches nothing legitimately empties the table.
        let none = filter_theme(all, &selection(&["Стартапы"]));
        assert!(none.is_empty());
    }

    #[test]
    fn stage_order_does_not_change_the_final_subset() {
        let table = table();
        let types = selection(&["Компания", "Агрегатор"]);
        let about = selection(&["Продукт", "Дизайн"]);

        let all: Vec<&ChannelRecord> = table.iter().collect();
        let a = filter_about(filter_types(all.clone(), &types), &about);
        let b = filter_types(filter_about(all, &about), &types);
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn full_selection_applies_all_stages() {
        let table = table();
        let sel = FilterSelection {
            types: selection(&["Компания", "Персональный"]),
            about: selection(&["Продукт"]),
            ..Default::default()
        };
        assert_eq!(names(&sel.apply(&table)), vec!["Канал Авито"]);
    }

    #[test]
    fn empty_filter_selection_passes_everything_through() {
        let table = table();
        let sel = FilterSelection::default();
        assert!(sel.is_empty());
        assert_eq!(sel.apply(&table).len(), table.len());
    }

    #[test]
    fn select_all_fills_a_partial_selection() {
        let universe: Vec<String> = ["AI", "Карьера", "Design"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut sel = selection(&["AI"]);

        apply_select_all(&mut sel, &universe, true);
        assert!(selection_is_full(&sel, &universe));
    }

    #[test]
    fn unchecking_select_all_while_full_keeps_the_selection_full() {
        let universe: Vec<String> = ["AI", "Карьера"].iter().map(|s| s.to_string()).collect();
        let mut sel: Selection = universe.iter().cloned().collect();

        apply_select_all(&mut sel, &universe, false);
        assert!(selection_is_full(&sel, &universe));
    }

    #[test]
    fn search_options_deduplicate_in_first_seen_order() {
        let table = table();
        let options = search_options(&table);
        assert_eq!(options[0], "Канал Авито");
        assert!(options.contains(&"@petya".to_string()));
        assert!(options.contains(&"Нет информации".to_string()));
        let unique: HashSet<_> = options.iter().collect();
        assert_eq!(unique.len(), options.len());
    }

    #[test]
    fn type_options_in_appearance_order() {
        let table = table();
        assert_eq!(
            type_options(&table),
            vec!["Компания", "Персональный", "Агрегатор"]
        );
    }
}
