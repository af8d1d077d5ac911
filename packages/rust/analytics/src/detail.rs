//! Detail Lookup: one channel's card, read from the unfiltered table.

use channelscope_shared::ChannelRecord;

/// A single channel resolved for the detail view.
///
/// Borrows the matched row; the wrapped description is the only owned,
/// derived piece, so the source table is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDetail<'a> {
    /// The first matching row, in original table order.
    pub record: &'a ChannelRecord,
    /// The description re-wrapped for display.
    pub description: String,
}

/// Resolve `identifier` against name, username, or author of the
/// **unfiltered** table. The detail view deliberately ignores any active
/// filters. Duplicate matches are allowed; only the first row is used.
pub fn lookup<'a>(
    table: &'a [ChannelRecord],
    identifier: &str,
    wrap_width: usize,
) -> Option<ChannelDetail<'a>> {
    let record = table
        .iter()
        .find(|r| r.name == identifier || r.username == identifier || r.author == identifier)?;

    Some(ChannelDetail {
        record,
        description: wrap_text(&record.description, wrap_width),
    })
}

/// Greedy word-wrap at `width` characters, preserving word boundaries.
/// A single word longer than `width` gets a line of its own rather than
/// being split.
pub fn wrap_text(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, username: &str, author: &str, description: &str) -> ChannelRecord {
        ChannelRecord {
            name: name.into(),
            username: username.into(),
            author: author.into(),
            channel_type: "Компания".into(),
            theme: String::new(),
            about: String::new(),
            subscribers: 0,
            posts_30d: 0,
            comments_30d: 0,
            comments_per_post: 0.0,
            description: description.into(),
        }
    }

    #[test]
    fn matches_name_username_or_author() {
        let table = vec![
            row("Канал А", "@a", "Авито", "один"),
            row("Канал Б", "@b", "Анна Иванова", "два"),
        ];

        assert_eq!(lookup(&table, "Канал Б", 80).unwrap().record.name, "Канал Б");
        assert_eq!(lookup(&table, "@a", 80).unwrap().record.name, "Канал А");
        assert_eq!(
            lookup(&table, "Анна Иванова", 80).unwrap().record.name,
            "Канал Б"
        );
        assert!(lookup(&table, "нет такого", 80).is_none());
    }

    #[test]
    fn duplicate_matches_resolve_to_the_first_row() {
        let table = vec![
            row("Канал", "@one", "Авито", "первый"),
            row("Канал", "@two", "Авито", "второй"),
        ];
        let detail = lookup(&table, "Канал", 80).expect("found");
        assert_eq!(detail.record.username, "@one");
        assert_eq!(detail.description, "первый");
    }

    #[test]
    fn lookup_does_not_mutate_the_table() {
        let table = vec![row("Канал", "@a", "Авито", "слово ".repeat(40).trim())];
        let before = table.clone();
        let detail = lookup(&table, "Канал", 20).expect("found");
        assert!(detail.description.contains('\n'));
        assert_eq!(table, before);
    }

    #[test]
    fn wrap_respects_the_width_budget() {
        let text = "Канал о продуктовой разработке, аналитике и управлении командами";
        let wrapped = wrap_text(text, 20);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 20, "line too long: {line}");
        }
        // Re-joining restores the original words.
        let rejoined: Vec<&str> = wrapped.split_whitespace().collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }

    #[test]
    fn overlong_words_get_their_own_line() {
        let wrapped = wrap_text("короткое оченьдлинноенеразрывноеслово хвост", 10);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(
            lines,
            vec!["короткое", "оченьдлинноенеразрывноеслово", "хвост"]
        );
    }

    #[test]
    fn empty_description_wraps_to_empty() {
        assert_eq!(wrap_text("", 80), "");
        assert_eq!(wrap_text("   ", 80), "");
    }
}
