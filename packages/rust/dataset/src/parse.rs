//! Tab-separated dataset parsing.
//!
//! The export carries Cyrillic column headers, sometimes padded with
//! whitespace. Headers are trimmed before lookup, and a fixed translation
//! table maps them onto [`ChannelRecord`] fields.

use std::collections::HashMap;

use tracing::warn;

use channelscope_shared::{ChannelRecord, ChannelScopeError, Result};

/// External column headers, exactly as published.
pub const COL_NAME: &str = "Название канала";
pub const COL_USERNAME: &str = "Username";
pub const COL_AUTHOR: &str = "Автор";
pub const COL_TYPE: &str = "Тип";
pub const COL_THEME: &str = "Тематика";
pub const COL_ABOUT: &str = "Про что";
pub const COL_SUBSCRIBERS: &str = "Подписчики";
pub const COL_POSTS_30D: &str = "Постов за 30 дней";
pub const COL_COMMENTS_30D: &str = "Комментариев за 30 дней";
pub const COL_COMMENTS_PER_POST: &str = "Комментов на 1 пост";
pub const COL_DESCRIPTION: &str = "Описание";

/// Columns that must be present for the table to be usable at all.
const REQUIRED_COLUMNS: [&str; 11] = [
    COL_NAME,
    COL_USERNAME,
    COL_AUTHOR,
    COL_TYPE,
    COL_THEME,
    COL_ABOUT,
    COL_SUBSCRIBERS,
    COL_POSTS_30D,
    COL_COMMENTS_30D,
    COL_COMMENTS_PER_POST,
    COL_DESCRIPTION,
];

/// Parse a raw TSV export into channel records.
///
/// A missing required column is a parse error: without it there is no table
/// to filter. Malformed numeric cells are lenient — they log a warning and
/// fall back to zero, matching the tolerant coercion of the upstream sheet.
pub fn parse_tsv(raw: &str) -> Result<Vec<ChannelRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ChannelScopeError::parse(format!("unreadable header row: {e}")))?
        .clone();

    // Normalize header whitespace before building the column index.
    let index: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim(), i))
        .collect();

    for column in REQUIRED_COLUMNS {
        if !index.contains_key(column) {
            return Err(ChannelScopeError::parse(format!(
                "required column '{column}' not found in dataset header"
            )));
        }
    }

    let col = |name: &str| index[name];

    let mut records = Vec::new();
    for (row_num, row) in reader.records().enumerate() {
        let row = row.map_err(|e| {
            ChannelScopeError::parse(format!("unreadable record at row {}: {e}", row_num + 2))
        })?;

        let field = |name: &str| row.get(col(name)).unwrap_or("").trim().to_string();

        records.push(ChannelRecord {
            name: field(COL_NAME),
            username: field(COL_USERNAME),
            author: field(COL_AUTHOR),
            channel_type: field(COL_TYPE),
            theme: field(COL_THEME),
            about: field(COL_ABOUT),
            subscribers: parse_count(&field(COL_SUBSCRIBERS), COL_SUBSCRIBERS, row_num),
            posts_30d: parse_count(&field(COL_POSTS_30D), COL_POSTS_30D, row_num),
            comments_30d: parse_count(&field(COL_COMMENTS_30D), COL_COMMENTS_30D, row_num),
            comments_per_post: parse_ratio(
                &field(COL_COMMENTS_PER_POST),
                COL_COMMENTS_PER_POST,
                row_num,
            ),
            description: field(COL_DESCRIPTION),
        });
    }

    Ok(records)
}

/// Parse an integer cell. Spreadsheet exports pad large numbers with regular
/// or non-breaking spaces as thousands separators.
fn parse_count(cell: &str, column: &str, row_num: usize) -> u64 {
    let cleaned: String = cell.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return 0;
    }
    match cleaned.parse() {
        Ok(n) => n,
        Err(_) => {
            warn!(column, row = row_num + 2, value = cell, "unparseable count, using 0");
            0
        }
    }
}

/// Parse a float cell, accepting a comma decimal separator.
fn parse_ratio(cell: &str, column: &str, row_num: usize) -> f64 {
    let cleaned: String = cell
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse() {
        Ok(n) => n,
        Err(_) => {
            warn!(column, row = row_num + 2, value = cell, "unparseable ratio, using 0");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A small export with padded headers and a ragged numeric cell.
    fn sample_tsv() -> String {
        let header = " Название канала \tUsername\tАвтор\tТип\tТематика\tПро что\t\
                      Подписчики \tПостов за 30 дней\tКомментариев за 30 дней\t\
                      Комментов на 1 пост\tОписание";
        let row1 = "Продукт Групп\t@prodgroup\tАнна Иванова, Авито\tКомпания\t\
                    Продакт-менеджмент, AI\tПродукт\t12 300\t24\t96\t4,0\t\
                    Канал о продуктах.";
        let row2 = "Блог Пети\t@petya\tПётр Смирнов\tПерсональный\tКарьера\t\
                    Менеджмент\tn/a\t8\t\t1.5\tЛичные заметки.";
        format!("{header}\n{row1}\n{row2}\n")
    }

    #[test]
    fn parses_records_with_padded_headers() {
        let records = parse_tsv(&sample_tsv()).expect("parse");
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.name, "Продукт Групп");
        assert_eq!(first.username, "@prodgroup");
        assert_eq!(first.author, "Анна Иванова, Авито");
        assert_eq!(first.channel_type, "Компания");
        assert_eq!(first.subscribers, 12_300);
        assert_eq!(first.posts_30d, 24);
        assert!((first.comments_per_post - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lenient_numeric_cells_become_zero() {
        let records = parse_tsv(&sample_tsv()).expect("parse");
        let second = &records[1];
        assert_eq!(second.subscribers, 0); // "n/a"
        assert_eq!(second.comments_30d, 0); // empty cell
        assert!((second.comments_per_post - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let tsv = "Название канала\tUsername\tАвтор\nА\t@a\tБ\n";
        let err = parse_tsv(tsv).unwrap_err();
        assert!(err.to_string().contains("Тип"));
    }

    #[test]
    fn empty_table_parses_to_no_records() {
        let header = sample_tsv().lines().next().unwrap().to_string();
        let records = parse_tsv(&format!("{header}\n")).expect("parse");
        assert!(records.is_empty());
    }

    #[test]
    fn comma_decimal_separator_is_accepted() {
        assert!((parse_ratio("3,25", COL_COMMENTS_PER_POST, 0) - 3.25).abs() < f64::EPSILON);
        assert!((parse_ratio("3.25", COL_COMMENTS_PER_POST, 0) - 3.25).abs() < f64::EPSILON);
    }
}
