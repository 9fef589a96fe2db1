use super::tables::ParserTables;

/// News keyword anywhere, or a time word backed by topic/intent phrasing.
/// A time word alone ("this week I learned...") is not enough.
pub(crate) fn is_news_request(tables: &ParserTables, lowered: &str) -> bool {
    if lowered.trim().is_empty() {
        return false;
    }

    let has_news_keyword = tables
        .news_keywords
        .iter()
        .any(|k| lowered.contains(k.as_str()));
    if has_news_keyword {
        return true;
    }

    let has_time_keyword = tables.frequencies.triggers().any(|t| lowered.contains(t));
    has_time_keyword && tables.intent_patterns.iter().any(|p| p.is_match(lowered))
}
