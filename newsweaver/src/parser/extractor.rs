use super::languages::DEFAULT_LANGUAGE;
use super::tables::{Frequency, ParserTables, DEFAULT_TOPIC};

/// First bucket (daily, weekly, monthly, yearly) with a trigger in the message.
pub(crate) fn extract_frequency(tables: &ParserTables, lowered: &str) -> Frequency {
    tables
        .frequencies
        .buckets()
        .find(|(_, words)| words.iter().any(|w| lowered.contains(w.as_str())))
        .map(|(f, _)| f)
        .unwrap_or_default()
}

/// Domain table, then "news about X", then "give me X news", then the default topic.
pub(crate) fn extract_topic(tables: &ParserTables, lowered: &str) -> String {
    if let Some(label) = tables.topics.first_match(lowered) {
        return label.to_string();
    }

    let captured = [(&tables.about_pattern, 3), (&tables.request_pattern, 2)]
        .into_iter()
        .find_map(|(pattern, group)| {
            pattern
                .captures(lowered)
                .and_then(|caps| caps.get(group))
                .map(|m| m.as_str().trim())
                .filter(|phrase| phrase.chars().count() > 1)
        });

    captured.unwrap_or(DEFAULT_TOPIC).to_string()
}

/// Registry mention, then "in/translate to/convert to <word>", then English.
pub(crate) fn extract_language(tables: &ParserTables, lowered: &str) -> String {
    if let Some(code) = tables.languages.mentioned_in(lowered) {
        return code.to_string();
    }

    tables
        .language_pattern
        .captures(lowered)
        .and_then(|caps| caps.get(2))
        .and_then(|word| tables.languages.resolve_word(word.as_str()))
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string()
}
