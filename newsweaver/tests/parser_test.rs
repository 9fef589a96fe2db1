use std::sync::Arc;

use newsweaver::parser::{
    Frequency, KeywordTable, LanguageTable, NewsParser, ParserTables, TopicPatternTable, TopicRule,
    DEFAULT_LANGUAGE, DEFAULT_TOPIC,
};

fn parser() -> NewsParser {
    NewsParser::builtin().expect("builtin tables")
}

#[test]
fn test_news_keywords_classify_as_news() {
    let parser = parser();
    for message in [
        "breaking news today",
        "Any updates?",
        "top stories",
        "coverage of the election",
        "LATEST",
    ] {
        assert!(parser.is_news_request(message), "expected news: {}", message);
    }
}

#[test]
fn test_topic_alone_is_not_news() {
    let parser = parser();
    assert!(!parser.is_news_request("sports"));
    assert!(!parser.is_news_request("technology"));
    assert!(!parser.is_news_request(""));
}

#[test]
fn test_reference_scenarios() {
    let parser = parser();

    let cases = [
        ("Give me latest sports news in Hindi", Frequency::Daily, "sports", "Hindi", "daily:sports:Hindi"),
        (
            "Show me technology updates for this week",
            Frequency::Weekly,
            "technology",
            "English",
            "weekly:technology:English",
        ),
        (
            "Tell me about current health news in French",
            Frequency::Daily,
            "health",
            "French",
            "daily:health:French",
        ),
        ("Get monthly climate news in German", Frequency::Monthly, "climate", "German", "monthly:climate:German"),
        ("Show me today's cryptocurrency news", Frequency::Daily, "cryptocurrency", "English", "daily:cryptocurrency:English"),
    ];

    for (message, frequency, topic, language, formatted) in cases {
        assert!(parser.is_news_request(message), "expected news: {}", message);
        let parsed = parser.parse(message);
        assert_eq!(parsed.frequency(), frequency, "{}", message);
        assert_eq!(parsed.topic(), topic, "{}", message);
        assert_eq!(parsed.language(), language, "{}", message);
        assert_eq!(parsed.formatted(), formatted, "{}", message);
    }
}

#[test]
fn test_unrelated_text_gets_defaults() {
    let parser = parser();
    let message = "xyz completely unrelated text";

    assert!(!parser.is_news_request(message));
    let parsed = parser.parse(message);
    assert_eq!(parsed.frequency(), Frequency::Daily);
    assert_eq!(parsed.topic(), DEFAULT_TOPIC);
    assert_eq!(parsed.language(), DEFAULT_LANGUAGE);
    assert_eq!(parsed.formatted(), "daily:general news:English");
}

#[test]
fn test_domain_table_preempts_about_capture() {
    let parsed = parser().parse("Give me news about artificial intelligence");
    assert_eq!(parsed.topic(), "artificial intelligence");
}

#[test]
fn test_about_capture_used_when_no_domain_matches() {
    let parsed = parser().parse("Any news about quantum computing in Spanish");
    assert_eq!(parsed.formatted(), "daily:quantum computing:Spanish");
}

#[test]
fn test_parse_is_total_and_formatted_splits_back() {
    let parser = parser();
    let inputs = [
        "",
        "   ",
        ":::",
        "news about : colons : everywhere",
        "¿Qué hay de nuevo? 日本語のニュース",
        "ALL CAPS WEEKLY HEADLINES IN TAMIL",
        "in",
        "translate to",
        "give me  news",
        &"news ".repeat(500),
    ];

    for input in inputs {
        let parsed = parser.parse(input);
        assert!(Frequency::ALL.contains(&parsed.frequency()));
        assert!(!parsed.topic().is_empty());
        assert!(parser.languages().contains(parsed.language()));

        let fields: Vec<&str> = parsed.formatted().split(':').collect();
        assert_eq!(fields.len(), 3, "input {:?}", input);
        assert_eq!(fields[0], parsed.frequency().as_str());
        assert_eq!(fields[1], parsed.topic());
        assert_eq!(fields[2], parsed.language());
    }
}

#[test]
fn test_inspect_matches_separate_calls() {
    let parser = parser();
    let message = "Fetch weekly entertainment news";
    let analysis = parser.inspect(message);
    assert_eq!(analysis.is_news, parser.is_news_request(message));
    assert_eq!(analysis.request, parser.parse(message));
}

#[test]
fn test_alternate_tables_are_injected() {
    let mut topics = TopicPatternTable::default();
    topics.push(TopicRule::new(r"\b(chess|openings?)\b", "chess").unwrap());
    let languages = LanguageTable::new([("English", "English"), ("Polish", "Polish (Polski)")]).unwrap();
    let tables = ParserTables::with_tables(KeywordTable::builtin(), topics, languages).unwrap();
    let parser = NewsParser::new(Arc::new(tables));

    let parsed = parser.parse("latest chess news in polski");
    assert_eq!(parsed.formatted(), "daily:chess:Polish");

    // "sports" is not in the injected topic table, so the about capture is used instead
    let parsed = parser.parse("news about sports cars");
    assert_eq!(parsed.topic(), "sports cars");
}

#[test]
fn test_parser_is_shareable_across_threads() {
    let parser = parser();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let parser = parser.clone();
            std::thread::spawn(move || parser.parse("Get me daily business news in Spanish"))
        })
        .collect();

    for handle in handles {
        let parsed = handle.join().expect("thread");
        assert_eq!(parsed.formatted(), "daily:business:Spanish");
    }
}

#[test]
fn test_analysis_serializes_flat() {
    let analysis = parser().inspect("Latest news about education");
    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["is_news"], true);
    assert_eq!(json["frequency"], "daily");
    assert_eq!(json["topic"], "education");
    assert_eq!(json["language"], "English");
    assert_eq!(json["formatted"], "daily:education:English");
}
