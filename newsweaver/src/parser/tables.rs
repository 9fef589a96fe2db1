use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use common::ParserConfig;

use super::languages::LanguageTable;

/// Topic returned when nothing in the message names a subject.
pub const DEFAULT_TOPIC: &str = "general news";

/// News look-back window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Number of days the news search looks back.
    pub fn lookback_days(&self) -> u32 {
        match self {
            Frequency::Daily => 1,
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
            Frequency::Yearly => 366,
        }
    }

    /// Single-letter time range code understood by the search collaborator.
    pub fn time_range(&self) -> &'static str {
        match self {
            Frequency::Daily => "d",
            Frequency::Weekly => "w",
            Frequency::Monthly => "m",
            Frequency::Yearly => "y",
        }
    }

    /// Label with the first letter upper-cased ("Daily").
    pub fn title(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = anyhow::Error;

    /// Accepts the label in any case, surrounding whitespace ignored ("Weekly", " daily ").
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| anyhow::anyhow!("unknown frequency: {}", s))
    }
}

/// Frequency buckets with their trigger words, in evaluation order.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    buckets: Vec<(Frequency, Vec<String>)>,
}

impl KeywordTable {
    pub fn new(buckets: Vec<(Frequency, Vec<String>)>) -> Self {
        let buckets = buckets
            .into_iter()
            .map(|(f, words)| (f, words.into_iter().map(|w| w.to_lowercase()).collect()))
            .collect();
        Self { buckets }
    }

    pub fn builtin() -> Self {
        let bucket = |f: Frequency, words: &[&str]| {
            (f, words.iter().map(|w| w.to_string()).collect::<Vec<_>>())
        };
        Self::new(vec![
            bucket(Frequency::Daily, &["daily", "today", "current", "latest", "recent"]),
            bucket(Frequency::Weekly, &["weekly", "week", "this week", "past week"]),
            bucket(Frequency::Monthly, &["monthly", "month", "this month", "past month"]),
            bucket(Frequency::Yearly, &["yearly", "year", "annual", "this year"]),
        ])
    }

    pub fn buckets(&self) -> impl Iterator<Item = (Frequency, &[String])> {
        self.buckets.iter().map(|(f, words)| (*f, words.as_slice()))
    }

    /// Every trigger word across all buckets.
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.buckets
            .iter()
            .flat_map(|(_, words)| words.iter().map(String::as_str))
    }
}

/// A single (pattern, canonical label) pair.
#[derive(Debug, Clone)]
pub struct TopicRule {
    pattern: Regex,
    label: String,
}

impl TopicRule {
    pub fn new(pattern: &str, label: &str) -> Result<Self> {
        let label = label.trim();
        if label.is_empty() {
            anyhow::bail!("topic rule for pattern '{}' has an empty label", pattern);
        }
        let pattern = Regex::new(pattern)
            .with_context(|| format!("invalid topic pattern for '{}': {}", label, pattern))?;
        Ok(Self {
            pattern,
            label: label.to_string(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_match(&self, lowered: &str) -> bool {
        self.pattern.is_match(lowered)
    }
}

/// Ordered domain rules. First match wins, so the order is part of the contract.
#[derive(Debug, Clone, Default)]
pub struct TopicPatternTable {
    rules: Vec<TopicRule>,
}

const BUILTIN_TOPICS: &[(&str, &str)] = &[
    (r"\b(sports?|sport)\b", "sports"),
    (r"\b(tech|technology|technological)\b", "technology"),
    (r"\b(politics?|political|government)\b", "politics"),
    (r"\b(health|medical|healthcare)\b", "health"),
    (r"\b(business|economic|economy|finance|financial)\b", "business"),
    (r"\b(entertainment|celebrity|movies?|films?)\b", "entertainment"),
    (r"\b(science|scientific|research)\b", "science"),
    (r"\b(world|international|global)\b", "world"),
    (r"\b(ai|artificial intelligence|machine learning|ml)\b", "artificial intelligence"),
    (r"\b(crypto|cryptocurrency|bitcoin|blockchain)\b", "cryptocurrency"),
    (r"\b(climate|environment|environmental|global warming)\b", "climate"),
    (r"\b(education|educational|school|university)\b", "education"),
];

impl TopicPatternTable {
    pub fn builtin() -> Result<Self> {
        let mut table = Self::default();
        for (pattern, label) in BUILTIN_TOPICS {
            table.push(TopicRule::new(pattern, label)?);
        }
        Ok(table)
    }

    /// Append a rule with the lowest precedence.
    pub fn push(&mut self, rule: TopicRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[TopicRule] {
        &self.rules
    }

    pub fn first_match(&self, lowered: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.is_match(lowered))
            .map(TopicRule::label)
    }
}

const NEWS_KEYWORDS: &[&str] = &[
    "news", "latest", "update", "current", "recent", "breaking",
    "headlines", "stories", "reports", "coverage", "articles",
];

const INTENT_PATTERNS: &[&str] = &[
    r"\b(sports?|technology|tech|politics?|health|business|entertainment|science|world|international)\b",
    r"\b(give me|show me|get me|fetch|provide|tell me about)\b.*\b(news|updates?|headlines?)\b",
    r"\bnews\s+(about|on|regarding|for)\b",
    r"\b(latest|recent|current)\s+(news|updates?|headlines?)\b",
];

const ABOUT_PATTERN: &str =
    r"\b(news|updates?|headlines?)\s+(about|on|regarding|for)\s+([a-zA-Z\s]+?)(?:\s+in\s+|\s+news|\s*$)";
const REQUEST_PATTERN: &str =
    r"\b(give me|show me|get me|fetch|provide)\s+([a-zA-Z\s]+?)\s+(news|updates?|headlines?)\b";
const LANGUAGE_PATTERN: &str = r"\b(in|translate to|convert to)\s+(\w+)\b";

/// Everything the classifier and extractor read. Built once, shared read-only.
#[derive(Debug, Clone)]
pub struct ParserTables {
    pub(crate) frequencies: KeywordTable,
    pub(crate) news_keywords: Vec<String>,
    pub(crate) intent_patterns: Vec<Regex>,
    pub(crate) topics: TopicPatternTable,
    pub(crate) about_pattern: Regex,
    pub(crate) request_pattern: Regex,
    pub(crate) language_pattern: Regex,
    pub(crate) languages: LanguageTable,
}

impl ParserTables {
    /// Built-in keyword, topic and language tables.
    pub fn builtin() -> Result<Self> {
        Self::with_tables(
            KeywordTable::builtin(),
            TopicPatternTable::builtin()?,
            LanguageTable::builtin(),
        )
    }

    /// Built-in tables plus the topic rules and languages listed in `[parser]`.
    pub fn from_config(cfg: &ParserConfig) -> Result<Self> {
        let mut topics = TopicPatternTable::builtin()?;
        for extra in &cfg.topics {
            topics.push(TopicRule::new(&extra.pattern, &extra.label)?);
        }

        let languages = LanguageTable::builtin()
            .extend(
                cfg.languages
                    .iter()
                    .map(|l| (l.code.as_str(), l.display_name.as_str())),
            )
            .context("invalid [parser.languages] entry")?;

        Self::with_tables(KeywordTable::builtin(), topics, languages)
    }

    /// Assemble tables from caller-provided keyword, topic and language tables.
    /// The classifier intent patterns and the phrase capture patterns are fixed.
    pub fn with_tables(
        frequencies: KeywordTable,
        topics: TopicPatternTable,
        languages: LanguageTable,
    ) -> Result<Self> {
        let intent_patterns = INTENT_PATTERNS
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("invalid intent pattern: {}", p)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            frequencies,
            news_keywords: NEWS_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            intent_patterns,
            topics,
            about_pattern: Regex::new(ABOUT_PATTERN).context("invalid about pattern")?,
            request_pattern: Regex::new(REQUEST_PATTERN).context("invalid request pattern")?,
            language_pattern: Regex::new(LANGUAGE_PATTERN).context("invalid language pattern")?,
            languages,
        })
    }

    pub fn frequencies(&self) -> &KeywordTable {
        &self.frequencies
    }

    pub fn topics(&self) -> &TopicPatternTable {
        &self.topics
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }
}
