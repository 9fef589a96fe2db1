//! Rule-based news intent classifier and parameter extractor.
//!
//! Everything here is pure: a message goes in, a [`ParsedNewsRequest`] comes out,
//! and every extraction step ends in a default instead of an error. The tables
//! are built once and shared through an `Arc`, so a [`NewsParser`] can be cloned
//! into as many workers as needed.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

mod classifier;
mod extractor;
pub mod languages;
pub mod tables;

pub use languages::{Language, LanguageTable, DEFAULT_LANGUAGE};
pub use tables::{Frequency, KeywordTable, ParserTables, TopicPatternTable, TopicRule, DEFAULT_TOPIC};

/// Frequency, topic and language extracted from one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedNewsRequest {
    frequency: Frequency,
    topic: String,
    language: String,
    formatted: String,
}

impl ParsedNewsRequest {
    pub(crate) fn new(frequency: Frequency, topic: String, language: String) -> Self {
        let formatted = format!("{}:{}:{}", frequency, topic, language);
        Self {
            frequency,
            topic,
            language,
            formatted,
        }
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// `frequency:topic:language`. Colons inside the topic are not escaped.
    pub fn formatted(&self) -> &str {
        &self.formatted
    }
}

/// Classification plus extraction for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsAnalysis {
    pub is_news: bool,
    #[serde(flatten)]
    pub request: ParsedNewsRequest,
}

#[derive(Debug, Clone)]
pub struct NewsParser {
    tables: Arc<ParserTables>,
}

impl NewsParser {
    pub fn new(tables: Arc<ParserTables>) -> Self {
        Self { tables }
    }

    /// Parser over the built-in tables.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(Arc::new(ParserTables::builtin()?)))
    }

    pub fn tables(&self) -> &ParserTables {
        &self.tables
    }

    pub fn languages(&self) -> &LanguageTable {
        self.tables.languages()
    }

    pub fn is_news_request(&self, message: &str) -> bool {
        classifier::is_news_request(&self.tables, &message.to_lowercase())
    }

    /// Extract parameters without classifying first. Never fails.
    pub fn parse(&self, message: &str) -> ParsedNewsRequest {
        self.parse_lowered(&message.to_lowercase())
    }

    /// Classify and extract in one pass over the lower-cased message.
    pub fn inspect(&self, message: &str) -> NewsAnalysis {
        let lowered = message.to_lowercase();
        NewsAnalysis {
            is_news: classifier::is_news_request(&self.tables, &lowered),
            request: self.parse_lowered(&lowered),
        }
    }

    fn parse_lowered(&self, lowered: &str) -> ParsedNewsRequest {
        ParsedNewsRequest::new(
            extractor::extract_frequency(&self.tables, lowered),
            extractor::extract_topic(&self.tables, lowered),
            extractor::extract_language(&self.tables, lowered),
        )
    }
}
