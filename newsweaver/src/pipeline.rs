//! Wire contract with the news pipeline: `frequency:topic:language:email`.
//!
//! The pipeline reads positional colon-separated fields, so a topic containing
//! `:` shifts every later field. Nothing here escapes colons; callers that take
//! topics from users must reject them (see `routing::Router::route_form`).

use serde::Serialize;

use crate::parser::{Frequency, ParsedNewsRequest, DEFAULT_LANGUAGE, DEFAULT_TOPIC};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineMessage {
    pub frequency: Frequency,
    pub topic: String,
    pub language: String,
    pub recipient_email: Option<String>,
}

impl PipelineMessage {
    pub fn from_request(request: &ParsedNewsRequest, recipient_email: Option<&str>) -> Self {
        Self {
            frequency: request.frequency(),
            topic: request.topic().to_string(),
            language: request.language().to_string(),
            recipient_email: non_blank(recipient_email),
        }
    }

    /// `frequency:topic:language:email`, with an empty last segment when there is no email.
    pub fn encode(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.frequency,
            self.topic,
            self.language,
            self.recipient_email.as_deref().unwrap_or("")
        )
    }

    /// Tolerant reader: missing or blank fields fall back to defaults, an
    /// unknown frequency reads as daily. Never fails.
    pub fn decode(message: &str) -> Self {
        let mut parts = message.split(':').map(str::trim);

        let frequency = parts
            .next()
            .and_then(|f| f.parse::<Frequency>().ok())
            .unwrap_or_default();
        let topic = parts
            .next()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TOPIC)
            .to_string();
        let language = parts
            .next()
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string();
        let recipient_email = non_blank(parts.next());

        Self {
            frequency,
            topic,
            language,
            recipient_email,
        }
    }

    pub fn search_query(&self) -> String {
        format!("Top latest {} news India and globally", self.topic)
    }

    pub fn needs_translation(&self) -> bool {
        !self.language.eq_ignore_ascii_case(DEFAULT_LANGUAGE)
    }

    /// File name (without extension) the pipeline writes the summary to.
    pub fn summary_file_stem(&self) -> String {
        let topic = self.clean_topic();
        if self.needs_translation() {
            let language: String = self
                .language
                .replace(' ', "_")
                .chars()
                .filter(|c| *c != '(' && *c != ')')
                .collect();
            format!("{}_{}_{}_summary", self.frequency, topic, language)
        } else {
            format!("{}_{}_summary", self.frequency, topic)
        }
    }

    /// Markdown heading of the summary ("Weekly Quantum_Computing News Summary (Hindi)").
    pub fn summary_title(&self) -> String {
        let mut title = format!(
            "{} {} News Summary",
            self.frequency.title(),
            title_case(&self.clean_topic())
        );
        if self.needs_translation() {
            title.push_str(&format!(" ({})", self.language));
        }
        title
    }

    fn clean_topic(&self) -> String {
        self.topic.replace([' ', '/'], "_")
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
