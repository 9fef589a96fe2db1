//! Picks one of the agent workflows for a chat message or a sidebar form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::parser::{Frequency, NewsAnalysis, NewsParser, DEFAULT_LANGUAGE, DEFAULT_TOPIC};
use crate::pipeline::PipelineMessage;

pub const EMPTY_MESSAGE_REASON: &str = "Message is empty.";

pub const NOT_NEWS_REASON: &str =
    "This doesn't look like a news request. Please try asking for news or use the sidebar controls.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Usecase {
    #[serde(rename = "Basic Chatbot")]
    BasicChatbot,
    #[serde(rename = "Chatbot With Web")]
    ChatbotWithWeb,
    #[serde(rename = "News")]
    News,
}

impl Usecase {
    pub const ALL: [Usecase; 3] = [Usecase::BasicChatbot, Usecase::ChatbotWithWeb, Usecase::News];

    pub fn label(&self) -> &'static str {
        match self {
            Usecase::BasicChatbot => "Basic Chatbot",
            Usecase::ChatbotWithWeb => "Chatbot With Web",
            Usecase::News => "News",
        }
    }
}

impl fmt::Display for Usecase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Usecase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let wanted = s.trim();
        Usecase::ALL
            .into_iter()
            .find(|u| u.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow::anyhow!("unknown usecase: {}", s))
    }
}

/// Sidebar form submission. Skips classification entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsForm {
    pub timeframe: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub recipient_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// Message handed to the selected workflow as-is.
    Dispatch {
        usecase: Usecase,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        analysis: Option<NewsAnalysis>,
    },
    Rejected { reason: String },
}

impl RouteOutcome {
    fn rejected(reason: impl Into<String>) -> Self {
        RouteOutcome::Rejected {
            reason: reason.into(),
        }
    }

    pub fn is_dispatch(&self) -> bool {
        matches!(self, RouteOutcome::Dispatch { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    parser: NewsParser,
}

impl Router {
    pub fn new(parser: NewsParser) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &NewsParser {
        &self.parser
    }

    /// Chat path. Only the News workflow classifies; the chatbots get the raw text.
    pub fn route_chat(&self, usecase: Usecase, message: &str) -> RouteOutcome {
        if message.trim().is_empty() {
            return RouteOutcome::rejected(EMPTY_MESSAGE_REASON);
        }

        if usecase != Usecase::News {
            debug!(%usecase, "routing chat message unchanged");
            return RouteOutcome::Dispatch {
                usecase,
                message: message.to_string(),
                analysis: None,
            };
        }

        let analysis = self.parser.inspect(message);
        if !analysis.is_news {
            info!("chat message rejected: not a news request");
            return RouteOutcome::rejected(NOT_NEWS_REASON);
        }

        info!(
            frequency = %analysis.request.frequency(),
            topic = analysis.request.topic(),
            language = analysis.request.language(),
            "news request understood"
        );
        RouteOutcome::Dispatch {
            usecase,
            message: analysis.request.formatted().to_string(),
            analysis: Some(analysis),
        }
    }

    /// Form path: always News, values validated instead of extracted.
    pub fn route_form(&self, form: &NewsForm) -> RouteOutcome {
        let frequency = match form.timeframe.parse::<Frequency>() {
            Ok(f) => f,
            Err(_) => {
                return RouteOutcome::rejected(format!("Unsupported time frame: {}", form.timeframe))
            }
        };

        let topic = form
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TOPIC);
        if topic.contains(':') {
            return RouteOutcome::rejected("Topic must not contain ':'.");
        }

        let language = form
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE);
        if !self.parser.languages().contains(language) {
            return RouteOutcome::rejected(format!("Unsupported language: {}", language));
        }

        let message = PipelineMessage {
            frequency,
            topic: topic.to_string(),
            language: language.to_string(),
            recipient_email: form
                .recipient_email
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
        };
        debug!(message = %message.encode(), "form request routed to news");

        RouteOutcome::Dispatch {
            usecase: Usecase::News,
            message: message.encode(),
            analysis: None,
        }
    }
}
