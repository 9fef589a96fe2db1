use anyhow::Result;
use serde::Serialize;

/// Language returned when the message names none, and the registry's first entry.
pub const DEFAULT_LANGUAGE: &str = "English";

const BUILTIN_LANGUAGES: &[(&str, &str)] = &[
    ("English", "English"),
    ("Hindi", "Hindi (हिंदी)"),
    ("Spanish", "Spanish (Español)"),
    ("French", "French (Français)"),
    ("German", "German (Deutsch)"),
    ("Italian", "Italian (Italiano)"),
    ("Portuguese", "Portuguese (Português)"),
    ("Russian", "Russian (Русский)"),
    ("Japanese", "Japanese (日本語)"),
    ("Korean", "Korean (한국어)"),
    ("Chinese", "Chinese (中文)"),
    ("Arabic", "Arabic (العربية)"),
    ("Bengali", "Bengali (বাংলা)"),
    ("Tamil", "Tamil (தமிழ்)"),
    ("Telugu", "Telugu (తెలుగు)"),
    ("Marathi", "Marathi (मराठी)"),
    ("Gujarati", "Gujarati (ગુજરાતી)"),
    ("Punjabi", "Punjabi (ਪੰਜਾਬੀ)"),
    ("Urdu", "Urdu (اردو)"),
    ("Malayalam", "Malayalam (മലയാളം)"),
    ("Kannada", "Kannada (ಕನ್ನಡ)"),
    ("Dutch", "Dutch (Nederlands)"),
    ("Swedish", "Swedish (Svenska)"),
    ("Norwegian", "Norwegian (Norsk)"),
    ("Thai", "Thai (ไทย)"),
    ("Vietnamese", "Vietnamese (Tiếng Việt)"),
];

/// Registry entry: canonical code and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: String,
    pub display_name: String,
}

impl Language {
    /// Display name without its native-script parenthetical ("Hindi (हिंदी)" -> "Hindi").
    pub fn base_name(&self) -> &str {
        self.display_name
            .split('(')
            .next()
            .unwrap_or_default()
            .trim()
    }
}

#[derive(Debug, Clone)]
struct Entry {
    language: Language,
    // lower-cased code, display name, base name
    needles: [String; 3],
}

impl Entry {
    fn new(code: &str, display_name: &str) -> Self {
        let language = Language {
            code: code.trim().to_string(),
            display_name: display_name.trim().to_string(),
        };
        let needles = [
            language.code.to_lowercase(),
            language.display_name.to_lowercase(),
            language.base_name().to_lowercase(),
        ];
        Self { language, needles }
    }
}

/// Ordered code -> display name registry. Always contains `English`.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    entries: Vec<Entry>,
}

impl LanguageTable {
    /// Build a registry from (code, display name) pairs, keeping their order.
    pub fn new<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self { entries: Vec::new() }.extend(pairs)
    }

    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_LANGUAGES
                .iter()
                .map(|(code, name)| Entry::new(code, name))
                .collect(),
        }
    }

    /// Append entries after the existing ones.
    pub fn extend<'a, I>(mut self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (code, name) in pairs {
            let entry = Entry::new(code, name);
            if entry.language.code.is_empty() || entry.language.display_name.is_empty() {
                anyhow::bail!("language entry needs a code and a display name (got '{}' / '{}')", code, name);
            }
            if self.contains(&entry.language.code) {
                anyhow::bail!("duplicate language code: {}", entry.language.code);
            }
            self.entries.push(entry);
        }
        if !self.contains(DEFAULT_LANGUAGE) {
            anyhow::bail!("language table must contain {}", DEFAULT_LANGUAGE);
        }
        Ok(self)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|e| e.language.code == code)
    }

    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.language.code == code)
            .map(|e| e.language.display_name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.entries.iter().map(|e| &e.language)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose code, display name or base name occurs in `lowered`.
    pub(crate) fn mentioned_in(&self, lowered: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.needles.iter().any(|n| !n.is_empty() && lowered.contains(n.as_str())))
            .map(|e| e.language.code.as_str())
    }

    /// First entry whose display name contains `word` or whose code equals it, ignoring case.
    pub(crate) fn resolve_word(&self, word: &str) -> Option<&str> {
        let word = word.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.needles[1].contains(word.as_str()) || e.needles[0] == word)
            .map(|e| e.language.code.as_str())
    }
}
