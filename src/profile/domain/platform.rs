//! Platform tags for supported chat sites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The chat platform a profile describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// chatgpt.com / chat.openai.com
    ChatGpt,
    /// claude.ai
    Claude,
    /// gemini.google.com
    Gemini,
    /// chat.deepseek.com
    DeepSeek,
    /// grok.com
    Grok,
    /// Low-confidence structural fallback for unrecognised sites.
    Generic,
}

impl Platform {
    /// Returns the canonical tag string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChatGpt => "chatgpt",
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::DeepSeek => "deepseek",
            Self::Grok => "grok",
            Self::Generic => "generic",
        }
    }

    /// Returns `true` for the fallback profile tag.
    #[must_use]
    pub const fn is_generic(self) -> bool {
        matches!(self, Self::Generic)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
