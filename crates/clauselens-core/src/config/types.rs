use serde::{Deserialize, Serialize};

use crate::options::{AnalysisOptions, Language, Persona};
use crate::vault::Secret;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(skip)]
    pub secrets: ResolvedSecrets,
}

/// LLM provider backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Ollama,
    Claude,
    OpenAi,
}

impl ProviderKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Claude => "claude",
            Self::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<CloudLlmConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAiConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            base_url: default_base_url(),
            model: default_model(),
            cloud: None,
            openai: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}

fn default_model() -> String {
    "mistral:7b".into()
}

pub(crate) fn default_max_tokens() -> u32 {
    4096
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CloudLlmConfig {
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for CloudLlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-5-20250929".into(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            model: "gpt-4o-mini".into(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".into()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MemoryConfig {
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: String,
    /// Rows shown by `history` when no limit is given.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            sqlite_path: default_sqlite_path(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_sqlite_path() -> String {
    "./data/clauselens.db".into()
}

fn default_history_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub persona: Persona,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub casual_tone: bool,
    /// Persist every analysis without `--save`.
    #[serde(default)]
    pub save_by_default: bool,
    #[serde(default = "default_chunk_max_chars")]
    pub chunk_max_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            persona: Persona::default(),
            language: Language::default(),
            casual_tone: false,
            save_by_default: false,
            chunk_max_chars: default_chunk_max_chars(),
        }
    }
}

fn default_chunk_max_chars() -> usize {
    clauselens_memory::document::DEFAULT_CHUNK_MAX_CHARS
}

impl AnalysisConfig {
    #[must_use]
    pub fn options(&self) -> AnalysisOptions {
        AnalysisOptions {
            persona: self.persona,
            language: self.language,
            casual_tone: self.casual_tone,
        }
    }
}

#[derive(Debug, Default)]
pub struct ResolvedSecrets {
    pub claude_api_key: Option<Secret>,
    pub openai_api_key: Option<Secret>,
}
