use super::{CloudLlmConfig, Config, OpenAiConfig};

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_llm();
        self.apply_env_overrides_app();
    }

    fn apply_env_overrides_llm(&mut self) {
        if let Ok(v) = std::env::var("CLAUSELENS_LLM_PROVIDER") {
            if let Ok(kind) = serde_json::from_value(serde_json::Value::String(v.clone())) {
                self.llm.provider = kind;
            } else {
                tracing::warn!("ignoring invalid CLAUSELENS_LLM_PROVIDER value: {v}");
            }
        }
        if let Ok(v) = std::env::var("CLAUSELENS_LLM_BASE_URL") {
            self.llm.base_url = v;
        }
        if let Ok(v) = std::env::var("CLAUSELENS_LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("CLAUSELENS_CLAUDE_MODEL") {
            self.llm
                .cloud
                .get_or_insert_with(CloudLlmConfig::default)
                .model = v;
        }
        if let Ok(v) = std::env::var("CLAUSELENS_OPENAI_BASE_URL") {
            self.llm
                .openai
                .get_or_insert_with(OpenAiConfig::default)
                .base_url = v;
        }
        if let Ok(v) = std::env::var("CLAUSELENS_OPENAI_MODEL") {
            self.llm
                .openai
                .get_or_insert_with(OpenAiConfig::default)
                .model = v;
        }
    }

    fn apply_env_overrides_app(&mut self) {
        if let Ok(v) = std::env::var("CLAUSELENS_SQLITE_PATH") {
            self.memory.sqlite_path = v;
        }
        if let Ok(v) = std::env::var("CLAUSELENS_HISTORY_LIMIT") {
            match v.parse::<u32>() {
                Ok(limit) => self.memory.history_limit = limit,
                Err(_) => tracing::warn!("ignoring invalid CLAUSELENS_HISTORY_LIMIT value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("CLAUSELENS_PERSONA") {
            match v.parse() {
                Ok(persona) => self.analysis.persona = persona,
                Err(e) => tracing::warn!("ignoring CLAUSELENS_PERSONA: {e}"),
            }
        }
        if let Ok(v) = std::env::var("CLAUSELENS_LANGUAGE") {
            match v.parse() {
                Ok(language) => self.analysis.language = language,
                Err(e) => tracing::warn!("ignoring CLAUSELENS_LANGUAGE: {e}"),
            }
        }
        if let Ok(v) = std::env::var("CLAUSELENS_CASUAL_TONE") {
            match v.parse::<bool>() {
                Ok(casual) => self.analysis.casual_tone = casual,
                Err(_) => tracing::warn!("ignoring invalid CLAUSELENS_CASUAL_TONE value: {v}"),
            }
        }
        if let Ok(v) = std::env::var("CLAUSELENS_SAVE_ANALYSES") {
            match v.parse::<bool>() {
                Ok(save) => self.analysis.save_by_default = save,
                Err(_) => tracing::warn!("ignoring invalid CLAUSELENS_SAVE_ANALYSES value: {v}"),
            }
        }
    }
}
