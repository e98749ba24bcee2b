mod env;
mod types;

#[cfg(test)]
mod tests;

pub use types::*;

use std::path::Path;

use anyhow::{Context, bail};

use crate::vault::{Secret, VaultProvider};

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Check the settings the selected provider depends on.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty model name, a zero token limit, a missing provider
    /// section, or a zero chunk size.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.llm.provider {
            ProviderKind::Ollama => {
                if self.llm.model.trim().is_empty() {
                    bail!("llm.model must not be empty");
                }
            }
            ProviderKind::Claude => {
                let Some(cloud) = &self.llm.cloud else {
                    bail!("llm.cloud config section required for Claude provider");
                };
                if cloud.model.trim().is_empty() {
                    bail!("llm.cloud.model must not be empty");
                }
                if cloud.max_tokens == 0 {
                    bail!("llm.cloud.max_tokens must be greater than zero");
                }
            }
            ProviderKind::OpenAi => {
                let Some(openai) = &self.llm.openai else {
                    bail!("llm.openai config section required for OpenAI provider");
                };
                if openai.model.trim().is_empty() {
                    bail!("llm.openai.model must not be empty");
                }
                if openai.max_tokens == 0 {
                    bail!("llm.openai.max_tokens must be greater than zero");
                }
            }
        }
        if self.analysis.chunk_max_chars == 0 {
            bail!("analysis.chunk_max_chars must be greater than zero");
        }
        Ok(())
    }

    /// Resolve API keys through the vault.
    ///
    /// # Errors
    ///
    /// Returns an error if the vault backend fails.
    pub async fn resolve_secrets(&mut self, vault: &dyn VaultProvider) -> anyhow::Result<()> {
        if let Some(val) = vault.get_secret("CLAUSELENS_CLAUDE_API_KEY").await? {
            self.secrets.claude_api_key = Some(Secret::new(val));
        }
        if let Some(val) = vault.get_secret("CLAUSELENS_OPENAI_API_KEY").await? {
            self.secrets.openai_api_key = Some(Secret::new(val));
        }
        Ok(())
    }
}
