use std::io::Write;
use std::sync::{Arc, Mutex};

use serial_test::serial;

use super::*;
use crate::options::{Language, Persona};

const ENV_KEYS: [&str; 14] = [
    "CLAUSELENS_LLM_PROVIDER",
    "CLAUSELENS_LLM_BASE_URL",
    "CLAUSELENS_LLM_MODEL",
    "CLAUSELENS_CLAUDE_MODEL",
    "CLAUSELENS_OPENAI_BASE_URL",
    "CLAUSELENS_OPENAI_MODEL",
    "CLAUSELENS_SQLITE_PATH",
    "CLAUSELENS_HISTORY_LIMIT",
    "CLAUSELENS_PERSONA",
    "CLAUSELENS_LANGUAGE",
    "CLAUSELENS_CASUAL_TONE",
    "CLAUSELENS_SAVE_ANALYSES",
    "CLAUSELENS_CLAUDE_API_KEY",
    "CLAUSELENS_OPENAI_API_KEY",
];

fn clear_env() {
    for key in ENV_KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

fn write_config(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(f, "{body}").unwrap();
    (dir, path)
}

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.llm.provider, ProviderKind::Ollama);
    assert_eq!(config.llm.base_url, "http://localhost:11434");
    assert_eq!(config.llm.model, "mistral:7b");
    assert!(config.llm.cloud.is_none());
    assert!(config.llm.openai.is_none());
    assert_eq!(config.memory.sqlite_path, "./data/clauselens.db");
    assert_eq!(config.memory.history_limit, 10);
    assert_eq!(config.analysis.persona, Persona::StudentTenant);
    assert_eq!(config.analysis.language, Language::English);
    assert!(!config.analysis.casual_tone);
    assert!(!config.analysis.save_by_default);
    assert_eq!(config.analysis.chunk_max_chars, 4000);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn missing_file_uses_defaults() {
    clear_env();
    let config = Config::load(std::path::Path::new("/nonexistent/clauselens.toml")).unwrap();
    assert_eq!(config.llm.model, "mistral:7b");
}

#[test]
#[serial]
fn parse_full_toml() {
    clear_env();
    let (_dir, path) = write_config(
        r#"
[llm]
provider = "claude"
base_url = "http://custom:1234"
model = "llama3:8b"

[llm.cloud]
model = "claude-sonnet-4-5-20250929"
max_tokens = 2048

[memory]
sqlite_path = "/tmp/cl.db"
history_limit = 25

[analysis]
persona = "Freelancer"
language = "Hindi (हिंदी)"
casual_tone = true
save_by_default = true
chunk_max_chars = 2000
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.llm.provider, ProviderKind::Claude);
    assert_eq!(config.llm.base_url, "http://custom:1234");
    let cloud = config.llm.cloud.as_ref().unwrap();
    assert_eq!(cloud.max_tokens, 2048);
    assert_eq!(config.memory.sqlite_path, "/tmp/cl.db");
    assert_eq!(config.memory.history_limit, 25);
    assert_eq!(config.analysis.persona, Persona::Freelancer);
    assert_eq!(config.analysis.language, Language::Hindi);
    assert!(config.analysis.casual_tone);
    assert!(config.analysis.save_by_default);
    assert_eq!(config.analysis.chunk_max_chars, 2000);

    let opts = config.analysis.options();
    assert_eq!(opts.persona, Persona::Freelancer);
    assert!(opts.casual_tone);
    config.validate().unwrap();
}

#[test]
#[serial]
fn partial_toml_fills_defaults() {
    clear_env();
    let (_dir, path) = write_config("[analysis]\npersona = \"small-business-owner\"\n");
    let config = Config::load(&path).unwrap();
    assert_eq!(config.analysis.persona, Persona::SmallBusinessOwner);
    assert_eq!(config.llm.provider, ProviderKind::Ollama);
    assert_eq!(config.memory.history_limit, 10);
}

#[test]
#[serial]
fn invalid_toml_is_an_error() {
    clear_env();
    let (_dir, path) = write_config("[llm\nprovider = ");
    assert!(Config::load(&path).is_err());
}

#[test]
#[serial]
fn unknown_persona_in_file_is_an_error() {
    clear_env();
    let (_dir, path) = write_config("[analysis]\npersona = \"Astronaut\"\n");
    let err = Config::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("unknown persona"));
}

#[test]
#[serial]
fn env_overrides_apply() {
    clear_env();
    unsafe {
        std::env::set_var("CLAUSELENS_LLM_PROVIDER", "openai");
        std::env::set_var("CLAUSELENS_LLM_MODEL", "phi3");
        std::env::set_var("CLAUSELENS_OPENAI_MODEL", "gpt-4.1-mini");
        std::env::set_var("CLAUSELENS_SQLITE_PATH", "/tmp/env.db");
        std::env::set_var("CLAUSELENS_HISTORY_LIMIT", "3");
        std::env::set_var("CLAUSELENS_PERSONA", "freelancer");
        std::env::set_var("CLAUSELENS_LANGUAGE", "tamil");
        std::env::set_var("CLAUSELENS_CASUAL_TONE", "true");
        std::env::set_var("CLAUSELENS_SAVE_ANALYSES", "true");
    }

    let config = Config::load(std::path::Path::new("/nonexistent/clauselens.toml")).unwrap();
    clear_env();

    assert_eq!(config.llm.provider, ProviderKind::OpenAi);
    assert_eq!(config.llm.model, "phi3");
    let openai = config.llm.openai.as_ref().unwrap();
    assert_eq!(openai.model, "gpt-4.1-mini");
    assert_eq!(openai.base_url, "https://api.openai.com/v1");
    assert_eq!(config.memory.sqlite_path, "/tmp/env.db");
    assert_eq!(config.memory.history_limit, 3);
    assert_eq!(config.analysis.persona, Persona::Freelancer);
    assert_eq!(config.analysis.language, Language::Tamil);
    assert!(config.analysis.casual_tone);
    assert!(config.analysis.save_by_default);
    config.validate().unwrap();
}

#[test]
#[serial]
fn invalid_env_values_are_ignored() {
    clear_env();
    unsafe {
        std::env::set_var("CLAUSELENS_LLM_PROVIDER", "gemini");
        std::env::set_var("CLAUSELENS_HISTORY_LIMIT", "lots");
        std::env::set_var("CLAUSELENS_PERSONA", "astronaut");
        std::env::set_var("CLAUSELENS_CASUAL_TONE", "maybe");
    }

    let config = Config::load(std::path::Path::new("/nonexistent/clauselens.toml")).unwrap();
    clear_env();

    assert_eq!(config.llm.provider, ProviderKind::Ollama);
    assert_eq!(config.memory.history_limit, 10);
    assert_eq!(config.analysis.persona, Persona::StudentTenant);
    assert!(!config.analysis.casual_tone);
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
#[serial]
fn invalid_bool_env_values_warn() {
    clear_env();
    unsafe {
        std::env::set_var("CLAUSELENS_CASUAL_TONE", "yes please");
        std::env::set_var("CLAUSELENS_SAVE_ANALYSES", "1");
    }

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let mut config = Config::default();
    tracing::subscriber::with_default(subscriber, || config.apply_env_overrides());
    clear_env();

    assert!(!config.analysis.casual_tone);
    assert!(!config.analysis.save_by_default);
    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("ignoring invalid CLAUSELENS_CASUAL_TONE value: yes please"));
    assert!(output.contains("ignoring invalid CLAUSELENS_SAVE_ANALYSES value: 1"));
}

#[test]
#[serial]
fn claude_model_env_creates_cloud_section() {
    clear_env();
    unsafe {
        std::env::set_var("CLAUSELENS_LLM_PROVIDER", "claude");
        std::env::set_var("CLAUSELENS_CLAUDE_MODEL", "claude-haiku-4-5");
    }
    let config = Config::load(std::path::Path::new("/nonexistent/clauselens.toml")).unwrap();
    clear_env();

    let cloud = config.llm.cloud.as_ref().unwrap();
    assert_eq!(cloud.model, "claude-haiku-4-5");
    assert_eq!(cloud.max_tokens, 4096);
    config.validate().unwrap();
}

#[test]
fn validate_rejects_bad_values() {
    let mut config = Config::default();
    config.llm.model = "  ".into();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.llm.provider = ProviderKind::Claude;
    assert!(config.validate().is_err());
    config.llm.cloud = Some(CloudLlmConfig {
        model: "claude".into(),
        max_tokens: 0,
    });
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.llm.provider = ProviderKind::OpenAi;
    config.llm.openai = Some(OpenAiConfig {
        model: String::new(),
        ..OpenAiConfig::default()
    });
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.analysis.chunk_max_chars = 0;
    assert!(config.validate().is_err());
}

#[tokio::test]
async fn resolve_secrets_populates_keys() {
    use crate::vault::MockVaultProvider;
    let vault = MockVaultProvider::new()
        .with_secret("CLAUSELENS_CLAUDE_API_KEY", "sk-ant")
        .with_secret("CLAUSELENS_OPENAI_API_KEY", "sk-oai");
    let mut config = Config::default();
    config.resolve_secrets(&vault).await.unwrap();
    assert_eq!(
        config.secrets.claude_api_key.as_ref().unwrap().expose(),
        "sk-ant"
    );
    assert_eq!(
        config.secrets.openai_api_key.as_ref().unwrap().expose(),
        "sk-oai"
    );
    assert!(!format!("{:?}", config.secrets).contains("sk-"));
}

#[tokio::test]
async fn resolve_secrets_leaves_missing_unset() {
    use crate::vault::MockVaultProvider;
    let mut config = Config::default();
    config
        .resolve_secrets(&MockVaultProvider::new())
        .await
        .unwrap();
    assert!(config.secrets.claude_api_key.is_none());
    assert!(config.secrets.openai_api_key.is_none());
}

#[test]
fn provider_kind_strings() {
    assert_eq!(ProviderKind::OpenAi.to_string(), "openai");
    let kind: ProviderKind = serde_json::from_str("\"claude\"").unwrap();
    assert_eq!(kind, ProviderKind::Claude);
}
