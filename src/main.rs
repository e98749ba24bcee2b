mod cli;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use clauselens_core::config::{Config, ProviderKind};
use clauselens_core::report::{render_report, report_file_name};
use clauselens_core::vault::EnvVaultProvider;
use clauselens_core::{
    AnalysisOptions, AnalysisOrchestrator, ClauseAssistant, CoreError, ModelGateway, Session,
    demo, history,
};
use clauselens_llm::any::AnyProvider;
use clauselens_llm::claude::ClaudeProvider;
use clauselens_llm::ollama::OllamaProvider;
use clauselens_llm::openai::OpenAiProvider;
use clauselens_memory::document::{Document, ingest_path};
use clauselens_memory::{AnalysisId, SqliteStore};

use crate::cli::{Cli, Command, OptionArgs, OutputArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref());
    let mut config = Config::load(&config_path)?;
    config.validate()?;

    match cli.command {
        Command::Analyze(args) => {
            let document = match (&args.file, &args.text) {
                (_, Some(text)) => Document::from_pasted(text),
                (Some(path), None) => ingest_path(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, None) => bail!("a contract file or --text is required"),
            };
            let provider = connect(&mut config).await?;
            analyze(&config, provider, document, args.options, &args.output).await
        }
        Command::Demo(args) => {
            let provider = connect(&mut config).await?;
            analyze(
                &config,
                provider,
                demo::demo_document(),
                args.options,
                &args.output,
            )
            .await
        }
        Command::Rewrite(args) => {
            let provider = connect(&mut config).await?;
            let persona = args.persona.unwrap_or(config.analysis.persona);
            let assistant = ClauseAssistant::new(ModelGateway::new(provider));
            let outcome = assistant.rewrite(&args.clause, persona).await?;
            print!("{}", render::rewrite(&outcome));
            Ok(())
        }
        Command::History { limit } => {
            let store = SqliteStore::new(&config.memory.sqlite_path).await?;
            let rows = store
                .list_recent(limit.unwrap_or(config.memory.history_limit))
                .await?;
            print!("{}", render::history(&rows));
            Ok(())
        }
        Command::Show { id } => {
            let store = SqliteStore::new(&config.memory.sqlite_path).await?;
            let Some(saved) = history::load_analysis(&store, AnalysisId(id)).await? else {
                bail!("no saved analysis with id {id}");
            };
            print!("{}", render::saved(&saved));
            Ok(())
        }
        Command::ClearHistory => {
            let store = SqliteStore::new(&config.memory.sqlite_path).await?;
            let removed = store.clear_all().await?;
            tracing::info!(removed, "history cleared");
            println!("Deleted {removed} saved analyses.");
            Ok(())
        }
    }
}

async fn connect(config: &mut Config) -> anyhow::Result<AnyProvider> {
    config.resolve_secrets(&EnvVaultProvider).await?;
    let provider = create_provider(config)?;
    tracing::info!(provider = %config.llm.provider, "model provider ready");
    Ok(provider)
}

fn merge_options(config: &Config, args: OptionArgs) -> AnalysisOptions {
    let defaults = config.analysis.options();
    AnalysisOptions {
        persona: args.persona.unwrap_or(defaults.persona),
        language: args.language.unwrap_or(defaults.language),
        casual_tone: args.casual || defaults.casual_tone,
    }
}

async fn analyze(
    config: &Config,
    provider: AnyProvider,
    document: Document,
    options: OptionArgs,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    if output.show_text {
        print!(
            "{}",
            render::document_text(
                &document,
                config.analysis.chunk_max_chars,
                output.highlight.as_deref()
            )
        );
        println!();
    }

    let mut session = Session::new(merge_options(config, options));
    session.load_document(document);
    let orchestrator = AnalysisOrchestrator::new(ModelGateway::new(provider));

    match session.analyze(&orchestrator).await {
        Ok(_) => {}
        Err(CoreError::Analysis(e)) => bail!("analysis failed, no results were kept: {e}"),
        Err(e) => return Err(e.into()),
    }

    let (Some(document), Some(result)) = (session.document(), session.result()) else {
        bail!("analysis produced no result");
    };

    if output.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", render::analysis(result, Some(document.text())));
    }

    if output.save || config.analysis.save_by_default {
        match save(config, document, session.options(), result).await {
            Ok(id) => eprintln!("Saved as #{id}."),
            Err(e) => {
                tracing::warn!("failed to save analysis: {e:#}");
                eprintln!("Warning: analysis was not saved: {e}");
            }
        }
    }

    if let Some(target) = &output.report {
        let path = if target.is_dir() {
            target.join(report_file_name(document.file_name()))
        } else {
            target.clone()
        };
        match render_report(document.file_name(), result, Some(document.text())) {
            Some(html) => match tokio::fs::write(&path, html).await {
                Ok(()) => eprintln!("Report written to {}", path.display()),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "failed to write report: {e}");
                    eprintln!("Warning: report was not written: {e}");
                }
            },
            None => eprintln!("Nothing to export: the analysis has no sections or summary."),
        }
    }

    Ok(())
}

async fn save(
    config: &Config,
    document: &Document,
    options: &AnalysisOptions,
    result: &clauselens_core::AnalysisResult,
) -> anyhow::Result<AnalysisId> {
    let store = SqliteStore::new(&config.memory.sqlite_path).await?;
    Ok(history::save_analysis(&store, document, options, result).await?)
}

fn create_provider(config: &Config) -> anyhow::Result<AnyProvider> {
    match config.llm.provider {
        ProviderKind::Ollama => Ok(AnyProvider::Ollama(OllamaProvider::new(
            &config.llm.base_url,
            config.llm.model.clone(),
        ))),
        ProviderKind::Claude => {
            let cloud = config
                .llm
                .cloud
                .as_ref()
                .context("llm.cloud config section required for Claude provider")?;
            let api_key = config
                .secrets
                .claude_api_key
                .as_ref()
                .context("CLAUSELENS_CLAUDE_API_KEY not set")?
                .expose()
                .to_owned();
            Ok(AnyProvider::Claude(ClaudeProvider::new(
                api_key,
                cloud.model.clone(),
                cloud.max_tokens,
            )))
        }
        ProviderKind::OpenAi => {
            let openai = config
                .llm
                .openai
                .as_ref()
                .context("llm.openai config section required for OpenAI provider")?;
            let api_key = config
                .secrets
                .openai_api_key
                .as_ref()
                .context("CLAUSELENS_OPENAI_API_KEY not set")?
                .expose()
                .to_owned();
            Ok(AnyProvider::OpenAi(OpenAiProvider::new(
                api_key,
                openai.base_url.clone(),
                openai.model.clone(),
                openai.max_tokens,
            )))
        }
    }
}

fn resolve_config_path(cli_path: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_path {
        return path.to_owned();
    }
    if let Ok(path) = std::env::var("CLAUSELENS_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
