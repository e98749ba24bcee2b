use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clauselens_core::{Language, Persona};

#[derive(Debug, Parser)]
#[command(name = "clauselens")]
#[command(about = "Read a contract, flag risky clauses and suggest safer wording", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Config file (overrides CLAUSELENS_CONFIG)
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Analyze a PDF, DOCX or TXT contract, or pasted text
    Analyze(AnalyzeArgs),

    /// Rewrite a single clause and draft a negotiation script
    Rewrite(RewriteArgs),

    /// Analyze the built-in sample tenancy agreement
    Demo(DemoArgs),

    /// List recently saved analyses
    History {
        /// Number of rows (defaults to memory.history_limit)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show one saved analysis
    Show {
        /// Analysis ID from `history`
        id: i64,
    },

    /// Delete every saved analysis
    #[command(name = "clear-history")]
    ClearHistory,
}

#[derive(Debug, Clone, Copy, Args)]
pub(crate) struct OptionArgs {
    /// Reader persona: student-tenant, freelancer, small-business-owner
    #[arg(long)]
    pub(crate) persona: Option<Persona>,

    /// Summary language: english, hinglish, tamil, hindi
    #[arg(long = "lang")]
    pub(crate) language: Option<Language>,

    /// Ask for a casual tone in the summary
    #[arg(long)]
    pub(crate) casual: bool,
}

#[derive(Debug, Args)]
pub(crate) struct OutputArgs {
    /// Save the analysis to local history
    #[arg(long)]
    pub(crate) save: bool,

    /// Write an HTML report to this path (a directory gets the default file name)
    #[arg(long)]
    pub(crate) report: Option<PathBuf>,

    /// Print the analysis as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,

    /// Highlight a term when printing the document text
    #[arg(long)]
    pub(crate) highlight: Option<String>,

    /// Print the extracted document text in parts before the analysis
    #[arg(long)]
    pub(crate) show_text: bool,
}

#[derive(Debug, Args)]
pub(crate) struct AnalyzeArgs {
    /// Contract file to analyze
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub(crate) file: Option<PathBuf>,

    /// Analyze this text instead of a file
    #[arg(long)]
    pub(crate) text: Option<String>,

    #[command(flatten)]
    pub(crate) options: OptionArgs,

    #[command(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Debug, Args)]
pub(crate) struct RewriteArgs {
    /// Clause text to rewrite
    pub(crate) clause: String,

    /// Reader persona: student-tenant, freelancer, small-business-owner
    #[arg(long)]
    pub(crate) persona: Option<Persona>,
}

#[derive(Debug, Args)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    pub(crate) options: OptionArgs,

    #[command(flatten)]
    pub(crate) output: OutputArgs,
}
