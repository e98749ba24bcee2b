//! Contract analysis: prompts, response coercion, orchestration, rewrite flow,
//! report export and configuration.

pub mod analysis;
pub mod assistant;
pub mod coerce;
pub mod config;
pub mod demo;
pub mod diff;
pub mod error;
pub mod flags;
pub mod gateway;
pub mod history;
pub mod options;
pub mod prompt;
pub mod report;
pub mod risk_axes;
pub mod sections;
pub mod session;
pub mod text;
pub mod vault;

pub use analysis::{AnalysisError, AnalysisOrchestrator, AnalysisOutcome, AnalysisResult, Stage};
pub use assistant::{ClauseAssistant, ClauseRewrite, RewriteOutcome};
pub use coerce::{Coerced, coerce};
pub use config::Config;
pub use error::CoreError;
pub use flags::{RiskFlag, Severity, SeverityCounts, normalize_flags};
pub use gateway::ModelGateway;
pub use options::{AnalysisOptions, Language, Persona};
pub use risk_axes::{RiskAxis, RiskAxisScores};
pub use sections::SectionSet;
pub use session::Session;
