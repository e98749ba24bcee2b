//! The four-call contract analysis: sections first, then flags, summary and graph
//! concurrently over the same sections.

mod orchestrator;
pub mod stages;
pub mod step;

pub use orchestrator::AnalysisOrchestrator;
pub use step::{ParallelStep, Step, parallel};

use std::fmt;

use clauselens_llm::LlmError;
use serde::Serialize;
use serde_json::Value;

use crate::flags::{RiskFlag, SeverityCounts};
use crate::risk_axes::RiskAxisScores;
use crate::sections::SectionSet;

/// Model call within an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ExtractSections,
    RiskFlags,
    Summary,
    Graph,
}

impl Stage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExtractSections => "extract_sections",
            Self::RiskFlags => "risk_flags",
            Self::Summary => "summary",
            Self::Graph => "graph",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{stage} failed: {source}")]
pub struct AnalysisError {
    pub stage: Stage,
    #[source]
    pub source: LlmError,
}

impl AnalysisError {
    #[must_use]
    pub fn new(stage: Stage, source: LlmError) -> Self {
        Self { stage, source }
    }
}

/// Output of one complete analysis run. Replaced wholesale by the next run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub sections: SectionSet,
    /// The coerced sections value as returned by the model, `{}` when empty.
    pub sections_raw: Value,
    pub flags: Vec<RiskFlag>,
    pub summary: String,
    /// Graphviz DOT source.
    pub graph: String,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::empty()
    }
}

impl AnalysisResult {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            sections: SectionSet::default(),
            sections_raw: Value::Object(serde_json::Map::new()),
            flags: Vec::new(),
            summary: String::new(),
            graph: String::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
            && self.flags.is_empty()
            && self.summary.is_empty()
            && self.graph.is_empty()
    }

    #[must_use]
    pub fn risk_axes(&self) -> RiskAxisScores {
        RiskAxisScores::aggregate(&self.flags)
    }

    #[must_use]
    pub fn severity_counts(&self) -> SeverityCounts {
        SeverityCounts::from_flags(&self.flags)
    }
}

/// Result of [`AnalysisOrchestrator::run`]: on failure, `result` is empty and `error` set.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub error: Option<AnalysisError>,
}

impl AnalysisOutcome {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
