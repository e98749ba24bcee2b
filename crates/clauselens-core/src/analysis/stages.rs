use std::sync::Arc;
use std::time::Instant;

use clauselens_llm::provider::LlmProvider;
use serde_json::Value;

use super::step::Step;
use super::{AnalysisError, Stage};
use crate::coerce::Coerced;
use crate::flags::{RiskFlag, normalize_flags};
use crate::gateway::ModelGateway;
use crate::options::AnalysisOptions;
use crate::prompt::{self, Prompt};
use crate::sections::SectionSet;

/// Shared input of the steps that run after section extraction.
#[derive(Debug, Clone)]
pub struct SectionContext {
    pub sections: SectionSet,
    pub options: AnalysisOptions,
}

async fn call_model<P: LlmProvider>(
    gateway: &ModelGateway<P>,
    stage: Stage,
    prompt: Prompt,
) -> Result<String, AnalysisError> {
    let started = Instant::now();
    tracing::debug!(
        %stage,
        system_chars = prompt.system.len(),
        user_chars = prompt.user.len(),
        "calling model"
    );
    let text = gateway
        .execute(&prompt)
        .await
        .map_err(|e| AnalysisError::new(stage, e))?;
    tracing::debug!(
        %stage,
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        response_chars = text.len(),
        "stage complete"
    );
    Ok(text)
}

pub struct ExtractSectionsStep<P> {
    gateway: ModelGateway<P>,
}

impl<P> ExtractSectionsStep<P> {
    #[must_use]
    pub fn new(gateway: ModelGateway<P>) -> Self {
        Self { gateway }
    }
}

impl<P: LlmProvider> Step for ExtractSectionsStep<P> {
    /// Document text.
    type Input = String;
    /// Typed sections plus the coerced value they were read from.
    type Output = (SectionSet, Value);

    async fn run(&self, input: Self::Input) -> Result<Self::Output, AnalysisError> {
        let text = call_model(
            &self.gateway,
            Stage::ExtractSections,
            prompt::extract_sections(&input),
        )
        .await?;
        let coerced = Coerced::from_text(&text);
        if coerced.is_raw() {
            tracing::debug!("section extraction returned no JSON");
        }
        let raw = coerced.into_value();
        Ok((SectionSet::from_value(&raw), raw))
    }
}

pub struct RiskFlagsStep<P> {
    gateway: ModelGateway<P>,
}

impl<P> RiskFlagsStep<P> {
    #[must_use]
    pub fn new(gateway: ModelGateway<P>) -> Self {
        Self { gateway }
    }
}

impl<P: LlmProvider> Step for RiskFlagsStep<P> {
    type Input = Arc<SectionContext>;
    type Output = Vec<RiskFlag>;

    async fn run(&self, input: Self::Input) -> Result<Self::Output, AnalysisError> {
        let prompt = prompt::risk_flags(&input.sections, input.options.persona.as_str());
        let text = call_model(&self.gateway, Stage::RiskFlags, prompt).await?;
        Ok(normalize_flags(Coerced::from_text(&text).into_value()))
    }
}

pub struct SummaryStep<P> {
    gateway: ModelGateway<P>,
}

impl<P> SummaryStep<P> {
    #[must_use]
    pub fn new(gateway: ModelGateway<P>) -> Self {
        Self { gateway }
    }
}

impl<P: LlmProvider> Step for SummaryStep<P> {
    type Input = Arc<SectionContext>;
    type Output = String;

    async fn run(&self, input: Self::Input) -> Result<Self::Output, AnalysisError> {
        let prompt = prompt::summarize(
            &input.sections,
            &input.options.summary_persona(),
            input.options.language.label(),
        );
        call_model(&self.gateway, Stage::Summary, prompt).await
    }
}

pub struct GraphStep<P> {
    gateway: ModelGateway<P>,
}

impl<P> GraphStep<P> {
    #[must_use]
    pub fn new(gateway: ModelGateway<P>) -> Self {
        Self { gateway }
    }
}

impl<P: LlmProvider> Step for GraphStep<P> {
    type Input = Arc<SectionContext>;
    type Output = String;

    async fn run(&self, input: Self::Input) -> Result<Self::Output, AnalysisError> {
        call_model(&self.gateway, Stage::Graph, prompt::graph(&input.sections)).await
    }
}
