use std::sync::Arc;
use std::time::Instant;

use clauselens_llm::provider::LlmProvider;

use super::stages::{
    ExtractSectionsStep, GraphStep, RiskFlagsStep, SectionContext, SummaryStep,
};
use super::step::{ParallelStep, Step, parallel};
use super::{AnalysisError, AnalysisOutcome, AnalysisResult};
use crate::gateway::ModelGateway;
use crate::options::AnalysisOptions;

type Downstream<P> = ParallelStep<RiskFlagsStep<P>, ParallelStep<SummaryStep<P>, GraphStep<P>>>;

/// Runs section extraction, then risk flags, summary and graph concurrently.
///
/// The result is assembled only once every call has succeeded; any failure yields
/// [`AnalysisResult::empty`] together with the error.
pub struct AnalysisOrchestrator<P> {
    extract: ExtractSectionsStep<P>,
    downstream: Downstream<P>,
}

impl<P: LlmProvider> AnalysisOrchestrator<P> {
    #[must_use]
    pub fn new(gateway: ModelGateway<P>) -> Self {
        Self {
            extract: ExtractSectionsStep::new(gateway.clone()),
            downstream: parallel(
                RiskFlagsStep::new(gateway.clone()),
                parallel(SummaryStep::new(gateway.clone()), GraphStep::new(gateway)),
            ),
        }
    }

    /// Analyze `document_text`. Never fails; see [`AnalysisOutcome`].
    pub async fn run(&self, document_text: &str, options: &AnalysisOptions) -> AnalysisOutcome {
        let started = Instant::now();
        tracing::info!(
            persona = %options.persona,
            language = %options.language,
            casual = options.casual_tone,
            chars = document_text.chars().count(),
            "analysis started"
        );

        match self.try_run(document_text, options).await {
            Ok(result) => {
                for flag in result.flags.iter().filter(|f| !f.quote_in(document_text)) {
                    tracing::debug!(flag = %flag.flag, quote = %flag.quote, "quote not found in document");
                }
                tracing::info!(
                    flags = result.flags.len(),
                    elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "analysis finished"
                );
                AnalysisOutcome {
                    result,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!(stage = %e.stage, "analysis failed: {e}");
                AnalysisOutcome {
                    result: AnalysisResult::empty(),
                    error: Some(e),
                }
            }
        }
    }

    async fn try_run(
        &self,
        document_text: &str,
        options: &AnalysisOptions,
    ) -> Result<AnalysisResult, AnalysisError> {
        let (sections, sections_raw) = self.extract.run(document_text.to_owned()).await?;

        let context = Arc::new(SectionContext {
            sections,
            options: *options,
        });
        let (flags, (summary, graph)) = self.downstream.run(Arc::clone(&context)).await?;

        let sections = Arc::try_unwrap(context)
            .map_or_else(|shared| shared.sections.clone(), |owned| owned.sections);

        Ok(AnalysisResult {
            sections,
            sections_raw,
            flags,
            summary,
            graph,
        })
    }
}

#[cfg(test)]
mod tests {
    use clauselens_llm::mock::MockProvider;
    use serde_json::json;

    use super::*;
    use crate::analysis::Stage;
    use crate::flags::Severity;
    use crate::options::{Language, Persona};

    const SECTIONS: &str = r#"```json
{"parties": "Landlord and Student", "payment": "Rent due on 1st; late fee Rs 1000/day",
 "termination": "Landlord may terminate with 3 days notice", "other_key_clauses": []}
```"#;
    const FLAGS: &str = r#"[{"flag": "Daily late fee", "severity": "High", "where": "payment",
 "quote": "late fee Rs 1000/day", "why": "uncapped", "suggested_fix": "cap at 5%"},
 {"flag": "Short notice", "severity": "critical", "where": "Termination"}]"#;

    fn scripted() -> MockProvider {
        MockProvider::default()
            .when_system_contains("neutral contract analyst", SECTIONS)
            .when_system_contains("risk patterns", FLAGS)
            .when_system_contains("Explain the contract simply", "- Pay rent on time")
            .when_system_contains("Graphviz DOT", "digraph { Landlord -> Student }")
    }

    #[tokio::test]
    async fn full_run_assembles_all_outputs() {
        let gateway = ModelGateway::new(scripted());
        let orchestrator = AnalysisOrchestrator::new(gateway.clone());
        let outcome = orchestrator
            .run("Rent due on 1st; late fee Rs 1000/day.", &AnalysisOptions::default())
            .await;

        assert!(outcome.is_ok());
        let result = outcome.result;
        assert_eq!(result.sections.parties, "Landlord and Student");
        assert_eq!(result.sections_raw["payment"], json!("Rent due on 1st; late fee Rs 1000/day"));
        assert_eq!(result.flags.len(), 2);
        assert_eq!(result.flags[0].severity, Severity::High);
        assert_eq!(result.flags[1].severity, Severity::Low);
        assert_eq!(result.summary, "- Pay rent on time");
        assert_eq!(result.graph, "digraph { Landlord -> Student }");
        assert_eq!(result.risk_axes().payment, 3);
        assert_eq!(result.risk_axes().termination, 1);
        assert_eq!(gateway.provider().call_count(), 4);
    }

    #[tokio::test]
    async fn extraction_runs_before_dependent_steps() {
        let gateway = ModelGateway::new(scripted());
        AnalysisOrchestrator::new(gateway.clone())
            .run("text", &AnalysisOptions::default())
            .await;

        let calls = gateway.provider().calls();
        assert!(calls[0][0].content.contains("neutral contract analyst"));
        for call in &calls[1..] {
            assert!(call[1].content.contains("Landlord and Student"));
        }
    }

    #[tokio::test]
    async fn empty_sections_still_reach_risk_flags() {
        let mock = MockProvider::default()
            .when_system_contains("neutral contract analyst", "nothing useful")
            .when_system_contains("risk patterns", "[]")
            .when_system_contains("Explain the contract simply", "")
            .when_system_contains("Graphviz DOT", "");
        let gateway = ModelGateway::new(mock);
        let outcome = AnalysisOrchestrator::new(gateway.clone())
            .run("text", &AnalysisOptions::default())
            .await;

        assert!(outcome.is_ok());
        assert!(outcome.result.sections.is_empty());
        assert_eq!(outcome.result.sections_raw, json!({"_raw": "nothing useful"}));

        let calls = gateway.provider().calls();
        let risk_call = calls
            .iter()
            .find(|c| c[0].content.contains("risk patterns"))
            .unwrap();
        assert!(risk_call[1].content.contains("\"parties\":\"\""));
        assert!(risk_call[1].content.contains("\"other_key_clauses\":[]"));
    }

    async fn run_with_failure(needle: &str) -> AnalysisOutcome {
        let mock = scripted().fail_when_system_contains(needle);
        AnalysisOrchestrator::new(ModelGateway::new(mock))
            .run("text", &AnalysisOptions::default())
            .await
    }

    #[tokio::test]
    async fn any_step_failure_empties_everything() {
        for (needle, stage) in [
            ("neutral contract analyst", Stage::ExtractSections),
            ("risk patterns", Stage::RiskFlags),
            ("Explain the contract simply", Stage::Summary),
            ("Graphviz DOT", Stage::Graph),
        ] {
            let outcome = run_with_failure(needle).await;
            let err = outcome.error.expect("error expected");
            assert_eq!(err.stage, stage);
            assert_eq!(outcome.result, AnalysisResult::empty());
            assert_eq!(outcome.result.sections_raw, json!({}));
        }
    }

    #[tokio::test]
    async fn extraction_failure_skips_downstream_calls() {
        let mock = scripted().fail_when_system_contains("neutral contract analyst");
        let gateway = ModelGateway::new(mock);
        AnalysisOrchestrator::new(gateway.clone())
            .run("text", &AnalysisOptions::default())
            .await;
        assert_eq!(gateway.provider().call_count(), 1);
    }

    #[tokio::test]
    async fn options_flow_into_prompts() {
        let gateway = ModelGateway::new(scripted());
        let options = AnalysisOptions {
            persona: Persona::SmallBusinessOwner,
            language: Language::Tamil,
            casual_tone: true,
        };
        AnalysisOrchestrator::new(gateway.clone())
            .run("text", &options)
            .await;

        let calls = gateway.provider().calls();
        let summary = calls
            .iter()
            .find(|c| c[0].content.contains("Explain the contract simply"))
            .unwrap();
        assert!(summary[0].content.contains("in Tamil (தமிழ்)."));
        assert!(summary[0].content.contains("Small Business Owner (casual)"));

        let risk = calls
            .iter()
            .find(|c| c[0].content.contains("risk patterns"))
            .unwrap();
        assert!(risk[1].content.starts_with("Persona: Small Business Owner\n"));
    }
}
