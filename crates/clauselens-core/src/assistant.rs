//! Safer rewrite of a single clause, plus a negotiation script for proposing it.

use clauselens_llm::provider::LlmProvider;
use serde::Serialize;
use serde_json::Value;

use crate::coerce::Coerced;
use crate::diff::{DiffSegment, inline_diff};
use crate::error::CoreError;
use crate::gateway::ModelGateway;
use crate::options::Persona;
use crate::prompt;
use crate::sections::lenient_string;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClauseRewrite {
    pub improved_clause: String,
    pub one_line_rationale: String,
}

impl ClauseRewrite {
    /// Read the two fields leniently; anything missing is empty.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).map(lenient_string).unwrap_or_default();
        Self {
            improved_clause: field("improved_clause"),
            one_line_rationale: field("one_line_rationale"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub original: String,
    pub rewrite: ClauseRewrite,
    pub diff: Vec<DiffSegment>,
    pub negotiation_script: String,
}

pub struct ClauseAssistant<P> {
    gateway: ModelGateway<P>,
}

impl<P: LlmProvider> ClauseAssistant<P> {
    #[must_use]
    pub fn new(gateway: ModelGateway<P>) -> Self {
        Self { gateway }
    }

    /// Rewrite `clause` for `persona`, diff it against the original and draft a
    /// negotiation script for the safer version.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyClause`] for blank input and [`CoreError::Llm`] if either
    /// model call fails.
    pub async fn rewrite(&self, clause: &str, persona: Persona) -> Result<RewriteOutcome, CoreError> {
        let clause = clause.trim();
        if clause.is_empty() {
            return Err(CoreError::EmptyClause);
        }

        let text = self
            .gateway
            .execute(&prompt::rewrite_clause(clause, persona.as_str()))
            .await?;
        let coerced = Coerced::from_text(&text);
        if coerced.is_raw() {
            tracing::debug!("rewrite response had no JSON");
        }
        let rewrite = ClauseRewrite::from_value(&coerced.into_value());
        let diff = inline_diff(clause, &rewrite.improved_clause);

        let negotiation_script = self
            .gateway
            .execute(&prompt::negotiation_script(
                persona.as_str(),
                &rewrite.improved_clause,
            ))
            .await?;

        tracing::info!(
            persona = %persona,
            improved_chars = rewrite.improved_clause.len(),
            "clause rewritten"
        );
        Ok(RewriteOutcome {
            original: clause.to_owned(),
            rewrite,
            diff,
            negotiation_script,
        })
    }
}
