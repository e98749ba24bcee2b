//! Prompt templates for each model task.

use crate::sections::SectionSet;

const EXTRACTION_SYSTEM: &str = "You are a neutral contract analyst for laypersons in India.
Extract structured sections from the provided contract text.
Return strict JSON with fields:
{ \"parties\": \"\", \"term\": \"\", \"payment\": \"\", \"termination\": \"\", \"liability\": \"\",
  \"ip\": \"\", \"confidentiality\": \"\", \"dispute_resolution\": \"\", \"governing_law\": \"\",
  \"other_key_clauses\": [] }
If info is missing, use an empty string. Do not invent details.";

const RISK_SYSTEM: &str = "Identify potential risk patterns commonly problematic for Indian students, freelancers,
and small businesses. Use caution; only flag when the text supports it.
Return a strict JSON array of objects:
{ \"flag\": \"\", \"severity\": \"low|medium|high\", \"where\": \"section-name\",
  \"quote\": \"\", \"why\": \"\", \"suggested_fix\": \"\" }.
Never fabricate quotes. Omit a flag if uncertain.";

const SUMMARY_SYSTEM: &str = "Explain the contract simply in {lang}.
Audience persona: {persona}. Constraints: 6 bullets max; reading level age 12;
include one example. End with 'Things to ask before signing' (3 bullets).";

const REWRITE_SYSTEM: &str = "Rewrite the following clause to be fair and balanced under Indian contract practice,
keeping original intent but reducing risk for {persona}. Return JSON:
{ \"improved_clause\": \"\", \"one_line_rationale\": \"\" }";

const NEGOTIATE_SYSTEM: &str = "Draft a polite, clear, and assertive negotiation script for the user to ask the other party
to accept the safer rewrite. Persona: {persona}. Keep it under 5 lines.";

const GRAPH_SYSTEM: &str = "Generate a simple Graphviz DOT graph (digraph) representing parties and key obligations/risks.
Nodes: parties and major sections. Edges: obligations or dependencies. Keep it compact.
Return only DOT code, no explanations.";

/// A system instruction plus the user payload for a single model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

#[must_use]
pub fn extract_sections(document_text: &str) -> Prompt {
    Prompt {
        system: EXTRACTION_SYSTEM.to_owned(),
        user: format!("Contract Text:\n\n{document_text}\n\nReturn JSON."),
    }
}

#[must_use]
pub fn risk_flags(sections: &SectionSet, persona: &str) -> Prompt {
    Prompt {
        system: RISK_SYSTEM.to_owned(),
        user: format!(
            "Persona: {persona}\nSections JSON:\n{}",
            sections.to_prompt_json()
        ),
    }
}

#[must_use]
pub fn summarize(sections: &SectionSet, persona: &str, language: &str) -> Prompt {
    Prompt {
        system: SUMMARY_SYSTEM
            .replace("{lang}", language)
            .replace("{persona}", persona),
        user: format!("Sections JSON:\n{}", sections.to_prompt_json()),
    }
}

#[must_use]
pub fn rewrite_clause(clause: &str, persona: &str) -> Prompt {
    Prompt {
        system: REWRITE_SYSTEM.replace("{persona}", persona),
        user: format!("Original Clause:\n{clause}\n\nReturn JSON."),
    }
}

#[must_use]
pub fn negotiation_script(persona: &str, improved_clause: &str) -> Prompt {
    Prompt {
        system: NEGOTIATE_SYSTEM.replace("{persona}", persona),
        user: format!("Persona: {persona}\nSafer Clause:\n{improved_clause}"),
    }
}

#[must_use]
pub fn graph(sections: &SectionSet) -> Prompt {
    Prompt {
        system: GRAPH_SYSTEM.to_owned(),
        user: format!(
            "Sections JSON:\n{}\nReturn DOT only.",
            sections.to_prompt_json()
        ),
    }
}
