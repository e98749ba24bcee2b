use clauselens_core::history::{load_analysis, save_analysis};
use clauselens_core::report::render_report;
use clauselens_core::{
    AnalysisOptions, AnalysisOrchestrator, AnalysisResult, ClauseAssistant, CoreError, Language,
    ModelGateway, Persona, Session, Severity, demo,
};
use clauselens_llm::mock::MockProvider;
use clauselens_llm::provider::Role;
use clauselens_memory::SqliteStore;
use clauselens_memory::document::{SourceKind, ingest};

// -- Scripted model --

const SECTIONS: &str = r#"Here is the JSON you asked for:
{"parties": "Landlord and Tenant",
 "payment": "Rent due on the 1st; penalty of ₹1,000 per day when late",
 "termination": "Landlord may terminate with 3 days' notice",
 "dispute_resolution": "Arbitration in a city chosen by the landlord",
 "other_key_clauses": ["Deposit non-refundable", ""]}"#;

const FLAGS: &str = r#"{"flags": [
 {"flag": "Daily late penalty", "severity": "High", "where": "Payment",
  "quote": "a penalty of ₹1,000 per day applies", "why": "Uncapped", "suggested_fix": "Cap at 5% of rent"},
 {"flag": "Unilateral termination", "severity": "high", "where": "termination clause",
  "quote": "terminate the agreement at any time", "why": "3 days notice", "suggested_fix": "30 days"},
 {"flag": "One-sided arbitration", "severity": "medium", "where": "Dispute resolution",
  "quote": "in a city of the landlord's choosing", "why": "Costly travel"},
 {"flag": "Repairs", "severity": "urgent", "where": "maintenance"}
]}"#;

fn scripted() -> MockProvider {
    MockProvider::default()
        .when_system_contains("neutral contract analyst", SECTIONS)
        .when_system_contains("risk patterns", FLAGS)
        .when_system_contains(
            "Explain the contract simply",
            "- Rent is due on the 1st\n- Late fees add up fast",
        )
        .when_system_contains("Graphviz DOT", "digraph { Landlord -> Tenant [label=\"rent\"] }")
        .when_system_contains(
            "Rewrite the following clause",
            r#"{"improved_clause": "Landlord may terminate with 30 days' written notice for cause.", "one_line_rationale": "Gives the tenant time to move."}"#,
        )
        .when_system_contains("negotiation script", "Hi, could we change the notice period to 30 days?")
}

async fn analyzed_demo(mock: MockProvider) -> (Session, Result<(), CoreError>) {
    let mut session = Session::new(AnalysisOptions {
        persona: Persona::StudentTenant,
        language: Language::Hinglish,
        casual_tone: true,
    });
    session.load_document(demo::demo_document());
    let orchestrator = AnalysisOrchestrator::new(ModelGateway::new(mock));
    let outcome = session.analyze(&orchestrator).await.map(|_| ());
    (session, outcome)
}

// -- Analysis --

#[tokio::test]
async fn demo_contract_end_to_end() {
    let mock = scripted();
    let (session, outcome) = analyzed_demo(mock.clone()).await;
    outcome.unwrap();

    let result = session.result().unwrap();
    assert_eq!(result.sections.parties, "Landlord and Tenant");
    assert_eq!(result.sections.other_key_clauses, vec!["Deposit non-refundable"]);
    assert_eq!(result.flags.len(), 4);
    assert_eq!(result.flags[3].severity, Severity::Low);

    let counts = result.severity_counts();
    assert_eq!((counts.high, counts.medium, counts.low), (2, 1, 1));

    let axes = result.risk_axes();
    assert_eq!(axes.payment, 3);
    assert_eq!(axes.termination, 3);
    assert_eq!(axes.dispute, 2);
    assert_eq!(axes.other, 1);

    let text = session.document().unwrap().text();
    assert!(result.flags[0].quote_in(text));
    assert!(result.flags[1].quote_in(text));
    assert!(!result.flags[2].quote_in(text));

    assert!(result.summary.contains("Late fees"));
    assert!(result.graph.starts_with("digraph"));
    assert_eq!(mock.call_count(), 4);
}

#[tokio::test]
async fn options_reach_summary_prompt() {
    let mock = scripted();
    let (_session, outcome) = analyzed_demo(mock.clone()).await;
    outcome.unwrap();

    let summary_call = mock
        .calls()
        .into_iter()
        .find(|msgs| msgs[0].content.contains("Explain the contract simply"))
        .unwrap();
    let system = &summary_call[0];
    assert_eq!(system.role, Role::System);
    assert!(system.content.contains("Explain the contract simply in Hinglish."));
    assert!(system.content.contains("Audience persona: Student Tenant (casual)."));
    assert!(summary_call[1].content.contains("Landlord and Tenant"));
}

#[tokio::test]
async fn failed_stage_leaves_nothing_partial() {
    let mock = scripted().fail_when_system_contains("Explain the contract simply");
    let (session, outcome) = analyzed_demo(mock).await;

    let err = outcome.unwrap_err();
    assert!(matches!(err, CoreError::Analysis(ref e) if e.stage.as_str() == "summary"));
    let result = session.result().unwrap();
    assert_eq!(result, &AnalysisResult::empty());
    assert!(result.flags.is_empty());
    assert!(session.last_error().is_some());
    assert!(render_report("judge_demo_spicy.txt", result, None).is_none());
}

#[tokio::test]
async fn image_upload_is_rejected_without_model_calls() {
    let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0];
    let document = ingest("scan.png", &png).unwrap();
    assert_eq!(document.source(), SourceKind::ImageUnsupported);

    let mock = scripted();
    let mut session = Session::default();
    session.load_document(document);
    let orchestrator = AnalysisOrchestrator::new(ModelGateway::new(mock.clone()));
    let err = session.analyze(&orchestrator).await.unwrap_err();
    assert!(matches!(err, CoreError::UnsupportedDocument(_)));
    assert_eq!(mock.call_count(), 0);
}

// -- Report --

#[tokio::test]
async fn report_contains_flags_and_escapes_content() {
    let (session, outcome) = analyzed_demo(scripted()).await;
    outcome.unwrap();
    let document = session.document().unwrap();

    let html = render_report(
        document.file_name(),
        session.result().unwrap(),
        Some(document.text()),
    )
    .unwrap();
    assert!(html.contains("judge_demo_spicy.txt"));
    assert!(html.contains("<div class='chip high'>"));
    assert!(html.contains("Daily late penalty"));
    assert!(html.contains("(quote not found in document)"));
    assert!(html.contains("landlord&#39;s choosing"));
    assert!(!html.contains("<script"));
}

// -- History --

#[tokio::test]
async fn save_list_load_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("data/history.db");
    let store = SqliteStore::new(db.to_str().unwrap()).await.unwrap();

    let (session, outcome) = analyzed_demo(scripted()).await;
    outcome.unwrap();
    let id = save_analysis(
        &store,
        session.document().unwrap(),
        session.options(),
        session.result().unwrap(),
    )
    .await
    .unwrap();

    let rows = store.list_recent(10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].file_name, "judge_demo_spicy.txt");
    assert_eq!(rows[0].persona, "Student Tenant");
    assert_eq!(rows[0].lang, "Hinglish");

    let saved = load_analysis(&store, id).await.unwrap().unwrap();
    assert_eq!(saved.record.doc_sig, "judge-demo");
    assert_eq!(saved.sections, session.result().unwrap().sections);
    assert_eq!(saved.flags, session.result().unwrap().flags);

    assert_eq!(store.clear_all().await.unwrap(), 1);
    assert!(store.list_recent(10).await.unwrap().is_empty());
}

// -- Rewrite --

#[tokio::test]
async fn rewrite_clause_with_diff_and_script() {
    let assistant = ClauseAssistant::new(ModelGateway::new(scripted()));
    let outcome = assistant
        .rewrite(
            "  Landlord may terminate the agreement at any time for any reason with 3 days' notice.  ",
            Persona::StudentTenant,
        )
        .await
        .unwrap();

    assert!(outcome.original.starts_with("Landlord"));
    assert!(outcome.rewrite.improved_clause.contains("30 days"));
    assert_eq!(
        outcome.rewrite.one_line_rationale,
        "Gives the tenant time to move."
    );
    assert!(!outcome.diff.is_empty());
    assert!(outcome.negotiation_script.contains("30 days"));
}

#[tokio::test]
async fn blank_clause_is_rejected() {
    let mock = scripted();
    let assistant = ClauseAssistant::new(ModelGateway::new(mock.clone()));
    let err = assistant.rewrite(" \n ", Persona::Freelancer).await.unwrap_err();
    assert!(matches!(err, CoreError::EmptyClause));
    assert_eq!(mock.call_count(), 0);
}
