use clauselens_llm::provider::LlmProvider;
use clauselens_memory::document::Document;

use crate::analysis::{AnalysisOrchestrator, AnalysisResult};
use crate::error::CoreError;
use crate::options::AnalysisOptions;

/// The working state of one user: the loaded document, the chosen options and the
/// latest analysis. Owned by the caller and passed by `&mut`.
#[derive(Debug, Default)]
pub struct Session {
    options: AnalysisOptions,
    document: Option<Document>,
    result: Option<AnalysisResult>,
    last_error: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(options: AnalysisOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Replace the document. Any previous analysis belonged to the old document and is
    /// dropped.
    pub fn load_document(&mut self, document: Document) {
        tracing::debug!(
            file_name = document.file_name(),
            source = %document.source(),
            chars = document.char_count(),
            "document loaded"
        );
        self.document = Some(document);
        self.result = None;
        self.last_error = None;
    }

    #[must_use]
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replace the stored result wholesale; last write wins.
    pub fn record_analysis(&mut self, result: AnalysisResult, error: Option<String>) {
        self.result = Some(result);
        self.last_error = error;
    }

    /// Analyze the loaded document with the session's options.
    ///
    /// On a model failure the session still records the empty result and the error is
    /// returned as [`CoreError::Analysis`].
    ///
    /// # Errors
    ///
    /// Returns an error if no usable document is loaded or the analysis failed.
    pub async fn analyze<P: LlmProvider>(
        &mut self,
        orchestrator: &AnalysisOrchestrator<P>,
    ) -> Result<&AnalysisResult, CoreError> {
        let document = self.document.as_ref().ok_or(CoreError::NoDocument)?;
        if !document.source().is_supported() {
            return Err(CoreError::UnsupportedDocument(document.file_name().to_owned()));
        }
        if document.text().trim().is_empty() {
            return Err(CoreError::EmptyDocument(document.file_name().to_owned()));
        }

        let outcome = orchestrator.run(document.text(), &self.options).await;
        self.record_analysis(
            outcome.result,
            outcome.error.as_ref().map(ToString::to_string),
        );
        if let Some(e) = outcome.error {
            return Err(CoreError::Analysis(e));
        }
        self.result.as_ref().ok_or(CoreError::NoDocument)
    }

    pub fn clear(&mut self) {
        self.document = None;
        self.result = None;
        self.last_error = None;
    }
}
