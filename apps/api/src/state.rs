use std::sync::Arc;

use crate::analysis::schema::AnalysisSchema;
use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::extraction::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; nothing in here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable PDF text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    /// Pluggable remote analyzer. Default: LlmResumeAnalyzer.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    pub schema: &'static AnalysisSchema,
}
