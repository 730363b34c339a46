// Résumé analysis prompt templates.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub const ANALYSIS_SYSTEM_BASE: &str = "\
You are an expert resume reviewer and Applicant Tracking System (ATS) specialist. \
Analyze the resume text provided by the user. \
Score its ATS compatibility from 0 to 100, where 100 means automated recruiting \
software will parse every section without loss. \
Critique the structure (section order, headings, completeness) and the format \
(layout, fonts, tables, columns, anything an ATS may misread). \
List the relevant keywords and skills the resume already contains. \
Give specific, actionable suggestions for improvement. \
Base every statement on the resume text only; do not invent experience.";

/// Full system instruction: the reviewer brief plus the JSON-only directive.
pub fn analysis_system() -> String {
    format!("{ANALYSIS_SYSTEM_BASE} {JSON_ONLY_SYSTEM}")
}
