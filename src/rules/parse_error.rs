use crate::{core::ScanDiagnostic, issues::ParseErrorIssue};

pub fn check_parse_errors(diagnostics: &[ScanDiagnostic]) -> Vec<ParseErrorIssue> {
    diagnostics
        .iter()
        .map(|d| ParseErrorIssue {
            file_path: d.file.clone(),
            error: d.error.clone(),
        })
        .collect()
}
