use thiserror::Error;

use crate::ValidationIssue;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("tree '{tree}' failed validation with {} issue(s); first: {}", .issues.len(), first(.issues))]
    Invalid { tree: String, issues: Vec<ValidationIssue> },
}

fn first(issues: &[ValidationIssue]) -> String {
    issues.first().map(ToString::to_string).unwrap_or_default()
}

pub type TreeResult<T> = Result<T, TreeError>;
