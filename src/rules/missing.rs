use crate::{
    correlate::{Correlation, PageUsageSnapshot},
    issues::MissingCategoryIssue,
};

pub fn check_missing_categories(
    snapshot: &PageUsageSnapshot,
    correlation: &Correlation,
) -> Vec<MissingCategoryIssue> {
    correlation
        .missing_categories
        .iter()
        .map(|component| MissingCategoryIssue {
            component: component.clone(),
            page_path: snapshot.path.clone(),
        })
        .collect()
}
