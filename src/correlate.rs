//! Cross-reference a page usage snapshot with repository declarations.
//!
//! The snapshot itself is obtained elsewhere (a content export, a crawler);
//! this module only reads it from a local JSON file:
//!
//! ```json
//! {
//!   "path": "/content/acme/us/en",
//!   "template": "/conf/acme/settings/wcm/templates/page-content",
//!   "components": ["acme/components/teaser", "core/wcm/components/image/v3/image"]
//! }
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::LibraryDeclaration;

/// Components observed on one rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageUsageSnapshot {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Component resource types, e.g. `acme/components/teaser`.
    #[serde(default, alias = "componentsUsed")]
    pub components: Vec<String>,
}

/// Candidate categories per page component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Correlation {
    pub component_to_categories: BTreeMap<String, Vec<String>>,
    /// Components with no candidate category, in snapshot order.
    pub missing_categories: Vec<String>,
    /// Lowercased last segments of the snapshot components.
    #[serde(skip)]
    component_names: Vec<String>,
}

impl Correlation {
    /// True when `category` is a candidate for at least one component.
    pub fn is_candidate(&self, category: &str) -> bool {
        self.component_to_categories
            .values()
            .any(|categories| categories.iter().any(|c| c == category))
    }

    /// True when `category` serves a component on the page.
    ///
    /// Besides declared candidates this matches categories defined outside
    /// the scanned tree (`core.wcm.components.image.v3` for
    /// `core/wcm/components/image/v3/image`) by the same name rule.
    pub fn is_used_by_page(&self, category: &str) -> bool {
        if self.is_candidate(category) {
            return true;
        }
        let category = category.to_lowercase();
        self.component_names
            .iter()
            .any(|name| category.contains(name.as_str()))
    }
}

/// Load a snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<PageUsageSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read page snapshot: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse page snapshot: {}", path.display()))
}

/// Last `/`-separated segment of a component resource type, lowercased.
fn component_name(component: &str) -> String {
    component
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Map every snapshot component to the declared categories whose name
/// contains the component's last path segment (case-insensitive).
///
/// Aliases are candidates too. A component whose name is empty matches
/// nothing.
pub fn correlate(snapshot: &PageUsageSnapshot, declarations: &[LibraryDeclaration]) -> Correlation {
    let mut correlation = Correlation::default();

    for component in &snapshot.components {
        let name = component_name(component);
        let mut categories: Vec<String> = Vec::new();

        if !name.is_empty() {
            if !correlation.component_names.contains(&name) {
                correlation.component_names.push(name.clone());
            }
            for category in declarations.iter().flat_map(|d| d.all_categories()) {
                if category.to_lowercase().contains(&name) && !categories.iter().any(|c| c == category) {
                    categories.push(category.to_string());
                }
            }
        }

        if categories.is_empty() && !correlation.missing_categories.contains(component) {
            correlation.missing_categories.push(component.clone());
        }
        correlation
            .component_to_categories
            .insert(component.clone(), categories);
    }

    correlation
}
