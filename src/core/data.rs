//! Data model shared by every analysis phase.
//!
//! All types here are plain, owned values. They are produced once per
//! analysis run and never mutated afterwards, which is what lets the
//! aggregator hand them to reporting, correlation and optimization as-is.

use std::fmt;

use serde::Serialize;

// ============================================================
// Declarations
// ============================================================

/// Where a declaration was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationKind {
    /// Structured client library folder manifest (`.content.xml`).
    Manifest,
    /// Build-tool configuration file (`clientlib.config.js`).
    Config,
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Manifest => write!(f, "manifest"),
            DeclarationKind::Config => write!(f, "config"),
        }
    }
}

/// Optional metadata attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationFlags {
    pub kind: DeclarationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_proxy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_cache_key: Option<String>,
}

impl DeclarationFlags {
    pub fn new(kind: DeclarationKind) -> Self {
        Self {
            kind,
            allow_proxy: None,
            long_cache_key: None,
        }
    }
}

/// Style and script files found under a declaration's directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetLists {
    pub css: Vec<String>,
    pub js: Vec<String>,
}

/// One declared client library category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryDeclaration {
    /// The first declared category; unit of deduplication.
    pub category: String,
    /// Further categories declared by the same folder.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Root-relative, `/`-separated location (directory or config file).
    pub source_path: String,
    pub embeds: Vec<String>,
    pub dependencies: Vec<String>,
    pub assets: AssetLists,
    pub flags: DeclarationFlags,
}

impl LibraryDeclaration {
    pub fn new(category: impl Into<String>, source_path: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            category: category.into(),
            aliases: Vec::new(),
            source_path: source_path.into(),
            embeds: Vec::new(),
            dependencies: Vec::new(),
            assets: AssetLists::default(),
            flags: DeclarationFlags::new(kind),
        }
    }

    /// The primary category followed by all aliases.
    pub fn all_categories(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.category.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

// ============================================================
// Usage references
// ============================================================

/// Syntactic context a category was mentioned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    StyleInclusion,
    ScriptInclusion,
    CombinedInclusion,
    PolicyArray,
    PolicyScalar,
    PolicyJsHead,
    PolicyAttribute,
    ComponentConfig,
    JsFunctionCall,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::StyleInclusion => "style-inclusion",
            ReferenceKind::ScriptInclusion => "script-inclusion",
            ReferenceKind::CombinedInclusion => "combined-inclusion",
            ReferenceKind::PolicyArray => "policy-array",
            ReferenceKind::PolicyScalar => "policy-scalar",
            ReferenceKind::PolicyJsHead => "policy-js-head",
            ReferenceKind::PolicyAttribute => "policy-attribute",
            ReferenceKind::ComponentConfig => "component-config",
            ReferenceKind::JsFunctionCall => "js-function-call",
        }
    }

    /// True for the three inclusion-call kinds.
    pub fn is_inclusion(&self) -> bool {
        matches!(
            self,
            ReferenceKind::StyleInclusion
                | ReferenceKind::ScriptInclusion
                | ReferenceKind::CombinedInclusion
        )
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed mention of a category outside its declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageReference {
    pub category: String,
    pub file: String,
    /// 1-based line of the match.
    pub line: usize,
    pub kind: ReferenceKind,
}

impl UsageReference {
    pub fn new(category: impl Into<String>, file: impl Into<String>, line: usize, kind: ReferenceKind) -> Self {
        Self {
            category: category.into(),
            file: file.into(),
            line,
            kind,
        }
    }
}

// ============================================================
// Graph
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    Embed,
    Dependency,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Embed => write!(f, "embed"),
            EdgeKind::Dependency => write!(f, "dependency"),
        }
    }
}

/// Directed edge from a declaring category to an embed/dependency target.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

/// A category declared at more than one location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DuplicateDeclaration {
    pub category: String,
    /// Declaring paths in discovery order.
    pub paths: Vec<String>,
}

/// Immutable output of the graph analysis.
///
/// Every collection is sorted, so two analyses of the same input compare
/// (and serialize) identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyGraph {
    pub nodes: Vec<String>,
    pub edges: Vec<DependencyEdge>,
    pub duplicates: Vec<DuplicateDeclaration>,
    pub unused: Vec<String>,
    /// Closed walks `[c0, c1, ..., c0]`.
    pub circular: Vec<Vec<String>>,
}

impl DependencyGraph {
    /// Outgoing edges of `category`, in sorted order.
    pub fn edges_from<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a DependencyEdge> {
        self.edges.iter().filter(move |e| e.from == category)
    }

    pub fn is_unused(&self, category: &str) -> bool {
        self.unused.binary_search_by(|c| c.as_str().cmp(category)).is_ok()
    }
}

// ============================================================
// Diagnostics
// ============================================================

/// A file that could not be read or parsed. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanDiagnostic {
    pub file: String,
    pub error: String,
}
