//! Language-agnostic entity model
//!
//! A provider turns one raw extractor record into a [`CodeObject`]. The
//! object answers the raw questions (names, access tag, comment text, kind,
//! locations); [`Entity`] wraps it together with its parsed [`Docstring`] and
//! the hierarchy links, and derives everything the role catalog needs.
//!
//! Providers override only what differs for their language. Shared logic
//! (nodoc detection, privacy-by-underscore, depth and parent computation)
//! lives in the trait's default methods and on `Entity`.

pub mod jsdoc;
pub mod naming;
mod registry;

pub use registry::EntityRegistry;

use crate::docstring::Docstring;
use crate::models::{KindFlags, Parameter, SourceLocation, Visibility};
use thiserror::Error;

/// Marker that suppresses coverage instrumentation comments
const ISTANBUL_IGNORE: &str = "istanbul ignore";

/// The raw `comment` field of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawComment<'a> {
    /// A comment string (possibly empty)
    Text(&'a str),
    /// The field is explicitly `false`: documentation suppressed
    Suppressed,
    /// No comment field at all
    Absent,
}

impl<'a> RawComment<'a> {
    pub fn text(&self) -> Option<&'a str> {
        match self {
            RawComment::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Errors that reject a single raw record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("record is not an object")]
    NotAnObject,

    #[error("record has neither a name nor a full name")]
    MissingIdentity,

    #[error("unsupported record kind `{0}`")]
    UnsupportedKind(String),
}

/// Errors that reject a whole provider input
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("failed to parse extractor output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected extractor output: {0}")]
    Shape(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One declared construct as seen by a language provider.
///
/// Only the identity and comment accessors are required. The rest default to
/// the generic behaviour and can be overridden per language or per kind.
pub trait CodeObject: Send + Sync + std::fmt::Debug {
    /// Local identifier
    fn name(&self) -> &str;

    /// Dot-delimited fully qualified name, unique within a run
    fn full_name(&self) -> &str;

    fn raw_comment(&self) -> RawComment<'_>;

    /// Parent full name given explicitly by the extractor
    fn explicit_parent(&self) -> Option<&str> {
        None
    }

    /// Visibility given explicitly by the extractor
    fn access(&self) -> Option<Visibility> {
        None
    }

    fn kind(&self) -> KindFlags {
        KindFlags::default()
    }

    /// Declared parameter names, in order
    fn parameter_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn source_locations(&self) -> Vec<SourceLocation> {
        Vec::new()
    }

    fn is_getter(&self) -> bool {
        naming::is_getter(self.full_name())
    }

    fn is_setter(&self) -> bool {
        naming::is_setter(self.full_name())
    }

    fn is_questioning(&self) -> bool {
        naming::is_questioning(self.full_name())
    }

    fn is_private_by_name(&self) -> bool {
        naming::is_private_by_name(self.full_name())
    }

    /// Resolved visibility.
    ///
    /// A private-looking name always wins; otherwise the explicit access tag,
    /// then the docstring's own visibility tag, then `public`.
    fn visibility(&self, docstring: &Docstring) -> Visibility {
        if self.is_private_by_name() {
            return Visibility::Private;
        }
        self.access()
            .or_else(|| docstring.visibility())
            .unwrap_or_default()
    }

    /// Whether the entity is excluded from documentation scrutiny
    fn is_nodoc(&self, docstring: &Docstring) -> bool {
        self.raw_comment() == RawComment::Suppressed
            || docstring.has_tag("ignore")
            || docstring.text().trim().starts_with(ISTANBUL_IGNORE)
    }

    /// No comment text at all. Whitespace-only text still counts as a comment.
    fn is_undocumented(&self) -> bool {
        match self.raw_comment() {
            RawComment::Text(t) => t.is_empty(),
            RawComment::Suppressed | RawComment::Absent => true,
        }
    }
}

/// Turns raw extractor records into code objects for one source language
pub trait Provider: Send + Sync {
    /// Short language/tool identifier, e.g. `jsdoc`
    fn name(&self) -> &'static str;

    /// Split the extractor's output document into raw records
    fn parse_input(&self, input: &str) -> Result<Vec<serde_json::Value>, ProviderError>;

    /// Build a code object from one raw record
    fn parse_record(
        &self,
        record: &serde_json::Value,
    ) -> Result<Box<dyn CodeObject>, RecordError>;
}

/// A code object plus its parsed docstring and hierarchy links.
///
/// Everything except `parent_full_name` and `children_full_names` is fixed at
/// construction. Those two are written once by the hierarchy builder.
#[derive(Debug)]
pub struct Entity {
    object: Box<dyn CodeObject>,
    docstring: Docstring,
    depth: usize,
    pub(crate) parent_full_name: Option<String>,
    pub(crate) children_full_names: Vec<String>,
}

impl Entity {
    pub fn new(object: Box<dyn CodeObject>) -> Self {
        let docstring = Docstring::parse(object.raw_comment().text());
        let depth = naming::depth(object.full_name());
        Self {
            object,
            docstring,
            depth,
            parent_full_name: None,
            children_full_names: Vec::new(),
        }
    }

    pub fn object(&self) -> &dyn CodeObject {
        self.object.as_ref()
    }

    pub fn name(&self) -> &str {
        self.object.name()
    }

    pub fn full_name(&self) -> &str {
        self.object.full_name()
    }

    pub fn docstring(&self) -> &Docstring {
        &self.docstring
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Explicit parent if the provider gave one, else the derived parent.
    /// Available before linking; the hierarchy builder stores this value.
    pub fn resolve_parent(&self) -> Option<String> {
        match self.object.explicit_parent() {
            Some(p) if !p.is_empty() => Some(p.to_string()),
            _ => naming::derived_parent(self.full_name()).map(str::to_string),
        }
    }

    pub fn parent_full_name(&self) -> Option<&str> {
        self.parent_full_name.as_deref()
    }

    pub fn children_full_names(&self) -> &[String] {
        &self.children_full_names
    }

    pub fn has_children(&self) -> bool {
        !self.children_full_names.is_empty()
    }

    pub fn is_getter(&self) -> bool {
        self.object.is_getter()
    }

    pub fn is_setter(&self) -> bool {
        self.object.is_setter()
    }

    pub fn is_questioning(&self) -> bool {
        self.object.is_questioning()
    }

    pub fn in_root(&self) -> bool {
        self.depth == 1
    }

    pub fn visibility(&self) -> Visibility {
        self.object.visibility(&self.docstring)
    }

    pub fn is_public(&self) -> bool {
        self.visibility() == Visibility::Public
    }

    pub fn is_protected(&self) -> bool {
        self.visibility() == Visibility::Protected
    }

    pub fn is_private(&self) -> bool {
        self.visibility() == Visibility::Private
    }

    pub fn is_nodoc(&self) -> bool {
        self.object.is_nodoc(&self.docstring)
    }

    pub fn is_undocumented(&self) -> bool {
        self.object.is_undocumented()
    }

    pub fn has_doc(&self) -> bool {
        !self.is_undocumented()
    }

    pub fn has_code_example(&self) -> bool {
        self.docstring.code_example_count() >= 1
    }

    pub fn has_multiple_code_examples(&self) -> bool {
        self.docstring.code_example_count() >= 2
    }

    pub fn return_mentioned(&self) -> bool {
        self.docstring.mentions_return()
    }

    pub fn return_described(&self) -> bool {
        self.docstring.describes_return()
    }

    pub fn return_typed(&self) -> bool {
        self.return_mentioned()
    }

    pub fn kind(&self) -> KindFlags {
        self.object.kind()
    }

    /// Parameters with their documentation state
    pub fn parameters(&self) -> Vec<Parameter> {
        let tags = self.docstring.param_tags();
        self.object
            .parameter_names()
            .into_iter()
            .map(|name| {
                let tag = tags.iter().find(|t| t.name == name);
                Parameter {
                    mentioned: tag.is_some(),
                    described: tag.is_some_and(|t| !t.description.is_empty()),
                    name,
                }
            })
            .collect()
    }

    pub fn source_locations(&self) -> Vec<SourceLocation> {
        self.object.source_locations()
    }
}
