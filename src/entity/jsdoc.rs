//! JSDoc provider
//!
//! Reads the record list produced by `jsdoc -X` (an array of doclets, or an
//! object with a `docs` array). Recognized doclet fields:
//!
//! ```text
//! name, longname | fullname, memberof, comment, access, kind,
//! meta.path, meta.filename, meta.lineno, meta.code.paramnames
//! ```
//!
//! Fields with an unexpected type are treated as absent.

use super::{naming, CodeObject, Provider, ProviderError, RawComment, RecordError};
use crate::models::{KindFlags, SourceLocation, Visibility};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Doclet kinds that describe the package itself, not a code construct
const SKIPPED_KINDS: &[&str] = &["package"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum CommentField {
    Text(String),
    Suppressed,
    Absent,
}

/// One JSDoc doclet
#[derive(Debug, Clone)]
pub struct JsDocObject {
    name: String,
    full_name: String,
    memberof: Option<String>,
    comment: CommentField,
    access: Option<Visibility>,
    kind: Option<String>,
    location: Option<SourceLocation>,
    param_names: Vec<String>,
}

impl JsDocObject {
    pub fn from_record(record: &Value) -> Result<Self, RecordError> {
        let map = record.as_object().ok_or(RecordError::NotAnObject)?;

        let kind = str_field(map, "kind").map(str::to_string);
        if let Some(k) = kind.as_deref() {
            if SKIPPED_KINDS.contains(&k) {
                return Err(RecordError::UnsupportedKind(k.to_string()));
            }
        }

        let full_name = str_field(map, "longname").or_else(|| str_field(map, "fullname"));
        let name = str_field(map, "name");
        let (name, full_name) = match (name, full_name) {
            (Some(n), Some(f)) => (n.to_string(), f.to_string()),
            (None, Some(f)) => (naming::local_name(f).to_string(), f.to_string()),
            (Some(n), None) => (n.to_string(), n.to_string()),
            (None, None) => return Err(RecordError::MissingIdentity),
        };

        let comment = match map.get("comment") {
            Some(Value::String(s)) => CommentField::Text(s.clone()),
            Some(Value::Bool(false)) => CommentField::Suppressed,
            _ => CommentField::Absent,
        };

        let meta = map.get("meta").and_then(Value::as_object);

        Ok(Self {
            memberof: str_field(map, "memberof").map(str::to_string),
            access: str_field(map, "access").and_then(Visibility::parse),
            location: meta.and_then(location_from_meta),
            param_names: meta.map(param_names_from_meta).unwrap_or_default(),
            name,
            full_name,
            comment,
            kind,
        })
    }

    fn has_owner(&self) -> bool {
        self.memberof.as_deref().is_some_and(|m| !m.is_empty())
            || naming::derived_parent(&self.full_name).is_some()
    }
}

impl CodeObject for JsDocObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn raw_comment(&self) -> RawComment<'_> {
        match &self.comment {
            CommentField::Text(t) => RawComment::Text(t),
            CommentField::Suppressed => RawComment::Suppressed,
            CommentField::Absent => RawComment::Absent,
        }
    }

    fn explicit_parent(&self) -> Option<&str> {
        self.memberof.as_deref()
    }

    fn access(&self) -> Option<Visibility> {
        self.access
    }

    fn kind(&self) -> KindFlags {
        match self.kind.as_deref() {
            Some("function") => KindFlags {
                method: self.has_owner(),
                ..Default::default()
            },
            // A JSDoc class doclet documents the constructor as well
            Some("class") => KindFlags {
                namespace: true,
                constructor: true,
                ..Default::default()
            },
            Some("module" | "namespace" | "interface" | "mixin") => KindFlags {
                namespace: true,
                ..Default::default()
            },
            Some("constant") => KindFlags {
                constant: true,
                ..Default::default()
            },
            _ => KindFlags::default(),
        }
    }

    fn parameter_names(&self) -> Vec<String> {
        self.param_names.clone()
    }

    fn source_locations(&self) -> Vec<SourceLocation> {
        self.location.iter().cloned().collect()
    }
}

/// Provider for `jsdoc -X` output
#[derive(Debug, Clone, Copy, Default)]
pub struct JsDocProvider;

impl JsDocProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Provider for JsDocProvider {
    fn name(&self) -> &'static str {
        "jsdoc"
    }

    fn parse_input(&self, input: &str) -> Result<Vec<Value>, ProviderError> {
        match serde_json::from_str::<Value>(input)? {
            Value::Array(records) => Ok(records),
            Value::Object(mut map) => match map.remove("docs") {
                Some(Value::Array(records)) => Ok(records),
                _ => Err(ProviderError::Shape(
                    "expected an array of doclets or an object with a `docs` array".to_string(),
                )),
            },
            other => Err(ProviderError::Shape(format!(
                "expected an array of doclets, found {}",
                json_type_name(&other)
            ))),
        }
    }

    fn parse_record(&self, record: &Value) -> Result<Box<dyn CodeObject>, RecordError> {
        Ok(Box::new(JsDocObject::from_record(record)?))
    }
}

/// Non-empty string field
fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn location_from_meta(meta: &Map<String, Value>) -> Option<SourceLocation> {
    let filename = str_field(meta, "filename")?;
    let file = match str_field(meta, "path") {
        Some(dir) => PathBuf::from(dir).join(filename),
        None => PathBuf::from(filename),
    };
    let line = meta
        .get("lineno")
        .and_then(Value::as_u64)
        .and_then(|l| u32::try_from(l).ok());
    Some(SourceLocation { file, line })
}

fn param_names_from_meta(meta: &Map<String, Value>) -> Vec<String> {
    meta.get("code")
        .and_then(|c| c.get("paramnames"))
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
