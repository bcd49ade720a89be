//! Field paths and the violations reported against them.
//!
//! Every validator in this crate returns an owned [`ViolationList`]. Callers
//! combine lists with [`Extend`]; nothing is shared or mutated across calls.

use std::fmt;
use std::ops::Deref;

use anyhow::{Result, anyhow};
use serde::Serialize;

/// Location of a value inside an object, rendered as `a.b[0].c`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

impl FieldPath {
    /// Path with a single top-level field.
    pub fn new(field: &str) -> Self {
        Self::default().child(field)
    }

    /// Path to a named child of `self`.
    pub fn child(&self, field: &str) -> Self {
        self.with(Segment::Field(field.to_string()))
    }

    /// Path to element `index` of the sequence at `self`.
    pub fn index(&self, index: usize) -> Self {
        self.with(Segment::Index(index))
    }

    /// Path to entry `key` of the map at `self`.
    pub fn key(&self, key: &str) -> Self {
        self.with(Segment::Key(key.to_string()))
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) => write!(f, "[{key}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Category of a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    /// A required value is missing or empty.
    Required,
    /// A value fails its syntax or semantic rule.
    Invalid,
    /// A value is outside a fixed set of supported values.
    NotSupported,
    /// A value is present where it is not allowed.
    Forbidden,
    /// A value exceeds a size limit.
    TooLong,
    /// An update changed a field that may not change after creation.
    Immutable,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::Required => "Required value",
            ViolationKind::Invalid => "Invalid value",
            ViolationKind::NotSupported => "Unsupported value",
            ViolationKind::Forbidden => "Forbidden",
            ViolationKind::TooLong => "Too long",
            ViolationKind::Immutable => "Immutable field",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field-pathed diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field}: {kind}{}: {detail}", render_value(.value))]
pub struct Violation {
    pub field: FieldPath,
    pub kind: ViolationKind,
    /// Rendered offending value, when one is worth echoing back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub detail: String,
}

fn render_value(value: &Option<String>) -> String {
    match value {
        Some(value) => format!(" {value}"),
        None => String::new(),
    }
}

impl Violation {
    pub fn required(field: FieldPath, detail: impl Into<String>) -> Self {
        Self {
            field,
            kind: ViolationKind::Required,
            value: None,
            detail: detail.into(),
        }
    }

    pub fn invalid(field: FieldPath, value: impl fmt::Debug, detail: impl Into<String>) -> Self {
        Self {
            field,
            kind: ViolationKind::Invalid,
            value: Some(format!("{value:?}")),
            detail: detail.into(),
        }
    }

    pub fn not_supported(field: FieldPath, value: impl fmt::Debug, supported: &[&str]) -> Self {
        let quoted: Vec<String> = supported.iter().map(|s| format!("{s:?}")).collect();
        Self {
            field,
            kind: ViolationKind::NotSupported,
            value: Some(format!("{value:?}")),
            detail: format!("supported values: {}", quoted.join(", ")),
        }
    }

    pub fn forbidden(field: FieldPath, detail: impl Into<String>) -> Self {
        Self {
            field,
            kind: ViolationKind::Forbidden,
            value: None,
            detail: detail.into(),
        }
    }

    pub fn too_long(field: FieldPath, actual: usize, max: usize) -> Self {
        Self {
            field,
            kind: ViolationKind::TooLong,
            value: None,
            detail: format!("must have at most {max} bytes (got {actual})"),
        }
    }

    pub fn immutable(field: FieldPath) -> Self {
        Self {
            field,
            kind: ViolationKind::Immutable,
            value: None,
            detail: "field is immutable".to_string(),
        }
    }
}

/// Ordered, owned collection of violations. Empty means "accept".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationList(Vec<Violation>);

impl ViolationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Rendered paths of every violation, in order.
    pub fn fields(&self) -> Vec<String> {
        self.0.iter().map(|v| v.field.to_string()).collect()
    }

    /// `Ok(())` when empty, otherwise a single error summarising every violation.
    pub fn into_result(self) -> Result<()> {
        if self.0.is_empty() {
            return Ok(());
        }
        Err(anyhow!("validation failed: {self}"))
    }
}

impl Deref for ViolationList {
    type Target = [Violation];

    fn deref(&self) -> &[Violation] {
        &self.0
    }
}

impl Extend<Violation> for ViolationList {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Violation> for ViolationList {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ViolationList {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ViolationList {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ViolationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_renders_fields_indices_and_keys() {
        let path = FieldPath::new("topology").child("tolerations").index(1).child("key");
        assert_eq!(path.to_string(), "topology.tolerations[1].key");

        let labels = FieldPath::new("metadata").child("labels").key("app");
        assert_eq!(labels.to_string(), "metadata.labels[app]");
    }

    #[test]
    fn root_path_renders_placeholder() {
        assert_eq!(FieldPath::default().to_string(), "<root>");
    }

    #[test]
    fn violation_display_includes_value_when_present() {
        let violation = Violation::invalid(FieldPath::new("handler"), "&@#$", "bad handler");
        assert_eq!(
            violation.to_string(),
            "handler: Invalid value \"&@#$\": bad handler"
        );

        let violation = Violation::immutable(FieldPath::new("handler"));
        assert_eq!(
            violation.to_string(),
            "handler: Immutable field: field is immutable"
        );
    }

    #[test]
    fn into_result_joins_all_violations() {
        assert!(ViolationList::new().into_result().is_ok());

        let list: ViolationList = vec![
            Violation::required(FieldPath::new("handler"), "must not be empty"),
            Violation::forbidden(FieldPath::new("metadata").child("namespace"), "not allowed"),
        ]
        .into_iter()
        .collect();
        let err = list.into_result().expect_err("non-empty list should fail");
        let message = err.to_string();
        assert!(message.contains("handler: Required value: must not be empty"));
        assert!(message.contains("; metadata.namespace: Forbidden: not allowed"));
    }
}
