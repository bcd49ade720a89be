//! Identifier grammars: DNS-1123 names, qualified names and label values.
//!
//! The `*_errors` helpers return human-readable reasons (empty on success) and
//! know nothing about field paths. [`validate_identifier`] wraps them into
//! violations for the two roles a runtime class cares about.

use std::sync::LazyLock;

use regex::Regex;

use crate::field::{FieldPath, Violation, ViolationList};

pub const DNS1123_LABEL_MAX_LEN: usize = 63;
pub const DNS1123_SUBDOMAIN_MAX_LEN: usize = 253;
pub const QUALIFIED_NAME_MAX_LEN: usize = 63;
pub const LABEL_VALUE_MAX_LEN: usize = 63;

const DNS1123_LABEL_FMT: &str = "[a-z0-9]([-a-z0-9]*[a-z0-9])?";
const QUALIFIED_NAME_FMT: &str = "([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]";

static DNS1123_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{DNS1123_LABEL_FMT}$")).expect("dns-1123 label regex")
});

static DNS1123_SUBDOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{DNS1123_LABEL_FMT}(\.{DNS1123_LABEL_FMT})*$"))
        .expect("dns-1123 subdomain regex")
});

static QUALIFIED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{QUALIFIED_NAME_FMT}$")).expect("qualified name regex")
});

/// Which grammar [`validate_identifier`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Object names: DNS-1123 subdomain.
    Name,
    /// Runtime handlers: DNS-1123 label.
    Handler,
}

/// Check `value` against the grammar for `kind`, reporting under `path`.
///
/// An empty value is always a single `Required` violation. Otherwise an
/// over-long value is `TooLong` and a malformed one is `Invalid`; both may
/// be reported for the same value.
pub fn validate_identifier(kind: IdentifierKind, value: &str, path: &FieldPath) -> ViolationList {
    let mut errors = ViolationList::new();
    if value.is_empty() {
        errors.push(Violation::required(path.clone(), "must not be empty"));
        return errors;
    }

    let (max_len, format_error) = match kind {
        IdentifierKind::Name => (DNS1123_SUBDOMAIN_MAX_LEN, dns1123_subdomain_format_error(value)),
        IdentifierKind::Handler => (DNS1123_LABEL_MAX_LEN, dns1123_label_format_error(value)),
    };
    if value.len() > max_len {
        errors.push(Violation::too_long(path.clone(), value.len(), max_len));
    }
    if let Some(msg) = format_error {
        errors.push(Violation::invalid(path.clone(), value, msg));
    }
    errors
}

/// Lowercase alphanumerics and `-`, starting and ending alphanumeric.
pub fn dns1123_label_errors(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if value.len() > DNS1123_LABEL_MAX_LEN {
        errors.push(max_len_message(DNS1123_LABEL_MAX_LEN));
    }
    errors.extend(dns1123_label_format_error(value));
    errors
}

/// Dot-separated DNS-1123 labels, at most 253 characters overall.
pub fn dns1123_subdomain_errors(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if value.len() > DNS1123_SUBDOMAIN_MAX_LEN {
        errors.push(max_len_message(DNS1123_SUBDOMAIN_MAX_LEN));
    }
    errors.extend(dns1123_subdomain_format_error(value));
    errors
}

fn dns1123_label_format_error(value: &str) -> Option<String> {
    (!DNS1123_LABEL_RE.is_match(value)).then(|| {
        format!(
            "a lowercase RFC 1123 label must consist of lower case alphanumeric characters or '-', \
             and must start and end with an alphanumeric character (e.g. 'my-name', or '123-abc', \
             regex used for validation is '{DNS1123_LABEL_FMT}')"
        )
    })
}

fn dns1123_subdomain_format_error(value: &str) -> Option<String> {
    (!DNS1123_SUBDOMAIN_RE.is_match(value)).then(|| {
        "a lowercase RFC 1123 subdomain must consist of lower case alphanumeric characters, \
         '-' or '.', and must start and end with an alphanumeric character (e.g. \
         'example.com')"
            .to_string()
    })
}

/// Object name prefix (`generateName`): a trailing `-` is allowed.
pub fn dns1123_subdomain_prefix_errors(value: &str) -> Vec<String> {
    let masked = value.strip_suffix('-').map(|prefix| format!("{prefix}a"));
    dns1123_subdomain_errors(masked.as_deref().unwrap_or(value))
}

/// Label and annotation keys: `[prefix/]name`, where the prefix is a
/// DNS-1123 subdomain and the name part is 1-63 characters.
pub fn qualified_name_errors(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    let name = match value.split('/').collect::<Vec<_>>().as_slice() {
        [name] => *name,
        [prefix, name] => {
            if prefix.is_empty() {
                errors.push("prefix part must be non-empty".to_string());
            } else {
                errors.extend(
                    dns1123_subdomain_errors(prefix)
                        .into_iter()
                        .map(|msg| format!("prefix part {msg}")),
                );
            }
            *name
        }
        _ => {
            errors.push(
                "a qualified name must consist of alphanumeric characters, '-', '_' or '.', \
                 with an optional DNS subdomain prefix and '/' (e.g. 'example.com/MyName')"
                    .to_string(),
            );
            return errors;
        }
    };

    if name.is_empty() {
        errors.push("name part must be non-empty".to_string());
        return errors;
    }
    if name.len() > QUALIFIED_NAME_MAX_LEN {
        errors.push(format!("name part {}", max_len_message(QUALIFIED_NAME_MAX_LEN)));
    }
    if !QUALIFIED_NAME_RE.is_match(name) {
        errors.push(format!(
            "name part must consist of alphanumeric characters, '-', '_' or '.', and must start \
             and end with an alphanumeric character (e.g. 'MyName', or 'my.name', or '123-abc', \
             regex used for validation is '{QUALIFIED_NAME_FMT}')"
        ));
    }
    errors
}

/// Label values: empty, or a qualified-name part of at most 63 characters.
pub fn label_value_errors(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    let mut errors = Vec::new();
    if value.len() > LABEL_VALUE_MAX_LEN {
        errors.push(max_len_message(LABEL_VALUE_MAX_LEN));
    }
    if !QUALIFIED_NAME_RE.is_match(value) {
        errors.push(format!(
            "a valid label must be an empty string or consist of alphanumeric characters, '-', \
             '_' or '.', and must start and end with an alphanumeric character (regex used for \
             validation is '({QUALIFIED_NAME_FMT})?')"
        ));
    }
    errors
}

fn max_len_message(max: usize) -> String {
    format!("must be no more than {max} characters")
}
