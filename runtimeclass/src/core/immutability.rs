//! Update-time immutability checks.

use crate::field::{FieldPath, Violation, ViolationList};

/// Report a single `Immutable` violation at `path` when `new` differs from `old`.
pub fn validate_immutable_field<T: PartialEq + ?Sized>(
    new: &T,
    old: &T,
    path: &FieldPath,
) -> ViolationList {
    let mut errors = ViolationList::new();
    if new != old {
        errors.push(Violation::immutable(path.clone()));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ViolationKind;

    /// Identical values never trigger errors.
    #[test]
    fn allows_unchanged_value() {
        assert!(validate_immutable_field("bar", "bar", &FieldPath::new("handler")).is_empty());
        assert!(validate_immutable_field(&Some(3), &Some(3), &FieldPath::new("n")).is_empty());
    }

    /// Any difference, including case, is reported exactly once.
    #[test]
    fn reports_changed_value_once() {
        let errors = validate_immutable_field("bar", "somethingelse", &FieldPath::new("handler"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::Immutable);
        assert_eq!(errors[0].field.to_string(), "handler");

        assert_eq!(
            validate_immutable_field("Bar", "bar", &FieldPath::new("handler")).len(),
            1
        );
    }

    /// Setting or clearing an optional value counts as a change.
    #[test]
    fn reports_presence_changes() {
        let path = FieldPath::new("topology");
        assert_eq!(validate_immutable_field(&Some(1), &None, &path).len(), 1);
        assert_eq!(validate_immutable_field(&None::<i32>, &Some(1), &path).len(), 1);
    }
}
