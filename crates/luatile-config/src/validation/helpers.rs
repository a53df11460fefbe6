//! Shared string-validation helpers used by the section validators.

/// Push an error if `value` is empty or only whitespace.
pub(crate) fn validate_non_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

/// Push an error if `value` contains a NUL byte (not representable on the wire).
pub(crate) fn validate_no_nul(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.contains('\0') {
        errors.push(format!("{name} must not contain NUL bytes"));
    }
}

/// Push an error if `value` is not a valid Lua identifier.
pub(crate) fn validate_identifier(errors: &mut Vec<String>, name: &str, value: &str) {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !valid {
        errors.push(format!("{name} = {value:?} is not a valid identifier"));
    }
}
