//! Script section validation.

use crate::schema::LuatileConfig;

use super::helpers::validate_identifier;

pub(crate) fn validate_script(errors: &mut Vec<String>, config: &LuatileConfig) {
    validate_identifier(
        errors,
        "script.layout_function",
        &config.script.layout_function,
    );
}
