//! Protocol section validation (namespace, layout name).

use crate::schema::LuatileConfig;

use super::helpers::{validate_no_nul, validate_non_empty};

pub(crate) fn validate_protocol(errors: &mut Vec<String>, config: &LuatileConfig) {
    validate_non_empty(errors, "protocol.namespace", &config.protocol.namespace);
    validate_no_nul(errors, "protocol.namespace", &config.protocol.namespace);
    validate_non_empty(errors, "protocol.layout_name", &config.protocol.layout_name);
    validate_no_nul(errors, "protocol.layout_name", &config.protocol.layout_name);
}
