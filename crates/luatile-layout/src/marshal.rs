//! Conversion between Lua layout results and native [`View`]s.
//!
//! A layout result is accepted only as a whole: the sequence length is
//! checked before any element is looked at, and the first malformed element
//! fails the entire conversion.

use luatile_common::{LayoutError, View};
use mlua::{Lua, Table, Value};

const FIELDS: [&str; 4] = ["x", "y", "width", "height"];

/// Convert the value returned by a layout function into exactly
/// `expected` views, preserving order.
pub fn views_from_lua(value: &Value, expected: u32) -> Result<Vec<View>, LayoutError> {
    let Value::Table(sequence) = value else {
        return Err(LayoutError::Shape(format!(
            "expected sequence, got {}",
            value.type_name()
        )));
    };

    let actual = sequence.raw_len();
    if actual != expected as usize {
        return Err(LayoutError::CountMismatch { expected, actual });
    }

    let mut views = Vec::with_capacity(actual);
    for index in 1..=actual {
        let element: Value = sequence
            .raw_get(index)
            .map_err(|e| LayoutError::Shape(format!("element {index}: {e}")))?;
        views.push(view_from_element(&element, index)?);
    }
    Ok(views)
}

fn view_from_element(element: &Value, index: usize) -> Result<View, LayoutError> {
    let Value::Table(record) = element else {
        return Err(LayoutError::Shape(format!(
            "element {index} is a {}, expected a record",
            element.type_name()
        )));
    };

    let [x, y, width, height] = [
        field(record, FIELDS[0], index)?,
        field(record, FIELDS[1], index)?,
        field(record, FIELDS[2], index)?,
        field(record, FIELDS[3], index)?,
    ];

    for (name, value) in [("width", width), ("height", height)] {
        if value < 0 {
            return Err(LayoutError::Shape(format!(
                "element {index} has negative {name} ({value})"
            )));
        }
    }

    Ok(View {
        x,
        y,
        width,
        height,
    })
}

fn field(record: &Table, name: &str, index: usize) -> Result<i32, LayoutError> {
    let invalid = || LayoutError::Shape(format!("element {index} missing/invalid field `{name}`"));

    let value: Value = record.get(name).map_err(|_| invalid())?;
    let integer = match value {
        Value::Integer(i) => Some(i),
        // Arithmetic like `width / n` yields floats; accept them when integral.
        Value::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(n as i64),
        _ => None,
    };
    integer
        .and_then(|i| i32::try_from(i).ok())
        .ok_or_else(invalid)
}

/// Build the Lua representation of a view: a table with the four fields.
pub fn view_to_lua(lua: &Lua, view: &View) -> mlua::Result<Table> {
    lua.create_table_from([
        ("x", view.x),
        ("y", view.y),
        ("width", view.width),
        ("height", view.height),
    ])
}

/// Build a Lua sequence of view records.
pub fn views_to_lua(lua: &Lua, views: &[View]) -> mlua::Result<Table> {
    let records = views
        .iter()
        .map(|view| view_to_lua(lua, view))
        .collect::<mlua::Result<Vec<_>>>()?;
    lua.create_sequence_from(records)
}
