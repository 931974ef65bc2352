//! Dot-path decoding of multipart part names.
//!
//! A part named `place.lat` lands at `{"place": {"lat": ...}}`. Decoding is
//! purely structural: values are never coerced here, only arranged.

use crate::value::{RawObject, RawValue};

/// Assembles named parts into a nested object by splitting names on `.`.
///
/// Later parts win conflicts: a repeated name replaces the earlier value,
/// and a scalar in the way of a deeper path is replaced by an object. Key
/// order follows first appearance.
#[must_use]
pub fn decode_parts<I>(parts: I) -> RawObject
where
    I: IntoIterator<Item = (String, RawValue)>,
{
    let mut root = RawObject::new();
    for (name, value) in parts {
        insert_path(&mut root, &name, value);
    }
    root
}

fn insert_path(object: &mut RawObject, name: &str, value: RawValue) {
    let Some((head, rest)) = name.split_once('.') else {
        object.insert(name.to_owned(), value);
        return;
    };

    let entry = object
        .entry(head.to_owned())
        .or_insert_with(|| RawValue::Object(RawObject::new()));
    if let RawValue::Object(child) = entry {
        insert_path(child, rest, value);
    } else {
        let mut child = RawObject::new();
        insert_path(&mut child, rest, value);
        *entry = RawValue::Object(child);
    }
}
