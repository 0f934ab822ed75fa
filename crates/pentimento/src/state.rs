//! Recursive merge over JSON-like state values.
//!
//! Component state is an arbitrary [`serde_json::Value`]. A state update
//! carries a partial value that is merged into the existing state:
//!
//! - object into object: merged key by key, recursing where both sides are
//!   composite,
//! - array into array: merged index by index, the old tail surviving a
//!   shorter partial,
//! - anything else: the partial overwrites the slot wholesale.

use serde_json::map::Entry;
use serde_json::Value;

/// Whether a value participates in recursive merging.
fn is_composite(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Merge `partial` into `target` in place.
///
/// If `target` is not composite, it is replaced by `partial` verbatim.
pub fn merge(target: &mut Value, partial: Value) {
    if !is_composite(target) {
        *target = partial;
        return;
    }
    match (target, partial) {
        (Value::Object(target), Value::Object(partial)) => {
            for (key, incoming) in partial {
                match target.entry(key) {
                    Entry::Occupied(mut slot)
                        if is_composite(slot.get()) && is_composite(&incoming) =>
                    {
                        merge(slot.get_mut(), incoming);
                    }
                    Entry::Occupied(mut slot) => {
                        slot.insert(incoming);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(incoming);
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(partial)) => {
            for (index, incoming) in partial.into_iter().enumerate() {
                if index < target.len() {
                    let existing = &mut target[index];
                    if is_composite(existing) && is_composite(&incoming) {
                        merge(existing, incoming);
                    } else {
                        *existing = incoming;
                    }
                } else {
                    target.push(incoming);
                }
            }
        }
        // Composite target, mismatched partial shape: overwrite wholesale.
        (target, partial) => *target = partial,
    }
}
