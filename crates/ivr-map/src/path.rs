//! Dot/bracket path lookups into a source record.

use serde_json::Value;

/// Resolve a dot-separated path with optional `[index]` suffixes, e.g.
/// `"insurance.primary.member_id"` or `"application_cpt_codes[0]"`.
///
/// Traversal stops and returns `None` the instant a segment is absent, the
/// current value is not an object/array, or an index is out of range. No
/// type coercion is performed and nothing ever panics.
pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        let (key, index) = split_index(segment)?;
        if key.is_empty() {
            return None;
        }
        current = current.as_object()?.get(key)?;
        if let Some(idx) = index {
            current = current.as_array()?.get(idx)?;
        }
    }
    Some(current)
}

/// Split a segment into its key and optional index. `None` for malformed
/// bracket syntax (non-numeric index, missing bracket).
fn split_index(segment: &str) -> Option<(&str, Option<usize>)> {
    match segment.find('[') {
        None => Some((segment, None)),
        Some(open) => {
            let inner = segment[open..].strip_prefix('[')?.strip_suffix(']')?;
            let index: usize = inner.parse().ok()?;
            Some((&segment[..open], Some(index)))
        }
    }
}
