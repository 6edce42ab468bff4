//! Wire-level handling of mutually exclusive variant keys.
//!
//! Backend families (build type, deploy type, tag policy, artifact type) are
//! written as sibling keys inside their section, e.g. `build.local` or
//! `build.kaniko`. The typed model holds them as an `Option<Enum>`; this
//! helper picks the one that is set.

/// Pick the single present variant out of a section's sibling keys.
///
/// Returns `Ok(None)` when no key is present, and an error naming the
/// conflicting keys when more than one is.
pub(crate) fn exclusive<T, const N: usize>(
    section: &str,
    candidates: [(&'static str, Option<T>); N],
) -> Result<Option<T>, String> {
    let keys: Vec<&'static str> = candidates.iter().map(|(key, _)| *key).collect();
    let mut present = Vec::new();
    let mut chosen = None;

    for (key, value) in candidates {
        if let Some(value) = value {
            present.push(key);
            chosen.get_or_insert(value);
        }
    }

    if present.len() > 1 {
        return Err(format!(
            "{}: at most one of [{}] may be set, found [{}]",
            section,
            keys.join(", "),
            present.join(", ")
        ));
    }

    Ok(chosen)
}
