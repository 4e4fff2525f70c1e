//! Combining generated docstrings with hand-written ones

/// Merge a generated docstring into an existing one.
///
/// An original that already contains the generated text is kept as is, so
/// merging is idempotent. Otherwise the generated text is appended after a
/// blank line.
pub fn merge_docstring(original: Option<&str>, generated: &str) -> String {
    let generated = generated.trim();
    let Some(original) = original.filter(|o| !o.trim().is_empty()) else {
        return generated.to_string();
    };

    if generated.is_empty() || original.contains(generated) {
        return original.trim().to_string();
    }

    format!("{}\n\n{}", original.trim(), generated)
}
