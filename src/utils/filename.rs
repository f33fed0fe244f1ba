/// Reduces a user-supplied filename to a safe basename: ASCII letters,
/// digits, `.`, `-` and `_`, with whitespace collapsed to `_`. Directory
/// components and leading dots are dropped. May return an empty string.
pub fn secure_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();

    let mut out = String::with_capacity(base.len());
    for word in base.split_whitespace() {
        if !out.is_empty() {
            out.push('_');
        }
        out.extend(
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')),
        );
    }

    out.trim_start_matches(['.', '_']).trim_end_matches('_').to_string()
}

/// Lowercased extension of a filename, if any.
pub fn extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
