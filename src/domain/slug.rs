//! URL-safe identifiers derived from display names.

/// Derive a slug: ASCII-transliterated, lowercase, dash separated.
pub fn slugify(name: &str) -> String {
    ::slug::slugify(name.trim())
}
