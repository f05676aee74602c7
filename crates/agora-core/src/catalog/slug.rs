//! Slug derivation for shareable agent URLs

/// Derive a URL-safe slug from an agent title.
///
/// Lowercases the title, keeps alphanumeric runs, and collapses everything
/// else into single hyphens. Slugs are not guaranteed unique; collisions are
/// resolved at lookup time by taking the earliest match.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
