//! Pure slug generation for Markdown heading anchors.
//!
//! Headings, table-of-contents entries and type cross-references are rendered
//! independently, so every one of them derives its anchor through [`slugify`].

/// Generate an anchor slug from heading text.
///
/// Drops every character that is not a letter, digit, whitespace or hyphen,
/// trims and lower-cases the rest, then collapses each run of whitespace and
/// hyphens into a single hyphen.
///
/// # Examples
///
/// ```
/// use protodoc::markdown::slugify;
///
/// assert_eq!(slugify("Data Types"), "data-types");
/// assert_eq!(slugify("`kdeconnect.ping`"), "kdeconnectping");
/// assert_eq!(slugify("  Multiple - Spaces  "), "multiple-spaces");
/// ```
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|&c| c.is_alphanumeric() || c.is_whitespace() || c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_separator = false;
    for c in kept.trim().to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            if !in_separator {
                slug.push('-');
            }
            in_separator = true;
        } else {
            slug.push(c);
            in_separator = false;
        }
    }
    slug
}

/// Format `text` as a link to its own heading: `[text](#slug)`.
pub fn slug_link(text: &str) -> String {
    format!("[{}](#{})", text, slugify(text))
}
