//! Pure markdown quoting utilities.
//!
//! These functions calculate fence/tick lengths so that literal text (titles,
//! patterns, example payloads) can be quoted without breaking the document.

/// Calculate the minimum fence length needed for a code block.
///
/// Returns the smallest number of fence characters (at least 3) that
/// doesn't appear as a run in the content.
///
/// # Examples
///
/// ```
/// use protodoc::markdown::calculate_fence_length;
///
/// // Normal content needs 3 backticks
/// assert_eq!(calculate_fence_length("{\"id\": 1}", '`'), 3);
///
/// // Content with 3 backticks needs 4
/// assert_eq!(calculate_fence_length("{\"body\": \"```\"}", '`'), 4);
/// ```
pub fn calculate_fence_length(content: &str, fence_char: char) -> usize {
    longest_run(content, fence_char).max(2) + 1
}

/// Calculate the minimum backtick count needed for inline code.
///
/// Returns the smallest number of backticks (at least 1) that doesn't
/// appear as a run in the content.
///
/// # Examples
///
/// ```
/// use protodoc::markdown::calculate_inline_code_ticks;
///
/// assert_eq!(calculate_inline_code_ticks("code"), 1);
/// assert_eq!(calculate_inline_code_ticks("code with ` backtick"), 2);
/// ```
pub fn calculate_inline_code_ticks(content: &str) -> usize {
    longest_run(content, '`') + 1
}

fn longest_run(content: &str, target: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == target {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_run
}

/// Wrap text in an inline code span.
///
/// The delimiter grows past any backtick run in the text, and a space is
/// added inside the delimiters when the text itself starts or ends with a
/// backtick.
///
/// # Examples
///
/// ```
/// use protodoc::markdown::code_span;
///
/// assert_eq!(code_span("kdeconnect.ping"), "`kdeconnect.ping`");
/// assert_eq!(code_span("a`b"), "``a`b``");
/// assert_eq!(code_span("`quoted`"), "`` `quoted` ``");
/// ```
pub fn code_span(text: &str) -> String {
    let ticks = "`".repeat(calculate_inline_code_ticks(text));
    if text.starts_with('`') || text.ends_with('`') {
        format!("{ticks} {text} {ticks}")
    } else {
        format!("{ticks}{text}{ticks}")
    }
}

/// Wrap content in a fenced code block with the given info string.
///
/// The returned block ends with a newline after the closing fence.
pub fn fenced_block(content: &str, info: &str) -> String {
    let fence = "`".repeat(calculate_fence_length(content, '`'));
    format!("{fence}{info}\n{content}\n{fence}\n")
}
