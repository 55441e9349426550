//! Caption template composition.
//!
//! Every dataset entry's caption text is produced by substituting two
//! placeholders into a user-supplied template:
//!
//! - `{caption}` — the raw caption returned by the captioning service
//! - `{trigger}` — the fixed trigger word/phrase, inserted verbatim
//!
//! Composition is total: an empty raw caption, a template with repeated
//! placeholders, or a template with no placeholders at all each still produce
//! a well-formed single-line result.

/// Placeholder replaced with the raw service caption.
pub const CAPTION_PLACEHOLDER: &str = "{caption}";
/// Placeholder replaced with the configured trigger word.
pub const TRIGGER_PLACEHOLDER: &str = "{trigger}";

/// Merge a raw caption and trigger word into the template.
///
/// The raw caption is trimmed and its internal newlines collapsed before
/// substitution; the trigger is inserted verbatim. A final pass collapses any
/// run of whitespace (including substitution artifacts) to single spaces and
/// trims the ends.
///
/// A template containing neither placeholder still yields visible output:
/// the template text followed by the trigger.
pub fn compose(template: &str, raw_caption: &str, trigger: &str) -> String {
    let cleaned = normalize_whitespace(raw_caption);

    let resolved = if template.contains(CAPTION_PLACEHOLDER) || template.contains(TRIGGER_PLACEHOLDER)
    {
        template
            .replace(CAPTION_PLACEHOLDER, &cleaned)
            .replace(TRIGGER_PLACEHOLDER, trigger)
    } else {
        format!("{template} {trigger}")
    };

    normalize_whitespace(&resolved)
}

/// Collapse whitespace runs (spaces, tabs, newlines) to single spaces and trim.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
