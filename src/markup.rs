use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z][^>]*>").unwrap());

/// Removes inline markup tags, keeping their inner text.
///
/// Used for targets that render plain text only. Text without tags is
/// returned borrowed.
pub fn strip_markup(text: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(text, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_inline_tags() {
        let tip = "Tip: Hold <kbd class='px-1 py-0.5 bg-gray-200 rounded border text-xs'>Shift</kbd> to sort by more than one column.";
        assert_eq!(strip_markup(tip), "Tip: Hold Shift to sort by more than one column.");
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(strip_markup("Search"), Cow::Borrowed("Search")));
    }

    #[test]
    fn keeps_comparison_signs() {
        assert_eq!(strip_markup("ROE < 5 % and > 2 %"), "ROE < 5 % and > 2 %");
    }
}
