use std::sync::LazyLock;

use regex::Regex;

static BOLD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold span regex"));

static LINE_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)\*[ \t]+").expect("Invalid bullet regex"));

/// `3. ` at line start or after whitespace, so steps written on one line split too.
static STEP_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(^|[ \t])[ \t]*(\d+\.[ \t])").expect("Invalid number regex")
});

static EXTRA_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("Invalid blank line regex"));

/// Plain-text rendering for pasting into notes apps.
///
/// Bold labels get their own line, `*` bullets become `-`, numbered steps start
/// on a new line. The output is not meant to be parsed again.
pub fn to_clipboard_text(text: &str) -> String {
    let text = BOLD_SPAN.replace_all(text, "\n$1\n");
    let text = LINE_BULLET.replace_all(&text, "$1- ");
    let text = STEP_NUMBER.replace_all(&text, "\n$2");
    let text = EXTRA_BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
