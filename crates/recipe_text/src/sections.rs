use std::sync::LazyLock;

use regex::Regex;

/// Title shown when the text carries no bold span.
pub const PLACEHOLDER_TITLE: &str = "Your Recipe";

static BOLD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold span regex"));

/// `**Ingredients:**`, `**ingredients**:` and similar; swallows trailing whitespace.
static INGREDIENTS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*[ \t]*ingredients[ \t]*:?[ \t]*\*\*[ \t]*:?\s*")
        .expect("Invalid ingredients header regex")
});

static INSTRUCTIONS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*[ \t]*instructions[ \t]*:?[ \t]*\*\*[ \t]*:?\s*")
        .expect("Invalid instructions header regex")
});

/// A line that is nothing but a bold label, e.g. `**For the sauce:**`.
static BOLD_LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*\*[^*]+\*\*:?$").expect("Invalid bold label regex")
});

/// `3. ` at line start, optionally preceded by a bold sub-label on the same line.
/// `1.5 cups` is not a marker.
static NUMBERED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\*\*[^*]*\*\*)[ \t]*)?\d+\.(?:[ \t]+|$)")
        .expect("Invalid numbered marker regex")
});

pub fn extract_title(text: &str) -> String {
    BOLD_SPAN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|title| title.as_str().trim())
        .filter(|title| !title.is_empty())
        .unwrap_or(PLACEHOLDER_TITLE)
        .to_string()
}

pub fn extract_ingredients(text: &str) -> Vec<String> {
    ingredients_section(text)
        .map(|section| split_items(section, bullet_item))
        .unwrap_or_default()
}

pub fn extract_instructions(text: &str) -> Vec<String> {
    instructions_section(text)
        .map(|section| split_items(section, numbered_item))
        .unwrap_or_default()
}

/// From the ingredients header up to the instructions header or end of text.
fn ingredients_section(text: &str) -> Option<&str> {
    let header = INGREDIENTS_HEADER.find(text)?;
    let rest = &text[header.end()..];
    let end = INSTRUCTIONS_HEADER
        .find(rest)
        .map_or(rest.len(), |next| next.start());
    Some(&rest[..end])
}

fn instructions_section(text: &str) -> Option<&str> {
    let header = INSTRUCTIONS_HEADER.find(text)?;
    Some(&text[header.end()..])
}

/// Splits a section into items at lines recognized by `marker`.
///
/// Lines without a marker continue the current item. Text before the first marker
/// becomes its own item. Empty fragments are dropped.
fn split_items(section: &str, marker: fn(&str) -> Option<String>) -> Vec<String> {
    let mut items = Vec::new();
    let mut current: Option<String> = None;

    for line in section.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(start) = marker(line) {
            items.extend(current.replace(start));
            continue;
        }

        match current.as_mut() {
            Some(item) => {
                if !item.is_empty() {
                    item.push(' ');
                }
                item.push_str(line);
            }
            None => current = Some(line.to_string()),
        }
    }
    items.extend(current);

    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn bullet_item(line: &str) -> Option<String> {
    if BOLD_LABEL_LINE.is_match(line) {
        return Some(line.to_string());
    }
    let rest = line.strip_prefix('*')?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim().to_string())
}

fn numbered_item(line: &str) -> Option<String> {
    let caps = NUMBERED_MARKER.captures(line)?;
    let rest = line[caps.get(0)?.end()..].trim();
    let item = match caps.get(1) {
        Some(label) => format!("{} {rest}", label.as_str()),
        None => rest.to_string(),
    };
    Some(item.trim().to_string())
}
