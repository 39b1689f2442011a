//! Best-effort structure extraction for generated recipe text.
//!
//! The recipe service answers with loosely formatted markdown: a bold title, a
//! bold `Ingredients:` header followed by `*` bullets and a bold `Instructions:`
//! header followed by a numbered list. Nothing guarantees that shape, so every
//! function here degrades to a placeholder or an empty list instead of failing.

mod plain_text;
mod sections;

use serde::Serialize;

pub use plain_text::to_clipboard_text;
pub use sections::{extract_ingredients, extract_instructions, extract_title, PLACEHOLDER_TITLE};

/// Structured view of a raw recipe. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl ParsedRecipe {
    pub fn parse(raw_recipe_text: &str) -> Self {
        Self {
            title: extract_title(raw_recipe_text),
            ingredients: extract_ingredients(raw_recipe_text),
            instructions: extract_instructions(raw_recipe_text),
        }
    }

    /// True when neither list could be recovered from the text.
    pub fn is_unstructured(&self) -> bool {
        self.ingredients.is_empty() && self.instructions.is_empty()
    }
}
