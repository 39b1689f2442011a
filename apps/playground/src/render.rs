use std::fmt::Write as _;

use client_core::ParsedRecipe;
use recipe_text::to_clipboard_text;

fn strip_bold(text: &str) -> String {
    text.replace("**", "")
}

/// Terminal layout of a generated recipe.
///
/// Falls back to the plain-text rendering of the raw answer when neither list
/// could be recovered.
pub fn render_recipe(raw_recipe_text: &str) -> String {
    let recipe = ParsedRecipe::parse(raw_recipe_text);
    let mut out = String::new();

    let _ = writeln!(out, "{}", recipe.title);
    let _ = writeln!(out, "{}", "=".repeat(recipe.title.chars().count()));

    if recipe.is_unstructured() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", to_clipboard_text(raw_recipe_text));
        return out;
    }

    if !recipe.ingredients.is_empty() {
        let _ = writeln!(out, "\nIngredients");
        for item in &recipe.ingredients {
            let _ = writeln!(out, "  - {}", strip_bold(item));
        }
    }

    if !recipe.instructions.is_empty() {
        let _ = writeln!(out, "\nInstructions");
        for (index, step) in recipe.instructions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", index + 1, strip_bold(step));
        }
    }

    out
}
