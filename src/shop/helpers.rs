//! Shop Helpers
//!
//! Message formatting shared by the shop state and its HTTP handlers.

use super::models::CartLine;

/// Characters of a product title kept in notification messages.
const TITLE_PREVIEW_CHARS: usize = 20;

/// First 20 characters of `title` followed by `...`.
///
/// The suffix is added even when the title is shorter.
pub fn title_preview(title: &str) -> String {
    let head: String = title.chars().take(TITLE_PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x Backpack, 1x Jacket"`.
pub fn format_item_summary(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|line| format!("{}x {}", line.quantity, line.product.title))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sum of `price * quantity` over all lines.
pub fn cart_total(lines: &[CartLine]) -> f64 {
    lines.iter().map(CartLine::line_total).sum()
}

/// Sum of quantities over all lines, saturating at `i64::MAX`.
pub fn cart_count(lines: &[CartLine]) -> i64 {
    lines
        .iter()
        .fold(0i64, |count, line| count.saturating_add(line.quantity))
}
