//! Slide layout switching for the print flow.

use crate::DeckElement;

/// Inline styles that stack every slide, visible and untransformed, one per
/// printed page.
pub const PRINT_LAYOUT: [(&str, &str); 4] = [
    ("position", "relative"),
    ("opacity", "1"),
    ("transform", "none"),
    ("page-break-after", "always"),
];

/// Lay a slide out for printing.
pub fn apply_print_layout<E: DeckElement>(slide: &E) {
    for (property, value) in PRINT_LAYOUT {
        slide.set_style(property, value);
    }
}

/// Return a slide to the stacked on-screen layout.
///
/// Slides other than the visible one are hidden again. The visible slide
/// keeps the opacity it had while printing.
pub fn restore_screen_layout<E: DeckElement>(slide: &E, visible: bool) {
    slide.set_style("position", "absolute");
    if !visible {
        slide.set_style("opacity", "0");
    }
    slide.set_style("page-break-after", "auto");
}
