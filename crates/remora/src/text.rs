//! Label text measurement.
//!
//! Hosts with a canvas can inject real measurements; the deterministic
//! default estimates from display columns so headless output is reproducible.

use unicode_width::UnicodeWidthStr as _;

#[derive(Debug, Clone)]
pub struct TextStyle {
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { font_size: 12.0 }
    }
}

pub trait TextMeasurer {
    /// Rendered pixel width of a single line of `text`.
    fn measure_width(&self, text: &str, style: &TextStyle) -> f64;
}

/// Width heuristic: `columns × font_size × char_width_factor + padding`.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    /// 0.0 means the default of 0.75.
    pub char_width_factor: f64,
    /// 0.0 means the default of 8.0.
    pub padding: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure_width(&self, text: &str, style: &TextStyle) -> f64 {
        let factor = if self.char_width_factor == 0.0 {
            0.75
        } else {
            self.char_width_factor
        };
        let padding = if self.padding == 0.0 { 8.0 } else { self.padding };
        let columns = text.width() as f64;
        columns * style.font_size.max(1.0) * factor + padding
    }
}

/// Split a label into lines, honoring both newlines and `<br>` variants the
/// editor's rich-text fields produce.
pub fn normalized_label_lines(text: &str) -> Vec<String> {
    let t = text
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("<br>", "\n");
    let out = t.split('\n').map(|s| s.to_string()).collect::<Vec<_>>();
    if out.is_empty() {
        return vec![String::new()];
    }
    out
}
