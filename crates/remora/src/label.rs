//! Label word-wrap decision.

use crate::text::{TextMeasurer, TextStyle, normalized_label_lines};

/// Wrap only when the edge is clearly horizontal and the widest label line
/// would cover more than `wrap_width_ratio` of the path's horizontal extent.
pub(crate) fn should_wrap_label(
    label: &str,
    horizontal_extent: f64,
    vertical_extent: f64,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    wrap_width_ratio: f64,
) -> bool {
    if !(horizontal_extent > vertical_extent * 2.0) {
        return false;
    }
    let widest = normalized_label_lines(label)
        .iter()
        .map(|line| measurer.measure_width(line, style))
        .fold(0.0_f64, f64::max);
    widest > wrap_width_ratio * horizontal_extent
}
