//! Plain-text bar charts written next to the JSON chart data.

use std::fmt::Write as _;

pub const DEFAULT_BAR_WIDTH: usize = 40;
const BAR_GLYPH: char = '#';
const HIGHLIGHT_MARK: &str = "*";

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub display: String,
    pub highlight: bool,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64, display: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            display: display.into(),
            highlight: false,
        }
    }

    pub fn highlighted(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }
}

/// Horizontal bars scaled so the largest value spans `width` glyphs.
pub fn render_bar_chart(title: &str, bars: &[Bar], width: usize) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{title}");
    let _ = writeln!(output, "{}", "=".repeat(title.chars().count()));

    let label_width = bars
        .iter()
        .map(|bar| bar.label.chars().count())
        .max()
        .unwrap_or(0);
    let max_value = bars
        .iter()
        .map(|bar| bar.value)
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max);

    for bar in bars {
        let length = if max_value > 0.0 && bar.value.is_finite() && bar.value > 0.0 {
            ((bar.value / max_value) * width as f64).round().max(1.0) as usize
        } else {
            0
        };
        let mark = if bar.highlight { HIGHLIGHT_MARK } else { "" };
        let line = format!(
            "{label:<label_width$} | {bars} {display}{mark}",
            label = bar.label,
            bars = BAR_GLYPH.to_string().repeat(length),
            display = bar.display,
        );
        let _ = writeln!(output, "{}", line.trim_end());
    }

    if bars.iter().any(|bar| bar.highlight) {
        let _ = writeln!(output);
        let _ = writeln!(output, "{HIGHLIGHT_MARK} highest value");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_largest_value() {
        let bars = vec![
            Bar::new("2019", 2.0, "2").highlighted(true),
            Bar::new("2021", 1.0, "1"),
        ];
        let chart = render_bar_chart("Releases", &bars, 10);
        let lines = chart.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Releases");
        assert_eq!(lines[1], "========");
        assert_eq!(lines[2], "2019 | ########## 2*");
        assert_eq!(lines[3], "2021 | ##### 1");
        assert_eq!(lines.last(), Some(&"* highest value"));
    }

    #[test]
    fn zero_values_render_without_bars() {
        let chart = render_bar_chart("Split", &[Bar::new("Free", 0.0, "0.00%")], 10);
        assert!(chart.contains("Free |  0.00%"));
        assert!(!chart.contains("highest value"));
    }
}
