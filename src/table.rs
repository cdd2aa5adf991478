use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Renders an elastic, space-padded table. `aligns` may be shorter than the
/// header; missing entries default to left alignment.
pub fn render_table(headers: &[String], rows: &[Vec<String>], aligns: &[Align]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths, aligns));

    let separator = widths
        .iter()
        .map(|w| "-".repeat((*w).max(1)))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator, &widths, &[]));

    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths, aligns));
    }

    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>], aligns: &[Align]) {
    print!("{}", render_table(headers, rows, aligns));
}

fn format_row(values: &[String], widths: &[usize], aligns: &[Align]) -> String {
    let cells = values
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(idx, (value, width))| {
            let sanitized = sanitize_cell(value);
            let padding = " ".repeat(width.saturating_sub(display_width(&sanitized)));
            match aligns.get(idx).copied().unwrap_or_default() {
                Align::Left => format!("{sanitized}{padding}"),
                Align::Right => format!("{padding}{sanitized}"),
            }
        })
        .collect::<Vec<_>>();
    cells.join("  ").trim_end().to_string()
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
