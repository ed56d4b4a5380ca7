//! Assembled result tables and their text and HTML renderings.

use unicode_width::UnicodeWidthStr;

use crate::scale::Scaler;

/// One table row: a name cell followed by value cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Cell contents, leftmost first.
    pub cols: Vec<String>,
}

impl Row {
    /// Creates a row from its initial cells.
    pub fn new<I, S>(cols: I) -> Row
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Row {
            cols: cols.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends a cell.
    pub fn add(&mut self, col: impl Into<String>) {
        self.cols.push(col.into());
    }

    /// Removes trailing empty cells.
    pub fn trim(&mut self) {
        while self.cols.last().is_some_and(|c| c.is_empty()) {
            self.cols.pop();
        }
    }
}

/// Formats a summarized value as `mean ±spread%`, where the spread is
/// the larger relative distance from the mean to either extreme. A zero
/// mean is printed bare, padded to keep columns steady.
pub fn format_stat(mean: f64, min: f64, max: f64, scaler: &Scaler) -> String {
    let mut spread = 1.0 - min / mean;
    if max / mean - 1.0 > spread {
        spread = max / mean - 1.0;
    }
    let s = scaler.format(mean);
    if mean == 0.0 {
        format!("{s}     ")
    } else {
        format!("{s} ±{:>3}", format!("{:.0}%", spread * 100.0))
    }
}

fn pad(buf: &mut String, n: usize) {
    for _ in 0..n {
        buf.push(' ');
    }
}

/// Renders tables as left-aligned plain text. Column widths are shared
/// across all tables and measured in display cells, not bytes, so
/// scaled values like `99.9µs` line up.
pub fn render_text(tables: &[Vec<Row>]) -> String {
    let ncol = tables
        .iter()
        .flatten()
        .map(|r| r.cols.len())
        .max()
        .unwrap_or(0);
    let mut max = vec![0usize; ncol];
    for row in tables.iter().flatten() {
        for (i, s) in row.cols.iter().enumerate() {
            max[i] = max[i].max(s.width());
        }
    }

    let mut buf = String::new();
    for (ti, table) in tables.iter().enumerate() {
        if ti > 0 {
            buf.push('\n');
        }
        let Some((hdr, rows)) = table.split_first() else {
            continue;
        };

        for (i, s) in hdr.cols.iter().enumerate() {
            if i == 0 {
                buf.push_str(s);
                pad(&mut buf, max[0].saturating_sub(s.width()));
            } else if i == hdr.cols.len() - 1 {
                buf.push_str("  ");
                buf.push_str(s);
            } else {
                buf.push_str("  ");
                buf.push_str(s);
                pad(&mut buf, max[i].saturating_sub(s.width()));
            }
        }
        buf.push('\n');

        for row in rows {
            for (i, s) in row.cols.iter().enumerate() {
                if i == 0 {
                    buf.push_str(s);
                    pad(&mut buf, max[0].saturating_sub(s.width()));
                } else if i == row.cols.len() - 1 && s.starts_with('(') {
                    // p-values read better left-aligned.
                    buf.push_str("  ");
                    buf.push_str(s);
                } else {
                    buf.push_str("  ");
                    pad(&mut buf, max[i].saturating_sub(s.width()));
                    buf.push_str(s);
                }
            }
            buf.push('\n');
        }
    }
    buf
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders tables as HTML `<table class='benchstat'>` elements with a
/// style line that right-aligns the value columns.
pub fn render_html(tables: &[Vec<Row>]) -> String {
    let mut buf = String::new();
    for (ti, table) in tables.iter().enumerate() {
        if ti > 0 {
            buf.push('\n');
        }
        buf.push_str(
            "<style>.benchstat tbody td:nth-child(1n+2) { text-align: right; padding: 0em 1em; }</style>\n",
        );
        buf.push_str("<table class='benchstat'>\n");
        let mut print_row = |row: &Row, tag: &str| {
            buf.push_str("<tr>");
            for cell in &row.cols {
                buf.push_str(&format!("<{tag}>{}</{tag}>", escape_html(cell)));
            }
            buf.push('\n');
        };
        if let Some((hdr, rows)) = table.split_first() {
            print_row(hdr, "th");
            for row in rows {
                print_row(row, "td");
            }
        }
        buf.push_str("</table>\n");
    }
    buf
}
