// ABOUTME: Plain text rendering of a graded report for terminal output
// ABOUTME: One aligned row per pair, grouped under namespace headings

use std::fmt::Write;
use swatchbook_core::Report;
use swatchbook_core::render::EMPTY_CELL;

const HEADERS: [&str; 5] = ["Token", "Background", "Foreground", "Contrast", "Names"];

/// Render `report` as an aligned text table under `title`
pub fn render_text(report: &Report<'_>, title: &str) -> String {
    let mut out = String::new();
    let summary = report.summary();
    let _ = writeln!(
        out,
        "{title} ({} pairs, {} graded, {} pass AA normal text)",
        summary.pairs, summary.graded, summary.normal_text_passing
    );

    if report.is_empty() {
        let _ = writeln!(out, "\nNo color tokens resolved.");
        return out;
    }

    let rows: Vec<(String, [String; 5])> = report
        .rows()
        .map(|(namespace, base_name, row)| {
            let hex = |token: Option<&swatchbook_core::ColorToken>| {
                token.map_or_else(|| EMPTY_CELL.to_string(), |t| t.color().to_hex())
            };
            let names = row
                .pair
                .tokens()
                .map(|t| t.name())
                .collect::<Vec<_>>()
                .join(" / ");
            let contrast = row
                .grade
                .map_or_else(|| EMPTY_CELL.to_string(), |grade| grade.label());
            (
                namespace.to_string(),
                [
                    base_name.to_string(),
                    hex(row.pair.background),
                    hex(row.pair.foreground),
                    contrast,
                    names,
                ],
            )
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for (_, cells) in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut current_namespace: Option<&str> = None;
    for (namespace, cells) in &rows {
        if current_namespace != Some(namespace.as_str()) {
            let _ = writeln!(out, "\n{namespace}");
            push_row(&mut out, &HEADERS.map(String::from), &widths);
            current_namespace = Some(namespace.as_str());
        }
        push_row(&mut out, cells, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "  {}", line.trim_end());
}
