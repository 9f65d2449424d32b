//! Plain-text rendering of a laid-out timeline.

use super::layout::Timeline;
use std::fmt::Write as _;
use unicode_width::UnicodeWidthStr;

const LABEL_WIDTH: usize = 16;

/// Render the complete summary to a string.
pub fn render(timeline: &Timeline) -> String {
    let mut out = String::new();

    render_header(&mut out);
    render_rows(&mut out, timeline);
    render_footer(&mut out, timeline);

    out
}

fn render_header(out: &mut String) {
    out.push_str("============================================================\n");
    out.push_str("                    TASK TIMELINE\n");
    out.push_str("============================================================\n");
}

fn render_rows(out: &mut String, timeline: &Timeline) {
    writeln!(
        out,
        "{:>4}  {}  {:>9} {:>9} {:>8}  {}",
        "Row",
        pad("Label", LABEL_WIDTH),
        "Start(s)",
        "End(s)",
        "Dur(s)",
        "After"
    )
    .unwrap();
    writeln!(
        out,
        "{:>4}  {}  {:>9} {:>9} {:>8}  {}",
        "----",
        "-".repeat(LABEL_WIDTH),
        "---------",
        "---------",
        "--------",
        "-----"
    )
    .unwrap();

    for row in &timeline.rows {
        let after = timeline
            .predecessor_label(row)
            .map(|label| truncate(label, LABEL_WIDTH))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "{:>4}  {}  {:>9.3} {:>9.3} {:>8.3}  {}",
            row.row,
            pad(&truncate(&row.label, LABEL_WIDTH), LABEL_WIDTH),
            row.start,
            row.end,
            row.end - row.start,
            after
        )
        .unwrap();
    }
}

fn render_footer(out: &mut String, timeline: &Timeline) {
    out.push('\n');
    writeln!(
        out,
        "{} tasks, {} connections, chart spans {}s",
        timeline.rows.len(),
        timeline.connection_count(),
        timeline.extent
    )
    .unwrap();
}

/// Pad by display width, so wide characters keep the columns aligned.
fn pad(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - current))
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
