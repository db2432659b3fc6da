use crate::reporting::model::ScanResult;
use unicode_width::UnicodeWidthStr;

// ==============================
// BOX CONFIGURATION
// ==============================

const BOX_WIDTH: usize = 70;
const INNER_WIDTH: usize = BOX_WIDTH - 2;

fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn top_border() -> String {
    format!("╔{}╗", "═".repeat(INNER_WIDTH))
}

fn middle_border() -> String {
    format!("╠{}╣", "═".repeat(INNER_WIDTH))
}

fn bottom_border() -> String {
    format!("╚{}╝", "═".repeat(INNER_WIDTH))
}

/// Left-aligned box line (emoji-safe). Over-long content is cut with an ellipsis.
fn box_line(content: &str) -> String {
    let mut safe_content = format!(" {} ", content);
    if visual_width(&safe_content) > INNER_WIDTH {
        safe_content = format!(" {} ", truncate(content, INNER_WIDTH - 3));
    }
    let width = visual_width(&safe_content);

    let padding = INNER_WIDTH.saturating_sub(width);
    format!("║{}{}║", safe_content, " ".repeat(padding))
}

fn box_line_centered(content: &str) -> String {
    let safe_content = format!(" {} ", content);
    let width = visual_width(&safe_content);

    if width >= INNER_WIDTH {
        return box_line(content);
    }

    let remaining = INNER_WIDTH - width;
    let left = remaining / 2;
    let right = remaining - left;

    format!(
        "║{}{}{}║",
        " ".repeat(left),
        safe_content,
        " ".repeat(right)
    )
}

fn truncate(s: &str, max_width: usize) -> String {
    let mut out = String::new();
    for ch in s.chars() {
        let candidate = format!("{}{}", out, ch);
        if visual_width(&candidate) + 1 > max_width {
            out.push('…');
            return out;
        }
        out = candidate;
    }
    out
}

// ==============================
// SUMMARY RENDERER
// ==============================

pub fn render_to_string(results: &[ScanResult], output_path: &str) -> String {
    let mut lines = Vec::new();

    let vulnerable: Vec<&ScanResult> = results.iter().filter(|r| r.is_vulnerable()).collect();

    lines.push(top_border());
    lines.push(box_line_centered("SQLMAP BATCH COMPLETE"));
    lines.push(middle_border());
    lines.push(box_line(&format!("Targets scanned: {}", results.len())));
    lines.push(box_line(&format!("Vulnerable:      {}", vulnerable.len())));
    lines.push(box_line(&format!(
        "Not vulnerable:  {}",
        results.len() - vulnerable.len()
    )));
    lines.push(box_line(&format!("Report:          {}", output_path)));

    if !vulnerable.is_empty() {
        lines.push(middle_border());
        for r in &vulnerable {
            lines.push(box_line(&format!("[+] {} ({})", r.target, r.param)));
            if !r.dbms.is_empty() {
                lines.push(box_line(&format!("    DBMS: {}", r.dbms)));
            }
            lines.push(box_line(&format!("    Techniques: {}", r.technique_count())));
        }
    }

    lines.push(bottom_border());
    lines.join("\n")
}

pub fn render(results: &[ScanResult], output_path: &str) {
    println!("\n{}\n", render_to_string(results, output_path));
}
