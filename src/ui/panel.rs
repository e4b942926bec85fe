//! Bordered text panel for agent answers

use console::{Style, measure_text_width};

/// Render `body` inside a rounded box titled `title`, at most `max_width` columns wide.
///
/// Lines wider than the box are wrapped by character.
pub fn render_panel(title: &str, body: &str, border: &Style, max_width: usize) -> String {
    let title_width = measure_text_width(title);
    let widest_line = body.lines().map(measure_text_width).max().unwrap_or(0);
    let inner = widest_line
        .max(title_width + 2)
        .min(max_width.saturating_sub(4).max(title_width + 2));

    let mut out = String::new();
    let top_fill = "─".repeat(inner + 2 - title_width - 3);
    out.push_str(&format!(
        "{} {} {}\n",
        border.apply_to("╭─"),
        console::style(title).bold(),
        border.apply_to(format!("{top_fill}╮"))
    ));

    let lines: Vec<&str> = if body.is_empty() { vec![""] } else { body.lines().collect() };
    for line in lines {
        for row in wrap_line(line, inner) {
            let padding = " ".repeat(inner - measure_text_width(&row));
            out.push_str(&format!(
                "{} {row}{padding} {}\n",
                border.apply_to("│"),
                border.apply_to("│")
            ));
        }
    }

    let bottom_fill = "─".repeat(inner + 2);
    out.push_str(&border.apply_to(format!("╰{bottom_fill}╯")).to_string());
    out
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if measure_text_width(line) <= width {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    let mut buf = [0u8; 4];
    for ch in line.chars() {
        let ch_width = measure_text_width(ch.encode_utf8(&mut buf));
        if current_width + ch_width > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }
    rows.push(current);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;

    #[test]
    fn every_row_has_the_same_width() {
        let panel = render_panel("Agent Response", "short\na somewhat longer line", &Style::new(), 80);
        let plain = strip_ansi_codes(&panel).to_string();
        let widths: Vec<usize> = plain.lines().map(measure_text_width).collect();

        assert_eq!(plain.lines().count(), 4);
        assert!(plain.starts_with("╭─ Agent Response ─"));
        assert!(widths.iter().all(|width| *width == widths[0]));
    }

    #[test]
    fn long_lines_are_wrapped_to_the_maximum_width() {
        let body = "x".repeat(50);
        let panel = render_panel("Agent Response", &body, &Style::new(), 30);
        let plain = strip_ansi_codes(&panel).to_string();

        assert!(plain.lines().all(|line| measure_text_width(line) <= 30));
        assert_eq!(plain.matches('x').count(), 50);
    }

    #[test]
    fn empty_body_still_renders_a_box() {
        let panel = render_panel("Agent Response", "", &Style::new(), 80);
        assert_eq!(strip_ansi_codes(&panel).lines().count(), 3);
    }
}
