/// Widest a cell may grow before it is truncated.
pub const MAX_CELL_WIDTH: usize = 48;

/// Render an aligned table. Numeric cells are right-aligned.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                let text = truncate(cell, *width);
                pad(&text, *width, looks_numeric(&text))
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn truncate(value: &str, width: usize) -> String {
    let single_line = value.replace('\n', " ");
    if single_line.chars().count() <= width {
        return single_line;
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = single_line.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_cells() {
        let long = "x".repeat(MAX_CELL_WIDTH + 10);
        let out = truncate(&long, MAX_CELL_WIDTH);
        assert_eq!(out.chars().count(), MAX_CELL_WIDTH);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn newlines_flattened() {
        assert_eq!(truncate("a\nb", 10), "a b");
    }

    #[test]
    fn numbers_right_aligned() {
        let out = render_table(&["score"], &[vec!["7".into()], vec!["-12".into()]]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[2], "    7");
        assert_eq!(lines[3], "  -12");
    }
}
