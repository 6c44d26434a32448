/// Render rows as a reStructuredText "simple table".
///
/// Numeric cells are right aligned, everything else is left aligned. Columns
/// are separated by two spaces and framed by `=` rules.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0usize; columns];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = widths[i].max(header.chars().count());
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule = widths
        .iter()
        .map(|w| "=".repeat(*w))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = vec![rule.clone()];
    if !headers.is_empty() {
        let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        lines.push(render_line(&header, &widths));
        lines.push(rule.clone());
    }
    for row in rows {
        lines.push(render_line(row, &widths));
    }
    lines.push(rule);

    lines.join("\n")
}

/// Wrap text in a Markdown code fence so chat clients keep the alignment.
pub fn code_block(body: &str) -> String {
    format!("```\n{}\n```", body)
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            if is_numeric(cell) {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_with_headers() {
        let rows = vec![
            vec!["1".to_string(), "ash".to_string(), "1000".to_string()],
            vec!["2".to_string(), "gary".to_string(), "950".to_string()],
        ];
        let table = render_table(&["Pos", "Nick", "Pts"], &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "===  ====  ====");
        assert_eq!(lines[1], "Pos  Nick  Pts");
        assert_eq!(lines[2], "===  ====  ====");
        assert_eq!(lines[3], "  1  ash   1000");
        assert_eq!(lines[4], "  2  gary   950");
        assert_eq!(lines[5], "===  ====  ====");
    }

    #[test]
    fn test_render_table_without_headers() {
        let rows = vec![vec!["2".to_string(), "Winner not found;".to_string()]];
        let table = render_table(&[], &rows);
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn test_code_block() {
        assert_eq!(code_block("x"), "```\nx\n```");
    }
}
