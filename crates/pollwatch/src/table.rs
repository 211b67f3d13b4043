use pollwatch_core::dashboard::RecentRow;
use pollwatch_core::training::EpochMetrics;

/// Box-drawn table with left-aligned columns of fixed width.
pub struct TableFormatter {
    widths: Vec<usize>,
}

impl TableFormatter {
    pub fn new(widths: &[usize]) -> Self {
        Self {
            widths: widths.to_vec(),
        }
    }

    pub fn render(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut lines = Vec::with_capacity(rows.len() + 4);
        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.row(headers.iter().copied()));
        lines.push(self.border('├', '┼', '┤'));
        for row in rows {
            lines.push(self.row(row.iter().map(String::as_str)));
        }
        lines.push(self.border('└', '┴', '┘'));
        lines.join("\n")
    }

    fn row<'a>(&self, cells: impl Iterator<Item = &'a str>) -> String {
        let cells: Vec<String> = cells
            .zip(&self.widths)
            .map(|(cell, width)| truncate(cell, *width))
            .collect();
        format!("│ {} │", cells.join(" │ "))
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }
}

/// Per-epoch accuracy table printed when a training run completes.
pub fn epoch_table(epochs: &[EpochMetrics]) -> String {
    let rows: Vec<Vec<String>> = epochs
        .iter()
        .map(|e| {
            vec![
                e.epoch.to_string(),
                format!("{:.2}%", e.train_accuracy * 100.0),
                format!("{:.2}%", e.validation_accuracy * 100.0),
            ]
        })
        .collect();

    TableFormatter::new(&[5, 14, 19]).render(
        &["Epoch", "Train accuracy", "Validation accuracy"],
        &rows,
    )
}

pub fn recent_table(rows: &[RecentRow]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.time.clone(),
                format!("{} {}", r.sentiment.icon(), r.sentiment),
            ]
        })
        .collect();

    TableFormatter::new(&[8, 11]).render(&["Time", "Sentiment"], &rows)
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) to safely handle UTF-8 strings
/// including emoji and multi-byte characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
