//! Flat table and histogram rendering.
//!
//! Every table format takes the same header row and string cells, so the
//! commands build their rows once and pick a renderer by [`OutputFormat`].

use anyhow::Context;
use bookbot_core::OutputFormat;
use bookbot_core::rank::RankedItem;

/// A header row plus body rows, all cells already formatted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names.
    pub headers: Vec<String>,
    /// Body rows; each has one cell per header.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.rows.push(row.into_iter().map(|c| c.to_string()).collect());
    }

    /// Render in one of the table formats.
    ///
    /// # Errors
    ///
    /// Returns an error if CSV encoding fails, or if `format` is not a table format.
    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Csv => self.to_csv(),
            OutputFormat::Md => Ok(self.to_markdown()),
            OutputFormat::Html => Ok(self.to_html()),
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => anyhow::bail!("JSON output is not a table format"),
        }
    }

    /// Aligned plain-text table with a `-+-` separator row.
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let fmt_row = |row: &[String]| {
            row.iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let mut lines = vec![fmt_row(&self.headers)];
        lines.push(
            widths
                .iter()
                .map(|&w| "-".repeat(w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        lines.extend(self.rows.iter().map(|row| fmt_row(row)));
        lines.join("\n")
    }

    /// GitHub-flavored Markdown table.
    pub fn to_markdown(&self) -> String {
        let fmt_row = |row: &[String]| format!("| {} |", row.join(" | "));

        let mut lines = vec![fmt_row(&self.headers)];
        lines.push(format!("| {} |", vec!["---"; self.headers.len()].join(" | ")));
        lines.extend(self.rows.iter().map(|row| fmt_row(row)));
        lines.join("\n")
    }

    /// Single-line HTML table with escaped cells.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<table><thead><tr>");
        for header in &self.headers {
            out.push_str(&format!("<th>{}</th>", escape_html(header)));
        }
        out.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            out.push_str("<tr>");
            for cell in row {
                out.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");
        out
    }

    /// RFC 4180 CSV with a header record.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV writer fails.
    pub fn to_csv(&self) -> anyhow::Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer.into_inner().context("failed to flush CSV output")?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }
}

/// Escape `&`, `<`, `>`, and quotes for HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Printable form of a key. Control characters such as the newline would
/// break line-oriented output, so they are shown escaped.
pub fn display_key(key: &str) -> String {
    if key.chars().any(char::is_control) {
        key.escape_default().to_string()
    } else {
        key.to_string()
    }
}

/// ASCII bar chart of ranked items.
///
/// Each line is the label right-aligned to 12 columns, then a bar of `#`
/// scaled so the largest count spans `width` columns, then the count.
pub fn histogram(items: &[RankedItem], width: usize) -> String {
    let Some(max) = items.iter().map(|item| item.count).max() else {
        return String::new();
    };

    items
        .iter()
        .map(|item| {
            let bar_len = if max == 0 {
                0
            } else {
                (item.count as f64 / max as f64 * width as f64) as usize
            };
            let label = display_key(&item.key);
            format!("{label:>12} | {} {}", "#".repeat(bar_len), item.count)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(["path", "word", "count"]);
        table.push(["a.txt", "whale", "12"]);
        table.push(["long/path.txt", "sea", "3"]);
        table
    }

    fn item(key: &str, count: u64) -> RankedItem {
        RankedItem {
            key: key.to_string(),
            count,
        }
    }

    #[test]
    fn text_table_aligns_columns() {
        let text = sample().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "path          | word  | count");
        assert_eq!(lines[1], "--------------+-------+------");
        assert_eq!(lines[2], "a.txt         | whale | 12   ");
        assert_eq!(lines[3], "long/path.txt | sea   | 3    ");
    }

    #[test]
    fn text_table_without_rows() {
        let table = Table::new(["a", "bb"]);
        assert_eq!(table.to_text(), "a | bb\n--+---");
    }

    #[test]
    fn markdown_table() {
        let md = sample().to_markdown();
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[0], "| path | word | count |");
        assert_eq!(lines[1], "| --- | --- | --- |");
        assert_eq!(lines[2], "| a.txt | whale | 12 |");
    }

    #[test]
    fn html_table_escapes_cells() {
        let mut table = Table::new(["key"]);
        table.push(["<b>&"]);
        assert_eq!(
            table.to_html(),
            "<table><thead><tr><th>key</th></tr></thead><tbody><tr><td>&lt;b&gt;&amp;</td></tr></tbody></table>"
        );
    }

    #[test]
    fn csv_quotes_when_needed() {
        let mut table = Table::new(["char", "count"]);
        table.push([",", "4"]);
        table.push(["\"", "1"]);
        let csv = table.to_csv().unwrap();
        assert_eq!(csv, "char,count\r\n\",\",4\r\n\"\"\"\",1\r\n");
    }

    #[test]
    fn json_is_not_a_table_format() {
        assert!(sample().render(OutputFormat::Json).is_err());
        assert!(sample().render(OutputFormat::Md).is_ok());
    }

    #[test]
    fn histogram_scales_to_width() {
        let out = histogram(&[item("e", 10), item("t", 5), item("z", 0)], 10);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "           e | ########## 10");
        assert_eq!(lines[1], "           t | ##### 5");
        assert_eq!(lines[2], "           z |  0");
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(histogram(&[], 50).is_empty());
    }

    #[test]
    fn control_keys_are_escaped() {
        assert_eq!(display_key("\n"), "\\n");
        assert_eq!(display_key("whale"), "whale");
    }
}
