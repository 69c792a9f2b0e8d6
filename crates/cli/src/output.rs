//! Plain-text tables for terminal listings.

use std::io::{self, Write};

/// Column-aligned table. Widths count characters, not bytes, so accented
/// labels line up.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Write the table, or `empty` when there are no rows.
    ///
    /// # Errors
    ///
    /// Returns the writer's error.
    pub fn write_to(&self, out: &mut impl Write, empty: &str) -> io::Result<()> {
        if self.is_empty() {
            return writeln!(out, "{empty}");
        }
        let widths = self.widths();
        let line = |cells: &mut dyn Iterator<Item = &str>| {
            cells
                .zip(&widths)
                .map(|(cell, width)| {
                    let pad = width.saturating_sub(cell.chars().count());
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };
        writeln!(out, "{}", line(&mut self.headers.iter().copied()))?;
        writeln!(
            out,
            "{}",
            widths
                .iter()
                .map(|w| "─".repeat(*w))
                .collect::<Vec<_>>()
                .join("  ")
        )?;
        for row in &self.rows {
            writeln!(out, "{}", line(&mut row.iter().map(String::as_str)))?;
        }
        Ok(())
    }

    /// Write the table to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout is closed.
    pub fn print(&self, empty: &str) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock(), empty)
    }
}

/// Aligned `label  value` lines.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn print_pairs(pairs: &[(&str, String)]) -> io::Result<()> {
    let width = pairs
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or_default();
    let mut out = io::stdout().lock();
    for (label, value) in pairs {
        let pad = width.saturating_sub(label.chars().count());
        writeln!(out, "{label}{}  {value}", " ".repeat(pad))?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_align_on_characters() {
        let mut table = Table::new(&["Entreprise", "Total"]);
        table.row(vec!["Société Générale".to_string(), "1 500 000 FCFA".to_string()]);
        table.row(vec!["Orange".to_string(), "0 FCFA".to_string()]);

        let mut out = Vec::new();
        table.write_to(&mut out, "Aucun client").unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Entreprise        Total");
        assert_eq!(lines[2], "Société Générale  1 500 000 FCFA");
        assert_eq!(lines[3], "Orange            0 FCFA");
    }

    #[test]
    fn test_empty_table_prints_placeholder() {
        let mut out = Vec::new();
        Table::new(&["Nom"]).write_to(&mut out, "Aucun espace").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Aucun espace\n");
    }
}
