//! Colored terminal summary

use std::io::Write;

use anyhow::Result;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::engine::report::CompareReport;
use crate::engine::CompareOutcome;
use crate::model::Dataset;

/// Renders a human-readable comparison summary to stdout
pub struct TerminalRenderer {
    color_choice: ColorChoice,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            color_choice: ColorChoice::Auto,
        }
    }

    pub fn with_color_choice(color_choice: ColorChoice) -> Self {
        Self { color_choice }
    }

    pub fn render(
        &self,
        outcome: &CompareOutcome,
        base_only: &Dataset,
        compare_only: &Dataset,
    ) -> Result<()> {
        let mut out = StandardStream::stdout(self.color_choice);

        match outcome {
            CompareOutcome::Identical => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                writeln!(out, "Datasets are identical under the configured join keys.")?;
                out.reset()?;
            }
            CompareOutcome::Different(report) => {
                self.write_counts(&mut out, report, base_only, compare_only)?;
                writeln!(out)?;
                self.write_discrepancies(&mut out, report)?;
            }
        }

        self.write_row_set(&mut out, "Rows only in base", base_only)?;
        self.write_row_set(&mut out, "Rows only in compare", compare_only)?;
        Ok(())
    }

    fn write_counts(
        &self,
        out: &mut StandardStream,
        report: &CompareReport,
        base_only: &Dataset,
        compare_only: &Dataset,
    ) -> Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, "{} cell discrepancies", report.discrepancies.len())?;
        out.reset()?;
        writeln!(
            out,
            " across {} row pairs ({} base-only, {} compare-only rows)",
            report.pairs.len(),
            base_only.count(),
            compare_only.count()
        )?;
        Ok(())
    }

    fn write_discrepancies(&self, out: &mut StandardStream, report: &CompareReport) -> Result<()> {
        let mut table = vec![report.header()];
        table.extend(
            report
                .discrepancies
                .iter()
                .map(CompareReport::record_fields),
        );
        write!(out, "{}", format_table(&table))?;
        Ok(())
    }

    fn write_row_set(&self, out: &mut StandardStream, title: &str, rows: &Dataset) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        writeln!(out)?;
        writeln!(out, "{} ({}):", title, rows.count())?;
        let mut table = vec![rows.columns().to_vec()];
        table.extend(rows.collect_rows().iter().map(|row| {
            row.cells
                .iter()
                .map(|c| c.display().into_owned())
                .collect::<Vec<_>>()
        }));
        write!(out, "{}", format_table(&table))?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Column-aligned plain table: header, separator rule, data rows
fn format_table(data: &[Vec<String>]) -> String {
    let Some(header) = data.first() else {
        return String::new();
    };
    let mut widths = vec![0usize; header.len()];
    for row in data {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut output = String::new();
    for (row_idx, row) in data.iter().enumerate() {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:width$}", cell, width = widths.get(i).copied().unwrap_or(0)))
            .collect();
        output.push_str("  ");
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
        if row_idx == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            output.push_str("  ");
            output.push_str(rule.join("  ").trim_end());
            output.push('\n');
        }
    }
    output
}
