use std::fmt;

use clap::ValueEnum;
use console::{pad_str, Alignment};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::format::format_currency;

// Baseline column widths for the padded format. Each nesting level of a
// data row gives up two columns of caption width and two columns of value
// margin, so a child row's value column sits exactly two columns left of
// its parent's.
const CAPTION_WIDTH: usize = 54;
const DATA_VALUE_WIDTH: usize = 18;
const TOTAL_VALUE_WIDTH: usize = 22;

/// Classification of one report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStyle {
    /// Section title.
    Header,
    /// Subtotal or total line.
    Summary,
    /// Leaf account amount.
    Data,
}

/// One report line as returned by the server. Rows arrive pre-ordered in
/// display order; they are only ever filtered and formatted, never
/// reordered.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRow {
    pub caption: String,
    #[serde(default)]
    pub value: Decimal,
    pub style: RowStyle,
    #[serde(default)]
    pub depth: u32,
}

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Padded,
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Padded => "padded",
            Self::Csv => "csv",
        };
        write!(f, "{name}")
    }
}

/// Depth and zero-value filtering, order preserving.
///
/// Header and summary rows are always retained, so section totals still
/// print when every one of their children is filtered out.
pub fn filter_rows(rows: Vec<ReportRow>, max_depth: u32) -> Vec<ReportRow> {
    rows.into_iter()
        .filter(|row| accept_row(row, max_depth))
        .collect()
}

fn accept_row(row: &ReportRow, max_depth: u32) -> bool {
    match row.style {
        RowStyle::Data => row.depth <= max_depth && !row.value.is_zero(),
        RowStyle::Header | RowStyle::Summary => true,
    }
}

/// Render rows into output lines, one per row, in input order.
pub fn render(rows: &[ReportRow], format: ReportFormat) -> Vec<String> {
    rows.iter()
        .map(|row| match format {
            ReportFormat::Padded => render_padded(row),
            ReportFormat::Csv => render_csv(row),
        })
        .collect()
}

// Captions are written as-is: a caption containing a comma is not quoted.
fn render_csv(row: &ReportRow) -> String {
    format!("{},{}", row.caption, row.value)
}

fn render_padded(row: &ReportRow) -> String {
    let depth = row.depth as usize;
    let (left_pad, caption_width, value_width) = match row.style {
        RowStyle::Data => (
            (depth + 1) * 2,
            CAPTION_WIDTH.saturating_sub(2 * depth),
            DATA_VALUE_WIDTH.saturating_sub(2 * depth),
        ),
        RowStyle::Header | RowStyle::Summary => (0, CAPTION_WIDTH, TOTAL_VALUE_WIDTH),
    };

    // Right-align on the integer part so the fraction keeps its natural
    // width and decimal points line up within a level.
    let currency = format_currency(row.value);
    let (whole, fraction) = match currency.rfind('.') {
        Some(at) => currency.split_at(at),
        None => (currency.as_str(), ""),
    };

    format!(
        "{}{}{}{}",
        " ".repeat(left_pad),
        pad_str(&row.caption, caption_width, Alignment::Left, None),
        pad_str(whole, value_width, Alignment::Right, None),
        fraction,
    )
}
