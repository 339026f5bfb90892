//! Terminal rendering of command results.

use std::fmt::{self, Write};

use clinic_format::{Trend, TrendDirection, format_currency, format_naive_date};
use clinic_history::{BillingOverview, PatientHistory, PaymentStatus, PeriodTotals};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crate::commands::{DatasetInfo, DatasetOutcome};

/// Patient details, summary and the procedure history table.
pub fn render_history(history: &PatientHistory) -> String {
    HistoryReport(history).to_string()
}

struct HistoryReport<'a>(&'a PatientHistory);

impl fmt::Display for HistoryReport<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_history(out, self.0)
    }
}

fn write_history(out: &mut impl Write, history: &PatientHistory) -> fmt::Result {
    writeln!(out, "Patient: {}", history.full_name)?;
    writeln!(
        out,
        "Date of birth: {} ({} years)",
        history.date_of_birth, history.age
    )?;
    writeln!(out, "Gender: {}", history.gender)?;
    writeln!(out, "Medical aid: {}", history.medical_aid)?;
    writeln!(
        out,
        "Medical aid number: {} (Dependant code: {})",
        history.medical_aid_number, history.dependant_code
    )?;

    if !history.summary.is_empty() {
        writeln!(out)?;
        writeln!(out, "Summary:")?;
        writeln!(out, "{}", history.summary)?;
    }

    writeln!(out)?;
    if history.procedures.is_empty() {
        return writeln!(
            out,
            "No procedures found. This patient has no recorded procedures at this practice."
        );
    }
    writeln!(out, "Procedure history:")?;
    writeln!(out, "{}", procedures_table(history))
}

fn procedures_table(history: &PatientHistory) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Procedure"),
        header_cell("Location"),
        header_cell("Provider"),
        header_cell("Duration"),
        header_cell("Cost"),
        header_cell("Payment Status"),
        header_cell("Payment Method"),
    ]);
    apply_history_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);

    for line in &history.procedures {
        let procedure = if line.diagnosis.is_empty() {
            line.description.clone()
        } else {
            format!("{}\n{}", line.description, line.diagnosis)
        };
        table.add_row(vec![
            Cell::new(&line.date),
            Cell::new(procedure),
            Cell::new(&line.location),
            Cell::new(&line.provider),
            Cell::new(&line.duration),
            Cell::new(&line.cost),
            status_cell(line.payment_status),
            Cell::new(&line.payment_method),
        ]);
    }
    table
}

/// One row per resource with its record count and columns.
pub fn datasets_table(datasets: &[DatasetInfo]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Resource"),
        header_cell("Required"),
        header_cell("Records"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);

    for info in datasets {
        let required = if info.required {
            Cell::new("yes")
        } else {
            dim_cell("no")
        };
        let (records, columns) = match &info.outcome {
            DatasetOutcome::Loaded { records, columns } => {
                (Cell::new(records), Cell::new(columns.join(", ")))
            }
            DatasetOutcome::Missing if info.required => (
                dim_cell("-"),
                Cell::new("missing").fg(Color::Red).add_attribute(Attribute::Bold),
            ),
            DatasetOutcome::Missing => (dim_cell("-"), dim_cell("not present")),
            DatasetOutcome::Failed(message) => {
                (dim_cell("-"), Cell::new(message).fg(Color::Red))
            }
        };
        table.add_row(vec![
            Cell::new(info.resource)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            required,
            records,
            columns,
        ]);
    }
    table
}

/// Current period against the previous one, with trends.
pub fn billing_table(overview: &BillingOverview) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Measure"),
        header_cell(&period_label(&overview.current)),
        header_cell(&period_label(&overview.previous)),
        header_cell("Trend"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    table.add_row(vec![
        Cell::new("Invoices"),
        Cell::new(overview.current.invoices),
        Cell::new(overview.previous.invoices),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new("Billed"),
        Cell::new(format_currency(overview.current.billed)),
        Cell::new(format_currency(overview.previous.billed)),
        trend_cell(&overview.billed_trend),
    ]);
    table.add_row(vec![
        Cell::new("Paid"),
        Cell::new(format_currency(overview.current.paid)),
        Cell::new(format_currency(overview.previous.paid)),
        trend_cell(&overview.paid_trend),
    ]);
    table.add_row(vec![
        Cell::new("Outstanding (all invoices)").add_attribute(Attribute::Bold),
        Cell::new(format_currency(overview.outstanding)).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

fn period_label(period: &PeriodTotals) -> String {
    format!(
        "{} to {}",
        format_naive_date(period.window.start),
        format_naive_date(period.window.end)
    )
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_history_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 8 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(15)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: PaymentStatus) -> Cell {
    let color = match status {
        PaymentStatus::Paid => Color::Green,
        PaymentStatus::Outstanding => Color::Red,
        PaymentStatus::Pending => Color::Yellow,
    };
    Cell::new(status).fg(color).add_attribute(Attribute::Bold)
}

fn trend_cell(trend: &Trend) -> Cell {
    let (arrow, color) = match trend.direction {
        TrendDirection::Up => ("▲", Color::Green),
        TrendDirection::Down => ("▼", Color::Red),
        TrendDirection::Neutral => ("-", Color::DarkGrey),
    };
    Cell::new(format!("{} {arrow}", trend.value)).fg(color)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasets_table_marks_missing_required() {
        let table = datasets_table(&[
            DatasetInfo {
                resource: "patients.csv",
                required: true,
                outcome: DatasetOutcome::Loaded {
                    records: 3,
                    columns: vec!["Patient ID".to_string(), "Patient First Name".to_string()],
                },
            },
            DatasetInfo {
                resource: "billing.csv",
                required: true,
                outcome: DatasetOutcome::Missing,
            },
            DatasetInfo {
                resource: "doctors.csv",
                required: false,
                outcome: DatasetOutcome::Missing,
            },
        ]);
        let rendered = table.to_string();
        assert!(rendered.contains("Patient ID, Patient First Name"));
        assert!(rendered.contains("missing"));
        assert!(rendered.contains("not present"));
    }

    #[test]
    fn test_trend_cell_shows_direction() {
        let trend = clinic_format::calculate_trend(150.0, 100.0);
        assert_eq!(trend_cell(&trend).content(), "50.0% ▲");
    }
}
