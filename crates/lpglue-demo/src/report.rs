//! Rendering of solve results for people (table) and tools (JSON, NDJSON).

use clap::ValueEnum;
use lpglue_highs::{BasisStatus, ModelStatus, RunStatus, Solution};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Ndjson,
}

/// Value, dual and basis status of one column or row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryReport {
    pub index: usize,
    pub value: f64,
    pub dual: Option<f64>,
    pub basis: Option<&'static str>,
}

/// Outcome of one solve inside a demo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub demo: &'static str,
    pub step: String,
    /// `None` when the session had not been run on this model.
    pub run_status: Option<&'static str>,
    pub run_status_code: Option<i32>,
    pub model_status: &'static str,
    pub model_status_code: i32,
    pub model_status_name: &'static str,
    /// `None` unless the model status is optimal.
    pub objective_value: Option<f64>,
    pub columns: Vec<EntryReport>,
    pub rows: Vec<EntryReport>,
}

impl RunReport {
    /// Report a solution. Values are listed only for an optimal model.
    pub fn from_solution(demo: &'static str, step: impl Into<String>, solution: &Solution) -> Self {
        let mut report =
            RunReport::status_only(demo, step, solution.run_status(), solution.model_status());
        if solution.is_optimal() {
            let basis = solution.basis();
            report.objective_value = Some(solution.objective_value());
            report.columns = entries(
                solution.col_values(),
                solution.col_duals(),
                basis.map(|basis| basis.col_status.as_slice()),
            );
            report.rows = entries(
                solution.row_values(),
                solution.row_duals(),
                basis.map(|basis| basis.row_status.as_slice()),
            );
        }
        report
    }

    /// Report statuses without solution values.
    pub fn status_only(
        demo: &'static str,
        step: impl Into<String>,
        run_status: Option<RunStatus>,
        model_status: ModelStatus,
    ) -> Self {
        RunReport {
            demo,
            step: step.into(),
            run_status: run_status.map(RunStatus::as_str),
            run_status_code: run_status.map(|status| i32::from(status.code())),
            model_status: model_status.as_str(),
            model_status_code: i32::from(model_status.code()),
            model_status_name: model_status.display_name(),
            objective_value: None,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

fn entries(values: &[f64], duals: &[f64], basis: Option<&[BasisStatus]>) -> Vec<EntryReport> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| EntryReport {
            index,
            value,
            dual: duals.get(index).copied(),
            basis: basis
                .and_then(|statuses| statuses.get(index))
                .map(|status| status.as_str()),
        })
        .collect()
}

pub fn render_output(
    format: OutputFormat,
    reports: &[RunReport],
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => {
            print!("{}", format_table(reports));
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(reports)?);
            Ok(())
        }
        OutputFormat::Ndjson => {
            for report in reports {
                println!("{}", serde_json::to_string(report)?);
            }
            Ok(())
        }
    }
}

pub fn format_table(reports: &[RunReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!(
            "[{}] {}: run status = {}; model status = {} ({})\n",
            report.demo,
            report.step,
            format_run_status(report),
            report.model_status_name,
            report.model_status_code,
        ));
        if let Some(objective) = report.objective_value {
            out.push_str(&format!("  objective = {objective:.6}\n"));
        }
        if report.columns.is_empty() && report.rows.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "  {:<6} {:>14} {:>14} {:>10}\n",
            "entry", "value", "dual", "basis"
        ));
        for (label, entries) in [("Col", &report.columns), ("Row", &report.rows)] {
            for entry in entries {
                out.push_str(&format!(
                    "  {:<6} {:>14.6} {:>14} {:>10}\n",
                    format!("{label}{}", entry.index),
                    entry.value,
                    format_option_f64(entry.dual),
                    entry.basis.unwrap_or("-"),
                ));
            }
        }
    }
    out
}

fn format_run_status(report: &RunReport) -> String {
    match (report.run_status, report.run_status_code) {
        (Some(status), Some(code)) => format!("{status} ({code})"),
        _ => "not run".to_string(),
    }
}

fn format_option_f64(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.6}"))
}
