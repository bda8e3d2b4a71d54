use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use crate::state::{AppState, TransferRow};

pub struct ExportReport {
    pub transfers: usize,
    pub squad: usize,
}

/// Writes the current squad and its budget-filtered transfer plan to an
/// `.xlsx` workbook.
pub fn export_squad_plan(path: &Path, state: &AppState) -> Result<ExportReport> {
    let plan = state.squad_plan();
    let plan_rows = plan_rows(&plan.rows);
    let squad_rows = squad_rows(state);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Transfer Plan")?;
        write_rows(sheet, &plan_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Squad")?;
        write_rows(sheet, &squad_rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    let report = ExportReport {
        transfers: plan_rows.len().saturating_sub(1),
        squad: squad_rows.len().saturating_sub(1),
    };
    info!(path = %path.display(), transfers = report.transfers, "exported transfer plan");
    Ok(report)
}

pub fn plan_rows(rows: &[TransferRow<'_>]) -> Vec<Vec<String>> {
    let mut out = vec![vec![
        "Player Out".to_string(),
        "Out Pos".to_string(),
        "Out Form".to_string(),
        "Out FDR".to_string(),
        "Player In".to_string(),
        "In Team".to_string(),
        "In Form".to_string(),
        "In FDR".to_string(),
        "£ Cost".to_string(),
        "xP Gain".to_string(),
        "Net Gain".to_string(),
        "Rating".to_string(),
    ]];
    for row in rows {
        let t = &row.transfer;
        out.push(vec![
            t.player_out().name.clone(),
            t.player_out().position.to_string(),
            format!("{:.2}", row.out_analysis.form),
            format!("{:.2}", row.out_analysis.average_difficulty),
            t.player_in().name.clone(),
            t.player_in().team.clone(),
            format!("{:.2}", row.in_analysis.form),
            format!("{:.2}", row.in_analysis.average_difficulty),
            t.price_delta().to_string(),
            format!("{:.1}", t.expected_points_gain()),
            format!("{:.1}", t.net_point_gain()),
            t.recommendation().label().to_string(),
        ]);
    }
    out
}

fn squad_rows(state: &AppState) -> Vec<Vec<String>> {
    let eval = state.evaluator();
    let mut out = vec![vec![
        "Player".to_string(),
        "Team".to_string(),
        "Pos".to_string(),
        "Price".to_string(),
        "Points".to_string(),
        "Form".to_string(),
        "Status".to_string(),
        "xP".to_string(),
    ]];
    for p in state.squad_players() {
        out.push(vec![
            p.name.clone(),
            p.team.clone(),
            p.position.to_string(),
            p.price.to_string(),
            p.points.to_string(),
            p.form.map(|f| format!("{f:.1}")).unwrap_or_else(|| "-".to_string()),
            p.status.as_ref().map(|s| s.code().to_string()).unwrap_or_default(),
            format!("{:.1}", eval.expected_points(p)),
        ]);
    }
    out
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
