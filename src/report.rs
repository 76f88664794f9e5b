//! Rendu des vues du registre pour le terminal (tables encadrées) ou en JSON.

use crate::fairness::{ScheduleRow, StatsRow};
use crate::ledger::DateRow;
use crate::scheduler::Conflict;
use anyhow::Result;

/// Colonnes optionnelles du planning.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleColumns {
    pub status: bool,
    pub score: bool,
}

impl Default for ScheduleColumns {
    fn default() -> Self {
        Self {
            status: true,
            score: true,
        }
    }
}

/// Permet de choisir le rendu (texte, JSON, ...).
pub trait ReportRenderer {
    fn dates(&self, rows: &[DateRow]) -> Result<String>;
    fn schedule(&self, rows: &[ScheduleRow], columns: ScheduleColumns) -> Result<String>;
    fn stats(&self, caption: &str, rows: &[StatsRow]) -> Result<String>;
    fn conflicts(&self, rows: &[Conflict]) -> Result<String>;
}

/// Tables encadrées façon `+---+`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

impl ReportRenderer for TextReport {
    fn dates(&self, rows: &[DateRow]) -> Result<String> {
        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.date.to_string(),
                    r.dow.clone(),
                    r.on_call_str().to_string(),
                    r.unavailable_str(),
                    r.holidays_str(),
                ]
            })
            .collect();
        Ok(boxed_table(
            None,
            &["DATE", "DOW", "ONCALL", "UNAVAILABLE", "HOLIDAYS"],
            &body,
        ))
    }

    fn schedule(&self, rows: &[ScheduleRow], columns: ScheduleColumns) -> Result<String> {
        let mut headers: Vec<String> = vec!["DATE".into(), "DOW".into(), "ONCALL".into()];
        if let Some(first) = rows.first() {
            for cell in &first.cells {
                if columns.status {
                    headers.push(format!("STATUS {}", cell.person));
                }
                if columns.score {
                    headers.push(format!("SCORE {}", cell.person));
                }
            }
        }

        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                let mut line = vec![
                    r.date.to_string(),
                    r.dow.clone(),
                    r.on_call.as_ref().map(|p| p.to_string()).unwrap_or_default(),
                ];
                for cell in &r.cells {
                    if columns.status {
                        line.push(cell.status.to_string());
                    }
                    if columns.score {
                        line.push(format_score(cell.score));
                    }
                }
                line
            })
            .collect();

        let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
        Ok(boxed_table(None, &headers, &body))
    }

    fn stats(&self, caption: &str, rows: &[StatsRow]) -> Result<String> {
        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.person.to_string(),
                    r.date.to_string(),
                    r.dow.clone(),
                    format_score(r.score),
                    format_score(r.initial),
                    r.on_call.to_string(),
                    r.on_holidays.to_string(),
                    r.unavailable.to_string(),
                    r.last_on_call.map(|d| d.to_string()).unwrap_or_default(),
                    r.status.to_string(),
                ]
            })
            .collect();
        Ok(boxed_table(
            Some(caption),
            &[
                "PERSON",
                "DATE",
                "DOW",
                "SCORE",
                "INITIAL",
                "ONCALL",
                "ONHOLS",
                "UNAVAILABLE",
                "LAST_ONCALL",
                "STATUS",
            ],
            &body,
        ))
    }

    fn conflicts(&self, rows: &[Conflict]) -> Result<String> {
        let body: Vec<Vec<String>> = rows
            .iter()
            .map(|c| {
                vec![
                    c.date.to_string(),
                    c.person.to_string(),
                    c.kind.as_str().to_string(),
                ]
            })
            .collect();
        Ok(boxed_table(None, &["DATE", "PERSON", "KIND"], &body))
    }
}

/// Sortie JSON pour les scripts.
#[cfg(feature = "serde")]
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReport;

#[cfg(feature = "serde")]
impl ReportRenderer for JsonReport {
    fn dates(&self, rows: &[DateRow]) -> Result<String> {
        Ok(serde_json::to_string_pretty(rows)?)
    }

    fn schedule(&self, rows: &[ScheduleRow], _columns: ScheduleColumns) -> Result<String> {
        Ok(serde_json::to_string_pretty(rows)?)
    }

    fn stats(&self, _caption: &str, rows: &[StatsRow]) -> Result<String> {
        Ok(serde_json::to_string_pretty(rows)?)
    }

    fn conflicts(&self, rows: &[Conflict]) -> Result<String> {
        Ok(serde_json::to_string_pretty(rows)?)
    }
}

pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// Table encadrée avec légende optionnelle.
pub fn boxed_table(caption: Option<&str>, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let sep = format!(
        "+-{}-+\n",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{cell:<w$}", w = *w)
            })
            .collect();
        format!("| {} |\n", padded.join(" | "))
    };

    let mut out = String::new();
    if let Some(caption) = caption.filter(|c| !c.is_empty()) {
        out.push_str(caption);
        out.push('\n');
    }
    out.push_str(&sep);
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    out.push_str(&line(&headers));
    out.push_str(&sep);
    for row in rows {
        out.push_str(&line(row));
    }
    out.push_str(&sep);
    out
}
