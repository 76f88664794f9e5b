//! Format texte du registre : tables séparées par `|`, précédées de
//! commentaires libres (`#`) recopiés à l'identique.
//!
//! ```text
//! # notes
//! PERSON | NAME | INITIAL_SCORE | RECURRING_WFH_DAYS
//! ------ | ---- | ------------- | ------------------
//! xxx    | Mr X | 0             | Mon
//!
//! DATE     | DOW | ONCALL | UNAVAILABLE | HOLIDAYS
//! -------- | --- | ------ | ----------- | --------
//! 20171127 | Mon | xxx    |             |
//! ```

use crate::calendar::Day;
use crate::ledger::{is_valid_id, Ledger, LedgerError};
use crate::model::{MarkKind, Person, PersonId, WfhDays};
use csv::{ReaderBuilder, Trim};
use thiserror::Error;
use tracing::{debug, warn};

pub const PERSON_HEADERS: [&str; 4] = ["PERSON", "NAME", "INITIAL_SCORE", "RECURRING_WFH_DAYS"];
pub const DATE_HEADERS: [&str; 5] = ["DATE", "DOW", "ONCALL", "UNAVAILABLE", "HOLIDAYS"];

/// Fichier d'exemple chargeable tel quel (`sample-file`).
pub const SAMPLE_FILE: &str = "\
# Tableau d'astreinte de l'équipe.
# Les lignes qui commencent par '#' sont conservées telles quelles.
# Jours de télétravail possibles : Mon Tue Wed Thu Fri

PERSON | NAME       | INITIAL_SCORE | RECURRING_WFH_DAYS
------ | ---------- | ------------- | ------------------
alan   | Alan Smith | 0             | Mon
bert   | Bert Jones | 0             | Tue Thu
cloe   | Cloe Brown | 0.5           | Fri

DATE     | DOW | ONCALL | UNAVAILABLE | HOLIDAYS
-------- | --- | ------ | ----------- | --------
20171120 | Mon | bert   |             |
20171121 | Tue | alan   |             |
20171122 | Wed | cloe   | alan        |
20171123 | Thu | alan   |             | bert
20171124 | Fri | alan   |             | bert
";

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("line {line}: {reason}: {content:?}")]
    Malformed {
        line: u64,
        content: String,
        reason: String,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Persons,
    Dates,
    Unknown,
}

/// Lit un registre. Toute ligne de données mal formée est une erreur fatale.
pub fn parse_ledger(text: &str) -> Result<Ledger, CodecError> {
    let mut ledger = Ledger::new();
    // `\r` éventuel conservé : le commentaire est réécrit octet pour octet.
    for line in text.split('\n').filter(|l| l.starts_with('#')) {
        ledger.push_comment(line);
    }

    let mut rdr = ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut section = Section::None;
    for rec in rdr.records() {
        let rec = rec?;
        let (line, content) = locate(text, rec.position().map(|p| p.byte()));
        let fields: Vec<&str> = rec.iter().collect();
        let malformed = |reason: String| CodecError::Malformed {
            line,
            content: content.to_string(),
            reason,
        };

        if fields.iter().all(|f| f.is_empty()) || is_separator(&fields) {
            continue;
        }
        if is_header(&fields) {
            section = match fields[0] {
                "PERSON" => Section::Persons,
                "DATE" => Section::Dates,
                other => {
                    warn!(line, marker = other, "unknown section, rows ignored");
                    Section::Unknown
                }
            };
            continue;
        }

        match section {
            Section::Persons => {
                let [id, name, score, wfh] = fields[..] else {
                    return Err(malformed(format!(
                        "expected {} columns, found {}",
                        PERSON_HEADERS.len(),
                        fields.len()
                    )));
                };
                let initial_score: f64 = score
                    .parse()
                    .map_err(|_| malformed(format!("invalid initial score {score:?}")))?;
                let wfh_days: WfhDays = wfh.parse().map_err(|e| malformed(format!("{e}")))?;
                ledger
                    .add_person(Person::new(id, name, initial_score, wfh_days))
                    .map_err(|e: LedgerError| malformed(e.to_string()))?;
            }
            Section::Dates => {
                let [date, _dow, on_call, unavailable, holidays] = fields[..] else {
                    return Err(malformed(format!(
                        "expected {} columns, found {}",
                        DATE_HEADERS.len(),
                        fields.len()
                    )));
                };
                let date: Day = date.parse().map_err(|e| malformed(format!("{e}")))?;
                if date.is_sentinel() {
                    debug!(line, "sentinel date skipped");
                    continue;
                }
                if !date.is_business_day() {
                    return Err(malformed(format!("{date} is not a business day")));
                }
                let person_id = |raw: &str| {
                    let id = PersonId::new(raw);
                    if is_valid_id(&id) {
                        Ok(id)
                    } else {
                        Err(malformed(format!("invalid person id {raw:?}")))
                    }
                };
                ledger.add_placeholder(date);
                if !on_call.is_empty() {
                    ledger.set_on_call(date, &person_id(on_call)?, true);
                }
                for id in unavailable.split_whitespace() {
                    ledger.set_mark(date, &person_id(id)?, MarkKind::Unavailable, true);
                }
                for id in holidays.split_whitespace() {
                    ledger.set_mark(date, &person_id(id)?, MarkKind::Holiday, true);
                }
            }
            Section::Unknown => {}
            Section::None => {
                return Err(malformed("data row before any PERSON or DATE header".into()));
            }
        }
    }

    debug!(
        persons = ledger.count_persons(),
        assignments = ledger.size(),
        comments = ledger.comments().len(),
        "ledger parsed"
    );
    Ok(ledger)
}

/// Écrit le registre : commentaires, personnes par rang, dates croissantes.
pub fn render_ledger(ledger: &Ledger) -> String {
    let mut out = String::new();
    for line in ledger.comments() {
        out.push_str(line);
        out.push('\n');
    }
    if !ledger.comments().is_empty() {
        out.push('\n');
    }

    let persons: Vec<Vec<String>> = ledger
        .persons()
        .into_iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.initial_score.to_string(),
                p.wfh_days.to_string(),
            ]
        })
        .collect();
    out.push_str(&pipe_table(&PERSON_HEADERS, &persons));
    out.push('\n');

    let dates: Vec<Vec<String>> = ledger
        .dates()
        .into_iter()
        .map(|row| {
            vec![
                row.date.to_string(),
                row.dow.clone(),
                row.on_call_str().to_string(),
                row.unavailable_str(),
                row.holidays_str(),
            ]
        })
        .collect();
    out.push_str(&pipe_table(&DATE_HEADERS, &dates));
    out
}

/// Numéro (à partir de 1) et texte de la ligne d'un enregistrement.
///
/// La position donnée par `csv` précède les lignes vides et les
/// commentaires sautés avant l'enregistrement ; on les passe ici.
fn locate(text: &str, byte: Option<u64>) -> (u64, &str) {
    let mut start = byte
        .and_then(|b| usize::try_from(b).ok())
        .filter(|b| *b <= text.len() && text.is_char_boundary(*b))
        .unwrap_or(0);
    let mut line = text[..start].matches('\n').count() as u64 + 1;
    loop {
        let rest = &text[start..];
        let content = rest.split('\n').next().unwrap_or("").trim_end_matches('\r');
        let skipped = content.is_empty() || content.starts_with('#');
        match rest.find('\n') {
            Some(eol) if skipped => {
                start += eol + 1;
                line += 1;
            }
            _ => return (line, content),
        }
    }
}

fn is_separator(fields: &[&str]) -> bool {
    fields.iter().any(|f| !f.is_empty())
        && fields.iter().all(|f| f.chars().all(|c| c == '-'))
}

/// En-tête de section : uniquement des mots en capitales (`PERSON | NAME ...`).
fn is_header(fields: &[&str]) -> bool {
    fields.iter().all(|f| {
        !f.is_empty()
            && f.chars().all(|c| c.is_ascii_uppercase() || c == '_' || c == ' ')
    })
}

/// Table alignée : en-tête, ligne de tirets, lignes ; sans espaces en fin de ligne.
pub(crate) fn pipe_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}", w = *w))
            .collect();
        let mut s = padded.join(" | ").trim_end().to_string();
        s.push('\n');
        s
    };

    let mut out = line(headers.iter().map(|h| h.to_string()).collect());
    out.push_str(&line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        out.push_str(&line(row.clone()));
    }
    out
}
