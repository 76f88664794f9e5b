#![forbid(unsafe_code)]
//! Rota : tableau d'astreinte équitable tenu dans un fichier texte (sans BD).
//!
//! - Registre en mémoire : personnes, astreintes, congés et indisponibilités.
//! - Score d'équité recalculé à chaque requête, départage par ancienneté.
//! - Jours ouvrés uniquement (lundi → vendredi).
//! - Fichier `|` relu et réécrit à l'identique, commentaires compris.

pub mod calendar;
pub mod fairness;
pub mod io;
pub mod ledger;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use calendar::{Day, WorkDay};
pub use fairness::{Fairness, ScheduleRow, StatsRow};
pub use io::{parse_ledger, render_ledger, CodecError, SAMPLE_FILE};
pub use ledger::{DateRow, Ledger, LedgerError};
pub use model::{MarkKind, Person, PersonId, Status, WfhDays};
pub use report::{ReportRenderer, ScheduleColumns, TextReport};
pub use scheduler::{AssignOptions, Assignment, Conflict, ConflictKind, SchedError, Scheduler};
pub use storage::{Storage, TextStorage};
