//! Registre en mémoire d'un tableau d'astreinte : personnes, astreintes
//! (réelles ou réservées) et marques d'indisponibilité/congés.
//!
//! Chaque `Ledger` est indépendant ; rien n'est partagé entre instances.

use crate::calendar::Day;
use crate::model::{AssignmentRecord, AvailabilityMark, MarkKind, Person, PersonId, WfhDays};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("person id cannot be empty")]
    EmptyPersonId,
    #[error("person id cannot contain whitespace or '|', nor start with '#': {0:?}")]
    InvalidPersonId(String),
    #[error("person name cannot contain '|': {0:?}")]
    InvalidName(String),
    #[error("person already in roster: {0}")]
    DuplicatePerson(String),
}

/// Ligne de la vue calendrier : une date visible et ce qui s'y rattache.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DateRow {
    pub date: Day,
    pub dow: String,
    pub on_call: Option<PersonId>,
    pub unavailable: Vec<PersonId>,
    pub holidays: Vec<PersonId>,
}

impl DateRow {
    pub fn on_call_str(&self) -> &str {
        self.on_call.as_ref().map(PersonId::as_str).unwrap_or("")
    }
    pub fn unavailable_str(&self) -> String {
        join_ids(&self.unavailable)
    }
    pub fn holidays_str(&self) -> String {
        join_ids(&self.holidays)
    }
}

/// Identifiant inscriptible dans une cellule du fichier (et pas lu comme commentaire).
pub(crate) fn is_valid_id(id: &PersonId) -> bool {
    !id.is_empty()
        && !id.as_str().starts_with('#')
        && !id.as_str().contains(|c: char| c.is_whitespace() || c == '|')
}

/// Seuls les jours ouvrés réels entrent au calendrier.
fn is_storable(date: Day) -> bool {
    !date.is_sentinel() && date.is_business_day()
}

fn join_ids(ids: &[PersonId]) -> String {
    ids.iter().map(PersonId::as_str).collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    comments: Vec<String>,
    persons: Vec<Person>,
    assignments: BTreeMap<Day, Option<PersonId>>,
    marks: BTreeSet<AvailabilityMark>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lignes de commentaire du fichier, conservées telles quelles.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }
    pub fn push_comment<S: Into<String>>(&mut self, line: S) {
        self.comments.push(line.into());
    }

    /// Ajoute une personne en fin de rang.
    pub fn add_person(&mut self, mut person: Person) -> Result<(), LedgerError> {
        if person.id.is_empty() {
            return Err(LedgerError::EmptyPersonId);
        }
        if !is_valid_id(&person.id) {
            return Err(LedgerError::InvalidPersonId(person.id.to_string()));
        }
        if person.name.contains('|') {
            return Err(LedgerError::InvalidName(person.name));
        }
        if self.person(&person.id).is_some() {
            return Err(LedgerError::DuplicatePerson(person.id.to_string()));
        }
        let max_rank = self.persons.iter().map(|p| p.rank).max().unwrap_or(0);
        let by_count = u32::try_from(self.persons.len()).unwrap_or(u32::MAX - 1) + 1;
        person.rank = by_count.max(max_rank + 1);
        self.persons.push(person);
        Ok(())
    }

    /// Retire une personne ; l'historique qui la cite est conservé.
    pub fn remove_person(&mut self, id: &PersonId) -> bool {
        let before = self.persons.len();
        self.persons.retain(|p| &p.id != id);
        before != self.persons.len()
    }

    pub fn set_initial_score(&mut self, id: &PersonId, score: f64) -> bool {
        match self.persons.iter_mut().find(|p| &p.id == id) {
            Some(p) => {
                p.initial_score = score;
                true
            }
            None => false,
        }
    }

    pub fn set_wfh_days(&mut self, id: &PersonId, days: WfhDays) -> bool {
        match self.persons.iter_mut().find(|p| &p.id == id) {
            Some(p) => {
                p.wfh_days = days;
                true
            }
            None => false,
        }
    }

    /// Pose ou retire l'astreinte de `person` le jour `date`.
    ///
    /// Poser remplace le créneau réservé (ou l'astreinte existante) ; retirer
    /// une astreinte qui n'est pas celle de `person` ne fait rien. Renvoie
    /// `true` si le registre a changé.
    pub fn set_on_call(&mut self, date: Day, person: &PersonId, present: bool) -> bool {
        if !is_storable(date) || !is_valid_id(person) {
            return false;
        }
        let already = self.is_on_call(date, person);
        match (present, already) {
            (true, false) => {
                self.assignments.insert(date, Some(person.clone()));
                true
            }
            (false, true) => {
                self.assignments.insert(date, None);
                true
            }
            _ => false,
        }
    }

    /// Pose ou retire une marque ; poser rend la date visible au calendrier.
    pub fn set_mark(&mut self, date: Day, person: &PersonId, kind: MarkKind, present: bool) -> bool {
        if !is_storable(date) || !is_valid_id(person) {
            return false;
        }
        let mark = AvailabilityMark {
            date,
            kind,
            person: person.clone(),
        };
        if present {
            self.assignments.entry(date).or_insert(None);
            self.marks.insert(mark)
        } else {
            self.marks.remove(&mark)
        }
    }

    /// Réserve `date` au calendrier sans y affecter personne.
    pub fn add_placeholder(&mut self, date: Day) -> bool {
        if !is_storable(date) || self.assignments.contains_key(&date) {
            return false;
        }
        self.assignments.insert(date, None);
        true
    }

    /// Nombre de dates réellement pourvues.
    pub fn size(&self) -> usize {
        self.assignments.values().filter(|p| p.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn person(&self, id: &PersonId) -> Option<&Person> {
        self.persons.iter().find(|p| &p.id == id)
    }

    /// Personnes triées par rang puis identifiant.
    pub fn persons(&self) -> Vec<&Person> {
        let mut out: Vec<&Person> = self.persons.iter().collect();
        out.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.id.cmp(&b.id)));
        out
    }

    pub fn count_persons(&self) -> usize {
        self.persons.len()
    }

    pub fn assignments(&self) -> impl Iterator<Item = AssignmentRecord> + '_ {
        self.assignments.iter().map(|(date, person)| AssignmentRecord {
            date: *date,
            person: person.clone(),
        })
    }

    pub fn marks(&self) -> impl Iterator<Item = &AvailabilityMark> {
        self.marks.iter()
    }

    pub fn on_call(&self, date: Day) -> Option<&PersonId> {
        self.assignments.get(&date).and_then(Option::as_ref)
    }

    pub fn is_on_call(&self, date: Day, person: &PersonId) -> bool {
        self.on_call(date) == Some(person)
    }

    pub fn has_mark(&self, date: Day, person: &PersonId, kind: MarkKind) -> bool {
        self.marks.contains(&AvailabilityMark {
            date,
            kind,
            person: person.clone(),
        })
    }

    /// Dernière date réellement pourvue.
    pub fn last_date(&self) -> Option<Day> {
        self.assignments
            .iter()
            .rev()
            .find(|(_, p)| p.is_some())
            .map(|(d, _)| *d)
    }

    /// Dernière astreinte de `person`.
    pub fn last_date_for(&self, person: &PersonId) -> Option<Day> {
        self.assignments
            .iter()
            .rev()
            .find(|(_, p)| p.as_ref() == Some(person))
            .map(|(d, _)| *d)
    }

    /// Calendrier trié par date, astreintes réservées comprises.
    pub fn dates(&self) -> Vec<DateRow> {
        self.assignments
            .iter()
            .map(|(date, on_call)| DateRow {
                date: *date,
                dow: date.dow(),
                on_call: on_call.clone(),
                unavailable: self.marked(*date, MarkKind::Unavailable),
                holidays: self.marked(*date, MarkKind::Holiday),
            })
            .collect()
    }

    fn marked(&self, date: Day, kind: MarkKind) -> Vec<PersonId> {
        self.marks
            .iter()
            .filter(|m| m.date == date && m.kind == kind)
            .map(|m| m.person.clone())
            .collect()
    }
}
