mod assignment;
mod conflicts;
mod mutate;
mod roll;
mod types;

pub use types::{AssignOptions, Assignment, Conflict, ConflictKind, SchedError};

use crate::calendar::Day;
use crate::fairness::Fairness;
use crate::ledger::Ledger;
use crate::model::{MarkKind, PersonId};

/// Scheduler : encapsule le registre d'un tableau d'astreinte
#[derive(Debug, Default)]
pub struct Scheduler {
    ledger: Ledger,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            ledger: Ledger::default(),
        }
    }

    pub fn with_ledger(ledger: Ledger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }
    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    pub fn fairness(&self) -> Fairness<'_> {
        Fairness::new(&self.ledger)
    }

    /// Affecte le jour ouvré qui suit la dernière astreinte.
    ///
    /// Sans astreinte préalable, on part de `today`. En cas d'échec le
    /// registre n'est pas modifié.
    pub fn assign(&mut self, today: Day, opts: AssignOptions) -> Result<Assignment, SchedError> {
        assignment::assign(self, today, opts)
    }

    /// Réserve au calendrier les `n + 1` jours ouvrés à partir de `today`.
    pub fn roll(&mut self, n: usize, today: Day) -> usize {
        roll::roll(self, n, today)
    }

    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        conflicts::detect_conflicts(self)
    }

    pub fn set_on_call(&mut self, date: Day, person: &PersonId, present: bool) -> bool {
        mutate::set_on_call(self, date, person, present)
    }

    pub fn set_mark(&mut self, date: Day, person: &PersonId, kind: MarkKind, present: bool) -> bool {
        mutate::set_mark(self, date, person, kind, present)
    }
}
