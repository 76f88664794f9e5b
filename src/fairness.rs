//! Vues dérivées calculées à la demande sur un registre : éligibilité,
//! compteurs cumulés, score d'équité et statut du jour.

use crate::calendar::{prev_weekday, Day};
use crate::ledger::Ledger;
use crate::model::{MarkKind, Person, PersonId, Status};

/// Poids du score devant le rang dans le départage.
pub const RANK_RESOLUTION: f64 = 10_000.0;

/// Photographie d'une personne à une date (table de diagnostic `stats`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatsRow {
    pub person: PersonId,
    pub date: Day,
    pub dow: String,
    pub score: f64,
    pub initial: f64,
    pub on_call: usize,
    pub on_holidays: usize,
    pub unavailable: usize,
    pub last_on_call: Option<Day>,
    pub status: Status,
}

/// Ligne du planning : une date, l'astreinte, et chaque personne.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScheduleRow {
    pub date: Day,
    pub dow: String,
    pub on_call: Option<PersonId>,
    pub cells: Vec<ScheduleCell>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScheduleCell {
    pub person: PersonId,
    pub status: Status,
    pub score: f64,
}

/// Lecture seule sur un `Ledger`.
#[derive(Debug, Clone, Copy)]
pub struct Fairness<'a> {
    ledger: &'a Ledger,
}

impl<'a> Fairness<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    pub fn is_wfh(&self, date: Day, person: &Person) -> bool {
        date.work_day()
            .map(|wd| person.wfh_days.contains(wd))
            .unwrap_or(false)
    }

    pub fn is_on_holidays(&self, date: Day, person: &PersonId) -> bool {
        self.ledger.has_mark(date, person, MarkKind::Holiday)
    }

    pub fn is_unavailable(&self, date: Day, person: &PersonId) -> bool {
        self.ledger.has_mark(date, person, MarkKind::Unavailable)
    }

    /// Premier jour ouvré après des congés : pas d'astreinte ce jour-là.
    pub fn is_back_from_holidays(&self, date: Day, person: &PersonId) -> bool {
        !self.is_on_holidays(date, person) && self.is_on_holidays(prev_weekday(date), person)
    }

    pub fn count_on_call(&self, date: Day, person: &PersonId) -> usize {
        self.ledger
            .assignments()
            .filter(|a| a.date <= date && !a.date.is_sentinel())
            .filter(|a| a.person.as_ref() == Some(person))
            .count()
    }

    pub fn count_on_holidays(&self, date: Day, person: &PersonId) -> usize {
        self.count_marks(date, person, MarkKind::Holiday)
    }

    pub fn count_unavailable(&self, date: Day, person: &PersonId) -> usize {
        self.count_marks(date, person, MarkKind::Unavailable)
    }

    fn count_marks(&self, date: Day, person: &PersonId, kind: MarkKind) -> usize {
        self.ledger
            .marks()
            .filter(|m| m.kind == kind && m.date <= date && !m.date.is_sentinel())
            .filter(|m| &m.person == person)
            .count()
    }

    pub fn count_persons(&self) -> usize {
        self.ledger.count_persons()
    }

    /// `initial + astreintes + congés / effectif`.
    pub fn score(&self, date: Day, person: &Person) -> f64 {
        let on_call = self.count_on_call(date, &person.id) as f64;
        let team = self.count_persons();
        let holidays = if team == 0 {
            0.0
        } else {
            self.count_on_holidays(date, &person.id) as f64 / team as f64
        };
        person.initial_score + on_call + holidays
    }

    /// Score départagé par le rang : à score égal, le plus ancien passe devant.
    pub fn ranked_score(&self, date: Day, person: &Person) -> f64 {
        RANK_RESOLUTION * self.score(date, person) + f64::from(person.rank)
    }

    pub fn status(&self, date: Day, person: &Person) -> Status {
        let id = &person.id;
        if self.ledger.is_on_call(date, id) {
            Status::Oncall
        } else if self.is_back_from_holidays(date, id) {
            Status::BackFromHols
        } else if self.is_unavailable(date, id) {
            Status::Unavailable
        } else if self.is_on_holidays(date, id) {
            Status::OnHols
        } else if self.is_wfh(date, person) {
            Status::AtHome
        } else {
            Status::Nothing
        }
    }

    pub fn eligible(&self, date: Day, person: &Person) -> bool {
        let id = &person.id;
        !self.is_on_holidays(date, id)
            && !self.is_unavailable(date, id)
            && !self.is_back_from_holidays(date, id)
            && !self.is_wfh(date, person)
    }

    /// Personnes éligibles à `date`, dans l'ordre du registre.
    pub fn eligible_persons(&self, date: Day) -> Vec<&'a Person> {
        self.ledger
            .persons()
            .into_iter()
            .filter(|p| self.eligible(date, p))
            .collect()
    }

    /// Candidat de plus petit score départagé parmi `candidates`.
    pub fn best_candidate(&self, date: Day, candidates: &[&'a Person]) -> Option<&'a Person> {
        candidates.iter().copied().min_by(|a, b| {
            self.ranked_score(date, a)
                .total_cmp(&self.ranked_score(date, b))
                .then_with(|| a.rank.cmp(&b.rank))
                .then_with(|| a.id.cmp(&b.id))
        })
    }

    pub fn stats(&self, date: Day) -> Vec<StatsRow> {
        self.ledger
            .persons()
            .into_iter()
            .map(|p| StatsRow {
                person: p.id.clone(),
                date,
                dow: date.dow(),
                score: self.score(date, p),
                initial: p.initial_score,
                on_call: self.count_on_call(date, &p.id),
                on_holidays: self.count_on_holidays(date, &p.id),
                unavailable: self.count_unavailable(date, &p.id),
                last_on_call: self.ledger.last_date_for(&p.id),
                status: self.status(date, p),
            })
            .collect()
    }

    /// Planning des dates visibles comprises dans `[from, to]`.
    pub fn schedule(&self, from: Option<Day>, to: Option<Day>) -> Vec<ScheduleRow> {
        let persons = self.ledger.persons();
        self.ledger
            .dates()
            .into_iter()
            .filter(|row| in_range(row.date, from, to))
            .map(|row| ScheduleRow {
                date: row.date,
                cells: persons
                    .iter()
                    .map(|p| ScheduleCell {
                        person: p.id.clone(),
                        status: self.status(row.date, p),
                        score: self.score(row.date, p),
                    })
                    .collect(),
                dow: row.dow,
                on_call: row.on_call,
            })
            .collect()
    }
}

pub fn in_range(date: Day, from: Option<Day>, to: Option<Day>) -> bool {
    from.map_or(true, |f| f <= date) && to.map_or(true, |t| date <= t)
}
