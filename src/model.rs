use crate::calendar::{CalendarError, Day, WorkDay};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Identifiant fort pour Person
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Jours de télétravail récurrents, toujours triés lundi → vendredi.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WfhDays(BTreeSet<WorkDay>);

impl WfhDays {
    pub fn contains(&self, wd: WorkDay) -> bool {
        self.0.contains(&wd)
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = WorkDay> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<WorkDay> for WfhDays {
    fn from_iter<I: IntoIterator<Item = WorkDay>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Liste séparée par des espaces, éventuellement vide : `"Mon Thu"`.
impl FromStr for WfhDays {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace().map(str::parse::<WorkDay>).collect()
    }
}

impl fmt::Display for WfhDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.0.iter().map(WorkDay::as_str).collect();
        f.write_str(&codes.join(" "))
    }
}

/// Personne du tableau d'astreinte
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Graine d'équité : historique antérieur au registre.
    pub initial_score: f64,
    pub wfh_days: WfhDays,
    /// Ordre d'arrivée dans l'équipe, sert uniquement à départager.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub rank: u32,
}

impl Person {
    pub fn new<I: AsRef<str>, N: Into<String>>(
        id: I,
        name: N,
        initial_score: f64,
        wfh_days: WfhDays,
    ) -> Self {
        Self {
            id: PersonId::new(id),
            name: name.into(),
            initial_score,
            wfh_days,
            rank: 0,
        }
    }
}

/// Astreinte d'un jour ; `person == None` est un créneau réservé mais non pourvu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRecord {
    pub date: Day,
    pub person: Option<PersonId>,
}

impl AssignmentRecord {
    pub fn is_placeholder(&self) -> bool {
        self.person.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkKind {
    Unavailable,
    Holiday,
}

/// Indisponibilité ou congé d'une personne sur un jour.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AvailabilityMark {
    pub date: Day,
    pub kind: MarkKind,
    pub person: PersonId,
}

/// Statut d'une personne sur un jour, par priorité décroissante.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Status {
    Oncall,
    BackFromHols,
    Unavailable,
    OnHols,
    AtHome,
    Nothing,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Oncall => "Oncall",
            Status::BackFromHols => "Back from hols",
            Status::Unavailable => "Unavailable",
            Status::OnHols => "On hols",
            Status::AtHome => "At home",
            Status::Nothing => "-",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
