use crate::calendar::Day;
use crate::fairness::StatsRow;
use crate::model::PersonId;
use thiserror::Error;

/// Options d'assignation
#[derive(Debug, Clone, Copy)]
pub struct AssignOptions {
    /// Si personne n'est éligible, affecter quand même le meilleur score
    /// sans tenir compte des disponibilités.
    pub allow_fallback: bool,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            allow_fallback: true,
        }
    }
}

/// Résultat d'un `assign` réussi.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assignment {
    pub date: Day,
    pub person: PersonId,
    /// Affectation de secours qui ignore les disponibilités.
    pub forced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ConflictKind {
    OnHolidays,
    Unavailable,
    BackFromHolidays,
    AtHome,
    NotInRoster,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::OnHolidays => "on-holidays",
            ConflictKind::Unavailable => "unavailable",
            ConflictKind::BackFromHolidays => "back-from-holidays",
            ConflictKind::AtHome => "at-home",
            ConflictKind::NotInRoster => "not-in-roster",
        }
    }
}

/// Astreinte posée sur quelqu'un qui n'était pas éligible ce jour-là.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Conflict {
    pub date: Day,
    pub person: PersonId,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("could not find a solution for {next} (last on-call date {last})")]
    NoCandidate {
        last: Day,
        next: Day,
        last_stats: Vec<StatsRow>,
        next_stats: Vec<StatsRow>,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
