use super::Scheduler;
use crate::calendar::Day;
use crate::model::{MarkKind, PersonId};
use tracing::{info, warn};

/// Correction manuelle d'une astreinte, hors algorithme.
pub(super) fn set_on_call(
    scheduler: &mut Scheduler,
    date: Day,
    person: &PersonId,
    present: bool,
) -> bool {
    if present && scheduler.ledger.person(person).is_none() {
        warn!(person = %person, "person is not in the roster");
    }
    if let Some(previous) = scheduler.ledger.on_call(date) {
        if present && previous != person {
            info!(date = %date, from = %previous, to = %person, "on-call overridden");
        }
    }
    scheduler.ledger.set_on_call(date, person, present)
}

pub(super) fn set_mark(
    scheduler: &mut Scheduler,
    date: Day,
    person: &PersonId,
    kind: MarkKind,
    present: bool,
) -> bool {
    if present && scheduler.ledger.person(person).is_none() {
        warn!(person = %person, "person is not in the roster");
    }
    let changed = scheduler.ledger.set_mark(date, person, kind, present);
    if present && changed && scheduler.ledger.is_on_call(date, person) {
        warn!(date = %date, person = %person, ?kind, "marked person is on call that day");
    }
    changed
}
