use super::{Conflict, ConflictKind, Scheduler};
use crate::fairness::Fairness;

pub(super) fn detect_conflicts(scheduler: &Scheduler) -> Vec<Conflict> {
    let ledger = &scheduler.ledger;
    let fairness = Fairness::new(ledger);
    let mut out = Vec::new();

    for record in ledger.assignments() {
        let Some(id) = record.person else {
            continue;
        };
        let date = record.date;

        let Some(person) = ledger.person(&id) else {
            out.push(Conflict {
                date,
                person: id,
                kind: ConflictKind::NotInRoster,
            });
            continue;
        };

        let kind = if fairness.is_on_holidays(date, &id) {
            Some(ConflictKind::OnHolidays)
        } else if fairness.is_unavailable(date, &id) {
            Some(ConflictKind::Unavailable)
        } else if fairness.is_back_from_holidays(date, &id) {
            Some(ConflictKind::BackFromHolidays)
        } else if fairness.is_wfh(date, person) {
            Some(ConflictKind::AtHome)
        } else {
            None
        };

        if let Some(kind) = kind {
            out.push(Conflict {
                date,
                person: id,
                kind,
            });
        }
    }

    out
}
