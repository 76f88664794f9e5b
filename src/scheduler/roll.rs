use super::Scheduler;
use crate::calendar::{business_days, Day};
use tracing::debug;

/// Réserve `n + 1` jours ouvrés à partir de `today` ; une date déjà
/// présente (pourvue ou non) n'est jamais touchée.
pub(super) fn roll(scheduler: &mut Scheduler, n: usize, today: Day) -> usize {
    let mut added = 0usize;
    for day in business_days(today, n.saturating_add(1)) {
        if scheduler.ledger.add_placeholder(day) {
            added += 1;
        }
    }
    debug!(days = n.saturating_add(1), added, from = %today, "calendar rolled");
    added
}
