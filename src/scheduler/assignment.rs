use super::{AssignOptions, Assignment, SchedError, Scheduler};
use crate::calendar::{clamp_to_weekday, next_weekday, Day};
use crate::fairness::Fairness;
use crate::model::Person;
use tracing::{debug, warn};

pub(super) fn assign(
    scheduler: &mut Scheduler,
    today: Day,
    opts: AssignOptions,
) -> Result<Assignment, SchedError> {
    let last = scheduler
        .ledger
        .last_date()
        .unwrap_or_else(|| clamp_to_weekday(today));
    let next = next_weekday(last);

    let fairness = Fairness::new(&scheduler.ledger);
    let eligible = fairness.eligible_persons(next);

    let chosen = match fairness.best_candidate(next, &eligible) {
        Some(person) => Some((person.id.clone(), false)),
        // Secours anti-blocage : si tout le monde est indisponible le même
        // jour, on prend le meilleur score en ignorant les disponibilités
        // plutôt que de bloquer le tableau. Ce n'est pas une règle d'équité.
        None if opts.allow_fallback => {
            let everyone: Vec<&Person> = scheduler.ledger.persons();
            fairness
                .best_candidate(next, &everyone)
                .map(|person| (person.id.clone(), true))
        }
        None => None,
    };

    let Some((person, forced)) = chosen else {
        return Err(SchedError::NoCandidate {
            last,
            next,
            last_stats: fairness.stats(last),
            next_stats: fairness.stats(next),
        });
    };

    if forced {
        warn!(date = %next, person = %person, "nobody eligible, assigning regardless of availability");
    } else {
        debug!(date = %next, person = %person, candidates = eligible.len(), "assigned");
    }

    scheduler.ledger.set_on_call(next, &person, true);
    Ok(Assignment {
        date: next,
        person,
        forced,
    })
}
