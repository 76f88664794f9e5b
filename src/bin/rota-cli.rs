#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rota::{
    calendar::{self, Day},
    fairness::in_range,
    io::SAMPLE_FILE,
    model::{MarkKind, Person, PersonId, WfhDays},
    report::{ReportRenderer, ScheduleColumns, TextReport},
    scheduler::{AssignOptions, SchedError, Scheduler},
    storage::{Storage, TextStorage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Tableau d'astreinte équitable, tenu dans un fichier texte
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier du registre
    #[arg(short, long, global = true, env = "ROTA_FILE", default_value = "./support.txt")]
    file: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter une personne en fin de rang
    AddPerson {
        id: String,
        name: String,
        #[arg(allow_negative_numbers = true)]
        initial: f64,
        /// "Mon Thu", éventuellement vide
        #[arg(default_value = "")]
        wfh_days: String,
    },

    /// Retirer une personne (son historique est conservé)
    RemovePerson { id: String },

    /// Modifier le score initial
    SetInitial {
        id: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Modifier les jours de télétravail récurrents
    SetWfhDays {
        id: String,
        #[arg(default_value = "")]
        days: String,
    },

    /// Poser (1) ou retirer (0) une astreinte à la main
    SetOncall {
        id: String,
        date: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
        flag: u8,
    },

    /// Poser (1) ou retirer (0) une indisponibilité
    SetUnavailable {
        id: String,
        date: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
        flag: u8,
    },

    /// Poser (1) ou retirer (0) un jour de congés
    SetHolidays {
        id: String,
        date: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
        flag: u8,
    },

    /// Affecter le prochain jour ouvré
    Assign {
        /// Nombre de jours à affecter d'affilée
        #[arg(long, default_value_t = 1)]
        count: usize,
        /// Échouer plutôt que d'ignorer les disponibilités quand personne n'est éligible
        #[arg(long)]
        strict: bool,
        /// Date du jour (YYYYMMDD), par défaut aujourd'hui
        #[arg(long)]
        today: Option<String>,
    },

    /// Réserver au calendrier les N+1 prochains jours ouvrés
    Roll {
        days: usize,
        #[arg(long)]
        today: Option<String>,
    },

    /// Afficher le calendrier
    Show {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Afficher le statut de chacun, jour par jour
    Status {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Afficher statuts et scores, jour par jour
    Summary {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        no_status: bool,
        #[arg(long)]
        no_score: bool,
        #[arg(long)]
        json: bool,
    },

    /// Scores d'équité à une date (par défaut la dernière astreinte)
    Stats {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Lister les astreintes posées sur quelqu'un de non éligible
    Check {
        #[arg(long)]
        json: bool,
    },

    /// Imprimer un fichier d'exemple
    SampleFile,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    if let Commands::SampleFile = cli.cmd {
        print!("{SAMPLE_FILE}");
        return Ok(());
    }

    let storage = TextStorage::open(&cli.file)?;
    let mut scheduler = Scheduler::with_ledger(storage.load().with_context(|| {
        format!(
            "cannot load rota (create one with `sample-file > {}`)",
            cli.file
        )
    })?);

    let code = match cli.cmd {
        Commands::SampleFile => 0,
        Commands::AddPerson {
            id,
            name,
            initial,
            wfh_days,
        } => {
            let days = parse_wfh(&wfh_days)?;
            scheduler
                .ledger_mut()
                .add_person(Person::new(&id, name, initial, days))?;
            storage.save(scheduler.ledger())?;
            0
        }
        Commands::RemovePerson { id } => {
            if !scheduler.ledger_mut().remove_person(&PersonId::new(&id)) {
                eprintln!("Warning: {id} is not in the roster");
            }
            storage.save(scheduler.ledger())?;
            0
        }
        Commands::SetInitial { id, value } => {
            if !scheduler
                .ledger_mut()
                .set_initial_score(&PersonId::new(&id), value)
            {
                eprintln!("Warning: {id} is not in the roster");
            }
            storage.save(scheduler.ledger())?;
            0
        }
        Commands::SetWfhDays { id, days } => {
            let days = parse_wfh(&days)?;
            if !scheduler.ledger_mut().set_wfh_days(&PersonId::new(&id), days) {
                eprintln!("Warning: {id} is not in the roster");
            }
            storage.save(scheduler.ledger())?;
            0
        }
        Commands::SetOncall { id, date, flag } => {
            let date = parse_business_day(&date)?;
            scheduler.set_on_call(date, &PersonId::new(&id), flag == 1);
            storage.save(scheduler.ledger())?;
            0
        }
        Commands::SetUnavailable { id, date, flag } => {
            let date = parse_business_day(&date)?;
            scheduler.set_mark(date, &PersonId::new(&id), MarkKind::Unavailable, flag == 1);
            storage.save(scheduler.ledger())?;
            0
        }
        Commands::SetHolidays { id, date, flag } => {
            let date = parse_business_day(&date)?;
            scheduler.set_mark(date, &PersonId::new(&id), MarkKind::Holiday, flag == 1);
            storage.save(scheduler.ledger())?;
            0
        }
        Commands::Assign {
            count,
            strict,
            today,
        } => {
            let today = today_or(today.as_deref())?;
            let opts = AssignOptions {
                allow_fallback: !strict,
            };
            let mut code = 0;
            for _ in 0..count {
                match scheduler.assign(today, opts) {
                    Ok(a) => {
                        let note = if a.forced {
                            "  (nobody eligible, availability ignored)"
                        } else {
                            ""
                        };
                        println!("{} {} {}{}", a.date, a.date.dow(), a.person, note);
                    }
                    Err(SchedError::NoCandidate {
                        last,
                        next,
                        last_stats,
                        next_stats,
                    }) => {
                        eprintln!("ERROR: Could not find a solution for {next}!");
                        eprintln!();
                        eprint!("{}", TextReport.stats(&format!("Stats at {last}"), &last_stats)?);
                        eprintln!();
                        eprint!("{}", TextReport.stats(&format!("Stats at {next}"), &next_stats)?);
                        code = 1;
                        break;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            if code == 0 {
                storage.save(scheduler.ledger())?;
            }
            code
        }
        Commands::Roll { days, today } => {
            let today = today_or(today.as_deref())?;
            let added = scheduler.roll(days, today);
            println!("{added} date(s) added");
            storage.save(scheduler.ledger())?;
            0
        }
        Commands::Show { from, to, json } => {
            let (from, to) = parse_range(from.as_deref(), to.as_deref())?;
            let rows: Vec<_> = scheduler
                .ledger()
                .dates()
                .into_iter()
                .filter(|r| in_range(r.date, from, to))
                .collect();
            print!("{}", renderer(json)?.dates(&rows)?);
            0
        }
        Commands::Status { from, to, json } => {
            let (from, to) = parse_range(from.as_deref(), to.as_deref())?;
            let rows = scheduler.fairness().schedule(from, to);
            let columns = ScheduleColumns {
                status: true,
                score: false,
            };
            print!("{}", renderer(json)?.schedule(&rows, columns)?);
            0
        }
        Commands::Summary {
            from,
            to,
            no_status,
            no_score,
            json,
        } => {
            let (from, to) = parse_range(from.as_deref(), to.as_deref())?;
            let rows = scheduler.fairness().schedule(from, to);
            let columns = ScheduleColumns {
                status: !no_status,
                score: !no_score,
            };
            print!("{}", renderer(json)?.schedule(&rows, columns)?);
            0
        }
        Commands::Stats { date, json } => {
            let date = match date {
                Some(d) => parse_day(&d)?,
                None => scheduler
                    .ledger()
                    .last_date()
                    .unwrap_or_else(calendar::today),
            };
            let rows = scheduler.fairness().stats(date);
            print!(
                "{}",
                renderer(json)?.stats(&format!("Stats at {date}"), &rows)?
            );
            0
        }
        Commands::Check { json } => {
            let conflicts = scheduler.detect_conflicts();
            if conflicts.is_empty() && !json {
                println!("OK: no conflicts");
                0
            } else {
                print!("{}", renderer(json)?.conflicts(&conflicts)?);
                // Code 2 = WARNING/INCOMPLETE
                if conflicts.is_empty() {
                    0
                } else {
                    2
                }
            }
        }
    };

    std::process::exit(code);
}

fn parse_day(raw: &str) -> Result<Day> {
    raw.parse::<Day>()
        .with_context(|| format!("invalid date: {raw}"))
}

/// Les corrections manuelles ne portent que sur des jours ouvrés.
fn parse_business_day(raw: &str) -> Result<Day> {
    let date = parse_day(raw)?;
    if !date.is_business_day() {
        bail!("{raw} is a {}, only business days (Mon..Fri) can be edited", date.dow());
    }
    Ok(date)
}

fn parse_wfh(raw: &str) -> Result<WfhDays> {
    raw.parse::<WfhDays>()
        .with_context(|| format!("invalid work-from-home days: {raw}"))
}

fn today_or(raw: Option<&str>) -> Result<Day> {
    match raw {
        Some(d) => Ok(calendar::clamp_to_weekday(parse_day(d)?)),
        None => Ok(calendar::today()),
    }
}

fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<(Option<Day>, Option<Day>)> {
    let from = from.map(parse_day).transpose()?;
    let to = to.map(parse_day).transpose()?;
    if let (Some(f), Some(t)) = (from, to) {
        if t < f {
            bail!("--to ({t}) is before --from ({f})");
        }
    }
    Ok((from, to))
}

fn renderer(json: bool) -> Result<Box<dyn ReportRenderer>> {
    if json {
        #[cfg(feature = "serde")]
        return Ok(Box::new(rota::report::JsonReport));
        #[cfg(not(feature = "serde"))]
        bail!("--json requires the `serde` feature");
    }
    Ok(Box::new(TextReport))
}
