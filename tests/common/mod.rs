#![allow(dead_code)]
use rota::{Day, Person, PersonId, WfhDays};

pub type PersonRow<'a> = (&'a str, &'a str, &'a str, &'a str);
pub type DateRowIn<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str);

pub const PERSONS_1: &[PersonRow] = &[("xxx", "Mr X", "1", "")];
pub const PERSONS_2: &[PersonRow] = &[("xxx", "Mr X", "1", ""), ("yyy", "Mr Y", "2", "Tue Thu")];
pub const PERSONS_3: &[PersonRow] = &[
    ("xxx", "Mr X", "1", ""),
    ("yyy", "Mr Y", "2", "Tue Thu"),
    ("zzz", "Mr Z", "3", "Fri"),
];

pub const DATES_1: &[DateRowIn] = &[("20171127", "Mon", "xxx", "", "")];
pub const DATES_2: &[DateRowIn] = &[
    ("20171127", "Mon", "xxx", "", ""),
    ("20171128", "Tue", "yyy", "xxx zzz", ""),
];
pub const DATES_3: &[DateRowIn] = &[
    ("20171127", "Mon", "xxx", "", ""),
    ("20171128", "Tue", "yyy", "xxx zzz", ""),
    ("20171129", "Wed", "zzz", "", "xxx yyy"),
];

/// Fichier hand-made : commentaires, lignes blanches, colonnes non alignées.
pub fn make_input(persons: &[PersonRow], dates: &[DateRowIn]) -> String {
    let pp: Vec<String> = persons
        .iter()
        .map(|(a, b, c, d)| [*a, *b, *c, *d].join("|"))
        .collect();
    let dd: Vec<String> = dates
        .iter()
        .map(|(a, b, c, d, e)| [*a, *b, *c, *d, *e].join("|"))
        .collect();
    format!(
        "\n# Comment line 1\n# Comment line 2\n    \n\
         PERSON | NAME           | INITIAL_SCORE | RECURRING_WFH_DAYS\n\
         -------|----------------|---------------|-------------------\n    {}\n\
         DATE     | DOW | ONCALL | UNAVAILABLE | HOLIDAYS\n\
         ---------|-----|--------|-------------|---------\n    {}\n",
        pp.join("\n"),
        dd.join("\n")
    )
}

pub fn d(s: &str) -> Day {
    s.parse().unwrap()
}

pub fn pid(s: &str) -> PersonId {
    PersonId::new(s)
}

pub fn person(id: &str, wfh: &str) -> Person {
    Person::new(id, format!("Mr {id}"), 0.0, wfh.parse::<WfhDays>().unwrap())
}

/// Lignes (id, nom, score, télétravail) telles que relues.
pub fn person_rows(ledger: &rota::Ledger) -> Vec<(String, String, String, String)> {
    ledger
        .persons()
        .into_iter()
        .map(|p| {
            (
                p.id.to_string(),
                p.name.clone(),
                p.initial_score.to_string(),
                p.wfh_days.to_string(),
            )
        })
        .collect()
}

pub fn expected_persons(rows: &[PersonRow]) -> Vec<(String, String, String, String)> {
    rows.iter()
        .map(|(a, b, c, d)| (a.to_string(), b.to_string(), c.to_string(), d.to_string()))
        .collect()
}

/// Lignes (date, dow, astreinte, indispos, congés) telles que relues.
pub fn date_rows(ledger: &rota::Ledger) -> Vec<(String, String, String, String, String)> {
    ledger
        .dates()
        .into_iter()
        .map(|r| {
            (
                r.date.to_string(),
                r.dow.clone(),
                r.on_call_str().to_string(),
                r.unavailable_str(),
                r.holidays_str(),
            )
        })
        .collect()
}

pub fn expected_dates(rows: &[DateRowIn]) -> Vec<(String, String, String, String, String)> {
    rows.iter()
        .map(|(a, b, c, d, e)| {
            (
                a.to_string(),
                b.to_string(),
                c.to_string(),
                d.to_string(),
                e.to_string(),
            )
        })
        .collect()
}
