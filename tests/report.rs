#![forbid(unsafe_code)]
mod common;

use common::*;
use rota::{parse_ledger, Fairness, ReportRenderer, ScheduleColumns, TextReport};

#[test]
fn dates_table() {
    let l = parse_ledger(&make_input(PERSONS_3, DATES_3)).unwrap();
    let out = TextReport.dates(&l.dates()).unwrap();
    insta::assert_snapshot!(out, @r"
+----------+-----+--------+-------------+----------+
| DATE     | DOW | ONCALL | UNAVAILABLE | HOLIDAYS |
+----------+-----+--------+-------------+----------+
| 20171127 | Mon | xxx    |             |          |
| 20171128 | Tue | yyy    | xxx zzz     |          |
| 20171129 | Wed | zzz    |             | xxx yyy  |
+----------+-----+--------+-------------+----------+
");
}

#[test]
fn summary_columns_can_be_hidden() {
    let l = parse_ledger(&make_input(PERSONS_3, DATES_3)).unwrap();
    let rows = Fairness::new(&l).schedule(None, None);

    let both = TextReport.schedule(&rows, ScheduleColumns::default()).unwrap();
    assert!(both.contains("STATUS xxx"));
    assert!(both.contains("SCORE zzz"));
    assert!(both.contains("Back from hols") || both.contains("Unavailable"));

    let no_score = ScheduleColumns {
        status: true,
        score: false,
    };
    let out = TextReport.schedule(&rows, no_score).unwrap();
    assert!(out.contains("STATUS yyy"));
    assert!(!out.contains("SCORE"));
}

#[test]
fn stats_table_has_caption() {
    let l = parse_ledger(&make_input(PERSONS_3, DATES_3)).unwrap();
    let rows = Fairness::new(&l).stats(d("20171129"));
    let out = TextReport.stats("Stats at 20171129", &rows).unwrap();
    assert!(out.starts_with("Stats at 20171129\n+"));
    assert!(out.contains("| zzz "));
    assert!(out.contains("On hols"));
}

#[cfg(feature = "serde")]
#[test]
fn json_report_lists_dates() {
    use rota::report::JsonReport;
    let l = parse_ledger(&make_input(PERSONS_3, DATES_1)).unwrap();
    let out = JsonReport.dates(&l.dates()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["date"], "20171127");
    assert_eq!(value[0]["on_call"], "xxx");
}
