#![forbid(unsafe_code)]
mod common;

use common::*;
use rota::{parse_ledger, render_ledger, CodecError, LedgerError, MarkKind, SAMPLE_FILE};

#[test]
fn load_empty_text() {
    let l = parse_ledger("").unwrap();
    assert_eq!(l.size(), 0);
    assert!(l.persons().is_empty());
    assert!(l.dates().is_empty());
}

#[test]
fn load_headers_without_data() {
    let l = parse_ledger(&make_input(&[], &[])).unwrap();
    assert_eq!(l.size(), 0);
    assert!(l.persons().is_empty());
    assert!(l.dates().is_empty());
}

#[test]
fn load_some_data() {
    let l = parse_ledger(&make_input(PERSONS_3, DATES_3)).unwrap();
    assert_eq!(l.size(), DATES_3.len());
    assert_eq!(person_rows(&l), expected_persons(PERSONS_3));
    assert_eq!(date_rows(&l), expected_dates(DATES_3));
    assert_eq!(l.comments(), ["# Comment line 1", "# Comment line 2"]);
}

#[test]
fn load_again_gives_fresh_ledgers() {
    for dates in [DATES_1, DATES_3, DATES_2] {
        let l = parse_ledger(&make_input(&[], dates)).unwrap();
        assert_eq!(l.size(), dates.len());
    }
}

#[test]
fn sample_file_round_trips_byte_for_byte() {
    let l = parse_ledger(SAMPLE_FILE).unwrap();
    assert_eq!(l.count_persons(), 3);
    assert_eq!(l.size(), 5);
    assert_eq!(render_ledger(&l), SAMPLE_FILE);
}

#[test]
fn save_then_load_keeps_everything() {
    let first = parse_ledger(&make_input(PERSONS_3, DATES_3)).unwrap();
    let text = render_ledger(&first);
    let second = parse_ledger(&text).unwrap();
    assert_eq!(second.comments(), first.comments());
    assert_eq!(person_rows(&second), expected_persons(PERSONS_3));
    assert_eq!(date_rows(&second), expected_dates(DATES_3));
    assert_eq!(render_ledger(&second), text);
    assert!(text.starts_with("# Comment line 1\n# Comment line 2\n"));
}

#[test]
fn placeholders_survive_round_trip() {
    let text = "\
DATE     | DOW | ONCALL | UNAVAILABLE | HOLIDAYS
-------- | --- | ------ | ----------- | --------
20171127 | Mon |        |             |
20171128 | Tue |        |             | xxx
";
    let l = parse_ledger(text).unwrap();
    assert_eq!(l.size(), 0);
    assert_eq!(l.dates().len(), 2);
    let again = parse_ledger(&render_ledger(&l)).unwrap();
    assert_eq!(date_rows(&again), date_rows(&l));
}

#[test]
fn wrong_column_count_is_fatal() {
    let text = "\
# notes
PERSON | NAME | INITIAL_SCORE | RECURRING_WFH_DAYS
xxx | Mr X | 1
";
    match parse_ledger(text) {
        Err(CodecError::Malformed { line, content, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(content, "xxx | Mr X | 1");
        }
        other => panic!("expected a malformed row, got {other:?}"),
    }
}

#[test]
fn bad_values_are_fatal() {
    let bad_score = "PERSON | NAME | INITIAL_SCORE | RECURRING_WFH_DAYS\nxxx | Mr X | lots |\n";
    assert!(parse_ledger(bad_score).is_err());

    let weekend = "PERSON | NAME | INITIAL_SCORE | RECURRING_WFH_DAYS\nxxx | Mr X | 0 | Sat\n";
    assert!(parse_ledger(weekend).is_err());

    let bad_date = "DATE | DOW | ONCALL | UNAVAILABLE | HOLIDAYS\n2017-11-27 | Mon | xxx | |\n";
    let err = parse_ledger(bad_date).unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn bad_person_cells_in_dates_are_fatal() {
    let two_on_call = "DATE | DOW | ONCALL | UNAVAILABLE | HOLIDAYS\n20171127 | Mon | xxx yyy | |\n";
    match parse_ledger(two_on_call) {
        Err(CodecError::Malformed { line, reason, .. }) => {
            assert_eq!(line, 2);
            assert!(reason.contains("xxx yyy"));
        }
        other => panic!("expected a malformed row, got {other:?}"),
    }

    let hash_id = "DATE | DOW | ONCALL | UNAVAILABLE | HOLIDAYS\n20171127 | Mon | xxx | | #ops\n";
    assert!(parse_ledger(hash_id).is_err());
}

#[test]
fn weekend_rows_are_fatal() {
    let text = "DATE | DOW | ONCALL | UNAVAILABLE | HOLIDAYS\n20171125 | Sat | xxx | |\n";
    let err = parse_ledger(text).unwrap_err();
    assert!(err.to_string().contains("line 2"));
    assert!(err.to_string().contains("business day"));
}

#[test]
fn ids_read_back_as_comments_are_refused() {
    let mut l = parse_ledger(&make_input(PERSONS_1, DATES_1)).unwrap();
    assert!(matches!(
        l.add_person(person("#ops", "")),
        Err(LedgerError::InvalidPersonId(_))
    ));
    assert!(!l.set_on_call(d("20171128"), &pid("#ops"), true));
    assert!(!l.set_mark(d("20171128"), &pid("#ops"), MarkKind::Holiday, true));
    l.add_person(person("yyy", "")).unwrap();

    let text = render_ledger(&l);
    let again = parse_ledger(&text).unwrap();
    assert_eq!(again.count_persons(), 2);
    assert_eq!(again.comments(), l.comments());
    assert_eq!(render_ledger(&again), text);
}

#[test]
fn crlf_comments_are_kept_verbatim() {
    let text = "# first\r\n# second\r\nPERSON | NAME | INITIAL_SCORE | RECURRING_WFH_DAYS\r\nxxx | Mr X | 0 |\r\n";
    let l = parse_ledger(text).unwrap();
    assert_eq!(l.comments(), ["# first\r", "# second\r"]);
    assert_eq!(l.count_persons(), 1);
    assert!(render_ledger(&l).starts_with("# first\r\n# second\r\n"));
}

#[test]
fn data_before_any_header_is_fatal() {
    assert!(parse_ledger("xxx | Mr X | 1 |\n").is_err());
}

#[test]
fn unknown_sections_are_skipped() {
    let text = "\
NOTES | TEXT
anything | goes here
PERSON | NAME | INITIAL_SCORE | RECURRING_WFH_DAYS
xxx | Mr X | 0 |
";
    let l = parse_ledger(text).unwrap();
    assert_eq!(l.count_persons(), 1);
}

#[test]
fn sentinel_rows_are_dropped() {
    let text = "\
DATE | DOW | ONCALL | UNAVAILABLE | HOLIDAYS
19700101 | Thu | | |
20171127 | Mon | xxx | |
";
    let l = parse_ledger(text).unwrap();
    assert_eq!(l.size(), 1);
    assert_eq!(l.dates().len(), 1);
}
