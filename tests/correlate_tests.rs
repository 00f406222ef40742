use chrono::{NaiveDate, NaiveDateTime};
use sshkey_audit::authlog::event::Outcome;
use sshkey_audit::authlog::parser::LogRecordParser;
use sshkey_audit::authlog::usage::UsageIndex;
use sshkey_audit::keys::parser::parse_authorized_keys;
use sshkey_audit::keys::types::KeyRecord;
use sshkey_audit::report::{correlate, KeyStatus, ReportRow};

// Real keys; fingerprints verified against `ssh-keygen -lf`.
const ED25519_LINE: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIE4Kps7qK13amnp5+5MpswVm5npPo9P2lvPMR3yCiJ+P a@b.com";
const ED25519_FPR: &str = "SHA256:WMb4CtnK3u0Vjxw76OoE4cGBO2fRQF/z6o8TPCHuNp8";
const ECDSA_LINE: &str =
    "ecdsa-sha2-nistp256 AAAAE2VjZHNhLXNoYTItbmlzdHAyNTYAAAAIbmlzdHAyNTYAAABBBH0NXasNKA99QvaOIcRiSZhRk63Cea61ZXMlEh45vyf7xhQ0sQICjsmjYyJD7xTIQ1WPLRSMwhbwCUcJgBKhc00= ops@example.net";
const ECDSA_FPR: &str = "SHA256:nkZXSxyedJSFuXsgzvnSnxr5RlFauB/fUad9b9IvDak";

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn days_before(reference: NaiveDateTime, days: i64) -> NaiveDateTime {
    reference - chrono::Duration::days(days)
}

fn keys() -> Vec<KeyRecord> {
    parse_authorized_keys(format!("{ED25519_LINE}\n{ECDSA_LINE}\n").as_bytes()).unwrap()
}

#[test]
fn every_key_produces_one_row_without_threshold() {
    let rows = correlate(&keys(), &UsageIndex::new(), now(), None);
    assert_eq!(rows.len(), 2);
}

#[test]
fn rows_preserve_key_file_order() {
    let mut index = UsageIndex::new();
    index.record(ECDSA_FPR, days_before(now(), 3), Outcome::Accepted);

    let rows = correlate(&keys(), &index, now(), None);
    assert_eq!(rows[0].comment.as_deref(), Some("a@b.com"));
    assert_eq!(rows[1].comment.as_deref(), Some("ops@example.net"));
}

#[test]
fn single_event_join_gives_exact_day_difference() {
    let mut index = UsageIndex::new();
    index.record(ED25519_FPR, days_before(now(), 10), Outcome::Accepted);

    let rows = correlate(&keys(), &index, now(), None);
    assert_eq!(rows[0].age_days, Some(10));
    assert_eq!(rows[0].status, KeyStatus::Used);
    assert_eq!(rows[0].last_used, Some(days_before(now(), 10)));
}

#[test]
fn threshold_filters_recent_keys_but_keeps_stale_ones() {
    // Key used 10 days ago: included at threshold 7, excluded at 14.
    let mut index = UsageIndex::new();
    index.record(ED25519_FPR, days_before(now(), 10), Outcome::Accepted);
    index.record(ECDSA_FPR, days_before(now(), 1), Outcome::Accepted);

    let rows = correlate(&keys(), &index, now(), Some(7));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].age_days, Some(10));

    let rows = correlate(&keys(), &index, now(), Some(14));
    assert!(rows.is_empty());
}

#[test]
fn never_used_keys_pass_any_threshold() {
    for threshold in [0, 7, 365, 10_000] {
        let rows = correlate(&keys(), &UsageIndex::new(), now(), Some(threshold));
        assert_eq!(rows.len(), 2, "threshold {threshold}");
        assert!(rows.iter().all(|r| r.status == KeyStatus::NeverUsed));
        assert!(rows.iter().all(|r| r.age_days.is_none() && r.last_used.is_none()));
    }
}

#[test]
fn threshold_zero_is_a_no_op_filter() {
    let mut index = UsageIndex::new();
    index.record(ED25519_FPR, now(), Outcome::Accepted);
    index.record(ECDSA_FPR, days_before(now(), 400), Outcome::Accepted);

    let unfiltered = correlate(&keys(), &index, now(), None);
    let zero = correlate(&keys(), &index, now(), Some(0));
    assert_eq!(unfiltered, zero);
}

#[test]
fn correlate_is_idempotent_for_fixed_now() {
    let mut index = UsageIndex::new();
    index.record(ED25519_FPR, days_before(now(), 42), Outcome::Accepted);

    let first = correlate(&keys(), &index, now(), Some(30));
    let second = correlate(&keys(), &index, now(), Some(30));
    assert_eq!(first, second);
}

#[test]
fn age_uses_latest_event_regardless_of_record_order() {
    let older = days_before(now(), 20);
    let newer = days_before(now(), 5);

    let mut index = UsageIndex::new();
    index.record(ED25519_FPR, newer, Outcome::Accepted);
    index.record(ED25519_FPR, older, Outcome::Accepted);

    let rows = correlate(&keys(), &index, now(), None);
    assert_eq!(rows[0].age_days, Some(5));
}

#[test]
fn garbled_log_lines_do_not_change_the_index() {
    let parser = LogRecordParser::new(now());
    let valid = format!(
        "Jun 10 03:04:05 bastion sshd[1234]: Accepted publickey for alice from 192.0.2.10 port 50322 ssh2: ED25519 {ED25519_FPR}"
    );

    let mut clean = UsageIndex::new();
    for line in [valid.as_str()] {
        if let Some(event) = parser.parse(line) {
            clean.record_event(&event);
        }
    }

    let mut noisy = UsageIndex::new();
    for line in [
        valid.as_str(),
        "Jun 10 03:04:06 bastion sshd[1234]: \x00\x01 garbled \u{fffd} line",
        "not a log line at all",
    ] {
        if let Some(event) = parser.parse(line) {
            noisy.record_event(&event);
        }
    }

    assert_eq!(clean.len(), noisy.len());
    assert_eq!(clean.lookup(ED25519_FPR), noisy.lookup(ED25519_FPR));
}

#[test]
fn report_row_round_trips_through_json() {
    let mut index = UsageIndex::new();
    index.record(ED25519_FPR, days_before(now(), 10), Outcome::Accepted);

    let rows = correlate(&keys(), &index, now(), None);
    let json = serde_json::to_string(&rows[0]).unwrap();
    let back: ReportRow = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rows[0]);
}
