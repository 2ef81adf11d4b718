//! # Report Tests
//!
//! Text rendering and JSON shape of finished and partial reports.

use sbsim_core::config::Config;

use crate::common::harness::run_source;

const TEXTBOOK: &str = "fld f6, 34(x2)\nfld f2, 45(x3)\nfadd f4, f2, f6\n";

#[test]
fn test_text_report_lists_every_row() {
    let report = run_source(TEXTBOOK, &Config::default());
    let text = report.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("Instruction"));
    assert!(lines[1].starts_with("fld f6, 34(x2)"));
    assert!(lines[3].contains("adder_1"));
    assert!(lines[3].split_whitespace().any(|cell| cell == "10"));
    assert!(text.contains("all registers ready"));
    assert!(text.ends_with("Completed in 10 cycles"));
}

#[test]
fn test_json_report_shape() {
    let report = run_source(TEXTBOOK, &Config::default());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["cycles"], 10);
    assert_eq!(json["finished"], true);
    assert_eq!(json["rows"][2]["op"], "add");
    assert_eq!(json["rows"][2]["stage"], "written_back");
    assert_eq!(json["rows"][2]["times"]["read_operands"], 7);
    assert_eq!(json["rows"][2]["unit"], "adder_1");
    assert_eq!(json["units"][0]["name"], "address_1");
    assert_eq!(json["units"][0]["class"], "address");
    assert_eq!(json["stats"]["completed"], 3);
}

#[test]
fn test_units_idle_after_completion() {
    let report = run_source(TEXTBOOK, &Config::default());
    assert!(report.units.iter().all(|u| !u.busy && u.occupant.is_none()));
    assert!(report.registers.is_empty());
}
