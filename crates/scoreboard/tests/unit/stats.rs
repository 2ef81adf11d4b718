//! # Statistics Tests
//!
//! Stall and occupancy accounting for schedules whose timing is known.

use pretty_assertions::assert_eq;
use sbsim_core::config::Config;
use sbsim_core::core::units::UnitClass;
use sbsim_core::stats::{STATS_SECTIONS, SimStats};

use crate::common::harness::run_source;

fn textbook_stats() -> SimStats {
    run_source(
        "fld f6, 34(x2)\nfld f2, 45(x3)\nfadd f4, f2, f6\n",
        &Config::default(),
    )
    .stats
}

#[test]
fn test_textbook_stall_breakdown() {
    let stats = textbook_stats();
    assert_eq!(stats.cycles, 10);
    assert_eq!(stats.instructions, 3);
    assert_eq!(stats.completed, 3);
    assert_eq!(stats.stalls_structural, 2);
    assert_eq!(stats.stalls_raw, 1);
    assert_eq!(stats.stalls_waw, 0);
    assert_eq!(stats.stalls_war, 0);
    assert_eq!(stats.stalls_write_bus, 0);
    assert_eq!(stats.total_stalls(), 3);
}

#[test]
fn test_textbook_unit_occupancy() {
    let stats = textbook_stats();
    let busy: Vec<_> = stats.units.iter().map(|u| (u.class, u.busy_cycles)).collect();
    assert_eq!(
        busy,
        vec![
            (UnitClass::Address, 6),
            (UnitClass::Adder, 5),
            (UnitClass::Multiplier, 0),
            (UnitClass::Divider, 0),
        ]
    );
    assert!((stats.units[0].utilization(stats.cycles) - 60.0).abs() < 1e-9);
    assert!(stats.units.iter().all(|u| u.peak_busy <= u.capacity));
}

#[test]
fn test_cpi() {
    let stats = textbook_stats();
    let cpi = stats.cpi().unwrap();
    assert!((cpi - 10.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_render_every_section() {
    let text = textbook_stats().render_sections(&[]);
    for needle in ["sim_cycles", "stalls.structural", "FUNCTIONAL UNITS", "address"] {
        assert!(text.contains(needle), "missing {needle}");
    }
    assert_eq!(STATS_SECTIONS, &["summary", "stalls", "units"]);
}

#[test]
fn test_render_selected_sections() {
    let text = textbook_stats().render_sections(&["units".to_string()]);
    assert!(text.contains("FUNCTIONAL UNITS"));
    assert!(!text.contains("STALL BREAKDOWN"));
    assert!(!text.contains("sim_cpi"));
}

#[test]
fn test_stats_serialize() {
    let json = serde_json::to_value(textbook_stats()).unwrap();
    assert_eq!(json["stalls_structural"], 2);
    assert_eq!(json["units"][1]["class"], "adder");
}
