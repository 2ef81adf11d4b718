//! # Configuration Tests
//!
//! Defaults, JSON deserialization, the plain table format and validation.

use pretty_assertions::assert_eq;
use rstest::rstest;
use sbsim_core::common::error::ConfigError;
use sbsim_core::config::*;
use sbsim_core::core::units::UnitClass;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_cycles);
    assert_eq!(config.general.max_cycles, None);
    assert_eq!(config.units.total_units(), 4);
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_latencies() {
    let units = UnitsConfig::default();
    let latencies: Vec<_> = units.iter().map(|(c, u)| (c, u.latency)).collect();
    assert_eq!(
        latencies,
        vec![
            (UnitClass::Address, 1),
            (UnitClass::Adder, 2),
            (UnitClass::Multiplier, 10),
            (UnitClass::Divider, 20),
        ]
    );
}

#[test]
fn test_json_full() {
    let json = r#"{
        "general": { "trace_cycles": true, "max_cycles": 1000 },
        "units": {
            "address":    { "capacity": 2, "latency": 1 },
            "adder":      { "capacity": 3, "latency": 2 },
            "multiplier": { "capacity": 2, "latency": 6 },
            "divider":    { "capacity": 1, "latency": 12 }
        }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert!(config.general.trace_cycles);
    assert_eq!(config.general.max_cycles, Some(1000));
    assert_eq!(config.units.get(UnitClass::Adder), Some(UnitClassConfig::new(3, 2)));
    assert_eq!(config.units.total_units(), 8);
}

#[test]
fn test_json_general_section_is_optional() {
    let config = Config::from_json(r#"{ "units": { "add": { "capacity": 1, "latency": 2 } } }"#)
        .unwrap();
    assert_eq!(config.general, GeneralConfig::default());
    assert_eq!(config.units.total_units(), 1);
}

#[rstest]
#[case::empty_document("{}")]
#[case::misspelled_units(r#"{ "unit": { "mul": { "capacity": 4, "latency": 1 } } }"#)]
#[case::unknown_general_key(
    r#"{ "general": { "max_cycle": 10 }, "units": { "add": { "capacity": 1, "latency": 2 } } }"#
)]
#[case::unknown_unit_field(
    r#"{ "units": { "add": { "capacity": 1, "latency": 2, "pipelined": true } } }"#
)]
fn test_json_never_falls_back_to_defaults(#[case] json: &str) {
    let err = Config::from_json(json).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)), "got {err:?}");
}

#[test]
fn test_json_class_named_twice_through_aliases() {
    let json = r#"{ "units": {
        "int":     { "capacity": 3, "latency": 1 },
        "adder":   { "capacity": 1, "latency": 2 },
        "address": { "capacity": 1, "latency": 5 }
    } }"#;
    let err = Config::from_json(json).unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateClassName {
            class: UnitClass::Address,
            first: "int".to_string(),
            second: "address".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "unit class `address` configured twice, as `int` and `address`"
    );
}

#[test]
fn test_json_unknown_class_rejected() {
    let err = Config::from_json(r#"{ "units": { "fpu": { "capacity": 1, "latency": 1 } } }"#)
        .unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)), "got {err:?}");
}

#[test]
fn test_json_zero_latency_rejected() {
    let err = Config::from_json(r#"{ "units": { "div": { "capacity": 1, "latency": 0 } } }"#)
        .unwrap_err();
    assert_eq!(err, ConfigError::ZeroLatency(UnitClass::Divider));
}

#[test]
fn test_table_round_trip_through_config() {
    let config = Config::from_table(
        "# class capacity latency\n\
         integer 1 1\n\
         add     2 2\n\
         mult    2 10\n\
         div     1 40\n",
    )
    .unwrap();
    assert_eq!(config.units.get(UnitClass::Multiplier), Some(UnitClassConfig::new(2, 10)));
    assert_eq!(config.units.get(UnitClass::Divider), Some(UnitClassConfig::new(1, 40)));
    assert_eq!(config.general, GeneralConfig::default());
}

#[test]
fn test_table_may_omit_classes() {
    let units = UnitsConfig::parse_table("add 1 2\n").unwrap();
    assert!(units.get(UnitClass::Divider).is_none());
    assert_eq!(units.total_units(), 1);
}

#[rstest]
#[case("add 1", ConfigError::Malformed { line: 1, text: "add 1".into() })]
#[case("add one 2", ConfigError::Malformed { line: 1, text: "add one 2".into() })]
#[case("\nfpu 1 2", ConfigError::UnknownClass { line: 2, name: "fpu".into() })]
#[case("mul 1 3\nmult 2 3", ConfigError::DuplicateClass { line: 2, class: UnitClass::Multiplier })]
fn test_table_errors(#[case] text: &str, #[case] expected: ConfigError) {
    assert_eq!(UnitsConfig::parse_table(text).unwrap_err(), expected);
}

#[test]
fn test_table_zero_capacity_rejected() {
    let err = Config::from_table("add 0 2\n").unwrap_err();
    assert_eq!(err, ConfigError::ZeroCapacity(UnitClass::Adder));
}

#[test]
fn test_units_serialize_with_class_names() {
    let json = serde_json::to_value(UnitsConfig::empty().with(UnitClass::Adder, 2, 3)).unwrap();
    assert_eq!(json, serde_json::json!({ "adder": { "capacity": 2, "latency": 3 } }));
}
