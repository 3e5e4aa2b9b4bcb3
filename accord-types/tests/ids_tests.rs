use accord_types::{DISCORD_EPOCH_MS, Snowflake};
use proptest::prelude::*;
use std::str::FromStr;

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parse_decimal_string() {
    let id = Snowflake::parse("175928847299117063").unwrap();
    assert_eq!(id.get(), 175_928_847_299_117_063);
}

#[test]
fn parse_rejects_garbage() {
    assert!(Snowflake::parse("not-an-id").is_err());
    assert!(Snowflake::from_str("").is_err());
}

#[test]
fn display_is_decimal() {
    assert_eq!(Snowflake::new(42).to_string(), "42");
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn deserialize_from_string_or_integer() {
    let a: Snowflake = serde_json::from_str(r#""123""#).unwrap();
    let b: Snowflake = serde_json::from_str("123").unwrap();
    assert_eq!(a, b);
}

#[test]
fn serializes_as_string() {
    let json = serde_json::to_string(&Snowflake::new(99)).unwrap();
    assert_eq!(json, r#""99""#);
}

#[test]
fn negative_integer_rejected() {
    assert!(serde_json::from_str::<Snowflake>("-1").is_err());
}

// ── Creation time ────────────────────────────────────────────────

#[test]
fn created_at_decodes_upper_bits() {
    // Documented example id: created 2016-04-30T11:18:25.796Z.
    let id = Snowflake::new(175_928_847_299_117_063);
    assert_eq!(id.created_at().as_millis(), 1_462_015_105_796);
}

#[test]
fn zero_id_is_platform_epoch() {
    assert_eq!(Snowflake::new(0).created_at().as_millis(), DISCORD_EPOCH_MS);
}

proptest! {
    #[test]
    fn string_form_roundtrips(raw in any::<u64>()) {
        let id = Snowflake::new(raw);
        let parsed: Snowflake = id.to_string().parse().unwrap();
        prop_assert_eq!(id, parsed);
    }
}
