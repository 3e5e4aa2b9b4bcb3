use accord_types::Timestamp;
use std::time::Duration;

// ── Construction ─────────────────────────────────────────────────

#[test]
fn now_is_after_2020() {
    assert!(Timestamp::now().as_millis() > 1_577_836_800_000);
}

#[test]
fn from_millis_roundtrip() {
    assert_eq!(Timestamp::from_millis(1234).as_millis(), 1234);
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parse_rfc3339_with_offset() {
    let ts = Timestamp::parse("2024-01-01T00:00:00.500+00:00").unwrap();
    assert_eq!(ts.as_millis(), 1_704_067_200_500);
}

#[test]
fn parse_rejects_garbage() {
    assert!(Timestamp::parse("yesterday").is_err());
}

#[test]
fn deserialize_from_string_or_integer() {
    let a: Timestamp = serde_json::from_str(r#""2024-01-01T00:00:00Z""#).unwrap();
    let b: Timestamp = serde_json::from_str("1704067200000").unwrap();
    assert_eq!(a, b);
}

#[test]
fn serde_roundtrip_keeps_millis() {
    let ts = Timestamp::from_millis(1_704_067_200_123);
    let json = serde_json::to_string(&ts).unwrap();
    let back: Timestamp = serde_json::from_str(&json).unwrap();
    assert_eq!(ts, back);
}

// ── Arithmetic ───────────────────────────────────────────────────

#[test]
fn ordering_and_since() {
    let a = Timestamp::from_millis(1_000);
    let b = Timestamp::from_millis(4_000);
    assert!(a.is_before(&b));
    assert_eq!(b.since(&a), Duration::from_secs(3));
    assert_eq!(a.since(&b), Duration::ZERO);
}

#[test]
fn saturating_sub_clamps_at_epoch() {
    let ts = Timestamp::from_millis(500);
    assert_eq!(ts.saturating_sub(Duration::from_secs(1)).as_millis(), 0);
    assert_eq!(ts.saturating_sub(Duration::from_millis(200)).as_millis(), 300);
}
