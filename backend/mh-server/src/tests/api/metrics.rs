use crate::{ApiError, MetricsBroadcast, MetricsReport};

use chrono::{TimeZone, Utc};
use googletest::prelude::*;

fn report(cpu: f64, disk: f64) -> MetricsReport {
    MetricsReport {
        cpu_usage: cpu,
        disk_usage: disk,
    }
}

#[test]
fn given_agent_json_when_deserialized_then_wire_names_map_to_fields() {
    let parsed: MetricsReport =
        serde_json::from_str(r#"{"uso_cpu": 12.5, "uso_disco": 99.0}"#).unwrap();

    assert_eq!(parsed, report(12.5, 99.0));
}

#[test]
fn given_missing_field_when_deserialized_then_fails() {
    let parsed = serde_json::from_str::<MetricsReport>(r#"{"uso_cpu": 12.5}"#);

    assert!(parsed.is_err());
}

#[test]
fn given_bounds_when_validated_then_accepted() {
    assert!(report(0.0, 0.0).validate().is_ok());
    assert!(report(100.0, 100.0).validate().is_ok());
}

#[test]
fn given_negative_cpu_when_validated_then_rejects_cpu_field() {
    let err = report(-0.5, 10.0).validate().unwrap_err();

    match err {
        ApiError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("uso_cpu")),
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn given_disk_over_100_when_validated_then_rejects_disk_field() {
    let err = report(10.0, 100.5).validate().unwrap_err();

    match err {
        ApiError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("uso_disco")),
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn given_nan_or_infinity_when_validated_then_rejected() {
    assert!(report(f64::NAN, 1.0).validate().is_err());
    assert!(report(1.0, f64::INFINITY).validate().is_err());
}

#[test]
fn given_broadcast_when_encoded_then_flat_record_with_timestamp() {
    let received_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();
    let broadcast = MetricsBroadcast::new(report(42.0, 7.5), received_at);

    let payload = broadcast.to_payload().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();

    assert_that!(json["uso_cpu"].as_f64(), eq(Some(42.0)));
    assert_that!(json["uso_disco"].as_f64(), eq(Some(7.5)));
    assert_that!(
        json["received_at"].as_str(),
        eq(Some("2026-03-01T12:30:00.000Z"))
    );
}
