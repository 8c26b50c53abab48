use std::sync::Arc;
use std::thread;

use nvr_view::{
    CameraView, RecordingList, StreamType, TimeRange, TopLevelView, ViewConfig, ViewError,
};
use serde_json::{json, Value};
use uuid::Uuid;

fn camera_payload(id: &str, days: Value) -> Value {
    json!({
        "id": id,
        "shortName": "back yard",
        "description": "Dahua on the fence post",
        "retainBytes": 50_000_000_000i64,
        "minStartTime90k": 0,
        "maxEndTime90k": 9_000_000,
        "totalDuration90k": 8_100_000,
        "totalSampleFileBytes": 1_234_567,
        "days": days,
    })
}

fn day(start: i64, end: i64, present: i64) -> Value {
    json!({ "startTime90k": start, "endTime90k": end, "totalDuration90k": present })
}

#[test]
fn single_day_matches_constructed_range() -> anyhow::Result<()> {
    let camera = CameraView::new(camera_payload(
        "cam",
        json!({ "2024-01-01": day(0, 90_000, 90_000) }),
    ))?;
    assert_eq!(
        camera.days().get("2024-01-01"),
        Some(&TimeRange::new(0, 90_000, 90_000)?)
    );
    Ok(())
}

#[test]
fn missing_retain_bytes_is_a_validation_error() {
    let mut payload = camera_payload("cam", json!({}));
    payload.as_object_mut().unwrap().remove("retainBytes");
    match CameraView::new(payload) {
        Err(ViewError::Validation(msg)) => assert!(msg.contains("retainBytes")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn derived_values_are_stable_across_calls() -> anyhow::Result<()> {
    let camera = CameraView::new(camera_payload(
        "cam",
        json!({
            "2024-03-02": day(4_500_000, 9_000_000, 3_600_000),
            "2024-03-01": day(0, 4_500_000, 4_500_000),
        }),
    ))?;
    assert_eq!(camera.overall_range(), camera.overall_range());
    assert_eq!(camera.days(), camera.days());
    assert_eq!(camera.days().clone(), *camera.days());
    Ok(())
}

#[test]
fn day_order_follows_the_payload_text() -> anyhow::Result<()> {
    let text = r#"{
        "id": "cam", "shortName": "s", "description": "d", "retainBytes": 1,
        "minStartTime90k": 0, "maxEndTime90k": 300, "totalDuration90k": 300,
        "totalSampleFileBytes": 1,
        "days": {
            "2024-05-03": { "startTime90k": 200, "endTime90k": 300, "totalDuration90k": 100 },
            "2024-05-01": { "startTime90k": 0, "endTime90k": 100, "totalDuration90k": 100 },
            "2024-05-02": { "startTime90k": 100, "endTime90k": 200, "totalDuration90k": 100 }
        }
    }"#;
    let camera = CameraView::from_json_str(text)?;
    let keys: Vec<String> = camera.days().keys().map(|k| k.to_string()).collect();
    assert_eq!(keys, ["2024-05-03", "2024-05-01", "2024-05-02"]);
    Ok(())
}

#[test]
fn empty_day_collection_is_not_an_error() -> anyhow::Result<()> {
    let camera = CameraView::new(camera_payload("cam", json!({})))?;
    assert!(camera.days().is_empty());
    Ok(())
}

#[test]
fn every_valid_range_keeps_presence_within_span() -> anyhow::Result<()> {
    let camera = CameraView::new(camera_payload(
        "cam",
        json!({
            "2024-03-01": day(0, 4_500_000, 4_500_000),
            "2024-03-02": day(4_500_000, 9_000_000, 3_600_000),
        }),
    ))?;
    let ranges = std::iter::once(camera.overall_range())
        .chain(camera.days().iter().map(|(_, r)| *r));
    for r in ranges {
        assert!(r.span_ticks() >= r.present_duration_ticks());
        assert!(r.present_duration_ticks() >= 0);
        assert!(r.start_tick() <= r.end_tick());
        assert!(camera.overall_range().contains(&r));
    }
    assert_eq!(camera.days().total_present_ticks(), 8_100_000);
    Ok(())
}

#[test]
fn failed_refresh_leaves_previous_view_untouched() -> anyhow::Result<()> {
    let current = CameraView::new(camera_payload("cam", json!({ "2024-01-01": day(0, 10, 10) })))?;
    let refreshed = CameraView::new(camera_payload("cam", json!({ "2024-01-01": day(10, 0, 0) })));
    assert!(refreshed.is_err());
    assert_eq!(current.days().get("2024-01-01"), Some(&TimeRange::new(0, 10, 10)?));
    Ok(())
}

#[test]
fn views_are_shareable_across_threads() -> anyhow::Result<()> {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CameraView>();
    assert_send_sync::<TopLevelView>();
    assert_send_sync::<TimeRange>();

    let camera = Arc::new(CameraView::new(camera_payload(
        "cam",
        json!({ "2024-03-01": day(0, 4_500_000, 4_500_000) }),
    ))?);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let camera = Arc::clone(&camera);
            thread::spawn(move || camera.days().get("2024-03-01").copied())
        })
        .collect();
    for handle in handles {
        let range = handle.join().expect("reader thread panicked");
        assert_eq!(range, Some(TimeRange::new(0, 4_500_000, 4_500_000)?));
    }
    Ok(())
}

#[test]
fn strict_config_rejects_days_outside_summary() {
    let payload = camera_payload("cam", json!({ "2024-03-05": day(9_000_000, 9_090_000, 90_000) }));
    let lenient = CameraView::new(payload.clone()).unwrap();
    assert_eq!(lenient.divergent_days().len(), 1);

    let strict = ViewConfig {
        strict_day_containment: true,
        ..ViewConfig::default()
    };
    assert!(CameraView::with_config(payload, &strict).unwrap_err().is_validation());
}

#[test]
fn top_level_document_links_to_recordings() -> anyhow::Result<()> {
    let id = Uuid::new_v4().to_string();
    let top = TopLevelView::new(json!({
        "timeZoneName": "America/Los_Angeles",
        "cameras": [camera_payload(&id, json!({ "2024-03-01": day(0, 4_500_000, 4_500_000) }))],
    }))?;
    let camera = top.camera(&id).expect("camera listed");
    let range = camera.days().get("2024-03-01").copied();
    assert_eq!(
        camera.recordings_path(StreamType::Main, range.as_ref(), Some(900_000))?,
        format!("/api/cameras/{id}/main/recordings?startTime90k=0&endTime90k=4500000&split90k=900000")
    );
    Ok(())
}

#[test]
fn recording_listing_links_to_playback() -> anyhow::Result<()> {
    let id = Uuid::new_v4().to_string();
    let camera = CameraView::new(camera_payload(&id, json!({})))?;
    let list = RecordingList::new(json!({
        "recordings": [{
            "startId": 40,
            "openId": 7,
            "startTime90k": 0,
            "endTime90k": 900_000,
            "sampleFileBytes": 1_000,
            "videoSamples": 150,
            "videoSampleEntryWidth": 704,
            "videoSampleEntryHeight": 480,
            "videoSampleEntrySha1": "0123456789abcdef0123456789abcdef01234567",
        }]
    }))?;
    let recording = &list.recordings()[0];
    assert_eq!(recording.open_id(), 7);
    assert_eq!(
        recording.init_segment_path()?,
        "/api/init/0123456789abcdef0123456789abcdef01234567.mp4"
    );
    let segment = recording.segment_param(Some(0), Some(450_000))?;
    assert_eq!(
        camera.view_m4s_path(StreamType::Sub, &segment)?,
        format!("/api/cameras/{id}/sub/view.m4s?s=40@7.0-450000")
    );
    Ok(())
}
