use super::*;
use crate::test_helpers::signed_in_harness;
use crate::transport::Method;
use serde_json::json;

#[tokio::test]
async fn available_time_passes_lab_and_date_as_query() {
    let h = signed_in_harness("t");
    h.backend.push_data(json!({
        "availableTimeSlots": [{ "startTime": "08:00:00", "endTime": "10:00:00" }]
    }));

    let slots = available_time(&h.api, 4, "2024-05-01").await.unwrap();

    assert_eq!(slots.available_time_slots.len(), 1);
    let req = h.backend.last_request();
    assert_eq!(req.url, "http://lab.test/api/v1/reservation/available-time");
    assert_eq!(req.query_value("laboratoryId"), Some("4"));
    assert_eq!(req.query_value("reserveDate"), Some("2024-05-01"));
}

#[tokio::test]
async fn conflict_check_reports_conflicts() {
    let h = signed_in_harness("t");
    h.backend.push_data(json!({
        "hasConflict": true,
        "conflictList": [{ "id": 12, "startTime": "09:00:00", "endTime": "11:00:00", "status": 1 }]
    }));
    let check = ConflictCheck {
        laboratory_id: 4,
        reserve_date: "2024-05-01".to_owned(),
        start_time: "10:00:00".to_owned(),
        end_time: "12:00:00".to_owned(),
        exclude_id: None,
    };

    let report = check_conflict(&h.api, &check).await.unwrap();

    assert!(report.has_conflict);
    assert_eq!(report.conflict_list[0].id, 12);
    assert_eq!(h.backend.last_request().method, Method::Post);
    assert_eq!(
        h.backend.last_body(),
        json!({ "laboratoryId": 4, "reserveDate": "2024-05-01", "startTime": "10:00:00", "endTime": "12:00:00" })
    );
}

#[tokio::test]
async fn conflict_report_without_list_defaults_empty() {
    let h = signed_in_harness("t");
    h.backend.push_data(json!({ "hasConflict": false }));
    let report = check_conflict(
        &h.api,
        &ConflictCheck {
            laboratory_id: 1,
            reserve_date: "2024-05-02".to_owned(),
            start_time: "08:00:00".to_owned(),
            end_time: "09:00:00".to_owned(),
            exclude_id: Some(3),
        },
    )
    .await
    .unwrap();
    assert_eq!(report, ConflictReport::default());
    assert_eq!(h.backend.last_body()["excludeId"], json!(3));
}

#[tokio::test]
async fn cancel_hits_cancel_action() {
    let h = signed_in_harness("t");
    h.backend.push_data(json!({
        "id": 2, "laboratoryId": 4, "userId": 7, "reserveDate": "2024-05-01",
        "startTime": "08:00:00", "endTime": "10:00:00", "status": 3,
        "createTime": "2024-04-30T08:00:00", "updateTime": "2024-04-30T09:00:00"
    }));
    let cancelled = cancel(&h.api, 2, &CancelReservation::default()).await.unwrap();
    assert_eq!(cancelled.status(), Some(ReservationStatus::Cancelled));
    assert_eq!(h.backend.last_request().url, "http://lab.test/api/v1/reservation/2/cancel");
}

#[test]
fn only_pending_and_approved_are_cancellable() {
    assert!(ReservationStatus::Pending.is_cancellable());
    assert!(ReservationStatus::Approved.is_cancellable());
    assert!(!ReservationStatus::Completed.is_cancellable());
    assert!(!ReservationStatus::Rejected.is_cancellable());
}
