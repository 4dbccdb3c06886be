use super::*;
use crate::api::ApprovalDecision;
use crate::test_helpers::signed_in_harness;
use crate::transport::Method;
use serde_json::json;

fn borrow_json(status: i32) -> serde_json::Value {
    json!({
        "id": 11,
        "equipmentId": 3,
        "equipmentName": "Multimeter",
        "userId": 7,
        "borrowDate": "2024-03-01",
        "planReturnDate": "2024-03-08",
        "actualReturnDate": null,
        "quantity": 1,
        "status": status,
        "createTime": "2024-02-28T09:00:00",
        "updateTime": "2024-02-28T09:00:00"
    })
}

#[tokio::test]
async fn approve_sends_decision_code() {
    let h = signed_in_harness("t");
    h.backend.push_data(borrow_json(1));

    let borrow = approve(&h.api, 11, &ApprovalRequest::approve()).await.unwrap();

    assert_eq!(borrow.status(), Some(BorrowStatus::Approved));
    let req = h.backend.last_request();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.url, "http://lab.test/api/v1/borrow/11/approve");
    assert_eq!(h.backend.last_body(), json!({ "status": ApprovalDecision::Approve.code() }));
}

#[tokio::test]
async fn confirm_and_return_send_objects_even_when_empty() {
    let h = signed_in_harness("t");
    h.backend.push_data(borrow_json(3));
    h.backend.push_data(borrow_json(4));

    confirm(&h.api, 11, &ConfirmBorrow::default()).await.unwrap();
    let returned = return_equipment(
        &h.api,
        11,
        &ReturnBorrow { actual_return_date: Some("2024-03-07".to_owned()), remark: None },
    )
    .await
    .unwrap();

    let requests = h.backend.requests();
    assert_eq!(requests[0].url, "http://lab.test/api/v1/borrow/11/borrow");
    assert_eq!(requests[0].body.as_deref(), Some("{}"));
    assert_eq!(requests[1].url, "http://lab.test/api/v1/borrow/11/return");
    assert_eq!(h.backend.last_body(), json!({ "actualReturnDate": "2024-03-07" }));
    assert_eq!(returned.status(), Some(BorrowStatus::Returned));
}

#[tokio::test]
async fn mark_overdue_has_no_body() {
    let h = signed_in_harness("t");
    h.backend.push_data(json!({ "overdueCount": 2 }));
    let result = mark_overdue(&h.api).await.unwrap();
    assert_eq!(result.overdue_count, 2);
    let req = h.backend.last_request();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.body, None);
}

#[tokio::test]
async fn available_quantity_path_uses_equipment_id() {
    let h = signed_in_harness("t");
    h.backend.push_data(json!({
        "equipmentId": 3, "totalQuantity": 5, "borrowedQuantity": 2, "availableQuantity": 3
    }));
    let available = available_quantity(&h.api, 3).await.unwrap();
    assert_eq!(available.available_quantity, 3);
    assert_eq!(h.backend.last_request().url, "http://lab.test/api/v1/borrow/available-quantity/3");
}

#[test]
fn unknown_status_code_is_none() {
    assert_eq!(BorrowStatus::from_code(9), None);
    assert_eq!(BorrowStatus::from_code(BorrowStatus::Overdue.code()), Some(BorrowStatus::Overdue));
}
