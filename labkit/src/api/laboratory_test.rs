use super::*;
use crate::test_helpers::signed_in_harness;
use crate::transport::Method;
use serde_json::json;

fn laboratory_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Electronics 101",
        "code": "LAB-E101",
        "location": "Building A, floor 2",
        "capacity": 30,
        "type": "teaching",
        "status": 1,
        "managerId": 7,
        "managerName": "Chen",
        "description": null,
        "createTime": "2023-09-01T10:00:00",
        "updateTime": "2023-09-02T10:00:00",
        "equipmentCount": 12
    })
}

#[tokio::test]
async fn get_decodes_type_and_equipment_count() {
    let h = signed_in_harness("t");
    h.backend.push_data(laboratory_json(2));

    let lab = get(&h.api, 2).await.unwrap();

    assert_eq!(lab.kind.as_deref(), Some("teaching"));
    assert_eq!(lab.equipment_count, Some(12));
    assert_eq!(h.backend.last_request().url, "http://lab.test/api/v1/laboratory/2");
}

#[tokio::test]
async fn equipment_lists_the_labs_inventory() {
    let h = signed_in_harness("t");
    h.backend.push_data(json!({ "list": [], "total": 0, "page": 2, "size": 5 }));
    let query = LaboratoryEquipmentQuery {
        page: Some(2),
        size: Some(5),
        status_code: Some("borrowed".to_owned()),
    };

    let page = equipment(&h.api, 2, &query).await.unwrap();

    assert_eq!(page.total, 0);
    assert!(page.list.is_empty());
    let req = h.backend.last_request();
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.url, "http://lab.test/api/v1/laboratory/2/equipment");
    assert_eq!(req.query_value("page"), Some("2"));
    assert_eq!(req.query_value("size"), Some("5"));
    assert_eq!(req.query_value("statusCode"), Some("borrowed"));
}

#[tokio::test]
async fn list_renames_kind_to_type() {
    let h = signed_in_harness("t");
    h.backend.push_data(json!({ "list": [laboratory_json(1)], "total": 1, "page": 1, "size": 10 }));
    let query = LaboratoryQuery { kind: Some("research".to_owned()), status: Some(1), ..LaboratoryQuery::default() };

    list(&h.api, &query).await.unwrap();

    let req = h.backend.last_request();
    assert_eq!(req.url, "http://lab.test/api/v1/laboratory");
    assert_eq!(req.query_value("type"), Some("research"));
    assert_eq!(req.query_value("status"), Some("1"));
    assert_eq!(req.query_value("kind"), None);
}

#[tokio::test]
async fn batch_delete_sends_ids_in_body() {
    let h = signed_in_harness("t");
    delete_batch(&h.api, &BatchDeleteRequest::new([4, 9])).await.unwrap();
    let req = h.backend.last_request();
    assert_eq!(req.method, Method::Delete);
    assert_eq!(req.url, "http://lab.test/api/v1/laboratory/batch");
    assert_eq!(h.backend.last_body(), json!({ "ids": [4, 9] }));
}

#[tokio::test]
async fn update_status_puts_integer_status() {
    let h = signed_in_harness("t");
    h.backend.push_data(laboratory_json(3));

    update_status(&h.api, 3, 0).await.unwrap();

    let req = h.backend.last_request();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.url, "http://lab.test/api/v1/laboratory/3/status");
    assert_eq!(h.backend.last_body(), json!({ "status": 0 }));
}
