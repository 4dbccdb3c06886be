use super::*;
use crate::test_helpers::signed_in_harness;
use crate::transport::Method;
use serde_json::json;

fn equipment_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Oscilloscope",
        "model": "DS1054Z",
        "specification": null,
        "assetCode": "EQ-0001",
        "unitPrice": 2999.5,
        "quantity": 4,
        "supplier": null,
        "purchaseDate": "2023-09-01",
        "warrantyPeriod": 24,
        "statusId": 1,
        "statusName": "In store",
        "statusCode": "instored",
        "laboratoryId": 2,
        "laboratoryName": "Electronics 101",
        "description": null,
        "createTime": "2023-09-01T10:00:00",
        "updateTime": "2023-09-02T10:00:00"
    })
}

#[tokio::test]
async fn list_sends_filters_and_decodes_page() {
    let h = signed_in_harness("t");
    h.backend.push_data(json!({ "list": [equipment_json(1)], "total": 1, "page": 1, "size": 10 }));
    let query = EquipmentQuery {
        page: Some(1),
        size: Some(10),
        status_code: Some("instored".to_owned()),
        laboratory_id: Some(2),
        sort_order: Some(SortOrder::Asc),
        ..EquipmentQuery::default()
    };

    let page = list(&h.api, &query).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.list[0].asset_code.as_deref(), Some("EQ-0001"));
    assert!((page.list[0].unit_price - 2999.5).abs() < f64::EPSILON);
    let req = h.backend.last_request();
    assert_eq!(req.url, "http://lab.test/api/v1/equipment");
    assert_eq!(req.query_value("statusCode"), Some("instored"));
    assert_eq!(req.query_value("laboratoryId"), Some("2"));
    assert_eq!(req.query_value("sortOrder"), Some("asc"));
    assert_eq!(req.query_value("name"), None);
}

#[tokio::test]
async fn update_skips_unset_fields() {
    let h = signed_in_harness("t");
    h.backend.push_data(equipment_json(5));
    let patch = UpdateEquipment { quantity: Some(6), ..UpdateEquipment::default() };

    let updated = update(&h.api, 5, &patch).await.unwrap();

    assert_eq!(updated.id, 5);
    let req = h.backend.last_request();
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.url, "http://lab.test/api/v1/equipment/5");
    assert_eq!(h.backend.last_body(), json!({ "quantity": 6 }));
}

#[tokio::test]
async fn batch_delete_sends_ids_in_body() {
    let h = signed_in_harness("t");
    delete_batch(&h.api, &BatchDeleteRequest::new([1, 2, 3])).await.unwrap();
    let req = h.backend.last_request();
    assert_eq!(req.method, Method::Delete);
    assert_eq!(req.url, "http://lab.test/api/v1/equipment/batch");
    assert_eq!(h.backend.last_body(), json!({ "ids": [1, 2, 3] }));
}

#[tokio::test]
async fn status_update_wraps_status_id() {
    let h = signed_in_harness("t");
    h.backend.push_data(equipment_json(8));
    update_status(&h.api, 8, 3).await.unwrap();
    assert_eq!(h.backend.last_request().url, "http://lab.test/api/v1/equipment/8/status");
    assert_eq!(h.backend.last_body(), json!({ "statusId": 3 }));
}

#[tokio::test]
async fn status_catalogue_is_a_plain_list() {
    let h = signed_in_harness("t");
    h.backend.push_data(json!([
        { "id": 1, "name": "In store", "code": "instored", "description": null },
        { "id": 2, "name": "Scrapped", "code": "scrapped", "description": "gone" }
    ]));
    let catalogue = statuses(&h.api).await.unwrap();
    assert_eq!(catalogue.len(), 2);
    assert_eq!(catalogue[1].code, "scrapped");
    assert_eq!(h.backend.last_request().url, "http://lab.test/api/v1/equipment/status");
}
