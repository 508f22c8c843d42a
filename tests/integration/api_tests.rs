//! API integration tests

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_status_reports_counts() {
    let client = Client::new();

    let response = client
        .get(format!("{}/status", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert!(body["equipment_count"].is_number());
    assert!(body["logs_count"].is_number());
    assert!(body["equipment_sample"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_equipment() {
    let client = Client::new();

    let next_id: Value = client
        .get(format!("{}/equipment/next-id", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let id = next_id["next_id"].as_i64().expect("No next_id");

    // Create equipment
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({
            "equipment_id": id,
            "equipment_name": "Test Pump",
            "pump_model": "Edwards RV8",
            "oil_type": "Ultra Grade 19",
            "pump_owner": "Test Owner"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "active");

    // A second create with the same asset number must conflict
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({
            "equipment_id": id,
            "equipment_name": "Duplicate Pump"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    // Delete equipment
    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_create_equipment_rejects_blank_name() {
    let client = Client::new();

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({
            "equipment_id": 99001,
            "equipment_name": ""
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_weekly_log_round_trip() {
    let client = Client::new();

    // Register a pump for the test
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({
            "equipment_id": 99010,
            "equipment_name": "Weekly Test Pump",
            "oil_type": "Ultra Grade 19",
            "pump_owner": "Weekly Tester"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Submit a weekly entry with an unparsable temperature
    let response = client
        .put(format!("{}/weekly-log/2025-WW14/equipment/99010", BASE_URL))
        .json(&json!({
            "check_date": "2025-04-03",
            "user_name": "Weekly Tester",
            "oil_level_ok": true,
            "oil_condition_ok": true,
            "pump_temp": "not a number",
            "service": "Add Oil"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["pump_temp"].is_null());
    assert_eq!(body["service"], "Add Oil");

    // Resubmitting the same week updates in place rather than duplicating
    let response = client
        .put(format!("{}/weekly-log/2025-WW14/equipment/99010", BASE_URL))
        .json(&json!({
            "check_date": "2025-04-04",
            "user_name": "Weekly Tester",
            "oil_level_ok": true,
            "pump_temp": "72.5"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["pump_temp"], 72.5);

    let response = client
        .get(format!("{}/logs?equipment_id=99010&work_week=2025-WW14", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let logs: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(logs.as_array().map(Vec::len), Some(1));

    // Cleanup; logs cascade with the equipment
    let _ = client
        .delete(format!("{}/equipment/99010", BASE_URL))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_get_dashboard() {
    let client = Client::new();

    let response = client
        .get(format!("{}/dashboard", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["alerts"]["needs_oil"].is_array());
    assert!(body["alerts"]["high_temp"].is_array());
    assert!(body["maintenance_rate"].is_number());
    assert!(body["current_work_week"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_get_charts() {
    let client = Client::new();

    let response = client
        .get(format!("{}/charts", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["temperature"]["labels"].is_array());
    assert!(body["temperature"]["series"].is_array());
    assert!(body["maintenance_counts"].is_array());
    assert!(body["service_histogram"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_get_hall_of_fame() {
    let client = Client::new();

    let response = client
        .get(format!("{}/hall-of-fame", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let ranking = body.as_array().expect("Ranking is not an array");
    for (i, entry) in ranking.iter().enumerate() {
        assert_eq!(entry["rank"].as_i64(), Some(i as i64 + 1));
        assert!(entry["score"].is_number());
        assert!(entry["equipment_owned"].as_i64().unwrap() > 0);
    }
}

#[tokio::test]
#[ignore]
async fn test_equipment_options() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment/options/oil_type", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());

    // Unknown fields yield an empty list, not an error
    let response = client
        .get(format!("{}/equipment/options/notes", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore]
async fn test_backup() {
    let client = Client::new();

    let response = client
        .post(format!("{}/backup", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["file"].is_string());
    assert!(body["equipment_count"].is_number());
    assert!(body["logs_count"].is_number());
}
