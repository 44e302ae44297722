//! Contract tests for ReportClient against a wiremock backend.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/api/v1/reports` | `list_reports_*` |
//! | GET    | `/api/v1/reports/{id}` | `get_report_*` |
//! | POST   | `/api/v1/reports` | `upload_report_*` |
//! | GET    | `/api/v1/reports/{id}/download` | `download_report_*` |
//! | DELETE | `/api/v1/reports/{id}` | `delete_report_*` |

use cscan_client::{ApiClient, ApiError, ClientConfig, ReportQuery};
use cscan_core::{ReportId, ReportStatus, UploadForm};
use wiremock::matchers::{body_string_contains, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> ApiClient {
    let config = ClientConfig::new(&format!("{}/api/v1", mock_server.uri()), 5).unwrap();
    ApiClient::new(config).unwrap()
}

fn report_json(id: i64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "file_name": "acme-annual-2024.pdf",
        "file_size": 482133,
        "upload_date": "2026-03-02T09:15:27.123456",
        "status": status,
        "company_name": "Acme Holdings",
        "fiscal_year": 2024,
        "created_at": "2026-03-02T09:15:27.123456",
        "updated_at": "2026-03-02T09:16:02.000001"
    })
}

// ── GET /api/v1/reports ─────────────────────────────────────────────

#[tokio::test]
async fn list_reports_returns_backend_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/reports"))
        .and(query_param_is_missing("status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            report_json(7, "completed"),
            report_json(3, "processing"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let reports = client.reports().list(&ReportQuery::default()).await.unwrap();
    let ids: Vec<_> = reports.iter().map(|r| r.id.get()).collect();
    assert_eq!(ids, vec![7, 3]);
    assert_eq!(reports[1].status, ReportStatus::Processing);
    assert_eq!(reports[0].processed_text, None);
}

#[tokio::test]
async fn list_reports_sends_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/reports"))
        .and(query_param("status", "failed"))
        .and(query_param("skip", "20"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let query = ReportQuery::default()
        .with_status(ReportStatus::Failed)
        .page(20, 10);
    assert!(client.reports().list(&query).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_reports_handles_500_without_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/reports"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.reports().list(&ReportQuery::default()).await.unwrap_err();
    match &err {
        ApiError::Status { status, detail, .. } => {
            assert_eq!(*status, 500);
            assert!(detail.is_none());
        }
        other => panic!("expected Status, got {other:?}"),
    }
    assert_eq!(err.user_message(), cscan_client::error::GENERIC_DETAIL);
}

// ── GET /api/v1/reports/{id} ────────────────────────────────────────

#[tokio::test]
async fn get_report_includes_processed_text() {
    let mock_server = MockServer::start().await;

    let mut body = report_json(7, "completed");
    body["processed_text"] = serde_json::json!("Revenue grew 12%...");
    Mock::given(method("GET"))
        .and(path("/api/v1/reports/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let report = client.reports().get(ReportId::new(7)).await.unwrap();
    assert_eq!(report.processed_text.as_deref(), Some("Revenue grew 12%..."));
    assert_eq!(report.fiscal_year, Some(2024));
}

#[tokio::test]
async fn get_report_404_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/reports/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "detail": "Report with ID 99 not found."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.reports().get(ReportId::new(99)).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Report with ID 99 not found.");
}

#[tokio::test]
async fn get_report_rejects_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/reports/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7,
            "status": "archived"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.reports().get(ReportId::new(7)).await.unwrap_err();
    assert!(matches!(err, ApiError::Deserialization { .. }));
}

// ── POST /api/v1/reports ────────────────────────────────────────────

#[tokio::test]
async fn upload_report_sends_multipart_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/reports"))
        .and(body_string_contains("name=\"file\"; filename=\"acme-annual-2024.pdf\""))
        .and(body_string_contains("name=\"company_name\""))
        .and(body_string_contains("Acme Holdings"))
        .and(body_string_contains("name=\"fiscal_year\""))
        .and(body_string_contains("%PDF-1.7"))
        .respond_with(ResponseTemplate::new(201).set_body_json(report_json(12, "pending")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let upload = UploadForm::new("acme-annual-2024.pdf", b"%PDF-1.7\n%minimal".to_vec())
        .with_company_name("Acme Holdings")
        .with_fiscal_year("2024")
        .validate()
        .unwrap();

    let client = test_client(&mock_server);
    let report = client.reports().upload(&upload).await.unwrap();
    assert_eq!(report.id, ReportId::new(12));
    assert_eq!(report.status, ReportStatus::Pending);
}

#[tokio::test]
async fn upload_report_omits_blank_optional_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/reports"))
        .respond_with(ResponseTemplate::new(201).set_body_json(report_json(13, "pending")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let upload = UploadForm::new("plain.pdf", b"%PDF-1.4".to_vec())
        .with_company_name("")
        .validate()
        .unwrap();

    let client = test_client(&mock_server);
    client.reports().upload(&upload).await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(!body.contains("company_name"));
    assert!(!body.contains("fiscal_year"));
}

#[tokio::test]
async fn upload_report_surfaces_validation_detail_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/reports"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "detail": [
                {"loc": ["body", "fiscal_year"], "msg": "value is not a valid integer", "type": "type_error.integer"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let upload = UploadForm::new("r.pdf", b"%PDF".to_vec()).validate().unwrap();
    let client = test_client(&mock_server);
    let err = client.reports().upload(&upload).await.unwrap_err();
    assert_eq!(err.user_message(), "fiscal_year: value is not a valid integer");
}

// ── GET /api/v1/reports/{id}/download ───────────────────────────────

#[tokio::test]
async fn download_report_returns_raw_bytes() {
    let mock_server = MockServer::start().await;

    let bytes = b"%PDF-1.7\n\x00\x01binary".to_vec();
    Mock::given(method("GET"))
        .and(path("/api/v1/reports/7/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(bytes.clone()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let downloaded = client.reports().download(ReportId::new(7)).await.unwrap();
    assert_eq!(downloaded, bytes);
}

// ── DELETE /api/v1/reports/{id} ─────────────────────────────────────

#[tokio::test]
async fn delete_report_accepts_empty_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/reports/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    client.reports().delete(ReportId::new(7)).await.unwrap();
}

#[tokio::test]
async fn unreachable_backend_is_http_error() {
    // Nothing listens on port 9 on a test host.
    let client = ApiClient::new(ClientConfig::local(9).unwrap()).unwrap();
    let err = client.reports().get(ReportId::new(1)).await.unwrap_err();
    assert!(matches!(err, ApiError::Http { .. }));
    assert!(!err.is_not_found());
}
