mod common;

use serde_json::Value;

use common::{make_server, portal};

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = make_server(portal().await);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(
        json["checks"]["storage"]["message"],
        "Connected, 3 published APIs"
    );
    assert_eq!(json["checks"]["analytics"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = make_server(portal().await);

    let json = server.get("/health").await.json::<Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("storage").is_some());
    assert!(json["checks"].get("analytics").is_some());
}
