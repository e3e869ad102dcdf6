use super::*;

#[test]
fn success_range_is_2xx_only() {
    assert!(is_success(200));
    assert!(is_success(201));
    assert!(is_success(204));
    assert!(!is_success(199));
    assert!(!is_success(301));
    assert!(!is_success(401));
}

#[test]
fn classify_maps_fixed_statuses() {
    assert_eq!(classify_status(401, ""), GatewayError::Unauthorized);
    assert_eq!(classify_status(403, r#"{"error":"nope"}"#), GatewayError::Forbidden);
    assert_eq!(classify_status(404, ""), GatewayError::NotFound);
}

#[test]
fn classify_maps_whole_5xx_range_to_server_fault() {
    for status in [500, 502, 503, 599] {
        assert_eq!(classify_status(status, ""), GatewayError::ServerFault);
    }
}

#[test]
fn classify_other_status_carries_server_message() {
    assert_eq!(
        classify_status(400, r#"{"error":"Domains are required"}"#),
        GatewayError::RequestRejected { status: 400, message: "Domains are required".to_owned() }
    );
}

#[test]
fn classify_other_status_falls_back_to_generic_message() {
    let err = classify_status(422, "<html>bad</html>");
    assert_eq!(err, GatewayError::RequestRejected { status: 422, message: REJECTED_FALLBACK.to_owned() });
    assert_eq!(err.to_string(), "Request failed.");
}

#[test]
fn server_message_prefers_error_then_message() {
    assert_eq!(server_message(r#"{"error":"a","message":"b"}"#), Some("a".to_owned()));
    assert_eq!(server_message(r#"{"message":"b"}"#), Some("b".to_owned()));
    assert_eq!(server_message(r#"{"error":"   ","message":"b"}"#), Some("b".to_owned()));
    assert_eq!(server_message(r#"{"other":1}"#), None);
    assert_eq!(server_message("not json"), None);
}

#[test]
fn every_variant_has_display_text() {
    let all = [
        GatewayError::Unauthorized,
        GatewayError::Forbidden,
        GatewayError::NotFound,
        GatewayError::ServerFault,
        GatewayError::Conflict,
        GatewayError::RequestRejected { status: 418, message: "teapot".to_owned() },
        GatewayError::Unreachable,
        GatewayError::ClientMisconfigured,
    ];
    for err in all {
        assert!(!err.to_string().is_empty());
    }
}

#[test]
fn classify_409_is_conflict() {
    assert_eq!(classify_status(409, r#"{"error":"taken"}"#), GatewayError::Conflict);
    assert_eq!(classify_status(409, ""), GatewayError::Conflict);
}

#[test]
fn classify_400_uniqueness_violation_is_conflict() {
    let bodies = [
        r#"{"error":"(sqlite3.IntegrityError) UNIQUE constraint failed: user.username"}"#,
        r#"{"error":"UNIQUE constraint failed: user.email"}"#,
        r#"{"error":"(psycopg2.errors.UniqueViolation) duplicate key value violates unique constraint"}"#,
        r#"{"error":"Duplicate entry 'alice' for key 'username'"}"#,
    ];
    for body in bodies {
        assert_eq!(classify_status(400, body), GatewayError::Conflict, "{body}");
    }
}

#[test]
fn classify_other_400_stays_rejected() {
    assert_eq!(
        classify_status(400, r#"{"error":"Missing required fields"}"#),
        GatewayError::RequestRejected { status: 400, message: "Missing required fields".to_owned() }
    );
    assert_eq!(
        classify_status(422, r#"{"error":"UNIQUE constraint failed"}"#),
        GatewayError::RequestRejected { status: 422, message: "UNIQUE constraint failed".to_owned() }
    );
}
