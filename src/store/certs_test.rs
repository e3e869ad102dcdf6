use futures::executor::block_on;
use futures::future::join;
use serde_json::json;

use super::*;
use crate::test_support::{ScriptedTransport, cert_json, harness};
use crate::util::storage::TokenSlot;

fn ids(store: &CertStore) -> Vec<String> {
    store.snapshot().items.into_iter().map(|c| c.id).collect()
}

fn request(domains: &str) -> CertificateRequest {
    CertificateRequest { domains: domains.to_owned() }
}

#[test]
fn fetch_all_replaces_collection_in_server_order() {
    let transport = ScriptedTransport::new();
    transport.reply(200, &json!([cert_json(3, "a"), cert_json(1, "b")]));
    let h = harness(&transport, None);

    block_on(h.app.certs.fetch_all()).unwrap();

    assert_eq!(ids(&h.app.certs), vec!["3", "1"]);
    let state = h.app.certs.snapshot();
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn fetch_all_failure_leaves_collection_unchanged() {
    let transport = ScriptedTransport::new();
    transport.reply(200, &json!([cert_json(1, "a")]));
    transport.reply(503, &json!({}));
    let h = harness(&transport, None);

    block_on(h.app.certs.fetch_all()).unwrap();
    let err = block_on(h.app.certs.fetch_all()).unwrap_err();

    assert_eq!(err, GatewayError::ServerFault);
    assert_eq!(ids(&h.app.certs), vec!["1"]);
    let state = h.app.certs.snapshot();
    assert!(!state.loading);
    assert_eq!(state.error, Some(GatewayError::ServerFault.to_string()));
}

#[test]
fn create_prepends_into_empty_collection() {
    let transport = ScriptedTransport::new();
    transport.reply(201, &cert_json(7, "2025-01-01"));
    let h = harness(&transport, None);

    let created = block_on(h.app.certs.create(&request("a.com"))).unwrap();

    assert_eq!(created.id, "7");
    assert_eq!(ids(&h.app.certs), vec!["7"]);
    assert_eq!(transport.requests()[0].body.as_deref(), Some(r#"{"domains":"a.com"}"#));
}

#[test]
fn create_puts_new_certificate_first() {
    let transport = ScriptedTransport::new();
    transport.reply(200, &json!([cert_json(1, "a"), cert_json(2, "b")]));
    transport.reply(201, &cert_json(3, "c"));
    let h = harness(&transport, None);

    block_on(h.app.certs.fetch_all()).unwrap();
    block_on(h.app.certs.create(&request("c.com"))).unwrap();

    assert_eq!(ids(&h.app.certs), vec!["3", "1", "2"]);
}

#[test]
fn create_failure_leaves_collection_unchanged() {
    let transport = ScriptedTransport::new();
    transport.reply(400, &json!({ "error": "Domains are required" }));
    let h = harness(&transport, None);

    let err = block_on(h.app.certs.create(&request(""))).unwrap_err();

    assert_eq!(err.to_string(), "Domains are required");
    assert!(h.app.certs.snapshot().items.is_empty());
    assert_eq!(h.app.certs.snapshot().error.as_deref(), Some("Domains are required"));
}

#[test]
fn renew_replaces_in_place() {
    let transport = ScriptedTransport::new();
    transport.reply(200, &json!([cert_json(1, "2024-12-31"), cert_json(2, "2024-12-31")]));
    transport.reply(200, &cert_json(1, "2025-12-31"));
    let h = harness(&transport, None);

    block_on(h.app.certs.fetch_all()).unwrap();
    let renewed = block_on(h.app.certs.renew("1")).unwrap();

    assert_eq!(renewed.expiry_date.as_deref(), Some("2025-12-31"));
    let items = h.app.certs.snapshot().items;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "1");
    assert_eq!(items[0].expiry_date.as_deref(), Some("2025-12-31"));
    assert_eq!(items[1].id, "2");
    assert_eq!(items[1].expiry_date.as_deref(), Some("2024-12-31"));
    assert_eq!(transport.paths()[1], "/certs/1/renew");
}

#[test]
fn renew_of_unknown_id_returns_result_without_appending() {
    let transport = ScriptedTransport::new();
    transport.reply(200, &json!([cert_json(1, "a")]));
    transport.reply(200, &cert_json(9, "b"));
    let h = harness(&transport, None);

    block_on(h.app.certs.fetch_all()).unwrap();
    let renewed = block_on(h.app.certs.renew("9")).unwrap();

    assert_eq!(renewed.id, "9");
    assert_eq!(ids(&h.app.certs), vec!["1"]);
}

#[test]
fn renew_failure_leaves_collection_unchanged() {
    let transport = ScriptedTransport::new();
    transport.reply(200, &json!([cert_json(1, "a")]));
    transport.reply(404, &json!({}));
    let h = harness(&transport, None);

    block_on(h.app.certs.fetch_all()).unwrap();
    let before = h.app.certs.snapshot().items;
    assert_eq!(block_on(h.app.certs.renew("1")), Err(GatewayError::NotFound));
    assert_eq!(h.app.certs.snapshot().items, before);
}

#[test]
fn get_one_does_not_touch_collection() {
    let transport = ScriptedTransport::new();
    transport.reply(200, &json!({ "id": 5, "domains": "e.com", "certificate": "PEM" }));
    transport.reply(404, &json!({}));
    let h = harness(&transport, None);

    let cert = block_on(h.app.certs.get_one("5")).unwrap();
    assert_eq!(cert.certificate.as_deref(), Some("PEM"));
    assert_eq!(block_on(h.app.certs.get_one("6")), Err(GatewayError::NotFound));

    assert_eq!(h.app.certs.snapshot(), CertificatesState::default());
}

#[test]
fn overlapping_create_and_fetch_never_duplicate_ids() {
    let transport = ScriptedTransport::new().yielding();
    transport.reply(201, &cert_json(7, "new"));
    transport.reply(200, &json!([cert_json(7, "listed"), cert_json(1, "old")]));
    let h = harness(&transport, None);

    let (created, listed) = block_on(join(h.app.certs.create(&request("a.com")), h.app.certs.fetch_all()));

    assert!(created.is_ok());
    assert!(listed.is_ok());
    let ids = ids(&h.app.certs);
    assert_eq!(ids, vec!["7", "1"]);
    assert!(!h.app.certs.snapshot().loading);
}

#[test]
fn unauthorized_during_fetch_forces_single_logout() {
    let transport = ScriptedTransport::new().yielding();
    transport.reply(200, &json!({ "token": "jwt-1", "user": crate::test_support::user_json("1") }));
    transport.reply(401, &json!({}));
    transport.reply(401, &json!({}));
    let h = harness(&transport, None);
    let creds = crate::net::types::Credentials { username: "a".to_owned(), password: "b".to_owned() };
    block_on(h.app.session.login(&creds)).unwrap();

    let (a, b) = block_on(join(h.app.certs.fetch_all(), h.app.certs.renew("1")));

    assert_eq!(a, Err(GatewayError::Unauthorized));
    assert_eq!(b, Err(GatewayError::Unauthorized));
    assert!(!h.app.session.session().is_authenticated());
    assert_eq!(h.slot.load(), None);
    assert_eq!(*h.redirects.borrow(), vec!["/login".to_owned()]);
}
