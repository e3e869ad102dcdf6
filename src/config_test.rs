use super::*;

fn config_with_base(base: &str) -> ClientConfig {
    ClientConfig { api_base_url: base.to_owned(), ..ClientConfig::default() }
}

#[test]
fn default_config_points_at_local_api() {
    let config = ClientConfig::default();
    assert_eq!(config.token_key, "token");
    assert_eq!(config.login_path, "/login");
    assert_eq!(config.landing_path, "/dashboard");
    assert!(config.request_timeout_ms > 0);
}

#[test]
fn endpoint_joins_base_and_path() {
    let config = config_with_base("https://certs.example.com/api");
    assert_eq!(
        config.endpoint("/certs/7/renew"),
        Ok("https://certs.example.com/api/certs/7/renew".to_owned())
    );
}

#[test]
fn endpoint_tolerates_trailing_slash_on_base() {
    let config = config_with_base("https://certs.example.com/api/");
    assert_eq!(config.endpoint("/auth/me"), Ok("https://certs.example.com/api/auth/me".to_owned()));
}

#[test]
fn endpoint_accepts_same_origin_base() {
    let config = config_with_base("/api");
    assert_eq!(config.endpoint("/certs"), Ok("/api/certs".to_owned()));
}

#[test]
fn endpoint_rejects_unrooted_path() {
    let config = config_with_base("https://certs.example.com/api");
    assert_eq!(config.endpoint("certs"), Err(GatewayError::ClientMisconfigured));
}

#[test]
fn endpoint_rejects_bad_base() {
    let config = config_with_base("ftp:/nowhere");
    assert_eq!(config.endpoint("/certs"), Err(GatewayError::ClientMisconfigured));
}

#[test]
fn parse_timeout_falls_back_on_garbage() {
    assert_eq!(parse_timeout(None), 10_000);
    assert_eq!(parse_timeout(Some("abc")), 10_000);
    assert_eq!(parse_timeout(Some("0")), 10_000);
    assert_eq!(parse_timeout(Some(" 2500 ")), 2500);
}
