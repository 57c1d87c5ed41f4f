use freight_quote_backend::config::AuthConfig;
use freight_quote_backend::util::jwt::*;

fn verifier_with(config: AuthConfig) -> JwtAuthVerifier {
    JwtAuthVerifier::new(config)
}

fn test_verifier() -> JwtAuthVerifier {
    verifier_with(AuthConfig::from_test_env())
}

#[tokio::test]
async fn test_valid_token_resolves_caller() {
    let verifier = test_verifier();
    let token = verifier
        .issue_token("user123", Some("user@example.com"), Some("authenticated"), 15)
        .unwrap();

    let caller = verifier.verify(&token).await.unwrap();
    assert_eq!(caller.user_id, "user123");
    assert_eq!(caller.email.as_deref(), Some("user@example.com"));
    assert_eq!(caller.role.as_deref(), Some("authenticated"));
}

#[test]
fn test_claims_carry_configured_audience() {
    let verifier = test_verifier();
    let token = verifier.issue_token("user123", None, None, 15).unwrap();
    let claims = verifier.decode_claims(&token).unwrap();
    assert_eq!(claims.aud.as_deref(), Some("authenticated"));
    assert!(claims.exp > claims.iat);
    assert!(claims.email.is_none());
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let verifier = test_verifier();
    let token = verifier.issue_token("user123", None, None, -5).unwrap();
    assert!(matches!(verifier.verify(&token).await, Err(AuthError::TokenExpired)));
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let mut other = AuthConfig::from_test_env();
    other.jwt_secret = "another_secret_key_that_is_long_enough_for_hs256".to_string();
    let token = verifier_with(other).issue_token("user123", None, None, 15).unwrap();

    let result = test_verifier().verify(&token).await;
    assert!(matches!(result, Err(AuthError::DecodingFailed(_))));
}

#[tokio::test]
async fn test_wrong_audience_rejected() {
    let mut other = AuthConfig::from_test_env();
    other.jwt_audience = Some("service_role".to_string());
    let token = verifier_with(other).issue_token("user123", None, None, 15).unwrap();

    assert!(test_verifier().verify(&token).await.is_err());
}

#[tokio::test]
async fn test_issuer_checked_when_configured() {
    let mut config = AuthConfig::from_test_env();
    config.jwt_issuer = Some("https://auth.example.com".to_string());
    let strict = verifier_with(config);

    let without_issuer = test_verifier().issue_token("user123", None, None, 15).unwrap();
    assert!(strict.verify(&without_issuer).await.is_err());

    let with_issuer = strict.issue_token("user123", None, None, 15).unwrap();
    assert!(strict.verify(&with_issuer).await.is_ok());
}

#[tokio::test]
async fn test_malformed_token_rejected() {
    let result = test_verifier().verify("invalid.token.here").await;
    assert!(matches!(result, Err(AuthError::DecodingFailed(_))));
}

#[test]
fn test_extract_bearer_token_trims() {
    assert_eq!(extract_bearer_token("Bearer  abc ").unwrap(), "abc");
    assert!(extract_bearer_token("bearer abc").is_err());
}
