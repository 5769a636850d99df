use super::*;
use axum::http::Request;
use jsonwebtoken::{EncodingKey, Header, encode};

const SECRET: &str = "supersecretjwtsecretforunittesting123";
const USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

fn claims(exp: usize, aud: &str) -> SupabaseClaims {
    SupabaseClaims {
        sub: USER_ID.to_string(),
        role: "authenticated".to_string(),
        aud: aud.to_string(),
        email: Some("test@example.com".to_string()),
        exp,
    }
}

fn sign(claims: &SupabaseClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn request_parts(authorization: Option<&str>, with_settings: bool) -> Parts {
    let mut builder = Request::builder().uri("/api/v1/recordings");
    if let Some(value) = authorization {
        builder = builder.header(axum::http::header::AUTHORIZATION, value);
    }
    let (mut parts, _) = builder.body(()).unwrap().into_parts();
    if with_settings {
        parts.extensions.insert(Arc::new(AuthSettings {
            jwt_secret: SECRET.to_string(),
        }));
    }
    parts
}

#[test]
fn test_validate_supabase_jwt_success() {
    let my_claims = claims(9999999999, "authenticated");
    let token = sign(&my_claims, SECRET);

    let claims = validate_supabase_jwt(&token, SECRET).expect("Valid token should pass");
    assert_eq!(claims.sub, my_claims.sub);
    assert_eq!(claims.email, my_claims.email);
}

#[test]
fn test_validate_supabase_jwt_expired() {
    let token = sign(&claims(1, "authenticated"), SECRET);

    assert!(validate_supabase_jwt(&token, SECRET).is_err());
}

#[test]
fn test_validate_supabase_jwt_invalid_signature() {
    let token = sign(&claims(9999999999, "authenticated"), "wrongsecret");

    assert!(validate_supabase_jwt(&token, SECRET).is_err());
}

#[test]
fn test_validate_supabase_jwt_unknown_audience() {
    let token = sign(&claims(9999999999, "anon-dashboard"), SECRET);

    assert!(validate_supabase_jwt(&token, SECRET).is_err());
}

#[test]
fn test_bearer_token_parsing() {
    assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
    assert_eq!(bearer_token("Bearer "), None);
    assert_eq!(bearer_token("Basic abc"), None);
}

#[tokio::test]
async fn test_extractor_resolves_caller() {
    let token = sign(&claims(9999999999, "authenticated"), SECRET);
    let header = format!("Bearer {token}");
    let mut parts = request_parts(Some(&header), true);

    let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();

    assert_eq!(user.user_id, Uuid::parse_str(USER_ID).unwrap());
}

#[tokio::test]
async fn test_extractor_rejects_missing_header() {
    let mut parts = request_parts(None, true);

    let (status, _) = AuthUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extractor_requires_settings_extension() {
    let token = sign(&claims(9999999999, "authenticated"), SECRET);
    let header = format!("Bearer {token}");
    let mut parts = request_parts(Some(&header), false);

    let (status, _) = AuthUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
