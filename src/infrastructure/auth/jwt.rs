use jsonwebtoken::{decode, Algorithm, TokenData, Validation};
use crate::entities::token::Claims;
use crate::settings::{AppConfig, JwtKeys};
use crate::errors::AuthError;

/// The hosted auth service signs access tokens with the project secret.
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// Verifies access tokens issued by the hosted auth service. Tokens are
/// never minted here.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    audience: String,
    admin_emails: Vec<String>,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            audience: config.jwt_audience.clone(),
            admin_emails: config.admin_emails(),
        }
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.set_audience(&[self.audience.as_str()]);

        decode::<Claims>(
            token,
            &self.keys.decoding,
            &validation
        )
        .map_err(AuthError::from)
    }

    /// Any verified identity is an admin unless an allow-list is configured.
    pub fn is_admin(&self, claims: &Claims) -> bool {
        if self.admin_emails.is_empty() {
            return true;
        }

        claims
            .email
            .as_deref()
            .map(|email| email.trim().to_lowercase())
            .is_some_and(|email| self.admin_emails.contains(&email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    use crate::settings::tests::test_config;

    fn sign(config: &AppConfig, claims: serde_json::Value) -> String {
        encode(
            &Header::new(JWT_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_for(email: &str, aud: &str, exp_offset: Duration) -> serde_json::Value {
        json!({
            "sub": "0b7c7a0e-1111-4c55-9a57-000000000001",
            "email": email,
            "role": "authenticated",
            "aud": aud,
            "exp": (Utc::now() + exp_offset).timestamp(),
            "iat": Utc::now().timestamp(),
        })
    }

    #[test]
    fn accepts_token_signed_for_authenticated_audience() {
        let config = test_config();
        let token = sign(&config, claims_for("jerry@example.com", "authenticated", Duration::minutes(10)));

        let decoded = JwtService::new(&config).decode_jwt(&token).unwrap();
        assert_eq!(decoded.claims.email.as_deref(), Some("jerry@example.com"));
    }

    #[test]
    fn rejects_wrong_audience_and_expired_tokens() {
        let config = test_config();
        let service = JwtService::new(&config);

        let wrong_aud = sign(&config, claims_for("jerry@example.com", "anon", Duration::minutes(10)));
        assert!(matches!(service.decode_jwt(&wrong_aud), Err(AuthError::InvalidToken)));

        let expired = sign(&config, claims_for("jerry@example.com", "authenticated", Duration::hours(-2)));
        assert!(matches!(service.decode_jwt(&expired), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn rejects_token_signed_with_another_secret() {
        let config = test_config();
        let other = AppConfig { jwt_secret: "some-other-secret-also-32-characters-long".into(), ..test_config() };
        let token = sign(&other, claims_for("jerry@example.com", "authenticated", Duration::minutes(10)));

        assert!(JwtService::new(&config).decode_jwt(&token).is_err());
    }

    #[test]
    fn admin_list_restricts_by_email_ignoring_case() {
        let config = AppConfig { admin_emails: vec!["jerry@example.com".into()], ..test_config() };
        let service = JwtService::new(&config);

        let claims = |email: Option<&str>| Claims {
            sub: "x".into(),
            email: email.map(str::to_string),
            role: None,
            exp: 0,
            iat: None,
        };

        assert!(service.is_admin(&claims(Some("Jerry@Example.com"))));
        assert!(!service.is_admin(&claims(Some("visitor@example.com"))));
        assert!(!service.is_admin(&claims(None)));

        assert!(JwtService::new(&test_config()).is_admin(&claims(None)));
    }
}
