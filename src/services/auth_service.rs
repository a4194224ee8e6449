use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{info, warn};

use crate::config::Config;
use crate::dto::auth_dto::{LoginPayload, LoginResponse};
use crate::error::{Error, Result};
use crate::middleware::auth::{Claims, CurrentUser, EDITOR_ROLE};
use crate::utils::crypto::verify_password;
use crate::utils::time::expires_in_minutes;

/// Editor sign-in: e-mail whitelist, shared argon2 password, HS256 tokens.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: i64,
    allowed_emails: Vec<String>,
    password_hash: String,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: config.jwt_ttl_minutes,
            allowed_emails: config.allowed_editor_emails.clone(),
            password_hash: config.editor_password_hash.clone(),
        }
    }

    pub fn is_email_allowed(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.allowed_emails.iter().any(|allowed| *allowed == email)
    }

    /// The whitelist is checked before any credential work.
    pub fn sign_in(&self, payload: &LoginPayload) -> Result<LoginResponse> {
        let email = payload.email.trim().to_lowercase();
        if !self.is_email_allowed(&email) {
            warn!(email = %email, "sign-in rejected: not whitelisted");
            return Err(Error::Forbidden("access denied".to_string()));
        }
        if !verify_password(&payload.password, &self.password_hash)? {
            warn!(email = %email, "sign-in rejected: wrong password");
            return Err(Error::Unauthorized("invalid credentials".to_string()));
        }

        let expires_at = expires_in_minutes(self.ttl_minutes);
        let claims = Claims {
            sub: email.clone(),
            exp: expires_at.timestamp(),
            role: EDITOR_ROLE.to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        info!(email = %email, "editor signed in");

        Ok(LoginResponse {
            token,
            expires_at,
            user: CurrentUser {
                email,
                role: EDITOR_ROLE.to_string(),
            },
        })
    }

    /// Tokens of e-mails removed from the whitelist stop working immediately.
    pub fn verify_token(&self, token: &str) -> Result<CurrentUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| Error::Unauthorized("invalid_token".to_string()))?;
        let claims = data.claims;
        if claims.role != EDITOR_ROLE || !self.is_email_allowed(&claims.sub) {
            return Err(Error::Forbidden("access denied".to_string()));
        }
        Ok(CurrentUser {
            email: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::crypto::hash_password;

    fn config(hash: String) -> Config {
        Config {
            server_address: "127.0.0.1:0".into(),
            database_url: "memory:".into(),
            jwt_secret: "test_secret_key".into(),
            jwt_ttl_minutes: 30,
            public_rps: 100,
            cms_rps: 100,
            allowed_editor_emails: vec!["editor@biva.vn".into()],
            editor_password_hash: hash,
            sheet_webhook_url: None,
            company_name: "BIVA".into(),
            log_json: false,
        }
    }

    fn login(email: &str, password: &str) -> LoginPayload {
        LoginPayload {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn whitelisted_editor_gets_a_verifiable_token() {
        let service = AuthService::new(&config(hash_password("s3cret").unwrap()));
        let response = service.sign_in(&login("Editor@BIVA.vn", "s3cret")).unwrap();
        assert_eq!(response.user.email, "editor@biva.vn");

        let user = service.verify_token(&response.token).unwrap();
        assert_eq!(user.email, "editor@biva.vn");
        assert_eq!(user.role, EDITOR_ROLE);
    }

    #[test]
    fn unknown_email_is_denied_without_checking_the_password() {
        // a malformed hash would surface as a config error if it were checked
        let service = AuthService::new(&config("not-a-hash".into()));
        let err = service.sign_in(&login("someone@else.com", "x")).unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let service = AuthService::new(&config(hash_password("s3cret").unwrap()));
        let err = service.sign_in(&login("editor@biva.vn", "nope")).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn foreign_tokens_are_rejected() {
        let service = AuthService::new(&config(hash_password("s3cret").unwrap()));
        let mut other = config(hash_password("s3cret").unwrap());
        other.jwt_secret = "another_secret".into();
        let token = AuthService::new(&other)
            .sign_in(&login("editor@biva.vn", "s3cret"))
            .unwrap()
            .token;
        assert!(matches!(
            service.verify_token(&token),
            Err(Error::Unauthorized(_))
        ));
        assert!(service.verify_token("garbage").is_err());
    }
}
