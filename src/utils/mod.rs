use actix_web::{web, FromRequest};
use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{de::Deserializer, Deserialize, Serialize};
use validator::Validate;

use crate::{api::error, modules::user::schema::UserRole};

lazy_static::lazy_static! {
  static ref ARGON2: Argon2<'static> = Argon2::default();
}

pub fn hash_password(password: &str) -> Result<String, error::SystemError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(ARGON2.hash_password(password.as_bytes(), &salt)?.to_string())
}

/// Ok(false) for a wrong password; Err only for malformed hashes.
pub fn verify_password(hash: &str, password: &str) -> Result<bool, error::SystemError> {
    let parsed = PasswordHash::new(hash)?;
    match ARGON2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => Err(error::SystemError::HashError(e)),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TypeClaims {
    RefreshToken,
    AccessToken,
}

/// JWT payload. Access tokens carry no jti; refresh tokens get one so they
/// can be revoked individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub iat: u64,
    pub exp: u64,
    pub jti: Option<uuid::Uuid>,
    pub role: UserRole,
    pub _type: Option<TypeClaims>,
}

impl Claims {
    pub fn new(sub: &uuid::Uuid, role: &UserRole, ttl: u64) -> Self {
        let now = chrono::Utc::now().timestamp() as u64;
        Claims { sub: *sub, iat: now, exp: now + ttl, jti: None, role: role.clone(), _type: None }
    }

    pub fn with_jti(mut self, jti: uuid::Uuid) -> Self {
        self.jti = Some(jti);
        self
    }

    pub fn with_type(mut self, _type: TypeClaims) -> Self {
        self._type = Some(_type);
        self
    }

    pub fn encode(&self, secret: &[u8]) -> Result<String, error::SystemError> {
        Ok(encode(&Header::new(Algorithm::HS256), self, &EncodingKey::from_secret(secret))?)
    }

    pub fn decode(token: &str, secret: &[u8]) -> Result<Self, error::SystemError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Self>(token, &DecodingKey::from_secret(secret), &validation)?;
        Ok(data.claims)
    }
}

/// Distinguishes "field absent" from "field set to null" in PATCH bodies.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

fn validation_error(e: impl std::fmt::Display) -> error::Error {
    error::Error::BadRequest(e.to_string().into())
}

pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest for ValidatedJson<T>
where
    T: Validate + serde::de::DeserializeOwned + 'static,
{
    type Error = error::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let fut = web::Json::<T>::from_request(req, payload);

        Box::pin(async move {
            let model = fut.await.map_err(validation_error)?.into_inner();
            model.validate().map_err(validation_error)?;
            Ok(ValidatedJson(model))
        })
    }
}

pub struct ValidatedQuery<T>(pub T);

impl<T> FromRequest for ValidatedQuery<T>
where
    T: Validate + serde::de::DeserializeOwned + 'static,
{
    type Error = error::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let fut = web::Query::<T>::from_request(req, payload);

        Box::pin(async move {
            let query = fut.await.map_err(validation_error)?.into_inner();
            query.validate().map_err(validation_error)?;
            Ok(ValidatedQuery(query))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_survive_an_encode_decode_round_trip() {
        let sub = uuid::Uuid::now_v7();
        let jti = uuid::Uuid::now_v7();
        let token = Claims::new(&sub, &UserRole::User, 60)
            .with_jti(jti)
            .with_type(TypeClaims::RefreshToken)
            .encode(b"secret")
            .unwrap();

        let claims = Claims::decode(&token, b"secret").unwrap();
        assert_eq!(claims.sub, sub);
        assert_eq!(claims.jti, Some(jti));
        assert_eq!(claims._type, Some(TypeClaims::RefreshToken));
    }

    #[test]
    fn a_wrong_secret_fails_decoding() {
        let token =
            Claims::new(&uuid::Uuid::now_v7(), &UserRole::User, 60).encode(b"secret").unwrap();
        assert!(Claims::decode(&token, b"other").is_err());
    }

    #[test]
    fn wrong_passwords_verify_false_without_erroring() {
        let hash = hash_password("correct horse").unwrap();
        assert!(verify_password(&hash, "correct horse").unwrap());
        assert!(!verify_password(&hash, "battery staple").unwrap());
    }
}
