//! `jsonwebtoken`-backed signer

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::debug;

use crate::domain::claims::{EXP, IAT, JTI, NBF};
use crate::domain::{Claims, CompleteToken, Secret, SignOptions, TimeSpan, VerifyOptions};
use crate::errors::SessionError;
use crate::services::duration::{resolve_seconds, DurationParser, HumantimeParser};

use super::traits::Signer;

const HMAC_ALGORITHMS: &[Algorithm] = &[Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
const RSA_ALGORITHMS: &[Algorithm] = &[
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
];
const EC_ALGORITHMS: &[Algorithm] = &[Algorithm::ES256, Algorithm::ES384];
const ED_ALGORITHMS: &[Algorithm] = &[Algorithm::EdDSA];

/// Signer producing compact JWS tokens
///
/// Option-driven claims are resolved relative to `iat`: `expires_in` becomes
/// `exp = iat + seconds`, `not_before` becomes `nbf = iat + seconds`.
#[derive(Clone)]
pub struct JwtSigner {
    durations: Arc<dyn DurationParser>,
}

impl JwtSigner {
    pub fn new() -> Self {
        Self::with_duration_parser(Arc::new(HumantimeParser))
    }

    pub fn with_duration_parser(durations: Arc<dyn DurationParser>) -> Self {
        Self { durations }
    }

    fn encoding_key(secret: &Secret) -> Result<EncodingKey, SessionError> {
        let key = match secret {
            Secret::Hmac(bytes) => Ok(EncodingKey::from_secret(bytes)),
            Secret::RsaPem(pem) => EncodingKey::from_rsa_pem(pem),
            Secret::EcPem(pem) => EncodingKey::from_ec_pem(pem),
            Secret::EdPem(pem) => EncodingKey::from_ed_pem(pem),
        };
        key.map_err(|e| SessionError::json_web_token(format!("invalid signing key: {}", e)))
    }

    fn decoding_key(secret: &Secret) -> Result<DecodingKey, SessionError> {
        let key = match secret {
            Secret::Hmac(bytes) => Ok(DecodingKey::from_secret(bytes)),
            Secret::RsaPem(pem) => DecodingKey::from_rsa_pem(pem),
            Secret::EcPem(pem) => DecodingKey::from_ec_pem(pem),
            Secret::EdPem(pem) => DecodingKey::from_ed_pem(pem),
        };
        key.map_err(|e| SessionError::json_web_token(format!("invalid verification key: {}", e)))
    }

    fn family_algorithms(secret: &Secret) -> &'static [Algorithm] {
        match secret {
            Secret::Hmac(_) => HMAC_ALGORITHMS,
            Secret::RsaPem(_) => RSA_ALGORITHMS,
            Secret::EcPem(_) => EC_ALGORITHMS,
            Secret::EdPem(_) => ED_ALGORITHMS,
        }
    }

    /// Resolve an option-driven timestamp claim, refusing to overwrite the payload
    fn apply_timespan(
        &self,
        payload: &mut Claims,
        span: &TimeSpan,
        option: &str,
        claim: &str,
        timestamp: i64,
    ) -> Result<(), SessionError> {
        if payload.contains(claim) {
            return Err(SessionError::json_web_token(format!(
                "Bad \"options.{}\" option the payload already has an \"{}\" property.",
                option, claim
            )));
        }
        let seconds = resolve_seconds(self.durations.as_ref(), span)?;
        let value = timestamp
            .checked_add(seconds)
            .ok_or_else(|| SessionError::InvalidDuration {
                value: span.to_string(),
            })?;
        payload.insert(claim, value);
        Ok(())
    }

    fn apply_string_claim(
        payload: &mut Claims,
        value: Option<&String>,
        option: &str,
        claim: &str,
    ) -> Result<(), SessionError> {
        let Some(value) = value else {
            return Ok(());
        };
        if payload.contains(claim) {
            return Err(SessionError::json_web_token(format!(
                "Bad \"options.{}\" option. The payload already has an \"{}\" property.",
                option, claim
            )));
        }
        payload.insert(claim, value.clone());
        Ok(())
    }

    fn build_header(algorithm: Algorithm, options: &SignOptions) -> Header {
        let mut header = Header::new(algorithm);
        header.kid = options.key_id.clone();

        for (name, value) in &options.extra {
            let Some(text) = value.as_str().map(str::to_string) else {
                debug!("Ignoring non-string signer option '{}'", name);
                continue;
            };
            match name.as_str() {
                "typ" => header.typ = Some(text),
                "cty" => header.cty = Some(text),
                "jku" => header.jku = Some(text),
                "x5u" => header.x5u = Some(text),
                other => debug!("Ignoring unsupported signer option '{}'", other),
            }
        }
        header
    }

    fn build_validation(secret: &Secret, options: &VerifyOptions) -> Validation {
        let algorithms = if options.algorithms.is_empty() {
            Self::family_algorithms(secret).to_vec()
        } else {
            options.algorithms.clone()
        };

        let mut validation = Validation::new(algorithms[0]);
        validation.algorithms = algorithms;
        validation.required_spec_claims.clear();
        validation.leeway = options.clock_tolerance;
        validation.validate_exp = !options.ignore_expiration;
        validation.validate_nbf = !options.ignore_not_before;

        if options.audience.is_empty() {
            validation.validate_aud = false;
        } else {
            validation.set_audience(options.audience.as_slice());
        }
        if !options.issuer.is_empty() {
            validation.set_issuer(options.issuer.as_slice());
        }
        validation.sub = options.subject.clone();
        validation
    }

    fn map_verify_error(&self, token: &str, error: JwtError) -> SessionError {
        match error.kind() {
            ErrorKind::ExpiredSignature => SessionError::TokenExpired {
                expired_at: self.decode(token).and_then(|c| c.exp()).and_then(timestamp),
            },
            ErrorKind::ImmatureSignature => SessionError::NotBefore {
                date: self
                    .decode(token)
                    .and_then(|c| c.nbf())
                    .and_then(timestamp)
                    .unwrap_or_else(Utc::now),
            },
            ErrorKind::InvalidSignature => SessionError::json_web_token("invalid signature"),
            ErrorKind::InvalidAlgorithm => SessionError::json_web_token("invalid algorithm"),
            ErrorKind::InvalidAudience => SessionError::json_web_token("jwt audience invalid"),
            ErrorKind::InvalidIssuer => SessionError::json_web_token("jwt issuer invalid"),
            ErrorKind::InvalidSubject => SessionError::json_web_token("jwt subject invalid"),
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                SessionError::json_web_token("jwt malformed")
            }
            _ => SessionError::json_web_token(error.to_string()),
        }
    }
}

impl Default for JwtSigner {
    fn default() -> Self {
        Self::new()
    }
}

fn timestamp(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

#[async_trait]
impl Signer for JwtSigner {
    async fn sign(
        &self,
        claims: &Claims,
        secret: &Secret,
        options: &SignOptions,
    ) -> Result<String, SessionError> {
        let mut payload = claims.clone();
        let algorithm = options
            .algorithm
            .unwrap_or_else(|| Self::family_algorithms(secret)[0]);

        let iat = payload.iat().unwrap_or_else(|| Utc::now().timestamp());
        if options.no_timestamp {
            payload.remove(IAT);
        } else {
            payload.insert(IAT, iat);
        }

        if let Some(span) = &options.expires_in {
            self.apply_timespan(&mut payload, span, "expiresIn", EXP, iat)?;
        }
        if let Some(span) = &options.not_before {
            self.apply_timespan(&mut payload, span, "notBefore", NBF, iat)?;
        }
        Self::apply_string_claim(&mut payload, options.audience.as_ref(), "audience", "aud")?;
        Self::apply_string_claim(&mut payload, options.issuer.as_ref(), "issuer", "iss")?;
        Self::apply_string_claim(&mut payload, options.subject.as_ref(), "subject", "sub")?;
        Self::apply_string_claim(&mut payload, options.jwtid.as_ref(), "jwtid", JTI)?;

        let header = Self::build_header(algorithm, options);
        let key = Self::encoding_key(secret)?;

        encode(&header, &payload, &key).map_err(|e| match e.kind() {
            ErrorKind::InvalidAlgorithm => SessionError::json_web_token("invalid algorithm"),
            _ => SessionError::json_web_token(e.to_string()),
        })
    }

    async fn verify(
        &self,
        token: &str,
        secret: &Secret,
        options: &VerifyOptions,
    ) -> Result<Claims, SessionError> {
        if token.is_empty() {
            return Err(SessionError::json_web_token("jwt must be provided"));
        }

        let validation = Self::build_validation(secret, options);
        let key = Self::decoding_key(secret)?;
        let data = decode::<Claims>(token, &key, &validation)
            .map_err(|e| self.map_verify_error(token, e))?;

        if let Some(expected) = &options.jwtid {
            if data.claims.jti() != Some(expected.as_str()) {
                return Err(SessionError::json_web_token(format!(
                    "jwt jwtid invalid. expected: {}",
                    expected
                )));
            }
        }

        Ok(data.claims)
    }

    fn decode(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }

    fn decode_complete(&self, token: &str) -> Option<CompleteToken> {
        let header = decode_header(token).ok()?;
        let payload = self.decode(token)?;
        let signature = token.rsplit('.').next().map(str::to_string)?;
        Some(CompleteToken {
            header,
            payload,
            signature,
        })
    }
}
