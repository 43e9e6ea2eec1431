//! Session Token Signing
//!
//! The cookie value is `<session_id>.<base64url(hmac_sha256(session_id))>`.
//! The signature prevents session-id guessing from turning into a valid
//! cookie; the session itself is validated against the database.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Generate a signed session token
pub fn sign_session_token(session_id: Uuid, secret: &[u8]) -> String {
    let session_id = session_id.to_string();

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Parse and verify a session token, returning the session id
pub fn verify_session_token(token: &str, secret: &[u8]) -> AuthResult<Uuid> {
    let (session_id_str, signature_b64) =
        token.split_once('.').ok_or(AuthError::SessionInvalid)?;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AuthError::SessionInvalid)?;

    mac.verify_slice(&signature)
        .map_err(|_| AuthError::SessionInvalid)?;

    session_id_str.parse().map_err(|_| AuthError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn test_sign_verify_roundtrip() {
        let session_id = Uuid::new_v4();
        let token = sign_session_token(session_id, SECRET);
        assert_eq!(verify_session_token(&token, SECRET).unwrap(), session_id);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = sign_session_token(Uuid::new_v4(), SECRET);
        let mut tampered = token.clone();
        tampered.truncate(token.len() - 2);

        assert!(verify_session_token(&tampered, SECRET).is_err());
        assert!(verify_session_token("no-dot-separator", SECRET).is_err());
        assert!(verify_session_token(&token, b"different secret").is_err());
    }
}
