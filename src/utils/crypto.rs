use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

fn signature(value: &str, secret: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(value.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Produces `<value>.<hex hmac>`.
pub fn sign_value(value: &str, secret: &[u8]) -> Option<String> {
    signature(value, secret).map(|sig| format!("{}.{}", value, sig))
}

/// Returns the original value when the signature matches.
pub fn verify_signed_value<'a>(signed: &'a str, secret: &[u8]) -> Option<&'a str> {
    let (value, given) = signed.rsplit_once('.')?;
    let expected = signature(value, secret)?;
    if expected.as_bytes().ct_eq(given.as_bytes()).into() {
        Some(value)
    } else {
        None
    }
}
