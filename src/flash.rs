//! Flash messages carried across a redirect in a signed cookie.

use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};
use log::warn;
use sha2::{Digest, Sha512};

use crate::models::flash::FlashMessage;

pub const FLASH_COOKIE: &str = "_flash";

/// Derives the 64-byte cookie signing key from the configured secret.
pub fn signing_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

// actix percent-encodes cookie values on write and decodes them on read,
// so the signature is computed over the plain JSON.
fn encode(flash: &FlashMessage) -> Option<String> {
    match serde_json::to_string(flash) {
        Ok(json) => Some(json),
        Err(err) => {
            warn!("[FLASH] Could not encode flash message: {}", err);
            None
        }
    }
}

fn decode(value: &str) -> Option<FlashMessage> {
    serde_json::from_str(value).ok()
}

/// Adds the signed flash cookie to a response.
pub fn set(builder: &mut HttpResponseBuilder, key: &Key, flash: &FlashMessage) {
    let Some(value) = encode(flash) else {
        return;
    };
    let cookie = Cookie::build(FLASH_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    let mut jar = CookieJar::new();
    jar.signed_mut(key).add(cookie);
    for signed in jar.delta() {
        builder.cookie(signed.clone());
    }
}

/// Reads the pending flash message, if the request carries one.
///
/// Returns whether a flash cookie was present at all, so the caller can clear
/// it even when its signature or contents were invalid.
pub fn take(req: &HttpRequest, key: &Key) -> (Option<FlashMessage>, bool) {
    let Some(cookie) = req.cookie(FLASH_COOKIE) else {
        return (None, false);
    };

    let mut jar = CookieJar::new();
    jar.add_original(cookie);
    let flash = jar
        .signed(key)
        .get(FLASH_COOKIE)
        .and_then(|verified| decode(verified.value()));
    if flash.is_none() {
        warn!("[FLASH] Ignoring a flash cookie that failed verification");
    }
    (flash, true)
}

/// Expires the flash cookie in the browser.
pub fn clear(builder: &mut HttpResponseBuilder) {
    let mut removal = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    removal.make_removal();
    builder.cookie(removal);
}
