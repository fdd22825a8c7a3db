//! Double-submit CSRF tokens: a random token lives in a signed cookie and is
//! echoed back by every form as a hidden `csrf_token` field.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

pub const COOKIE_NAME: &str = "csrf_token";
pub const MISSING: &str = "The CSRF token is missing.";
pub const MISMATCH: &str = "The CSRF token does not match. Reload the page and try again.";

/// Reuses the token already held by the browser, or mints a new one.
pub fn issue(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(cookie) = jar.get(COOKIE_NAME) {
        let token = cookie.value().to_string();
        return (jar, token);
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(12));
    (jar.add(cookie), token)
}

pub fn verify(jar: &SignedCookieJar, submitted: &str) -> Result<(), &'static str> {
    if submitted.is_empty() {
        return Err(MISSING);
    }
    match jar.get(COOKIE_NAME) {
        Some(cookie) if constant_time_eq(cookie.value().as_bytes(), submitted.as_bytes()) => {
            Ok(())
        }
        Some(_) => Err(MISMATCH),
        None => Err(MISSING),
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
