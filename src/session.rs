/*
 * SPDX-License-Identifier: MIT
 *
 * Permission is hereby granted, free of charge, to any person obtaining a
 * copy of this software and associated documentation files (the "Software"),
 * to deal in the Software without restriction, including without limitation
 * the rights to use, copy, modify, merge, publish, distribute, sublicense,
 * and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in
 * all copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
 * THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
 * FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
 * DEALINGS IN THE SOFTWARE.
 */
//! Cookie-based session management for form-login BMC firmware.
//!
//! The session is re-established unconditionally at the start of every wire
//! operation. The CGI dialect signals a stale session with a 200 response
//! carrying the HTML login page rather than an auth status code, so a
//! rejection-triggered refresh cannot be detected reliably; logging in every
//! time keeps every operation idempotent with respect to session state.
//!
//! Holders are single-owner: the session is not internally thread-safe and
//! must not be driven from multiple threads at once.
use std::cell::RefCell;

use reqwest::{blocking::Client as HttpClient, header::HeaderMap, header::SET_COOKIE};
use tracing::debug;

use crate::BmcError;

/// Body fragment the firmware redirects to on a successful form login.
const LOGIN_SUCCESS_MARKER: &str = "url_redirect.cgi?url_name=mainmenu";

/// Manages one authenticated cookie session against a form-login endpoint.
pub struct FormSession {
    login_url: String,
    cookie_name: &'static str,
    token: RefCell<Option<String>>,
}

impl FormSession {
    pub fn new(login_url: String, cookie_name: &'static str) -> Self {
        Self {
            login_url,
            cookie_name,
            token: RefCell::new(None),
        }
    }

    /// Performs the login handshake and replaces any previously stored
    /// session cookie. Called before every operation; failure aborts the
    /// caller with no retry.
    pub fn ensure(
        &self,
        http: &HttpClient,
        username: &str,
        password: &str,
    ) -> Result<(), BmcError> {
        debug!("TX POST {} (login form)", self.login_url);
        let response = http
            .post(&self.login_url)
            .form(&[("name", username), ("pwd", password)])
            .send()
            .map_err(|source| BmcError::Network {
                url: self.login_url.clone(),
                source,
            })?;

        let token = session_cookie(response.headers(), self.cookie_name);
        let status = response.status();
        let body = response.text().map_err(|source| BmcError::Network {
            url: self.login_url.clone(),
            source,
        })?;
        debug!("RX {status} (login)");

        // The firmware answers 200 for both outcomes; the redirect target in
        // the body is the only reliable success signal.
        if !status.is_success() || !body.contains(LOGIN_SUCCESS_MARKER) {
            return Err(BmcError::LoginFailed {
                url: self.login_url.clone(),
            });
        }
        match token {
            Some(t) => {
                *self.token.borrow_mut() = Some(t);
                Ok(())
            }
            None => Err(BmcError::LoginFailed {
                url: self.login_url.clone(),
            }),
        }
    }

    /// The `Cookie` header value for the current session, if one is held.
    pub fn cookie_header(&self) -> Option<String> {
        self.token
            .borrow()
            .as_ref()
            .map(|t| format!("{}={}", self.cookie_name, t))
    }
}

/// Extracts the named session cookie from `Set-Cookie` response headers.
/// Empty values are treated as absent, matching firmware that clears the
/// cookie on a failed login.
fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for value in headers.get_all(SET_COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        let pair = raw.split(';').next().unwrap_or_default();
        if let Some((cookie_name, cookie_value)) = pair.split_once('=') {
            if cookie_name.trim() == name && !cookie_value.trim().is_empty() {
                return Some(cookie_value.trim().to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod test {
    use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};

    use super::*;

    fn headers(values: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for v in values {
            map.append(SET_COOKIE, HeaderValue::from_str(v).unwrap());
        }
        map
    }

    #[test]
    fn picks_named_cookie_among_many() {
        let map = headers(&[
            "lang=en; Path=/",
            "SID=abc123; Path=/; HttpOnly",
            "other=zzz",
        ]);
        assert_eq!(session_cookie(&map, "SID").as_deref(), Some("abc123"));
    }

    #[test]
    fn empty_cookie_value_counts_as_absent() {
        let map = headers(&["SID=; Path=/"]);
        assert_eq!(session_cookie(&map, "SID"), None);
        assert_eq!(session_cookie(&headers(&[]), "SID"), None);
    }

    #[test]
    fn cookie_header_formats_stored_token() {
        let session = FormSession::new("https://bmc/cgi/login.cgi".into(), "SID");
        assert_eq!(session.cookie_header(), None);
        *session.token.borrow_mut() = Some("abc123".into());
        assert_eq!(session.cookie_header().as_deref(), Some("SID=abc123"));
    }
}
