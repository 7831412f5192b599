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
use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum BmcError {
    #[error("Network error talking to BMC at {url}. {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Could not build the HTTP client. {source}")]
    ClientBuild { source: reqwest::Error },

    #[error("HTTP {status_code} at {url}. See debug logs for details.")]
    HttpStatus {
        url: String,
        status_code: StatusCode,
    },

    /// HTTP 404 on a path-style endpoint. Kept apart from `HttpStatus` so
    /// callers can treat "feature absent on this firmware" as non-fatal.
    #[error("Page not found at {url}")]
    PageNotFound { url: String },

    #[error("Could not decode XML response from {url}. {source}")]
    XmlDecode {
        url: String,
        source: quick_xml::DeError,
    },

    #[error("Could not serialize XML request envelope. {source}")]
    XmlEncode { source: quick_xml::SeError },

    #[error("Could not decode JSON response from {url}. Body: {body}. {source}")]
    JsonDecode {
        url: String,
        body: String,
        source: serde_json::Error,
    },

    #[error("Login to BMC at {url} failed")]
    LoginFailed { url: String },

    #[error("Login response did not carry a session key")]
    SessionKeyMissing,

    #[error("Unable to read a valid serial number from the BMC")]
    InvalidSerial,

    /// An expected sub-document is missing and the accessor has no sensible
    /// default to fall back on.
    #[error("Unable to read {0} data from the BMC")]
    UnableToReadData(&'static str),

    #[error("Field {field} holds unparsable value '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("Chassis endpoint returned an error. Code: {code}, Message: {message}{extended}")]
    ChassisApi {
        code: String,
        message: String,
        extended: String,
    },

    #[error("Not implemented for this BMC")]
    NotImplemented,

    #[error("Collecting {field} for the server snapshot failed. {source}")]
    Snapshot {
        field: &'static str,
        source: Box<BmcError>,
    },
}

impl BmcError {
    pub(crate) fn snapshot(field: &'static str) -> impl FnOnce(BmcError) -> BmcError {
        move |source| BmcError::Snapshot {
            field,
            source: Box::new(source),
        }
    }
}
