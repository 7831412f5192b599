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
//! SOAP envelope and payload model for the HP c7000 Onboard Administrator.
//!
//! Authentication state travels inside the request body: every call after
//! login carries the session key in a WS-Security header. The login call
//! itself cannot present a key yet, so an empty key omits the header element
//! entirely rather than emitting an empty one.
use serde::{Deserialize, Serialize};

use crate::BmcError;

const NS_SOAP_ENV: &str = "http://www.w3.org/2003/05/soap-envelope";
const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
const NS_XSD: &str = "http://www.w3.org/2001/XMLSchema";
const NS_WSU: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";
const NS_WSSE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";
const NS_HPOA: &str = "hpoa.xsd";

/// A request envelope wrapping one payload element.
#[derive(Debug, Serialize)]
#[serde(rename = "SOAP-ENV:Envelope")]
pub struct Envelope<T> {
    #[serde(rename = "@xmlns:SOAP-ENV")]
    soap_env: &'static str,
    #[serde(rename = "@xmlns:xsi")]
    xsi: &'static str,
    #[serde(rename = "@xmlns:xsd")]
    xsd: &'static str,
    #[serde(rename = "@xmlns:wsu")]
    wsu: &'static str,
    #[serde(rename = "@xmlns:wsse")]
    wsse: &'static str,
    #[serde(rename = "@xmlns:hpoa")]
    hpoa: &'static str,
    #[serde(rename = "SOAP-ENV:Header", skip_serializing_if = "Option::is_none")]
    header: Option<Header>,
    #[serde(rename = "SOAP-ENV:Body")]
    body: Body<T>,
}

#[derive(Debug, Serialize)]
struct Body<T> {
    #[serde(rename = "$value")]
    content: T,
}

#[derive(Debug, Serialize)]
struct Header {
    #[serde(rename = "wsse:Security")]
    security: Security,
}

#[derive(Debug, Serialize)]
struct Security {
    #[serde(rename = "@SOAP-ENV:mustUnderstand")]
    must_understand: &'static str,
    #[serde(rename = "hpoa:HpOaSessionKeyToken")]
    token: HpOaSessionKeyToken,
}

#[derive(Debug, Serialize)]
struct HpOaSessionKeyToken {
    #[serde(rename = "hpoa:oaSessionKey")]
    oa_session_key: OaSessionKey,
}

#[derive(Debug, Serialize)]
struct OaSessionKey {
    #[serde(rename = "$text")]
    text: String,
}

impl<T: Serialize> Envelope<T> {
    /// Wraps a payload element. A non-empty session key yields exactly one
    /// WS-Security header carrying it; an empty key yields no header node.
    pub fn wrap(payload: T, session_key: &str) -> Envelope<T> {
        let header = (!session_key.is_empty()).then(|| Header {
            security: Security {
                must_understand: "true",
                token: HpOaSessionKeyToken {
                    oa_session_key: OaSessionKey {
                        text: session_key.to_string(),
                    },
                },
            },
        });
        Envelope {
            soap_env: NS_SOAP_ENV,
            xsi: NS_XSI,
            xsd: NS_XSD,
            wsu: NS_WSU,
            wsse: NS_WSSE,
            hpoa: NS_HPOA,
            header,
            body: Body { content: payload },
        }
    }

    pub fn to_xml(&self) -> Result<String, BmcError> {
        quick_xml::se::to_string(self).map_err(|source| BmcError::XmlEncode { source })
    }
}

/*
 * Request payloads
 */

#[derive(Debug, Serialize)]
#[serde(rename = "hpoa:userLogIn")]
pub struct UserLogIn {
    #[serde(rename = "hpoa:username")]
    pub username: String,
    #[serde(rename = "hpoa:password")]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename = "hpoa:getEnclosureInfo")]
pub struct GetEnclosureInfo {}

#[derive(Debug, Serialize)]
#[serde(rename = "hpoa:getOaInfo")]
pub struct GetOaInfo {
    #[serde(rename = "hpoa:bayNumber")]
    pub bay_number: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename = "hpoa:getOaStatus")]
pub struct GetOaStatus {
    #[serde(rename = "hpoa:bayNumber")]
    pub bay_number: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename = "hpoa:getOaNetworkInfo")]
pub struct GetOaNetworkInfo {
    #[serde(rename = "hpoa:bayNumber")]
    pub bay_number: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename = "hpoa:getThermalInfo")]
pub struct GetThermalInfo {
    #[serde(rename = "hpoa:bayNumber")]
    pub bay_number: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename = "hpoa:getPowerSummary")]
pub struct GetPowerSummary {}

/*
 * Response documents. The OA prefixes every element, but quick-xml's
 * deserializer matches on local names with prefixes stripped, so renames
 * carry the unqualified names. Unknown siblings (Header, Fault details) are
 * ignored during decode.
 */

/// Response envelope shell; `T` is the body document for one call.
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope<T> {
    #[serde(rename = "Body")]
    pub body: T,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(rename = "userLogInResponse")]
    pub response: UserLogInResponse,
}

#[derive(Debug, Deserialize)]
pub struct UserLogInResponse {
    #[serde(rename = "HpOaSessionKeyToken")]
    pub token: Option<SessionKeyToken>,
}

#[derive(Debug, Deserialize)]
pub struct SessionKeyToken {
    #[serde(rename = "oaSessionKey", default)]
    pub oa_session_key: String,
}

#[derive(Debug, Deserialize)]
pub struct EnclosureInfoBody {
    #[serde(rename = "getEnclosureInfoResponse")]
    pub response: EnclosureInfo,
}

#[derive(Debug, Default, Deserialize)]
pub struct EnclosureInfo {
    #[serde(rename = "enclosureName", default)]
    pub enclosure_name: String,
    #[serde(rename = "enclosureSn", default)]
    pub enclosure_sn: String,
    #[serde(rename = "enclosureType", default)]
    pub enclosure_type: String,
    #[serde(rename = "partNumber", default)]
    pub part_number: String,
}

#[derive(Debug, Deserialize)]
pub struct OaInfoBody {
    #[serde(rename = "getOaInfoResponse")]
    pub response: OaInfo,
}

#[derive(Debug, Default, Deserialize)]
pub struct OaInfo {
    #[serde(rename = "fwVersion", default)]
    pub fw_version: String,
    #[serde(rename = "hostName", default)]
    pub host_name: String,
}

#[derive(Debug, Deserialize)]
pub struct OaStatusBody {
    #[serde(rename = "getOaStatusResponse")]
    pub response: OaStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct OaStatus {
    #[serde(rename = "operationalStatus", default)]
    pub operational_status: String,
}

#[derive(Debug, Deserialize)]
pub struct OaNetworkInfoBody {
    #[serde(rename = "getOaNetworkInfoResponse")]
    pub response: OaNetworkInfo,
}

#[derive(Debug, Default, Deserialize)]
pub struct OaNetworkInfo {
    #[serde(rename = "macAddress", default)]
    pub mac_address: String,
}

#[derive(Debug, Deserialize)]
pub struct ThermalInfoBody {
    #[serde(rename = "getThermalInfoResponse")]
    pub response: ThermalInfo,
}

#[derive(Debug, Default, Deserialize)]
pub struct ThermalInfo {
    #[serde(rename = "temperatureC", default)]
    pub temperature_c: String,
}

#[derive(Debug, Deserialize)]
pub struct PowerSummaryBody {
    #[serde(rename = "getPowerSummaryResponse")]
    pub response: PowerSummary,
}

#[derive(Debug, Default, Deserialize)]
pub struct PowerSummary {
    /// Present enclosure draw in watts.
    #[serde(rename = "powerConsumed", default)]
    pub power_consumed: String,
}
