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
//! Client for the HP c7000 Onboard Administrator SOAP/WS-Security dialect.
//!
//! Unlike the cookie dialects, authentication travels inside every request
//! body: the session key obtained at login is injected into the WS-Security
//! header of each envelope.
use std::cell::RefCell;

use reqwest::{blocking::Client as HttpClient, header::CONTENT_TYPE, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    model::c7000::{
        EnclosureInfoBody, Envelope, GetEnclosureInfo, GetOaInfo, GetOaNetworkInfo, GetOaStatus,
        GetPowerSummary, GetThermalInfo, LoginBody, OaInfoBody, OaNetworkInfoBody, OaStatusBody,
        PowerSummaryBody, ResponseEnvelope, ThermalInfoBody, UserLogIn,
    },
    normalize::parse_field,
    Bmc, BmcError, Cpu, Disk, Endpoint, License, Nic, Vendor,
};

/// Bay of the active Onboard Administrator.
const ACTIVE_OA_BAY: u32 = 1;

pub struct C7000 {
    http: HttpClient,
    endpoint: Endpoint,
    session_key: RefCell<Option<String>>,
}

impl C7000 {
    pub(crate) fn new(http: HttpClient, endpoint: Endpoint) -> Self {
        Self {
            http,
            endpoint,
            session_key: RefCell::new(None),
        }
    }

    fn management_url(&self) -> String {
        format!("https://{}/hpoa", self.endpoint.host)
    }

    /// POSTs a serialized envelope to the management endpoint and hands the
    /// raw status and body back for the caller to unmarshal.
    fn post_xml(&self, data: &[u8]) -> Result<(StatusCode, String), BmcError> {
        let url = self.management_url();
        debug!("TX POST {url} ({} bytes)", data.len());
        let response = self
            .http
            .post(&url)
            // The OA rejects the SOAP content type; it only answers to
            // text/plain. Preserved bit-exactly for compatibility.
            .header(CONTENT_TYPE, "text/plain;charset=UTF-8")
            .body(data.to_vec())
            .send()
            .map_err(|source| BmcError::Network {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        let body = response.text().map_err(|source| BmcError::Network {
            url: url.clone(),
            source,
        })?;
        debug!("RX {status} {body}");
        Ok((status, body))
    }

    /// Performs the SOAP login handshake and stores the fresh session key.
    /// The login envelope is the one request that cannot carry a security
    /// header yet.
    fn ensure_session(&self) -> Result<String, BmcError> {
        let login = UserLogIn {
            username: self.endpoint.username.clone(),
            password: self.endpoint.password.clone(),
        };
        let xml = Envelope::wrap(login, "").to_xml()?;
        let (status, body) = self.post_xml(xml.as_bytes())?;
        if !status.is_success() {
            return Err(BmcError::LoginFailed {
                url: self.management_url(),
            });
        }
        let envelope: ResponseEnvelope<LoginBody> =
            quick_xml::de::from_str(&body).map_err(|source| BmcError::XmlDecode {
                url: self.management_url(),
                source,
            })?;
        let key = envelope
            .body
            .response
            .token
            .map(|t| t.oa_session_key)
            .filter(|k| !k.is_empty())
            .ok_or(BmcError::SessionKeyMissing)?;
        *self.session_key.borrow_mut() = Some(key.clone());
        Ok(key)
    }

    /// One authenticated round trip: login, wrap the payload with the fresh
    /// session key, post, decode the response envelope.
    fn call<P, B>(&self, payload: P) -> Result<B, BmcError>
    where
        P: Serialize,
        B: DeserializeOwned,
    {
        let key = self.ensure_session()?;
        let xml = Envelope::wrap(payload, &key).to_xml()?;
        let (status, body) = self.post_xml(xml.as_bytes())?;
        if !status.is_success() {
            return Err(BmcError::HttpStatus {
                url: self.management_url(),
                status_code: status,
            });
        }
        let envelope: ResponseEnvelope<B> =
            quick_xml::de::from_str(&body).map_err(|source| BmcError::XmlDecode {
                url: self.management_url(),
                source,
            })?;
        Ok(envelope.body)
    }
}

impl Bmc for C7000 {
    fn vendor(&self) -> Vendor {
        Vendor::Hp
    }

    fn address(&self) -> String {
        self.endpoint.host.clone()
    }

    fn update_credentials(&mut self, username: &str, password: &str) {
        self.endpoint.username = username.to_string();
        self.endpoint.password = password.to_string();
    }

    fn check_credentials(&self) -> Result<(), BmcError> {
        self.ensure_session().map(|_| ())
    }

    fn serial(&self) -> Result<String, BmcError> {
        let body: EnclosureInfoBody = self.call(GetEnclosureInfo {})?;
        let serial = body.response.enclosure_sn;
        if serial.is_empty() {
            return Err(BmcError::InvalidSerial);
        }
        Ok(serial.to_lowercase())
    }

    fn model(&self) -> Result<String, BmcError> {
        let body: EnclosureInfoBody = self.call(GetEnclosureInfo {})?;
        let model = body.response.enclosure_type;
        if model.is_empty() {
            return Err(BmcError::UnableToReadData("model"));
        }
        Ok(model)
    }

    fn version(&self) -> Result<String, BmcError> {
        let body: OaInfoBody = self.call(GetOaInfo {
            bay_number: ACTIVE_OA_BAY,
        })?;
        Ok(body.response.fw_version)
    }

    fn bios_version(&self) -> Result<String, BmcError> {
        // The OA manages the enclosure, not a host board.
        Err(BmcError::NotImplemented)
    }

    fn cpu(&self) -> Result<Cpu, BmcError> {
        Err(BmcError::NotImplemented)
    }

    fn memory_gib(&self) -> Result<u32, BmcError> {
        Err(BmcError::NotImplemented)
    }

    fn status(&self) -> Result<String, BmcError> {
        let body: OaStatusBody = self.call(GetOaStatus {
            bay_number: ACTIVE_OA_BAY,
        })?;
        if body.response.operational_status == "OK" {
            Ok("OK".to_string())
        } else {
            Ok("Unhealthy".to_string())
        }
    }

    fn name(&self) -> Result<String, BmcError> {
        let body: EnclosureInfoBody = self.call(GetEnclosureInfo {})?;
        Ok(body.response.enclosure_name)
    }

    fn nics(&self) -> Result<Vec<Nic>, BmcError> {
        let body: OaNetworkInfoBody = self.call(GetOaNetworkInfo {
            bay_number: ACTIVE_OA_BAY,
        })?;
        let mac = body.response.mac_address;
        if mac.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Nic {
            name: "bmc".to_string(),
            mac_address: mac.to_lowercase(),
        }])
    }

    fn disks(&self) -> Result<Vec<Disk>, BmcError> {
        Ok(Vec::new())
    }

    fn temp_c(&self) -> Result<i32, BmcError> {
        let body: ThermalInfoBody = self.call(GetThermalInfo {
            bay_number: ACTIVE_OA_BAY,
        })?;
        let raw = body.response.temperature_c;
        if raw.is_empty() {
            return Ok(0);
        }
        parse_field("temperatureC", &raw)
    }

    fn power_kw(&self) -> Result<f64, BmcError> {
        let body: PowerSummaryBody = self.call(GetPowerSummary {})?;
        let raw = body.response.power_consumed;
        if raw.is_empty() {
            return Ok(0.0);
        }
        let watts = parse_field::<i64>("powerConsumed", &raw)?;
        Ok(watts as f64 / 1000.0)
    }

    fn power_state(&self) -> Result<String, BmcError> {
        // An enclosure that answers SOAP is powered; the OA exposes no
        // distinct host power query.
        Err(BmcError::NotImplemented)
    }

    fn license(&self) -> Result<License, BmcError> {
        Err(BmcError::NotImplemented)
    }

    fn is_blade(&self) -> Result<bool, BmcError> {
        // The OA is the chassis side, never a blade itself.
        Ok(false)
    }

    fn slot(&self) -> Result<i32, BmcError> {
        Err(BmcError::NotImplemented)
    }

    fn chassis_serial(&self) -> Result<String, BmcError> {
        // The enclosure is its own chassis.
        self.serial()
    }
}
