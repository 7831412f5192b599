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
//! Client for Supermicro X10/X11 BMCs speaking the form/XML CGI dialect,
//! plus the narrow Redfish JSON subset those boards expose.
use reqwest::{
    blocking::Client as HttpClient,
    header::{CONTENT_TYPE, COOKIE},
    StatusCode,
};
use tracing::debug;

use crate::{
    model::supermicro::{
        BiosLicense, ChassisInfo, GenericInfo, Ipmi, NodeInfo, PlatformInfo, PowerInfo,
    },
    normalize::{parse_field, standardize_processor_name},
    session::FormSession,
    Bmc, BmcError, Cpu, Disk, Endpoint, License, Nic, Vendor,
};

/// Session cookie the firmware issues on form login.
const SESSION_COOKIE: &str = "SID";

const QUERY_FRU: &str = "FRU_INFO.XML=(0,0)";
const QUERY_GENERIC: &str = "GENERIC_INFO.XML=(0,0)";
const QUERY_CONFIG: &str = "CONFIG_INFO.XML=(0,0)";
const QUERY_HEALTH: &str = "SENSOR_INFO_FOR_SYS_HEALTH.XML=(1,ff)";
const QUERY_SMBIOS: &str = "SMBIOS_INFO.XML=(0,0)";
const QUERY_NODE_READINGS: &str = "Get_NodeInfoReadings.XML=(0,0)";
const QUERY_POWER: &str = "POWER_INFO.XML=(0,0)";
const QUERY_PLATFORM: &str = "Get_PlatformInfo.XML=(0,0)";
// "LINCENSE" is the firmware's spelling; the wire format is fixed.
const QUERY_BIOS_LICENSE: &str = "BIOS_LINCENSE_ACTIVATE.XML=(0,0)";

const CHASSIS_ENDPOINT: &str = "redfish/v1/Chassis/1";

/// Body of a configuration/write POST against a CGI endpoint.
pub enum PostBody<'a> {
    /// URL-encoded form values.
    Form(&'a [(&'a str, &'a str)]),
    /// Raw body with a caller-supplied content type, e.g. a multipart
    /// firmware blob.
    Raw {
        content_type: &'a str,
        body: Vec<u8>,
    },
}

pub struct SupermicroX {
    http: HttpClient,
    endpoint: Endpoint,
    session: FormSession,
}

impl SupermicroX {
    pub(crate) fn new(http: HttpClient, endpoint: Endpoint) -> Self {
        let session = FormSession::new(
            format!("https://{}/cgi/login.cgi", endpoint.host),
            SESSION_COOKIE,
        );
        Self {
            http,
            endpoint,
            session,
        }
    }

    fn ensure_session(&self) -> Result<(), BmcError> {
        self.session
            .ensure(&self.http, &self.endpoint.username, &self.endpoint.password)
    }

    fn attach_cookie(
        &self,
        builder: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match self.session.cookie_header() {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    /// POSTs a fixed query string to `/cgi/ipmi.cgi` and decodes the XML
    /// answer into the document root for that query family.
    fn query(&self, request_key: &str) -> Result<Ipmi, BmcError> {
        self.ensure_session()?;
        let url = format!("https://{}/cgi/ipmi.cgi", self.endpoint.host);
        debug!("TX POST {url} {request_key}");
        let request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(request_key.to_string());
        let response = self
            .attach_cookie(request)
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
        if !status.is_success() {
            return Err(BmcError::HttpStatus {
                url,
                status_code: status,
            });
        }
        quick_xml::de::from_str(&body).map_err(|source| BmcError::XmlDecode { url, source })
    }

    /// GETs a path-style endpoint, optionally adding HTTP Basic auth on top
    /// of the session cookie. A 404 is reported as `PageNotFound` so callers
    /// can tell "feature absent on this firmware" from a hard failure; other
    /// statuses hand the body back for the caller to interpret.
    pub fn get(&self, endpoint: &str, basic_auth: bool) -> Result<Vec<u8>, BmcError> {
        self.ensure_session()?;
        let url = format!("https://{}/{}", self.endpoint.host, endpoint);
        debug!("TX GET {url}");
        let mut request = self.attach_cookie(self.http.get(&url));
        if basic_auth {
            request = request.basic_auth(&self.endpoint.username, Some(&self.endpoint.password));
        }
        let response = request.send().map_err(|source| BmcError::Network {
            url: url.clone(),
            source,
        })?;
        let status = response.status();
        let payload = response.bytes().map_err(|source| BmcError::Network {
            url: url.clone(),
            source,
        })?;
        debug!("RX {status} ({} bytes)", payload.len());
        if status == StatusCode::NOT_FOUND {
            return Err(BmcError::PageNotFound { url });
        }
        Ok(payload.to_vec())
    }

    /// POSTs a configuration/write request to `/cgi/<endpoint>` and returns
    /// the raw status code; only transport errors are classified here.
    pub fn post(&self, endpoint: &str, body: PostBody<'_>) -> Result<StatusCode, BmcError> {
        self.ensure_session()?;
        let url = format!("https://{}/cgi/{}", self.endpoint.host, endpoint);
        debug!("TX POST {url}");
        let request = match body {
            PostBody::Form(values) => self.http.post(&url).form(values),
            PostBody::Raw { content_type, body } => self
                .http
                .post(&url)
                .header(CONTENT_TYPE, content_type.to_string())
                .body(body),
        };
        let response = self
            .attach_cookie(request)
            .send()
            .map_err(|source| BmcError::Network {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        debug!("RX {status}");
        Ok(status)
    }
}

impl Bmc for SupermicroX {
    fn vendor(&self) -> Vendor {
        Vendor::Supermicro
    }

    fn address(&self) -> String {
        self.endpoint.host.clone()
    }

    fn update_credentials(&mut self, username: &str, password: &str) {
        self.endpoint.username = username.to_string();
        self.endpoint.password = password.to_string();
    }

    fn check_credentials(&self) -> Result<(), BmcError> {
        self.ensure_session()
    }

    fn serial(&self) -> Result<String, BmcError> {
        serial_from(&self.query(QUERY_FRU)?)
    }

    fn model(&self) -> Result<String, BmcError> {
        model_from(&self.query(QUERY_FRU)?)
    }

    fn version(&self) -> Result<String, BmcError> {
        let ipmi = self.query(QUERY_GENERIC)?;
        Ok(version_from(ipmi.generic_info.as_ref()))
    }

    fn bios_version(&self) -> Result<String, BmcError> {
        let ipmi = self.query(QUERY_SMBIOS)?;
        Ok(ipmi.bios.map(|b| b.version).unwrap_or_default())
    }

    fn cpu(&self) -> Result<Cpu, BmcError> {
        cpu_from(&self.query(QUERY_SMBIOS)?)
    }

    fn memory_gib(&self) -> Result<u32, BmcError> {
        memory_from(&self.query(QUERY_SMBIOS)?)
    }

    fn status(&self) -> Result<String, BmcError> {
        let ipmi = self.query(QUERY_HEALTH)?;
        match ipmi.health_info {
            Some(health) if health.health == "1" => Ok("OK".to_string()),
            _ => Ok("Unhealthy".to_string()),
        }
    }

    fn name(&self) -> Result<String, BmcError> {
        let ipmi = self.query(QUERY_CONFIG)?;
        Ok(ipmi
            .config_info
            .and_then(|c| c.hostname)
            .map(|h| h.name)
            .unwrap_or_default())
    }

    fn nics(&self) -> Result<Vec<Nic>, BmcError> {
        let mut nics = Vec::new();
        let generic = self.query(QUERY_GENERIC)?;
        if let Some(generic_info) = &generic.generic_info {
            nics.extend(bmc_nic_from(generic_info));
        }
        let platform = self.query(QUERY_PLATFORM)?;
        if let Some(platform_info) = &platform.platform_info {
            nics.extend(host_nics_from(platform_info));
        }
        Ok(nics)
    }

    fn disks(&self) -> Result<Vec<Disk>, BmcError> {
        // Not exposed by this firmware.
        Ok(Vec::new())
    }

    fn temp_c(&self) -> Result<i32, BmcError> {
        let ipmi = self.query(QUERY_NODE_READINGS)?;
        let Some(node_info) = &ipmi.node_info else {
            return Ok(0);
        };
        let serial = self.serial()?;
        temp_c_from(node_info, &serial)
    }

    fn power_kw(&self) -> Result<f64, BmcError> {
        let ipmi = self.query(QUERY_NODE_READINGS)?;
        let Some(node_info) = &ipmi.node_info else {
            return Ok(0.0);
        };
        let serial = self.serial()?;
        power_kw_from(node_info, &serial)
    }

    fn power_state(&self) -> Result<String, BmcError> {
        let ipmi = self.query(QUERY_POWER)?;
        Ok(power_state_from(ipmi.power_info.as_ref()))
    }

    fn license(&self) -> Result<License, BmcError> {
        let ipmi = self.query(QUERY_BIOS_LICENSE)?;
        Ok(license_from(ipmi.bios_license.as_ref()))
    }

    fn is_blade(&self) -> Result<bool, BmcError> {
        let ipmi = self.query(QUERY_NODE_READINGS)?;
        Ok(is_blade_from(ipmi.node_info.as_ref()))
    }

    fn slot(&self) -> Result<i32, BmcError> {
        let ipmi = self.query(QUERY_NODE_READINGS)?;
        let Some(node_info) = &ipmi.node_info else {
            return Err(BmcError::UnableToReadData("node info"));
        };
        let serial = self.serial()?;
        Ok(slot_from(node_info, &serial))
    }

    fn chassis_serial(&self) -> Result<String, BmcError> {
        let url = format!("https://{}/{}", self.endpoint.host, CHASSIS_ENDPOINT);
        let payload = self.get(CHASSIS_ENDPOINT, true)?;
        chassis_serial_from(&payload, &url)
    }
}

/*
 * Projections from decoded documents onto normalized values. Kept free of
 * I/O so the normalization rules are testable against fixture documents.
 */

fn serial_from(ipmi: &Ipmi) -> Result<String, BmcError> {
    match ipmi.fru_info.as_ref().and_then(|f| f.board.as_ref()) {
        Some(board) => Ok(board.serial_num.to_lowercase()),
        None => Err(BmcError::InvalidSerial),
    }
}

fn model_from(ipmi: &Ipmi) -> Result<String, BmcError> {
    match ipmi.fru_info.as_ref().and_then(|f| f.board.as_ref()) {
        Some(board) => Ok(board.part_num.clone()),
        None => Err(BmcError::UnableToReadData("model")),
    }
}

fn version_from(generic_info: Option<&GenericInfo>) -> String {
    let Some(info) = generic_info else {
        return String::new();
    };
    if !info.ipmi_fw_version.is_empty() {
        info.ipmi_fw_version.clone()
    } else if let Some(generic) = &info.generic {
        generic.ipmi_fw_version.clone()
    } else {
        String::new()
    }
}

fn memory_from(ipmi: &Ipmi) -> Result<u32, BmcError> {
    let mut total_mb: u32 = 0;
    for dimm in &ipmi.dimm {
        let size = dimm.size.strip_suffix(" MB").unwrap_or(&dimm.size);
        total_mb += parse_field::<u32>("DIMM size", size)?;
    }
    Ok(total_mb / 1024)
}

fn cpu_from(ipmi: &Ipmi) -> Result<Cpu, BmcError> {
    let Some(first) = ipmi.cpu.first() else {
        return Ok(Cpu::default());
    };
    let core_count = parse_field::<u32>("CPU cores", &first.core)?;
    Ok(Cpu {
        model: standardize_processor_name(&first.version),
        socket_count: ipmi.cpu.len() as u32,
        core_count,
        // The firmware does not report hyperthreads; core count is the best
        // available approximation.
        thread_count: core_count,
    })
}

fn bmc_nic_from(generic_info: &GenericInfo) -> Option<Nic> {
    let mac = if !generic_info.bmc_mac.is_empty() {
        &generic_info.bmc_mac
    } else {
        &generic_info.generic.as_ref()?.bmc_mac
    };
    if mac.is_empty() {
        return None;
    }
    Some(Nic {
        name: "bmc".to_string(),
        mac_address: mac.to_lowercase(),
    })
}

fn host_nics_from(platform_info: &PlatformInfo) -> Vec<Nic> {
    [
        &platform_info.mb_mac_addr1,
        &platform_info.mb_mac_addr2,
        &platform_info.mb_mac_addr3,
        &platform_info.mb_mac_addr4,
    ]
    .into_iter()
    .enumerate()
    .filter(|(_, mac)| !mac.is_empty())
    .map(|(i, mac)| Nic {
        name: format!("eth{i}"),
        mac_address: mac.to_lowercase(),
    })
    .collect()
}

/// Picks the per-node power reading for the node whose serial matches this
/// device (case-insensitive) and converts watts to kilowatts. No matching
/// node falls through to a zero reading, not an error.
fn power_kw_from(node_info: &NodeInfo, serial: &str) -> Result<f64, BmcError> {
    for node in &node_info.nodes {
        if node.node_serial.to_lowercase() == serial {
            let watts = parse_field::<i64>("Power", &node.power)?;
            return Ok(watts as f64 / 1000.0);
        }
    }
    Ok(0.0)
}

fn temp_c_from(node_info: &NodeInfo, serial: &str) -> Result<i32, BmcError> {
    for node in &node_info.nodes {
        if node.node_serial.to_lowercase() == serial {
            return parse_field::<i32>("SystemTemp", &node.system_temp);
        }
    }
    Ok(0)
}

/// Slot defaults to 1 for nodes that do not appear in the readings.
fn slot_from(node_info: &NodeInfo, serial: &str) -> i32 {
    let mut slot = 1;
    for node in &node_info.nodes {
        if node.node_serial.to_lowercase() == serial {
            slot = node.id + 1;
        }
    }
    slot
}

/// A chassis reporting any independently-identified compute node is treated
/// as housing blades. This is a heuristic: single-node boards answer with an
/// empty node list or no document at all.
fn is_blade_from(node_info: Option<&NodeInfo>) -> bool {
    node_info
        .map(|info| info.nodes.iter().any(|node| !node.node_serial.is_empty()))
        .unwrap_or(false)
}

fn power_state_from(power_info: Option<&PowerInfo>) -> String {
    power_info
        .and_then(|info| info.power.as_ref())
        .map(|power| power.status.to_lowercase())
        .unwrap_or_else(|| "unknown".to_string())
}

fn license_from(bios_license: Option<&BiosLicense>) -> License {
    match bios_license.map(|l| l.check.as_str()) {
        Some("0") => License {
            name: "oob".to_string(),
            status: "Activated".to_string(),
        },
        Some("1") => License {
            name: "oob".to_string(),
            status: "Not Activated".to_string(),
        },
        _ => License::default(),
    }
}

fn chassis_serial_from(payload: &[u8], url: &str) -> Result<String, BmcError> {
    let info: ChassisInfo =
        serde_json::from_slice(payload).map_err(|source| BmcError::JsonDecode {
            url: url.to_string(),
            body: String::from_utf8_lossy(payload).into_owned(),
            source,
        })?;
    if !info.error.code.is_empty() {
        let extended: String = info
            .error
            .extended_info
            .iter()
            .enumerate()
            .map(|(i, m)| format!(", Extended[{i}]: {}", m.message_id))
            .collect();
        return Err(BmcError::ChassisApi {
            code: info.error.code,
            message: info.error.message,
            extended,
        });
    }
    Ok(info.serial_number.to_lowercase())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::supermicro::Node;

    fn parse(xml: &str) -> Ipmi {
        quick_xml::de::from_str(xml).unwrap()
    }

    fn node(id: i32, serial: &str, power: &str, temp: &str) -> Node {
        Node {
            id,
            node_serial: serial.to_string(),
            power: power.to_string(),
            system_temp: temp.to_string(),
        }
    }

    #[test]
    fn serial_is_lowercased() {
        let ipmi = parse(
            r#"<IPMI><FRU_INFO><BOARD SERIAL_NUM="ZM158S012345" PART_NUM="X10"/></FRU_INFO></IPMI>"#,
        );
        assert_eq!(serial_from(&ipmi).unwrap(), "zm158s012345");
    }

    #[test]
    fn missing_board_is_a_semantic_error() {
        let ipmi = parse(r#"<IPMI><FRU_INFO><DEVICE ID="0"/></FRU_INFO></IPMI>"#);
        assert!(matches!(serial_from(&ipmi), Err(BmcError::InvalidSerial)));
        assert!(matches!(
            model_from(&ipmi),
            Err(BmcError::UnableToReadData("model"))
        ));
        assert!(matches!(
            serial_from(&parse("<IPMI></IPMI>")),
            Err(BmcError::InvalidSerial)
        ));
    }

    #[test]
    fn memory_sums_dimms_and_converts_to_gib() {
        let ipmi = parse(r#"<IPMI><DIMM SIZE="8192 MB"/><DIMM SIZE="8192 MB"/></IPMI>"#);
        assert_eq!(memory_from(&ipmi).unwrap(), 16);
        assert_eq!(memory_from(&parse("<IPMI></IPMI>")).unwrap(), 0);
    }

    #[test]
    fn unparsable_dimm_size_is_an_error() {
        let ipmi = parse(r#"<IPMI><DIMM SIZE="lots"/></IPMI>"#);
        assert!(matches!(
            memory_from(&ipmi),
            Err(BmcError::InvalidValue { field: "DIMM size", .. })
        ));
    }

    #[test]
    fn cpu_normalizes_first_entry() {
        let ipmi = parse(
            r#"<IPMI>
              <CPU VER="Intel(R) Xeon(R) CPU E5-2620 v4 @ 2.10GHz" CORE="8"/>
              <CPU VER="Intel(R) Xeon(R) CPU E5-2620 v4 @ 2.10GHz" CORE="8"/>
            </IPMI>"#,
        );
        let cpu = cpu_from(&ipmi).unwrap();
        assert_eq!(cpu.model, "intel(r) xeon(r) cpu e5-2620 v4");
        assert_eq!(cpu.socket_count, 2);
        assert_eq!(cpu.core_count, 8);
        assert_eq!(cpu.thread_count, 8);
    }

    #[test]
    fn cpu_without_entries_is_all_defaults() {
        assert_eq!(cpu_from(&parse("<IPMI></IPMI>")).unwrap(), Cpu::default());
    }

    #[test]
    fn version_prefers_flat_then_nested() {
        let flat = parse(r#"<IPMI><GENERIC_INFO IPMI_FW_VERSION="3.25"/></IPMI>"#);
        assert_eq!(version_from(flat.generic_info.as_ref()), "3.25");
        let nested =
            parse(r#"<IPMI><GENERIC_INFO><GENERIC IPMI_FW_VERSION="1.23"/></GENERIC_INFO></IPMI>"#);
        assert_eq!(version_from(nested.generic_info.as_ref()), "1.23");
        assert_eq!(version_from(None), "");
    }

    #[test]
    fn power_matches_own_node_and_converts_to_kw() {
        let info = NodeInfo {
            nodes: vec![node(0, "A19DEF", "750", "23")],
        };
        assert_eq!(power_kw_from(&info, "a19def").unwrap(), 0.75);
    }

    #[test]
    fn power_correlation_is_case_insensitive() {
        let info = NodeInfo {
            nodes: vec![node(0, "ABC", "500", "20"), node(1, "XYZ", "900", "25")],
        };
        assert_eq!(power_kw_from(&info, "xyz").unwrap(), 0.9);
    }

    #[test]
    fn power_without_matching_node_reads_zero() {
        let info = NodeInfo {
            nodes: vec![node(0, "ABC", "500", "20")],
        };
        assert_eq!(power_kw_from(&info, "nope").unwrap(), 0.0);
    }

    #[test]
    fn temperature_matches_own_node() {
        let info = NodeInfo {
            nodes: vec![node(0, "ABC", "500", "21"), node(1, "DEF", "600", "27")],
        };
        assert_eq!(temp_c_from(&info, "def").unwrap(), 27);
        assert_eq!(temp_c_from(&info, "zzz").unwrap(), 0);
    }

    #[test]
    fn slot_is_node_id_plus_one_defaulting_to_first() {
        let info = NodeInfo {
            nodes: vec![node(0, "ABC", "", ""), node(3, "DEF", "", "")],
        };
        assert_eq!(slot_from(&info, "def"), 4);
        assert_eq!(slot_from(&info, "zzz"), 1);
    }

    #[test]
    fn blade_probe_needs_one_identified_node() {
        let populated = NodeInfo {
            nodes: vec![node(0, "", "", ""), node(1, "ABC", "", "")],
        };
        assert!(is_blade_from(Some(&populated)));
        let anonymous = NodeInfo {
            nodes: vec![node(0, "", "", "")],
        };
        assert!(!is_blade_from(Some(&anonymous)));
        assert!(!is_blade_from(None));
    }

    #[test]
    fn power_state_lowercases_and_defaults_to_unknown() {
        let ipmi = parse(r#"<IPMI><POWER_INFO><POWER STATUS="ON"/></POWER_INFO></IPMI>"#);
        assert_eq!(power_state_from(ipmi.power_info.as_ref()), "on");
        assert_eq!(power_state_from(None), "unknown");
    }

    #[test]
    fn nics_carry_roles_and_lowercased_macs() {
        let generic = parse(r#"<IPMI><GENERIC_INFO BMC_MAC="0C:C4:7A:B8:22:F0"/></IPMI>"#);
        let bmc = bmc_nic_from(generic.generic_info.as_ref().unwrap()).unwrap();
        assert_eq!(bmc.name, "bmc");
        assert_eq!(bmc.mac_address, "0c:c4:7a:b8:22:f0");

        let nested = parse(
            r#"<IPMI><GENERIC_INFO><GENERIC BMC_MAC="AC:1F:6B:00:11:22"/></GENERIC_INFO></IPMI>"#,
        );
        let bmc = bmc_nic_from(nested.generic_info.as_ref().unwrap()).unwrap();
        assert_eq!(bmc.mac_address, "ac:1f:6b:00:11:22");

        let platform = parse(
            r#"<IPMI><PLATFORM_INFO MB_MAC_ADDR1="0C:C4:7A:01:02:03" MB_MAC_ADDR2="0C:C4:7A:01:02:04"/></IPMI>"#,
        );
        let nics = host_nics_from(platform.platform_info.as_ref().unwrap());
        assert_eq!(nics.len(), 2);
        assert_eq!(nics[0].name, "eth0");
        assert_eq!(nics[1].name, "eth1");
        assert_eq!(nics[1].mac_address, "0c:c4:7a:01:02:04");
    }

    #[test]
    fn license_maps_check_codes() {
        let activated = parse(r#"<IPMI><BIOS_LINCENSE CHECK="0"/></IPMI>"#);
        assert_eq!(
            license_from(activated.bios_license.as_ref()),
            License {
                name: "oob".to_string(),
                status: "Activated".to_string()
            }
        );
        let inactive = parse(r#"<IPMI><BIOS_LINCENSE CHECK="1"/></IPMI>"#);
        assert_eq!(
            license_from(inactive.bios_license.as_ref()).status,
            "Not Activated"
        );
        assert_eq!(license_from(None), License::default());
    }

    #[test]
    fn chassis_serial_lowercases() {
        let serial =
            chassis_serial_from(br#"{"SerialNumber":"CJ23CL1234"}"#, "https://bmc/x").unwrap();
        assert_eq!(serial, "cj23cl1234");
    }

    #[test]
    fn chassis_error_embeds_code_and_message() {
        let err = chassis_serial_from(
            br#"{"SerialNumber":"","error":{"code":"1","message":"bad"}}"#,
            "https://bmc/x",
        )
        .unwrap_err();
        assert!(err.to_string().contains("Code: 1, Message: bad"));
    }

    #[test]
    fn chassis_error_appends_extended_messages() {
        let err = chassis_serial_from(
            br#"{"SerialNumber":"","error":{"code":"1","message":"bad",
                "@Message.ExtendedInfo":[{"MessageId":"Base.1.0.A"},{"MessageId":"Base.1.0.B"}]}}"#,
            "https://bmc/x",
        )
        .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("Extended[0]: Base.1.0.A"));
        assert!(text.contains("Extended[1]: Base.1.0.B"));
    }

    #[test]
    fn garbage_chassis_payload_is_a_decode_error() {
        let err = chassis_serial_from(b"<html>login</html>", "https://bmc/x").unwrap_err();
        assert!(matches!(err, BmcError::JsonDecode { .. }));
    }
}
