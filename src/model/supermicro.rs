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
//! Response documents for the Supermicro X10/X11 CGI dialect.
//!
//! Every `/cgi/ipmi.cgi` query answers with an `<IPMI>` root whose children
//! depend on the query family. The firmware omits whole sub-trees instead of
//! emitting empty ones, so every family is optional and every attribute
//! defaults. Element and attribute names are the firmware's, typos included
//! (`BIOS_LINCENSE`).
use serde::Deserialize;

/// Root of every `/cgi/ipmi.cgi` response.
#[derive(Debug, Default, Deserialize)]
pub struct Ipmi {
    #[serde(rename = "FRU_INFO")]
    pub fru_info: Option<FruInfo>,
    #[serde(rename = "GENERIC_INFO")]
    pub generic_info: Option<GenericInfo>,
    #[serde(rename = "CONFIG_INFO")]
    pub config_info: Option<ConfigInfo>,
    #[serde(rename = "HEALTH_INFO")]
    pub health_info: Option<HealthInfo>,
    #[serde(rename = "BIOS")]
    pub bios: Option<Bios>,
    #[serde(rename = "CPU", default)]
    pub cpu: Vec<CpuEntry>,
    #[serde(rename = "DIMM", default)]
    pub dimm: Vec<Dimm>,
    #[serde(rename = "NodeInfo")]
    pub node_info: Option<NodeInfo>,
    #[serde(rename = "POWER_INFO")]
    pub power_info: Option<PowerInfo>,
    #[serde(rename = "PLATFORM_INFO")]
    pub platform_info: Option<PlatformInfo>,
    #[serde(rename = "BIOS_LINCENSE")]
    pub bios_license: Option<BiosLicense>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FruInfo {
    #[serde(rename = "BOARD")]
    pub board: Option<FruBoard>,
    #[serde(rename = "CHASSIS")]
    pub chassis: Option<FruChassis>,
    #[serde(rename = "PRODUCT")]
    pub product: Option<FruProduct>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FruBoard {
    #[serde(rename = "@SERIAL_NUM", default)]
    pub serial_num: String,
    #[serde(rename = "@PART_NUM", default)]
    pub part_num: String,
    #[serde(rename = "@PROD_NAME", default)]
    pub prod_name: String,
    #[serde(rename = "@MFC_NAME", default)]
    pub mfc_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FruChassis {
    #[serde(rename = "@SERIAL_NUM", default)]
    pub serial_num: String,
    #[serde(rename = "@PART_NUM", default)]
    pub part_num: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FruProduct {
    #[serde(rename = "@SERIAL_NUM", default)]
    pub serial_num: String,
    #[serde(rename = "@PART_NUM", default)]
    pub part_num: String,
}

/// `GENERIC_INFO.XML` answers differently per board generation: X10 boards
/// put the fields on the element itself, X11 nests them in `<GENERIC>`.
#[derive(Debug, Default, Deserialize)]
pub struct GenericInfo {
    #[serde(rename = "@IPMI_FW_VERSION", default)]
    pub ipmi_fw_version: String,
    #[serde(rename = "@BMC_MAC", default)]
    pub bmc_mac: String,
    #[serde(rename = "GENERIC")]
    pub generic: Option<Generic>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Generic {
    #[serde(rename = "@IPMI_FW_VERSION", default)]
    pub ipmi_fw_version: String,
    #[serde(rename = "@BMC_MAC", default)]
    pub bmc_mac: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfigInfo {
    #[serde(rename = "HOSTNAME")]
    pub hostname: Option<Hostname>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Hostname {
    #[serde(rename = "@NAME", default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HealthInfo {
    #[serde(rename = "@HEALTH", default)]
    pub health: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Bios {
    #[serde(rename = "@VENDOR", default)]
    pub vendor: String,
    #[serde(rename = "@VER", default)]
    pub version: String,
    #[serde(rename = "@REL_DATE", default)]
    pub release_date: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CpuEntry {
    #[serde(rename = "@VER", default)]
    pub version: String,
    #[serde(rename = "@CORE", default)]
    pub core: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Dimm {
    #[serde(rename = "@SIZE", default)]
    pub size: String,
}

/// Per-node readings on multi-node (TwinPro etc.) chassis. Single-node
/// systems answer with an empty node list or omit the document entirely.
#[derive(Debug, Default, Deserialize)]
pub struct NodeInfo {
    #[serde(rename = "Node", default)]
    pub nodes: Vec<Node>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Node {
    #[serde(rename = "@ID", default)]
    pub id: i32,
    #[serde(rename = "@NodeSerial", default)]
    pub node_serial: String,
    #[serde(rename = "@Power", default)]
    pub power: String,
    #[serde(rename = "@SystemTemp", default)]
    pub system_temp: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PowerInfo {
    #[serde(rename = "POWER")]
    pub power: Option<PowerStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PowerStatus {
    #[serde(rename = "@STATUS", default)]
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlatformInfo {
    #[serde(rename = "@MB_MAC_ADDR1", default)]
    pub mb_mac_addr1: String,
    #[serde(rename = "@MB_MAC_ADDR2", default)]
    pub mb_mac_addr2: String,
    #[serde(rename = "@MB_MAC_ADDR3", default)]
    pub mb_mac_addr3: String,
    #[serde(rename = "@MB_MAC_ADDR4", default)]
    pub mb_mac_addr4: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BiosLicense {
    #[serde(rename = "@CHECK", default)]
    pub check: String,
}

/// Body of `GET /redfish/v1/Chassis/1`, the one Redfish-flavored endpoint
/// this firmware exposes. Errors come embedded in the 200 body.
#[derive(Debug, Default, Deserialize)]
pub struct ChassisInfo {
    #[serde(rename = "SerialNumber", default)]
    pub serial_number: String,
    #[serde(default)]
    pub error: ChassisApiError,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChassisApiError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "@Message.ExtendedInfo", default)]
    pub extended_info: Vec<ExtendedInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtendedInfo {
    #[serde(rename = "MessageId", default)]
    pub message_id: String,
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(xml: &str) -> Ipmi {
        quick_xml::de::from_str(xml).unwrap()
    }

    #[test]
    fn fru_info_document() {
        let ipmi = parse(
            r#"<?xml version="1.0"?>
            <IPMI>
              <FRU_INFO RES="1">
                <DEVICE ID="0"/>
                <CHASSIS TYPE="1" PART_NUM="CSE-813M" SERIAL_NUM="C8130AH"/>
                <BOARD LAN="0" MFC_NAME="Supermicro" PROD_NAME="X10SLM+-LN4F"
                       SERIAL_NUM="ZM158S012345" PART_NUM="X10SLM+-LN4F"/>
                <PRODUCT LAN="1" PART_NUM="SYS-5018D-MTLN4F" SERIAL_NUM="S16146159B00042"/>
              </FRU_INFO>
            </IPMI>"#,
        );
        let fru = ipmi.fru_info.unwrap();
        assert_eq!(fru.board.as_ref().unwrap().serial_num, "ZM158S012345");
        assert_eq!(fru.board.as_ref().unwrap().part_num, "X10SLM+-LN4F");
        assert_eq!(fru.chassis.unwrap().serial_num, "C8130AH");
        assert_eq!(fru.product.unwrap().part_num, "SYS-5018D-MTLN4F");
    }

    #[test]
    fn fru_info_without_board_subtree() {
        let ipmi = parse(r#"<IPMI><FRU_INFO RES="1"><DEVICE ID="0"/></FRU_INFO></IPMI>"#);
        let fru = ipmi.fru_info.unwrap();
        assert!(fru.board.is_none());
    }

    #[test]
    fn generic_info_x10_flat_shape() {
        let ipmi = parse(
            r#"<IPMI><GENERIC_INFO IPMI_FW_VERSION="3.25" BMC_MAC="0C:C4:7A:B8:22:F0"/></IPMI>"#,
        );
        let generic = ipmi.generic_info.unwrap();
        assert_eq!(generic.ipmi_fw_version, "3.25");
        assert_eq!(generic.bmc_mac, "0C:C4:7A:B8:22:F0");
        assert!(generic.generic.is_none());
    }

    #[test]
    fn generic_info_x11_nested_shape() {
        let ipmi = parse(
            r#"<IPMI>
              <GENERIC_INFO>
                <GENERIC IPMI_FW_VERSION="1.23" BMC_MAC="AC:1F:6B:11:22:33"/>
              </GENERIC_INFO>
            </IPMI>"#,
        );
        let generic = ipmi.generic_info.unwrap();
        assert_eq!(generic.ipmi_fw_version, "");
        assert_eq!(generic.generic.unwrap().ipmi_fw_version, "1.23");
    }

    #[test]
    fn smbios_document() {
        let ipmi = parse(
            r#"<IPMI>
              <BIOS VENDOR="American Megatrends Inc." VER="3.0a" REL_DATE="12/17/2015"/>
              <CPU TYPE="3" VER="Intel(R) Xeon(R) CPU E5-2620 v4 @ 2.10GHz" CORE="8"/>
              <CPU TYPE="3" VER="Intel(R) Xeon(R) CPU E5-2620 v4 @ 2.10GHz" CORE="8"/>
              <DIMM SIZE="8192 MB"/>
              <DIMM SIZE="8192 MB"/>
            </IPMI>"#,
        );
        assert_eq!(ipmi.bios.unwrap().version, "3.0a");
        assert_eq!(ipmi.cpu.len(), 2);
        assert_eq!(ipmi.cpu[0].core, "8");
        assert_eq!(ipmi.dimm.len(), 2);
        assert_eq!(ipmi.dimm[1].size, "8192 MB");
    }

    #[test]
    fn node_info_document() {
        let ipmi = parse(
            r#"<IPMI>
              <NodeInfo>
                <Node ID="0" NodeSerial="A19DEF" Power="620" SystemTemp="23"/>
                <Node ID="1" NodeSerial="" Power="" SystemTemp=""/>
              </NodeInfo>
            </IPMI>"#,
        );
        let nodes = ipmi.node_info.unwrap().nodes;
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, 0);
        assert_eq!(nodes[0].node_serial, "A19DEF");
        assert_eq!(nodes[0].power, "620");
        assert_eq!(nodes[1].node_serial, "");
    }

    #[test]
    fn power_platform_license_config_health() {
        let ipmi = parse(
            r#"<IPMI>
              <POWER_INFO><POWER STATUS="ON"/></POWER_INFO>
              <PLATFORM_INFO MB_MAC_ADDR1="0C:C4:7A:01:02:03" MB_MAC_ADDR2="0C:C4:7A:01:02:04"/>
              <BIOS_LINCENSE CHECK="0"/>
              <CONFIG_INFO><HOSTNAME NAME="db-0001"/></CONFIG_INFO>
              <HEALTH_INFO HEALTH="1"/>
            </IPMI>"#,
        );
        assert_eq!(ipmi.power_info.unwrap().power.unwrap().status, "ON");
        let platform = ipmi.platform_info.unwrap();
        assert_eq!(platform.mb_mac_addr1, "0C:C4:7A:01:02:03");
        assert_eq!(platform.mb_mac_addr3, "");
        assert_eq!(ipmi.bios_license.unwrap().check, "0");
        assert_eq!(ipmi.config_info.unwrap().hostname.unwrap().name, "db-0001");
        assert_eq!(ipmi.health_info.unwrap().health, "1");
    }

    #[test]
    fn chassis_info_json() {
        let ok: ChassisInfo =
            serde_json::from_str(r#"{"SerialNumber":"CJ23CL1234"}"#).unwrap();
        assert_eq!(ok.serial_number, "CJ23CL1234");
        assert_eq!(ok.error.code, "");

        let err: ChassisInfo = serde_json::from_str(
            r#"{"SerialNumber":"","error":{"code":"1","message":"bad",
                "@Message.ExtendedInfo":[{"MessageId":"Base.1.0.Fail"}]}}"#,
        )
        .unwrap();
        assert_eq!(err.error.code, "1");
        assert_eq!(err.error.message, "bad");
        assert_eq!(err.error.extended_info[0].message_id, "Base.1.0.Fail");
    }
}
