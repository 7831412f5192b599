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
//! Normalized device types returned by the accessor surface, independent of
//! the vendor dialect they were decoded from.
use std::fmt;

use serde::{Deserialize, Serialize};

/// The hardware vendor behind a BMC dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vendor {
    Supermicro,
    Hp,
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vendor::Supermicro => write!(f, "supermicro"),
            Vendor::Hp => write!(f, "hp"),
        }
    }
}

/// A network interface as reported by the BMC: the logical role ("bmc",
/// "eth0".."eth3") plus the MAC address, lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nic {
    pub name: String,
    pub mac_address: String,
}

/// Disk inventory entry. Upstream firmware APIs do not expose disks, so
/// accessors always return an empty list; the type exists so the snapshot
/// shape is stable for consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    pub serial: String,
    pub size_gib: u64,
}

/// Processor inventory for the first reported CPU.
///
/// `thread_count` is aliased to `core_count`: the firmware does not report
/// hyperthreads independently, so core count is the best available value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cpu {
    pub model: String,
    pub socket_count: u32,
    pub core_count: u32,
    pub thread_count: u32,
}

/// BMC license state, e.g. the out-of-band feature license on Supermicro.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    pub status: String,
}

/// Physical form factor, resolved once per snapshot by the blade probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormFactor {
    /// Standalone rack server, no chassis linkage.
    Discrete,
    /// Chassis-housed compute node.
    Blade {
        /// Slot position within the chassis, 1-based.
        position: i32,
        /// Serial of the chassis the blade is seated in, lower-cased.
        chassis_serial: String,
    },
}

/// One consistent record of a device, assembled by the snapshot aggregator
/// from many independent queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub vendor: Vendor,
    pub bmc_address: String,
    pub bmc_type: String,
    pub serial: String,
    pub bmc_version: String,
    pub model: String,
    pub nics: Vec<Nic>,
    pub disks: Vec<Disk>,
    pub bios_version: String,
    pub cpu: Cpu,
    pub memory_gib: u32,
    pub status: String,
    pub name: String,
    pub temp_c: i32,
    pub power_kw: f64,
    pub power_state: String,
    pub license: License,
    pub form_factor: FormFactor,
}

impl Server {
    pub fn is_blade(&self) -> bool {
        matches!(self.form_factor, FormFactor::Blade { .. })
    }
}
