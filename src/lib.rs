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
//! Out-of-band hardware management client.
//!
//! Talks to BMCs of different hardware vendors over HTTP using each vendor's
//! native wire dialect (form-encoded CGI + XML for Supermicro X10/X11 boards
//! with a narrow Redfish JSON subset, SOAP/WS-Security for the HP c7000
//! Onboard Administrator) and exposes one normalized accessor surface, the
//! [`Bmc`] trait, regardless of vendor. [`server_snapshot`] sequences those
//! accessors into a single consistent device record.
use std::path::Path;

use tracing::warn;

mod c7000;
mod device;
mod error;
mod model;
mod network;
mod normalize;
mod session;
mod snapshot;
mod supermicro;

pub use c7000::C7000;
pub use device::{Cpu, Disk, FormFactor, License, Nic, Server, Vendor};
pub use error::BmcError;
pub use network::{BmcClientPool, BmcClientPoolBuilder, Endpoint};
pub use normalize::standardize_processor_name;
pub use snapshot::server_snapshot;
pub use supermicro::{PostBody, SupermicroX};

/// Normalized accessor surface over one BMC target. Every call is one or
/// more blocking HTTP round trips, re-authenticating at the start so no
/// operation can fail on a stale session.
///
/// Values are single-owner: a client holds its own session state and is not
/// internally thread-safe, so it must not be driven from multiple threads at
/// once. Distinct targets are fully independent.
pub trait Bmc {
    fn vendor(&self) -> Vendor;

    /// Network address of the BMC this client talks to.
    fn address(&self) -> String;

    /// Replaces the credentials used for future logins.
    fn update_credentials(&mut self, username: &str, password: &str);

    /// Verifies the credentials by performing the login handshake.
    fn check_credentials(&self) -> Result<(), BmcError>;

    /// Board serial number, lower-cased.
    fn serial(&self) -> Result<String, BmcError>;

    /// Device model identifier.
    fn model(&self) -> Result<String, BmcError>;

    /// BMC firmware version.
    fn version(&self) -> Result<String, BmcError>;

    /// Host BIOS version.
    fn bios_version(&self) -> Result<String, BmcError>;

    /// First processor's normalized name plus socket/core/thread counts.
    fn cpu(&self) -> Result<Cpu, BmcError>;

    /// Total installed memory in GiB, summed across modules.
    fn memory_gib(&self) -> Result<u32, BmcError>;

    /// Overall health: `OK` or `Unhealthy`.
    fn status(&self) -> Result<String, BmcError>;

    /// Configured hostname.
    fn name(&self) -> Result<String, BmcError>;

    /// Known NICs: at most one "bmc" NIC plus numbered host NICs,
    /// vendor-dependent. MACs are lower-cased.
    fn nics(&self) -> Result<Vec<Nic>, BmcError>;

    /// Disk inventory. No supported firmware exposes it, so this is always
    /// empty.
    fn disks(&self) -> Result<Vec<Disk>, BmcError>;

    /// Current temperature in degrees Celsius.
    fn temp_c(&self) -> Result<i32, BmcError>;

    /// Current power draw in kilowatts.
    fn power_kw(&self) -> Result<f64, BmcError>;

    /// Current power state, lower-cased; `"unknown"` when the firmware
    /// omits the reading.
    fn power_state(&self) -> Result<String, BmcError>;

    /// BMC feature license state.
    fn license(&self) -> Result<License, BmcError>;

    /// Whether this device is a chassis-housed blade. Heuristic on some
    /// vendors; see the per-vendor implementation.
    fn is_blade(&self) -> Result<bool, BmcError>;

    /// Slot position within the chassis, 1-based.
    fn slot(&self) -> Result<i32, BmcError>;

    /// Serial of the chassis housing this device, lower-cased.
    fn chassis_serial(&self) -> Result<String, BmcError>;

    /// Model string for labeling. Deliberately fail-open: an error is
    /// logged and yields an empty string instead of aborting the caller.
    fn hardware_type(&self) -> String {
        match self.model() {
            Ok(model) => model,
            Err(err) => {
                warn!("hardware type unavailable: {err}");
                String::new()
            }
        }
    }

    /// BIOS version via the firmware inventory API. Not implemented by this
    /// client; the SMBIOS-backed [`bios_version`](Bmc::bios_version) is the
    /// supported path.
    fn firmware_bios_version(&self) -> Result<String, BmcError> {
        Err(BmcError::NotImplemented)
    }

    /// BMC version via the firmware inventory API. Not implemented by this
    /// client.
    fn firmware_bmc_version(&self) -> Result<String, BmcError> {
        Err(BmcError::NotImplemented)
    }

    /// Flashes a BMC firmware image. Not implemented by this client.
    fn firmware_update_bmc(&self, _image: &Path) -> Result<(), BmcError> {
        Err(BmcError::NotImplemented)
    }
}
