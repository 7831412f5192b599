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
//! Assembles one consistent device record out of many independent accessor
//! calls: a single linear pipeline with one absorbing error state.
use tracing::debug;

use crate::{
    device::{Cpu, FormFactor, License, Server},
    Bmc, BmcError,
};

/// Collects a full [`Server`] record from the given BMC.
///
/// The blade probe runs first; a probe failure silently defaults to
/// "discrete" rather than aborting. After that, accessors run in a fixed
/// order and the first failure aborts the whole aggregation. Callers get
/// either a fully populated record or a single error naming the accessor
/// that failed; a partially populated record is never returned.
pub fn server_snapshot(bmc: &dyn Bmc) -> Result<Server, BmcError> {
    let is_blade = bmc.is_blade().unwrap_or_else(|err| {
        debug!("blade probe failed, assuming discrete: {err}");
        false
    });

    let mut server = Server {
        vendor: bmc.vendor(),
        bmc_address: bmc.address(),
        bmc_type: bmc.hardware_type(),
        serial: String::new(),
        bmc_version: String::new(),
        model: String::new(),
        nics: Vec::new(),
        disks: Vec::new(),
        bios_version: String::new(),
        cpu: Cpu::default(),
        memory_gib: 0,
        status: String::new(),
        name: String::new(),
        temp_c: 0,
        power_kw: 0.0,
        power_state: String::new(),
        license: License::default(),
        form_factor: FormFactor::Discrete,
    };

    server.serial = bmc.serial().map_err(BmcError::snapshot("serial"))?;
    server.bmc_version = bmc.version().map_err(BmcError::snapshot("bmc version"))?;
    server.model = bmc.model().map_err(BmcError::snapshot("model"))?;
    server.nics = bmc.nics().map_err(BmcError::snapshot("nics"))?;
    server.disks = bmc.disks().map_err(BmcError::snapshot("disks"))?;
    server.bios_version = bmc
        .bios_version()
        .map_err(BmcError::snapshot("bios version"))?;
    server.cpu = bmc.cpu().map_err(BmcError::snapshot("cpu"))?;
    server.memory_gib = bmc.memory_gib().map_err(BmcError::snapshot("memory"))?;
    server.status = bmc.status().map_err(BmcError::snapshot("status"))?;
    server.name = bmc.name().map_err(BmcError::snapshot("name"))?;
    server.temp_c = bmc.temp_c().map_err(BmcError::snapshot("temperature"))?;
    server.power_kw = bmc.power_kw().map_err(BmcError::snapshot("power draw"))?;
    server.power_state = bmc
        .power_state()
        .map_err(BmcError::snapshot("power state"))?;
    server.license = bmc.license().map_err(BmcError::snapshot("license"))?;

    if is_blade {
        let position = bmc.slot().map_err(BmcError::snapshot("slot"))?;
        let chassis_serial = bmc
            .chassis_serial()
            .map_err(BmcError::snapshot("chassis serial"))?;
        server.form_factor = FormFactor::Blade {
            position,
            chassis_serial,
        };
    }

    Ok(server)
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use super::*;
    use crate::{Disk, Nic, Vendor};

    /// Scriptable facade: records the call order and fails at a chosen
    /// accessor.
    struct StubBmc {
        blade_probe: Result<bool, ()>,
        fail_at: Option<&'static str>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl StubBmc {
        fn new(blade_probe: Result<bool, ()>) -> Self {
            Self {
                blade_probe,
                fail_at: None,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing_at(blade_probe: Result<bool, ()>, accessor: &'static str) -> Self {
            let mut stub = Self::new(blade_probe);
            stub.fail_at = Some(accessor);
            stub
        }

        fn visit(&self, op: &'static str) -> Result<(), BmcError> {
            self.calls.borrow_mut().push(op);
            if self.fail_at == Some(op) {
                return Err(BmcError::UnableToReadData(op));
            }
            Ok(())
        }
    }

    impl Bmc for StubBmc {
        fn vendor(&self) -> Vendor {
            Vendor::Supermicro
        }
        fn address(&self) -> String {
            "10.0.0.1".to_string()
        }
        fn update_credentials(&mut self, _username: &str, _password: &str) {}
        fn check_credentials(&self) -> Result<(), BmcError> {
            Ok(())
        }
        fn serial(&self) -> Result<String, BmcError> {
            self.visit("serial")?;
            Ok("zm158s012345".to_string())
        }
        fn model(&self) -> Result<String, BmcError> {
            self.visit("model")?;
            Ok("X10SLM+-LN4F".to_string())
        }
        fn version(&self) -> Result<String, BmcError> {
            self.visit("version")?;
            Ok("3.25".to_string())
        }
        fn bios_version(&self) -> Result<String, BmcError> {
            self.visit("bios_version")?;
            Ok("3.0a".to_string())
        }
        fn cpu(&self) -> Result<Cpu, BmcError> {
            self.visit("cpu")?;
            Ok(Cpu {
                model: "intel(r) xeon(r) cpu e5-2620 v4".to_string(),
                socket_count: 2,
                core_count: 8,
                thread_count: 8,
            })
        }
        fn memory_gib(&self) -> Result<u32, BmcError> {
            self.visit("memory")?;
            Ok(16)
        }
        fn status(&self) -> Result<String, BmcError> {
            self.visit("status")?;
            Ok("OK".to_string())
        }
        fn name(&self) -> Result<String, BmcError> {
            self.visit("name")?;
            Ok("db-0001".to_string())
        }
        fn nics(&self) -> Result<Vec<Nic>, BmcError> {
            self.visit("nics")?;
            Ok(vec![Nic {
                name: "bmc".to_string(),
                mac_address: "0c:c4:7a:b8:22:f0".to_string(),
            }])
        }
        fn disks(&self) -> Result<Vec<Disk>, BmcError> {
            self.visit("disks")?;
            Ok(Vec::new())
        }
        fn temp_c(&self) -> Result<i32, BmcError> {
            self.visit("temp_c")?;
            Ok(23)
        }
        fn power_kw(&self) -> Result<f64, BmcError> {
            self.visit("power_kw")?;
            Ok(0.75)
        }
        fn power_state(&self) -> Result<String, BmcError> {
            self.visit("power_state")?;
            Ok("on".to_string())
        }
        fn license(&self) -> Result<License, BmcError> {
            self.visit("license")?;
            Ok(License {
                name: "oob".to_string(),
                status: "Activated".to_string(),
            })
        }
        fn is_blade(&self) -> Result<bool, BmcError> {
            self.calls.borrow_mut().push("is_blade");
            self.blade_probe
                .map_err(|_| BmcError::UnableToReadData("node info"))
        }
        fn slot(&self) -> Result<i32, BmcError> {
            self.visit("slot")?;
            Ok(4)
        }
        fn chassis_serial(&self) -> Result<String, BmcError> {
            self.visit("chassis_serial")?;
            Ok("cj23cl1234".to_string())
        }
    }

    #[test]
    fn discrete_snapshot_runs_the_fixed_sequence() {
        let stub = StubBmc::new(Ok(false));
        let server = server_snapshot(&stub).unwrap();
        assert_eq!(server.form_factor, FormFactor::Discrete);
        assert_eq!(server.serial, "zm158s012345");
        assert_eq!(server.memory_gib, 16);
        assert_eq!(server.power_kw, 0.75);
        // `bmc_type` goes through the fail-open hardware type, hence the
        // extra model call right after the probe.
        assert_eq!(
            *stub.calls.borrow(),
            vec![
                "is_blade",
                "model",
                "serial",
                "version",
                "model",
                "nics",
                "disks",
                "bios_version",
                "cpu",
                "memory",
                "status",
                "name",
                "temp_c",
                "power_kw",
                "power_state",
                "license",
            ]
        );
    }

    #[test]
    fn blade_snapshot_adds_slot_and_chassis_serial() {
        let stub = StubBmc::new(Ok(true));
        let server = server_snapshot(&stub).unwrap();
        assert_eq!(
            server.form_factor,
            FormFactor::Blade {
                position: 4,
                chassis_serial: "cj23cl1234".to_string(),
            }
        );
        let calls = stub.calls.borrow();
        assert_eq!(&calls[calls.len() - 2..], ["slot", "chassis_serial"]);
    }

    #[test]
    fn probe_failure_defaults_to_discrete() {
        let stub = StubBmc::new(Err(()));
        let server = server_snapshot(&stub).unwrap();
        assert_eq!(server.form_factor, FormFactor::Discrete);
    }

    #[test]
    fn failure_mid_sequence_aborts_with_the_failing_accessor() {
        let stub = StubBmc::failing_at(Ok(false), "cpu");
        let err = server_snapshot(&stub).unwrap_err();
        match err {
            BmcError::Snapshot { field, .. } => assert_eq!(field, "cpu"),
            other => panic!("unexpected error: {other}"),
        }
        // Nothing after the failing accessor runs.
        assert_eq!(*stub.calls.borrow().last().unwrap(), "cpu");
        assert!(!stub.calls.borrow().contains(&"memory"));
    }

    #[test]
    fn blade_chassis_failure_still_aborts() {
        let stub = StubBmc::failing_at(Ok(true), "chassis_serial");
        let err = server_snapshot(&stub).unwrap_err();
        assert!(matches!(
            err,
            BmcError::Snapshot {
                field: "chassis serial",
                ..
            }
        ));
    }

    #[test]
    fn hardware_type_swallows_model_failure() {
        let stub = StubBmc::failing_at(Ok(false), "model");
        assert_eq!(stub.hardware_type(), "");
    }
}
