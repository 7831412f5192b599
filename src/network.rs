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
use std::time::Duration;

use reqwest::{
    blocking::Client as HttpClient, blocking::ClientBuilder as HttpClientBuilder, Certificate,
};

use crate::{c7000::C7000, supermicro::SupermicroX, BmcError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// The BMC endpoint a client connects to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    /// Hostname or IP address of the BMC
    pub host: String,
    /// BMC username
    pub username: String,
    /// BMC password
    pub password: String,
}

#[derive(Debug)]
pub struct BmcClientPoolBuilder {
    timeout: Duration,
    accept_invalid_certs: bool,
    root_certs: Vec<Certificate>,
}

impl BmcClientPoolBuilder {
    /// Prevents the pool from accepting self signed certificates and other
    /// invalid certificates.
    ///
    /// By default self signed certificates will be accepted, since BMCs
    /// usually use those. With strict TLS the system trust store applies,
    /// plus any roots added via [`add_root_certificate`].
    ///
    /// [`add_root_certificate`]: BmcClientPoolBuilder::add_root_certificate
    pub fn reject_invalid_certs(mut self) -> BmcClientPoolBuilder {
        self.accept_invalid_certs = false;
        self
    }

    /// Adds a trust root for TLS verification, for BMCs carrying certificates
    /// signed by a private CA. Only meaningful together with
    /// [`reject_invalid_certs`](BmcClientPoolBuilder::reject_invalid_certs).
    pub fn add_root_certificate(mut self, cert: Certificate) -> BmcClientPoolBuilder {
        self.root_certs.push(cert);
        self
    }

    /// Overwrites the timeout that will be applied to every request
    pub fn timeout(mut self, timeout: Duration) -> BmcClientPoolBuilder {
        self.timeout = timeout;
        self
    }

    /// Builds the shared HTTP connection pool
    pub fn build(self) -> Result<BmcClientPool, BmcError> {
        let mut builder = HttpClientBuilder::new()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .timeout(self.timeout);
        for cert in self.root_certs {
            builder = builder.add_root_certificate(cert);
        }
        let http_client = builder
            .build()
            .map_err(|source| BmcError::ClientBuild { source })?;
        Ok(BmcClientPool { http_client })
    }
}

/// Shared HTTP plumbing for any number of BMC clients. Each client created
/// from the pool owns its own session state; only the connection pool and the
/// TLS policy are shared.
#[derive(Debug, Clone)]
pub struct BmcClientPool {
    http_client: HttpClient,
}

impl BmcClientPool {
    /// Returns a builder for configuring the HTTP connection pool
    pub fn builder() -> BmcClientPoolBuilder {
        BmcClientPoolBuilder {
            timeout: DEFAULT_TIMEOUT,
            // BMCs often have a self-signed cert, so usually this has to be true
            accept_invalid_certs: true,
            root_certs: Vec::new(),
        }
    }

    /// Creates a client for a Supermicro X10/X11 BMC. No network traffic
    /// happens until the first accessor call.
    pub fn create_supermicro(&self, endpoint: Endpoint) -> SupermicroX {
        SupermicroX::new(self.http_client.clone(), endpoint)
    }

    /// Creates a client for an HP c7000 Onboard Administrator.
    pub fn create_c7000(&self, endpoint: Endpoint) -> C7000 {
        C7000::new(self.http_client.clone(), endpoint)
    }
}
