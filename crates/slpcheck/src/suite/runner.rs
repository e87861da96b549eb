// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sequential test execution.
//!
//! The runner owns the sockets for the duration of one run and drives
//! every registered case through `Init -> Sent -> Waiting -> outcome`.
//! The single suspension point is the time-bounded poll racing "first
//! correlated reply" against the deadline; no two requests are ever in
//! flight at once. That is deliberate: it keeps xid correlation trivial
//! and avoids the target observing concurrent discovery traffic that
//! could change its behavior (responder back-off, PR-list accounting)
//! mid-suite.

use crate::config::{TesterConfig, MAX_DATAGRAM_SIZE};
use crate::protocol::parser::{parse_service_reply, peek_header};
use crate::protocol::xid::next_xid;
use crate::suite::case::{BuildContext, Destination, Expectation, Outcome, TestCase, VerifyContext};
use crate::suite::registry::TestRegistry;
use crate::suite::report::{Report, TestResult};
use crate::transport::udp::{MULTICAST, UNICAST};
use crate::transport::{Transport, TransportError};
use mio::Events;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// What ended one exchange's wait.
enum WaitResult {
    /// Correlated reply: function id, payload, source address.
    Reply(u8, Vec<u8>, SocketAddr),
    /// Deadline expired with no xid match.
    Deadline,
}

/// Drives a registered suite against one configured target.
pub struct TestRunner {
    config: TesterConfig,
    transport: Transport,
    abort: Arc<AtomicBool>,
    events: Events,
}

impl TestRunner {
    /// Open the transport (fatal on failure) and prepare a runner.
    pub fn new(config: TesterConfig) -> Result<Self, TransportError> {
        let transport = Transport::open(&config)?;
        Ok(TestRunner {
            config,
            transport,
            abort: Arc::new(AtomicBool::new(false)),
            events: Events::with_capacity(8),
        })
    }

    /// Flag checked between tests; setting it ends the run early.
    ///
    /// A test already waiting on its deadline finishes that wait, so the
    /// worst-case abort latency is one timeout period.
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    /// Execute every registered case in order.
    ///
    /// Only transport failures abort the run; each of those already
    /// executed still has its result in the report the caller would have
    /// gotten. Every other failure lands in that test's result.
    pub fn run(&mut self, registry: &TestRegistry) -> Result<Report, TransportError> {
        let mut report = Report::new();
        log::info!(
            "[runner] starting {} tests against {}:{} (timeout {:?})",
            registry.len(),
            self.config.target,
            self.config.port,
            self.config.timeout
        );

        for case in registry.iter() {
            if self.abort.load(Ordering::SeqCst) {
                log::info!(
                    "[runner] abort requested, stopping after {} of {} tests",
                    report.len(),
                    registry.len()
                );
                break;
            }

            let outcome = self.run_case(case)?;
            match &outcome {
                Outcome::Passed => log::info!("[runner] {}: passed", case.name()),
                Outcome::Failed(reason) => {
                    log::info!("[runner] {}: failed ({})", case.name(), reason);
                }
                Outcome::Error(reason) => {
                    log::info!("[runner] {}: error ({})", case.name(), reason);
                }
            }
            report.push(TestResult {
                name: case.name(),
                outcome,
            });
        }

        Ok(report)
    }

    /// One exchange: build, send, wait, resolve.
    fn run_case(&mut self, case: &dyn TestCase) -> Result<Outcome, TransportError> {
        let xid = next_xid();
        let expectation = case.expectation();
        log::debug!(
            "[runner] {} xid={} dest={:?} expecting {}",
            case.name(),
            xid,
            case.destination(),
            expectation
        );

        let payload = case.build(&BuildContext {
            xid,
            target: self.config.target,
        });

        match case.destination() {
            Destination::Unicast => self.transport.send_unicast(&payload)?,
            Destination::Multicast => self.transport.send_multicast(&payload)?,
        }

        let deadline = Instant::now() + self.config.timeout;
        match self.wait_for_reply(case, xid, deadline)? {
            WaitResult::Deadline => Ok(Self::resolve_deadline(expectation)),
            WaitResult::Reply(function_id, data, source) => {
                Ok(self.resolve_reply(case, expectation, function_id, &data, source))
            }
        }
    }

    /// Wait for the first datagram whose xid matches, or the deadline.
    ///
    /// Non-matching datagrams are discarded without resetting the
    /// deadline (stray traffic defense). Both sockets are drained after
    /// every wakeup; only the socket that sent this request can resolve
    /// the exchange.
    fn wait_for_reply(
        &mut self,
        case: &dyn TestCase,
        xid: u16,
        deadline: Instant,
    ) -> Result<WaitResult, TransportError> {
        let active = match case.destination() {
            Destination::Unicast => UNICAST,
            Destination::Multicast => MULTICAST,
        };
        let mut buf = [0u8; MAX_DATAGRAM_SIZE];

        loop {
            let now = Instant::now();
            if now >= deadline {
                log::debug!("[runner] {} deadline expired", case.name());
                return Ok(WaitResult::Deadline);
            }
            self.transport.poll(&mut self.events, deadline - now)?;

            for token in [UNICAST, MULTICAST] {
                while let Some((len, source)) = self.transport.try_recv(token, &mut buf)? {
                    if token != active {
                        log::debug!(
                            "[runner] discarding {} bytes on inactive socket from {}",
                            len,
                            source
                        );
                        continue;
                    }
                    match peek_header(&buf[..len]) {
                        None => {
                            log::debug!(
                                "[runner] discarding {} byte runt datagram from {}",
                                len,
                                source
                            );
                        }
                        Some((function_id, rx_xid)) if rx_xid != xid => {
                            log::debug!(
                                "[runner] discarding stray xid {} (function {}) from {}",
                                rx_xid,
                                function_id,
                                source
                            );
                        }
                        Some((function_id, _)) => {
                            return Ok(WaitResult::Reply(
                                function_id,
                                buf[..len].to_vec(),
                                source,
                            ));
                        }
                    }
                }
            }
        }
    }

    fn resolve_deadline(expectation: Expectation) -> Outcome {
        match expectation {
            Expectation::Timeout => Outcome::Passed,
            Expectation::Response(_) | Expectation::Error(..) => {
                Outcome::failed("no reply before deadline")
            }
        }
    }

    fn resolve_reply(
        &self,
        case: &dyn TestCase,
        expectation: Expectation,
        function_id: u8,
        data: &[u8],
        source: SocketAddr,
    ) -> Outcome {
        match expectation {
            Expectation::Timeout => Outcome::Failed(format!(
                "expected silence but received function {} from {}",
                function_id, source
            )),
            Expectation::Response(expected_function) => {
                if function_id != expected_function {
                    return Outcome::Failed(format!(
                        "expected function {}, received {}",
                        expected_function, function_id
                    ));
                }
                case.verify(
                    data,
                    &VerifyContext {
                        target: self.config.target,
                        source,
                    },
                )
            }
            Expectation::Error(expected_function, expected_code) => {
                if function_id != expected_function {
                    return Outcome::Failed(format!(
                        "expected function {}, received {}",
                        expected_function, function_id
                    ));
                }
                match parse_service_reply(data) {
                    Err(e) => Outcome::Failed(format!("reply failed to parse: {}", e)),
                    Ok(reply) if reply.error_code == expected_code => Outcome::Passed,
                    Ok(reply) => Outcome::Failed(format!(
                        "expected error code {}, received {}",
                        expected_code, reply.error_code
                    )),
                }
            }
        }
    }
}
