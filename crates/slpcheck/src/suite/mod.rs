// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Conformance Engine
//!
//! Test cases declare a destination class, an expected outcome, a build
//! step, and an optional verify step. The registry holds them in
//! registration order; the runner executes them strictly sequentially
//! against one configured target and produces exactly one result per
//! registered case.
//!
//! # Per-test state machine
//!
//! ```text
//! Init -> Sent -> Waiting -> { Passed, Failed, Error }
//! ```
//!
//! Only transport failures escape a test's boundary; every protocol or
//! expectation failure is captured in that test's result.

pub mod case;
pub mod cases;
pub mod registry;
pub mod report;
pub mod runner;

pub use case::{BuildContext, Destination, Expectation, Outcome, TestCase, VerifyContext};
pub use cases::register_default_suite;
pub use registry::TestRegistry;
pub use report::{Report, TestResult};
pub use runner::TestRunner;
