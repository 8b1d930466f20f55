// piiguard - PII Detection and Anonymization Tool
// Copyright (c) 2025 piiguard Contributors
// Licensed under the MIT License

//! # piiguard - PII Detection and Anonymization
//!
//! piiguard finds personally identifiable information in free text and
//! rewrites it so the text can be shared safely.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** emails, phone numbers, SSNs, card numbers, IP addresses,
//!   names, addresses, dates, passports and driver's licenses
//! - **Validating** candidates (Luhn, SSN area rules, octet ranges)
//! - **Resolving** overlapping findings from several detectors
//! - **Anonymizing** with mask, redact, hash, replace or synthetic strategies
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Resolution, pipeline, batch processing and reports
//! - [`detection`] - Pattern library, validators and detectors
//! - [`anonymization`] - Strategies, rewrite engine and residual checks
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use piiguard::anonymization::AnonymizationStrategy;
//! use piiguard::core::pipeline::Pipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::with_defaults()?;
//! let result = pipeline.process(
//!     "Email john@x.com or call 555-123-4567",
//!     true,
//!     Some(AnonymizationStrategy::Replace),
//! )?;
//!
//! assert_eq!(result.anonymized.as_deref(), Some("Email [EMAIL] or call [PHONE]"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Detectors
//!
//! Anything implementing [`detection::PiiDetector`] can be added to a
//! pipeline; its findings are merged with the built-in ones.
//!
//! ```rust
//! use piiguard::anonymization::AnonymizationEngine;
//! use piiguard::core::pipeline::Pipeline;
//! use piiguard::detection::PiiDetector;
//! use piiguard::domain::{PiiMatch, PiiType};
//!
//! struct TicketDetector;
//!
//! impl PiiDetector for TicketDetector {
//!     fn name(&self) -> &str {
//!         "tickets"
//!     }
//!
//!     fn detect(&self, text: &str) -> Vec<PiiMatch> {
//!         text.match_indices("TCK-42")
//!             .map(|(start, value)| {
//!                 PiiMatch::new(PiiType::from_tag("ticket"), value, start, start + value.len(), 0.9, "tickets")
//!             })
//!             .collect()
//!     }
//! }
//!
//! let pipeline = Pipeline::new(AnonymizationEngine::default()).with_detector(TicketDetector);
//! assert_eq!(pipeline.scan("see TCK-42").unwrap().len(), 1);
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], built on [`domain::PiiError`].
//! Validation failures are not errors; rejected candidates are simply not
//! reported.
//!
//! ## Logging
//!
//! piiguard uses structured logging with the `tracing` crate. Call
//! [`logging::init_logging`] once at startup to install a subscriber.

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod detection;
pub mod domain;
pub mod logging;
