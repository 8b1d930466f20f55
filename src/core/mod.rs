//! Core processing logic for piiguard.
//!
//! # Modules
//!
//! - [`resolution`] - Overlap merging and confidence filtering
//! - [`pipeline`] - Detect, resolve and anonymize in one call
//! - [`batch`] - Parallel processing of many texts
//! - [`report`] - Statistics, summaries and scan reports
//!
//! # Workflow
//!
//! 1. **Detect**: every configured detector scans the text
//! 2. **Merge**: overlapping findings collapse to the most confident one
//! 3. **Filter**: findings below the confidence threshold are dropped
//! 4. **Anonymize** (optional): spans are rewritten from the end of the text
//! 5. **Report**: statistics and per-type summaries
//!
//! # Example
//!
//! ```rust
//! use piiguard::core::pipeline::Pipeline;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::with_defaults()?;
//! let result = pipeline.process("write to jo@example.org", true, None)?;
//!
//! println!("Matches: {}", result.stats.total_matches);
//! println!("Output: {:?}", result.anonymized);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod pipeline;
pub mod report;
pub mod resolution;
