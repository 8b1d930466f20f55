//! Detection and anonymization pipeline
//!
//! A [`Pipeline`] runs every configured detector over a text, merges the
//! combined findings into a non-overlapping list, drops those below the
//! confidence threshold and optionally anonymizes the text.

use crate::anonymization::{AnonymizationEngine, AnonymizationStrategy};
use crate::config::PiiGuardConfig;
use crate::core::report::{AnonymizationSummary, DetectionStats};
use crate::core::resolution::{
    filter_by_confidence, merge_overlapping, DEFAULT_CONFIDENCE_THRESHOLD,
};
use crate::detection::{ContextDetector, PatternDetector, PiiDetector};
use crate::domain::{PiiError, PiiMatch, PiiType, Result};
use serde::{Deserialize, Serialize};

/// Default input size limit in bytes
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1_000_000;

/// Output of [`Pipeline::process`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Resolved matches in ascending offset order
    pub matches: Vec<PiiMatch>,
    /// Anonymized text, when anonymization was requested
    pub anonymized: Option<String>,
    /// Aggregate numbers over `matches`
    pub stats: DetectionStats,
    /// Per-type summary of what was anonymized
    pub summary: Option<AnonymizationSummary>,
    /// Matches the engine refused to apply
    pub dropped: usize,
}

/// Detection and anonymization pipeline
///
/// Holds no per-call state; share it behind an `Arc` to process texts in
/// parallel.
pub struct Pipeline {
    detectors: Vec<Box<dyn PiiDetector>>,
    confidence_threshold: f32,
    max_text_length: usize,
    engine: AnonymizationEngine,
}

impl Pipeline {
    /// Create a pipeline with no detectors
    pub fn new(engine: AnonymizationEngine) -> Self {
        Self {
            detectors: Vec::new(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            engine,
        }
    }

    /// Create a pipeline with the default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::from_config(&PiiGuardConfig::default())
    }

    /// Build a pipeline from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern fails to compile or the pattern library
    /// cannot be read.
    pub fn from_config(config: &PiiGuardConfig) -> Result<Self> {
        let mut pipeline = Self::new(AnonymizationEngine::from_config(config))
            .with_confidence_threshold(config.detection.confidence_threshold)
            .with_max_text_length(config.performance.max_text_length);

        if config.detection.detector_enabled("pattern") {
            pipeline = pipeline.with_detector(PatternDetector::from_config(config)?);
        }

        if config.detection.detector_enabled("context") {
            let enabled: Vec<PiiType> = PiiType::BUILTIN
                .iter()
                .filter(|pii_type| config.is_type_enabled(pii_type))
                .cloned()
                .collect();
            pipeline = pipeline.with_detector(
                ContextDetector::new()?
                    .with_enabled_types(enabled)
                    .with_context_window(config.detection.context_window),
            );
        }

        tracing::debug!(
            detectors = pipeline.detectors.len(),
            threshold = pipeline.confidence_threshold,
            "Pipeline ready"
        );
        Ok(pipeline)
    }

    /// Add a detector; detectors run in the order added
    pub fn with_detector<D: PiiDetector + 'static>(mut self, detector: D) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    /// Set the confidence threshold
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the input size limit in bytes
    pub fn with_max_text_length(mut self, max: usize) -> Self {
        self.max_text_length = max;
        self
    }

    /// Anonymization engine
    pub fn engine(&self) -> &AnonymizationEngine {
        &self.engine
    }

    /// Names of the configured detectors, in run order
    pub fn detector_names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Types any configured detector can produce, first occurrence order
    pub fn supported_types(&self) -> Vec<PiiType> {
        let mut types: Vec<PiiType> = Vec::new();
        for pii_type in self.detectors.iter().flat_map(|d| d.supported_types()) {
            if !types.contains(&pii_type) {
                types.push(pii_type);
            }
        }
        types
    }

    /// Detect, merge and filter
    ///
    /// # Errors
    ///
    /// Returns [`PiiError::InputTooLarge`] if `text` exceeds the size limit.
    pub fn scan(&self, text: &str) -> Result<Vec<PiiMatch>> {
        self.check_length(text)?;

        let raw: Vec<PiiMatch> = self
            .detectors
            .iter()
            .flat_map(|detector| detector.detect(text))
            .collect();
        let raw_count = raw.len();

        let resolved = filter_by_confidence(merge_overlapping(raw), self.confidence_threshold);

        tracing::debug!(
            raw = raw_count,
            resolved = resolved.len(),
            "Scan complete"
        );
        Ok(resolved)
    }

    /// Scan and optionally anonymize
    ///
    /// `strategy_override` replaces the configured strategy for this call.
    pub fn process(
        &self,
        text: &str,
        anonymize: bool,
        strategy_override: Option<AnonymizationStrategy>,
    ) -> Result<ProcessingResult> {
        let matches = self.scan(text)?;
        let stats = DetectionStats::from_matches(&matches);

        if !anonymize {
            return Ok(ProcessingResult {
                matches,
                anonymized: None,
                stats,
                summary: None,
                dropped: 0,
            });
        }

        let strategy = strategy_override.unwrap_or(self.engine.policy().strategy);
        let outcome = self.engine.anonymize_with(text, &matches, strategy);

        Ok(ProcessingResult {
            summary: Some(AnonymizationSummary::from_matches(&matches)),
            matches,
            anonymized: Some(outcome.text),
            stats,
            dropped: outcome.dropped,
        })
    }

    /// Anonymize with the configured strategy, returning only the text
    pub fn anonymize_text(&self, text: &str) -> Result<String> {
        let matches = self.scan(text)?;
        Ok(self.engine.anonymize(text, &matches).text)
    }

    fn check_length(&self, text: &str) -> Result<()> {
        if text.len() > self.max_text_length {
            return Err(PiiError::InputTooLarge {
                len: text.len(),
                max: self.max_text_length,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("detectors", &self.detector_names())
            .field("confidence_threshold", &self.confidence_threshold)
            .field("max_text_length", &self.max_text_length)
            .field("engine", &self.engine)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_detectors() {
        let pipeline = Pipeline::with_defaults().unwrap();
        assert_eq!(pipeline.detector_names(), vec!["pattern", "context"]);

        let types = pipeline.supported_types();
        assert!(types.contains(&PiiType::Email));
        assert!(!types.contains(&PiiType::Passport));
    }

    #[test]
    fn test_scan_merges_across_detectors() {
        let pipeline = Pipeline::with_defaults().unwrap();
        let matches = pipeline.scan("Email: jane@corp.io").unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].detector_name(), "pattern");
        assert_eq!(matches[0].confidence(), 0.9);
    }

    #[test]
    fn test_ssn_beats_driver_license() {
        let mut config = PiiGuardConfig::default();
        config.pii_types.insert(
            "driver_license".to_string(),
            crate::config::PiiTypeConfig {
                enabled: true,
                confidence: None,
            },
        );
        let pipeline = Pipeline::from_config(&config).unwrap();

        let matches = pipeline.scan("id 123456789 on file").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].pii_type(), &PiiType::Ssn);
    }

    #[test]
    fn test_threshold_applied() {
        let pipeline = Pipeline::with_defaults()
            .unwrap()
            .with_confidence_threshold(0.7);
        let matches = pipeline.scan("Jane Roe wrote").unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_input_too_large() {
        let pipeline = Pipeline::with_defaults().unwrap().with_max_text_length(8);
        let err = pipeline.scan("123456789").unwrap_err();
        assert!(matches!(err, PiiError::InputTooLarge { len: 9, max: 8 }));
    }

    #[test]
    fn test_process_without_anonymization() {
        let pipeline = Pipeline::with_defaults().unwrap();
        let result = pipeline.process("call 555-123-4567", false, None).unwrap();
        assert!(result.anonymized.is_none());
        assert!(result.summary.is_none());
        assert_eq!(result.stats.total_matches, 1);
    }

    #[test]
    fn test_process_with_override() {
        let pipeline = Pipeline::with_defaults().unwrap();
        let result = pipeline
            .process(
                "Email john@x.com or call 555-123-4567",
                true,
                Some(AnonymizationStrategy::Replace),
            )
            .unwrap();
        assert_eq!(
            result.anonymized.as_deref(),
            Some("Email [EMAIL] or call [PHONE]")
        );
        assert_eq!(result.dropped, 0);
        assert_eq!(result.summary.unwrap().total, 2);
    }

    #[test]
    fn test_anonymize_text_uses_configured_strategy() {
        let mut config = PiiGuardConfig::default();
        config.anonymization.default_strategy = "redact".to_string();
        let pipeline = Pipeline::from_config(&config).unwrap();
        assert_eq!(
            pipeline.anonymize_text("ip 10.0.0.1 seen").unwrap(),
            "ip [REDACTED] seen"
        );
    }

    #[test]
    fn test_empty_pipeline_finds_nothing() {
        let pipeline = Pipeline::new(AnonymizationEngine::default());
        assert!(pipeline.scan("john@x.com").unwrap().is_empty());
        assert!(pipeline.supported_types().is_empty());
    }
}
