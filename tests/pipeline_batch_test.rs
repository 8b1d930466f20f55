//! Integration tests for the pipeline and parallel batch processing

use piiguard::anonymization::{AnonymizationEngine, AnonymizationStrategy};
use piiguard::core::batch::{process_batch, BatchOptions, BatchSummary};
use piiguard::core::pipeline::Pipeline;
use piiguard::core::report::ScanReport;
use piiguard::detection::{PatternDetector, PiiDetector};
use piiguard::domain::{PiiError, PiiMatch, PiiType};
use std::sync::Arc;
use tokio::sync::watch;

/// Flags every occurrence of a fixed word as a name
struct WordDetector {
    word: &'static str,
    confidence: f32,
}

impl PiiDetector for WordDetector {
    fn name(&self) -> &str {
        "word"
    }

    fn detect(&self, text: &str) -> Vec<PiiMatch> {
        text.match_indices(self.word)
            .map(|(start, value)| {
                PiiMatch::new(
                    PiiType::Name,
                    value,
                    start,
                    start + value.len(),
                    self.confidence,
                    "word",
                )
            })
            .collect()
    }

    fn supported_types(&self) -> Vec<PiiType> {
        vec![PiiType::Name]
    }
}

#[test]
fn test_custom_detector_loses_to_stronger_pattern() {
    let pipeline = Pipeline::new(AnonymizationEngine::default())
        .with_detector(PatternDetector::new().unwrap())
        .with_detector(WordDetector {
            word: "john",
            confidence: 0.5,
        });

    let matches = pipeline.scan("mail john@x.com").unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].pii_type(), &PiiType::Email);
    assert_eq!(matches[0].value(), "john@x.com");
}

#[test]
fn test_custom_detector_wins_when_stronger() {
    let pipeline = Pipeline::new(AnonymizationEngine::default())
        .with_detector(PatternDetector::new().unwrap())
        .with_detector(WordDetector {
            word: "john",
            confidence: 0.99,
        });

    let result = pipeline
        .process("mail john@x.com", true, Some(AnonymizationStrategy::Replace))
        .unwrap();
    // The winner keeps its own span; the rest of the email stays
    assert_eq!(result.anonymized.as_deref(), Some("mail [NAME]@x.com"));
    assert_eq!(result.matches[0].detector_name(), "word");
}

#[test]
fn test_supported_types_deduplicated() {
    let pipeline = Pipeline::new(AnonymizationEngine::default())
        .with_detector(WordDetector {
            word: "a",
            confidence: 0.5,
        })
        .with_detector(WordDetector {
            word: "b",
            confidence: 0.5,
        });
    assert_eq!(pipeline.supported_types(), vec![PiiType::Name]);
}

#[test]
fn test_processing_result_serializes() {
    let pipeline = Pipeline::with_defaults().unwrap();
    let result = pipeline.process("ssn 123-45-6789", true, None).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["matches"][0]["pii_type"], "ssn");
    assert_eq!(json["matches"][0]["start"], 4);
    assert_eq!(json["anonymized"], "ssn ***-**-****");
    assert_eq!(json["stats"]["by_type"]["ssn"], 1);
    assert_eq!(json["summary"]["by_type"]["ssn"]["examples"][0], "123-45-6789");
}

#[test]
fn test_scan_report_from_pipeline() {
    let pipeline = Pipeline::with_defaults().unwrap();
    let text = "ip 10.0.0.1 and 10.0.0.2";
    let report = ScanReport::new("stdin", text, pipeline.scan(text).unwrap());

    assert_eq!(report.stats.total_matches, 2);
    assert_eq!(report.stats.by_type.get("ip_address"), Some(&2));
    assert_eq!(report.format_csv().lines().count(), 3);
}

#[tokio::test]
async fn test_batch_matches_sequential_processing() {
    let pipeline = Arc::new(Pipeline::with_defaults().unwrap());
    let texts: Vec<String> = vec![
        "Email john@x.com or call 555-123-4567".to_string(),
        "ssn 123-45-6789".to_string(),
        String::new(),
        "card 4111 1111 1111 1111".to_string(),
        "nothing to see".to_string(),
    ];

    let options = BatchOptions {
        max_parallel: 2,
        ..BatchOptions::default()
    }
    .with_strategy(AnonymizationStrategy::Redact);
    let results = process_batch(Arc::clone(&pipeline), texts.clone(), options, None).await;

    assert_eq!(results.len(), texts.len());
    for (text, result) in texts.iter().zip(&results) {
        let sequential = pipeline
            .process(text, true, Some(AnonymizationStrategy::Redact))
            .unwrap();
        let parallel = result.as_ref().unwrap();
        assert_eq!(parallel.anonymized, sequential.anonymized);
        assert_eq!(parallel.matches, sequential.matches);
    }
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let pipeline = Arc::new(Pipeline::with_defaults().unwrap().with_max_text_length(32));
    let texts = vec![
        "a@b.io".to_string(),
        "x".repeat(64),
        "call 555-123-4567".to_string(),
    ];

    let results = process_batch(pipeline, texts, BatchOptions::default(), None).await;
    let summary = BatchSummary::from_results(&results);

    assert_eq!(summary.successful, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total_matches, 2);
    assert!(matches!(results[1], Err(PiiError::InputTooLarge { len: 64, max: 32 })));
}

#[tokio::test]
async fn test_batch_single_worker() {
    let pipeline = Arc::new(Pipeline::with_defaults().unwrap());
    let texts: Vec<String> = (0..10).map(|i| format!("host 10.0.0.{i}")).collect();

    let options = BatchOptions {
        max_parallel: 0,
        ..BatchOptions::scan_only()
    };
    let results = process_batch(pipeline, texts, options, None).await;

    for (i, result) in results.iter().enumerate() {
        let processed = result.as_ref().unwrap();
        assert_eq!(processed.matches[0].value(), format!("10.0.0.{i}"));
        assert!(processed.anonymized.is_none());
    }
}

#[tokio::test]
async fn test_batch_after_shutdown() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let pipeline = Arc::new(Pipeline::with_defaults().unwrap());

    let before = process_batch(
        Arc::clone(&pipeline),
        vec!["a@b.io".to_string()],
        BatchOptions::default(),
        Some(shutdown_rx.clone()),
    )
    .await;
    assert!(before[0].is_ok());

    shutdown_tx.send(true).unwrap();
    let after = process_batch(
        pipeline,
        vec!["a@b.io".to_string()],
        BatchOptions::default(),
        Some(shutdown_rx),
    )
    .await;
    assert!(matches!(after[0], Err(PiiError::Cancelled)));
}
