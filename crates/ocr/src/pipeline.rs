use std::sync::Arc;

use cardscan_core::{ContactRecord, SideRecord};
use thiserror::Error;

use crate::hash;
use crate::merge::merge;
use crate::parse::parse_side;
use crate::recognizer::{OcrBackend, OcrError};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("OCR task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// The result of one two-face scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// SHA-256 content key over both images, used to flag repeat scans.
    pub scan_hash: String,
    /// Raw OCR text per face.
    pub front_text: String,
    pub back_text: String,
    /// Per-face extraction records.
    pub front: SideRecord,
    pub back: SideRecord,
    /// The merged final record.
    pub contact: ContactRecord,
}

/// Orchestrates one scan: hash → OCR both faces → parse both → merge.
pub struct ScanPipeline {
    recognizer: Arc<dyn OcrBackend>,
}

impl ScanPipeline {
    pub fn new(recognizer: Arc<dyn OcrBackend>) -> Self {
        Self { recognizer }
    }

    /// Run OCR over both face images and produce the merged contact record.
    ///
    /// The two recognize calls are independent and run concurrently on
    /// blocking threads; extraction itself is pure computation and never
    /// fails, so the only error sources here are the OCR engine and task
    /// join.
    pub async fn scan(&self, front: &[u8], back: &[u8]) -> Result<ScanOutcome, ScanError> {
        let scan_hash = hash::scan_key(front, back);

        let front_task = self.recognize_task(front);
        let back_task = self.recognize_task(back);
        let (front_text, back_text) = tokio::join!(front_task, back_task);
        let front_text = front_text??;
        let back_text = back_text??;

        let front_record = parse_side(&front_text);
        let back_record = parse_side(&back_text);
        let contact = merge(&front_record, &back_record);

        Ok(ScanOutcome {
            scan_hash,
            front_text,
            back_text,
            front: front_record,
            back: back_record,
            contact,
        })
    }

    fn recognize_task(
        &self,
        image: &[u8],
    ) -> tokio::task::JoinHandle<Result<String, OcrError>> {
        let recognizer = Arc::clone(&self.recognizer);
        let data = image.to_vec();
        tokio::task::spawn_blocking(move || recognizer.recognize(&data))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::{FailingRecognizer, MockRecognizer};

    const FRONT: &str =
        "ACME CORP\nJohn Smith\nDirector\njohn@acme.com\n+1 415 555 0100\nwww.acme.com";

    #[tokio::test]
    async fn scan_produces_merged_contact() {
        let pipeline = ScanPipeline::new(Arc::new(MockRecognizer::new(FRONT)));
        let outcome = pipeline.scan(b"front image", b"back image").await.unwrap();

        assert_eq!(outcome.scan_hash.len(), 64);
        assert_eq!(outcome.front_text, FRONT);
        assert_eq!(outcome.contact.name, "John Smith");
        assert_eq!(outcome.contact.company, "ACME CORP");
        assert_eq!(outcome.contact.position, "Director");
        assert_eq!(outcome.contact.email, "john@acme.com");
        assert_eq!(outcome.contact.phone, "+1 415 555 0100");
        assert_eq!(outcome.contact.website, "www.acme.com");
        assert_eq!(outcome.contact.address, "");
        assert_eq!(outcome.contact.additional_info, "");
    }

    #[tokio::test]
    async fn scan_is_deterministic_except_timestamp() {
        let pipeline = ScanPipeline::new(Arc::new(MockRecognizer::new(FRONT)));
        let a = pipeline.scan(b"f", b"b").await.unwrap();
        let b = pipeline.scan(b"f", b"b").await.unwrap();

        assert_eq!(a.scan_hash, b.scan_hash);
        assert_eq!(a.front, b.front);
        assert_eq!(a.back, b.back);
        let strip = |mut c: ContactRecord| {
            c.scanned_at = String::new();
            c
        };
        assert_eq!(strip(a.contact), strip(b.contact));
    }

    #[tokio::test]
    async fn empty_ocr_text_is_not_an_error() {
        let pipeline = ScanPipeline::new(Arc::new(MockRecognizer::new("")));
        let outcome = pipeline.scan(b"f", b"b").await.unwrap();
        assert_eq!(outcome.contact.name, "Unknown");
        assert_eq!(outcome.contact.email, "");
    }

    #[tokio::test]
    async fn ocr_failure_propagates() {
        let pipeline = ScanPipeline::new(Arc::new(FailingRecognizer));
        let err = pipeline.scan(b"f", b"b").await.unwrap_err();
        assert!(matches!(err, ScanError::Ocr(_)));
    }

    #[tokio::test]
    async fn same_images_same_scan_hash() {
        let pipeline = ScanPipeline::new(Arc::new(MockRecognizer::new("x")));
        let a = pipeline.scan(b"f", b"b").await.unwrap();
        let b = pipeline.scan(b"f", b"b").await.unwrap();
        let c = pipeline.scan(b"f2", b"b").await.unwrap();
        assert_eq!(a.scan_hash, b.scan_hash);
        assert_ne!(a.scan_hash, c.scan_hash);
    }
}
