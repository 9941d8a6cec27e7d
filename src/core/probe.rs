use crate::common::Dimensions;
use crate::core::encode::{encode_jpeg, kilobytes};
use crate::core::synth::ImageSynthesizer;
use crate::service::{FailureReason, OcrSubmitter};
use std::time::{Duration, Instant};

const PREVIEW_CHARS: usize = 50;

/// Outcome of submitting one test size.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub size: Dimensions,
    pub success: bool,
    pub encoded_bytes: usize,
    /// Round-trip time, `None` when nothing was sent.
    pub elapsed: Option<Duration>,
    pub failure: Option<FailureReason>,
}

impl ProbeResult {
    pub fn passed(size: Dimensions, encoded_bytes: usize, elapsed: Duration) -> Self {
        Self { size, success: true, encoded_bytes, elapsed: Some(elapsed), failure: None }
    }

    pub fn failed(size: Dimensions, encoded_bytes: usize, elapsed: Option<Duration>, reason: FailureReason) -> Self {
        Self { size, success: false, encoded_bytes, elapsed, failure: Some(reason) }
    }
}

pub trait Prober {
    fn probe(&mut self, size: Dimensions) -> ProbeResult;
}

impl<F> Prober for F
where
    F: FnMut(Dimensions) -> ProbeResult,
{
    fn probe(&mut self, size: Dimensions) -> ProbeResult {
        self(size)
    }
}

/// Renders, encodes and submits one image per call. One attempt, no retry.
pub struct ProbeRunner<S> {
    synth: ImageSynthesizer,
    submitter: S,
    jpeg_quality: u8,
}

impl<S: OcrSubmitter> ProbeRunner<S> {
    pub fn new(synth: ImageSynthesizer, submitter: S, jpeg_quality: u8) -> Self {
        Self { synth, submitter, jpeg_quality }
    }

    pub fn run(&self, size: Dimensions) -> ProbeResult {
        println!("\n🧪 Testing size: {}", size);

        let image = self.synth.render(size);
        let jpeg = match encode_jpeg(&image, self.jpeg_quality) {
            Ok(jpeg) => jpeg,
            Err(e) => {
                println!("❌ ENCODING ERROR: {}", e);
                return ProbeResult::failed(size, 0, None, FailureReason::Encoding(e.to_string()));
            }
        };
        drop(image);

        println!("📊 File size: {} bytes ({:.1} KB)", jpeg.len(), kilobytes(jpeg.len()));
        println!("📤 Sending to OCR service...");

        let start = Instant::now();
        let outcome = self.submitter.submit(&jpeg);
        let elapsed = start.elapsed();

        println!("⏱️  Response time: {:.2}s", elapsed.as_secs_f64());

        match outcome {
            Ok(recognition) => {
                println!("📊 Status code: 200");
                println!("✅ SUCCESS!");
                println!("📝 Recognized text: {}...", recognition.text_preview(PREVIEW_CHARS));
                ProbeResult::passed(size, jpeg.len(), elapsed)
            }
            Err(reason) => {
                if let Some(status) = reason.status() {
                    println!("📊 Status code: {}", status);
                }
                match &reason {
                    FailureReason::Timeout | FailureReason::Transport(_) => {
                        println!("❌ NETWORK ERROR: {}", reason)
                    }
                    FailureReason::RateLimited { .. } => {
                        println!("⏳ RATE LIMITED (may be transient): {}", reason)
                    }
                    _ => println!("❌ FAILED: {}", reason),
                }
                ProbeResult::failed(size, jpeg.len(), Some(elapsed), reason)
            }
        }
    }
}

impl<S: OcrSubmitter> Prober for ProbeRunner<S> {
    fn probe(&mut self, size: Dimensions) -> ProbeResult {
        self.run(size)
    }
}
