//! # Documentation Workflows
//!
//! Ties the pipeline together: scan a buffer, ask the generator for text per
//! element, plan bottom-up edits, apply them in one transaction. Two entry
//! points: the element at a cursor line, or every undocumented element in a
//! buffer.
//!
//! ## Guiding Principles
//!
//! 1.  **Sequential generation**: batch requests go out one at a time, never
//!     concurrently, pacing controlled by an explicit [`RatePolicy`]. This
//!     respects service rate limits and keeps response ordering
//!     deterministic for the edit plan.
//! 2.  **Per-element failure isolation**: one failed generation does not
//!     abort the batch; it is counted and the run continues.
//! 3.  **Cooperative cancellation between elements**: a cancelled run stops
//!     issuing requests but still applies everything generated so far.
//! 4.  **Single flight**: one workflow per documenter at a time, enforced
//!     with a `try_lock` guard rather than queueing.

use crate::buffer::DocumentBuffer;
use crate::config::Config;
use crate::edit_planner;
use crate::element::CodeElement;
use crate::generator::DocGenerator;
use crate::language::LanguageProfile;
use crate::scanner;
use crate::span_extractor::ScanOptions;
use anyhow::{Result, anyhow};
use console::style;
use rand::Rng;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Pacing and retry contract for sequential generation.
#[derive(Debug, Clone, Copy)]
pub struct RatePolicy {
    /// Pause between consecutive batch requests.
    pub request_delay: Duration,
    /// Retries per element after a failed request.
    pub max_retries: u32,
    /// Base backoff before a retry; doubles per attempt, plus jitter.
    pub retry_backoff: Duration,
}

impl RatePolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            request_delay: Duration::from_millis(config.request_delay_ms),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let base = self
            .retry_backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));
        let jitter = rand::thread_rng().gen_range(0..250u64);
        base + Duration::from_millis(jitter)
    }
}

/// What a whole-buffer run did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Elements that received new documentation.
    pub documented: usize,
    /// Elements whose generation failed after retries.
    pub failed: usize,
    /// Elements left alone because they were already documented.
    pub skipped: usize,
    /// True when the run stopped early on cancellation.
    pub cancelled: bool,
}

pub struct Documenter {
    generator: Box<dyn DocGenerator>,
    profile: &'static LanguageProfile,
    rate: RatePolicy,
    scan_options: ScanOptions,
    replace_existing: bool,
    busy: tokio::sync::Mutex<()>,
}

impl Documenter {
    pub fn new(
        generator: Box<dyn DocGenerator>,
        profile: &'static LanguageProfile,
        rate: RatePolicy,
        scan_options: ScanOptions,
        replace_existing: bool,
    ) -> Self {
        Self {
            generator,
            profile,
            rate,
            scan_options,
            replace_existing,
            busy: tokio::sync::Mutex::new(()),
        }
    }

    pub fn profile(&self) -> &'static LanguageProfile {
        self.profile
    }

    pub fn scan_options(&self) -> ScanOptions {
        self.scan_options
    }

    pub fn replaces_existing(&self) -> bool {
        self.replace_existing
    }

    /// Documents the element at or above `cursor_line`. Returns the element
    /// that was documented, or `None` when the upward search found nothing;
    /// an empty result, not an error.
    pub async fn document_at_cursor(
        &self,
        buffer: &mut DocumentBuffer,
        cursor_line: usize,
    ) -> Result<Option<CodeElement>> {
        let _guard = self.acquire()?;
        let Some(element) =
            scanner::scan_at(buffer.lines(), cursor_line, self.profile, self.scan_options)
        else {
            return Ok(None);
        };

        let snippet = element.snippet(buffer.lines());
        let text = self.generate_with_retry(&element, &snippet).await?;
        let items = vec![(element.clone(), text)];
        let plan = edit_planner::plan(&items, self.replace_existing);
        buffer.apply_edits(&plan)?;
        Ok(Some(element))
    }

    /// Documents every undocumented element in the buffer (every element,
    /// with replace mode). Generation failures are counted per element and
    /// the run continues; cancellation is honored between elements and
    /// everything generated before it is still applied.
    pub async fn document_buffer(
        &self,
        buffer: &mut DocumentBuffer,
        cancel: &CancellationToken,
    ) -> Result<BatchReport> {
        let _guard = self.acquire()?;
        let mut report = BatchReport::default();

        let mut targets = Vec::new();
        for element in scanner::scan_all(buffer.lines(), self.profile, self.scan_options) {
            if element.has_documentation && !self.replace_existing {
                report.skipped += 1;
            } else {
                targets.push(element);
            }
        }

        let total = targets.len();
        let mut generated: Vec<(CodeElement, String)> = Vec::new();
        for (index, element) in targets.into_iter().enumerate() {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            if index > 0 && !self.rate.request_delay.is_zero() {
                tokio::time::sleep(self.rate.request_delay).await;
            }

            println!(
                "  [{}/{}] documenting {} ({})",
                index + 1,
                total,
                style(&element.name).bold(),
                element.kind
            );

            let snippet = element.snippet(buffer.lines());
            match self.generate_with_retry(&element, &snippet).await {
                Ok(text) => generated.push((element, text)),
                Err(error) => {
                    report.failed += 1;
                    eprintln!(
                        "{} could not document {}: {error:#}",
                        style("Error:").red(),
                        element.name
                    );
                }
            }
        }

        if !generated.is_empty() {
            let plan = edit_planner::plan(&generated, self.replace_existing);
            buffer.apply_edits(&plan)?;
            report.documented = generated.len();
        }
        Ok(report)
    }

    async fn generate_with_retry(&self, element: &CodeElement, snippet: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self
                .generator
                .generate(self.profile, element.kind, snippet)
                .await
            {
                Ok(text) => return Ok(text),
                Err(error) => {
                    if attempt >= self.rate.max_retries {
                        return Err(error);
                    }
                    attempt += 1;
                    eprintln!(
                        "{} generation for {} failed, retrying ({}/{}): {error:#}",
                        style("Warning:").yellow(),
                        element.name,
                        attempt,
                        self.rate.max_retries
                    );
                    tokio::time::sleep(self.rate.backoff(attempt)).await;
                }
            }
        }
    }

    fn acquire(&self) -> Result<tokio::sync::MutexGuard<'_, ()>> {
        self.busy
            .try_lock()
            .map_err(|_| anyhow!("another documentation run is already in progress"))
    }
}
