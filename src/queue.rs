use crate::api::models::MatchDto;
use crate::api::MatchSource;
use crate::config::Pacing;
use crate::error::AppError;
use indicatif::ProgressBar;
use std::collections::VecDeque;
use std::thread;
use tracing::{debug, error, warn};

/// Result of one hydration step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Processed(String),
    Idle,
}

/// Match ids waiting to be hydrated and the records already fetched.
///
/// Every enqueued id lives in exactly one of the two sequences. An id only
/// leaves the head of `pending` once its record has been fetched and checked.
#[derive(Debug, Default)]
pub struct ProcessingQueue {
    pending: VecDeque<String>,
    processed: Vec<MatchDto>,
}

impl ProcessingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends ids to the tail. Callers must not enqueue an id twice.
    pub fn enqueue<I>(&mut self, match_ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.pending.extend(match_ids);
    }

    pub fn pending(&self) -> impl ExactSizeIterator<Item = &String> {
        self.pending.iter()
    }

    pub fn processed(&self) -> &[MatchDto] {
        &self.processed
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.processed.len()
    }

    pub fn is_drained(&self) -> bool {
        self.pending.is_empty()
    }

    /// Makes a single attempt at hydrating the head id.
    ///
    /// On failure the id stays at the head so the next call retries it.
    pub fn process_next<S: MatchSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Result<ProcessOutcome, AppError> {
        let Some(match_id) = self.pending.pop_front() else {
            return Ok(ProcessOutcome::Idle);
        };

        match hydrate(source, &match_id) {
            Ok(record) => {
                self.processed.push(record);
                debug!(match_id = %match_id, remaining = self.pending.len(), "match hydrated");
                Ok(ProcessOutcome::Processed(match_id))
            }
            Err(e) => {
                self.pending.push_front(match_id);
                Err(e)
            }
        }
    }

    /// Hydrates every pending id, one request at a time.
    ///
    /// Each id gets `pacing.max_attempts` tries. When they run out the id is
    /// left at the head of `pending` and `RetriesExhausted` is returned.
    pub fn drain_all<S: MatchSource + ?Sized>(
        &mut self,
        source: &S,
        pacing: &Pacing,
        progress: &ProgressBar,
    ) -> Result<(), AppError> {
        let mut attempts = 0;

        while let Some(head) = self.pending.front().cloned() {
            attempts += 1;
            match self.process_next(source) {
                Ok(ProcessOutcome::Processed(match_id)) => {
                    attempts = 0;
                    progress.inc(1);
                    progress.set_message(match_id);
                    if !self.pending.is_empty() {
                        thread::sleep(pacing.request_delay);
                    }
                }
                Ok(ProcessOutcome::Idle) => break,
                Err(e) if !e.is_retryable() => {
                    error!(match_id = %head, error = %e, "match fetch failed");
                    return Err(e);
                }
                Err(e) if attempts >= pacing.max_attempts => {
                    error!(match_id = %head, attempts, error = %e, "giving up on match");
                    return Err(AppError::RetriesExhausted {
                        match_id: head,
                        attempts,
                        last_error: e.to_string(),
                    });
                }
                Err(e) => {
                    warn!(
                        match_id = %head,
                        attempt = attempts,
                        backoff_ms = pacing.retry_backoff.as_millis() as u64,
                        error = %e,
                        "match fetch failed, retrying"
                    );
                    thread::sleep(pacing.retry_backoff);
                }
            }
        }

        Ok(())
    }
}

fn hydrate<S: MatchSource + ?Sized>(source: &S, match_id: &str) -> Result<MatchDto, AppError> {
    let mut record = source.get_match(match_id)?;
    if !record.has_participants() {
        return Err(AppError::EmptyParticipants(match_id.to_string()));
    }
    if record.metadata.match_id.is_empty() {
        record.metadata.match_id = match_id.to_string();
    }
    Ok(record)
}

/// Walks the listing endpoint page by page until an empty page comes back.
///
/// With `first_page_only` set the walk stops after one page.
pub fn list_all_for_player<S: MatchSource + ?Sized>(
    source: &S,
    puuid: &str,
    page_size: usize,
    first_page_only: bool,
    pacing: &Pacing,
) -> Result<Vec<String>, AppError> {
    let mut all_ids = Vec::new();
    let mut start = 0;

    loop {
        let page = fetch_page(source, puuid, start, page_size, pacing)?;
        debug!(start, found = page.len(), "listed match page");

        if page.is_empty() {
            break;
        }
        all_ids.extend(page);
        start += page_size;

        if first_page_only {
            break;
        }
        thread::sleep(pacing.request_delay);
    }

    Ok(all_ids)
}

fn fetch_page<S: MatchSource + ?Sized>(
    source: &S,
    puuid: &str,
    start: usize,
    count: usize,
    pacing: &Pacing,
) -> Result<Vec<String>, AppError> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        match source.get_match_ids(puuid, start, count) {
            Ok(ids) => return Ok(ids),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) if attempts >= pacing.max_attempts => {
                return Err(AppError::RetriesExhausted {
                    match_id: format!("match list page starting at {}", start),
                    attempts,
                    last_error: e.to_string(),
                });
            }
            Err(e) => {
                warn!(start, attempt = attempts, error = %e, "match listing failed, retrying");
                thread::sleep(pacing.retry_backoff);
            }
        }
    }
}
