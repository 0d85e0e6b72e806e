//! Several scans at once, one per request, spread over worker threads.
//!
//! Typical use is one scan per agent per simulation tick against a world that
//! does not change during the tick. The provider is shared by reference
//! between workers, so it has to be `Sync`; the scanner itself takes no locks.

use crate::error::{ArcScanError, Result};
use crate::scanner::{ArcScanner, ScanRequest, ScanResult};
use crate::scene::SpatialQuery;
use crossbeam_channel::unbounded;

impl ArcScanner {
    /// Runs every request and returns the results in request order.
    ///
    /// At most `workers` threads are used, never more than there are
    /// requests. Each individual scan still issues its probes strictly in
    /// sample order on a single thread.
    ///
    /// # Errors
    ///
    /// - [`ArcScanError::Configuration`] if `workers` is zero
    /// - [`ArcScanError::Worker`] if a worker panicked (for example inside the provider)
    pub fn scan_batch<P>(
        &self,
        requests: &[ScanRequest],
        provider: &P,
        workers: usize,
    ) -> Result<Vec<ScanResult>>
    where
        P: SpatialQuery + Sync + ?Sized,
    {
        if workers == 0 {
            return Err(ArcScanError::Configuration(
                "scan_batch needs at least one worker".to_string(),
            ));
        }
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let workers = workers.min(requests.len());
        let (job_sender, job_receiver) = unbounded::<usize>();
        let (result_sender, result_receiver) = unbounded::<(usize, ScanResult)>();

        for index in 0..requests.len() {
            job_sender
                .send(index)
                .map_err(|e| ArcScanError::Worker(format!("Failed to queue scan job: {}", e)))?;
        }
        drop(job_sender);

        let panicked = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let job_receiver = job_receiver.clone();
                    let result_sender = result_sender.clone();
                    scope.spawn(move || {
                        for index in job_receiver.iter() {
                            let result = self.scan(&requests[index], provider);
                            if result_sender.send((index, result)).is_err() {
                                break;
                            }
                        }
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join())
                .filter(|joined| joined.is_err())
                .count()
        });
        drop(result_sender);

        if panicked > 0 {
            return Err(ArcScanError::Worker(format!(
                "{} of {} scan workers panicked",
                panicked, workers
            )));
        }

        let mut slots: Vec<Option<ScanResult>> = vec![None; requests.len()];
        for (index, result) in result_receiver.iter() {
            slots[index] = Some(result);
        }

        log::debug!(
            "Batch of {} arc scans finished on {} workers",
            requests.len(),
            workers
        );

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| {
                    ArcScanError::Worker(format!("No result produced for request {}", index))
                })
            })
            .collect()
    }
}
