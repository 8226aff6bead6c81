/// Scan progress reporting.
///
/// The walker reports through the single-method [`ProgressSink`] trait.
/// Frontends running the scan on a worker thread use [`ChannelSink`], which
/// forwards lightweight [`ScanProgress`] messages over a bounded crossbeam
/// channel.
use crossbeam_channel::{Receiver, Sender, TrySendError};

/// Receives progress from the walker.
///
/// Calls are fire-and-forget: implementations must return quickly and the
/// walker ignores anything that goes wrong inside them, including panics.
///
/// - `percent`: 0.0–100.0, non-decreasing; the last call of a completed scan
///   is exactly 100.0. Stays at 0.0 until completion when the scan runs
///   without a counting pre-pass.
/// - `scanned`: files processed so far.
/// - `total_estimate`: files counted by the pre-pass, 0 when unknown.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, percent: f64, scanned: u64, total_estimate: u64);
}

/// Discards every update.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_progress(&self, _percent: f64, _scanned: u64, _total_estimate: u64) {}
}

impl<F> ProgressSink for F
where
    F: Fn(f64, u64, u64) + Send + Sync,
{
    fn on_progress(&self, percent: f64, scanned: u64, total_estimate: u64) {
        self(percent, scanned, total_estimate)
    }
}

/// Progress message sent from the scan thread to the frontend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanProgress {
    pub percent: f64,
    pub scanned: u64,
    pub total_estimate: u64,
}

impl ScanProgress {
    pub fn is_final(&self) -> bool {
        self.percent >= 100.0
    }
}

/// Forwards progress into a bounded channel without ever blocking the walker.
///
/// Intermediate updates use `try_send` and are dropped when the channel is
/// full. The final 100% update evicts the oldest queued update when it has
/// to, so it is always delivered, even to a consumer that has not drained
/// the channel yet. The sink keeps its own receiver handle for that, which
/// also means sends never fail with a disconnected channel.
pub struct ChannelSink {
    tx: Sender<ScanProgress>,
    evict: Receiver<ScanProgress>,
}

impl ChannelSink {
    /// A sink and the receiver a frontend reads progress from.
    pub fn bounded(capacity: usize) -> (Self, Receiver<ScanProgress>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        let sink = Self {
            tx,
            evict: rx.clone(),
        };
        (sink, rx)
    }
}

impl ProgressSink for ChannelSink {
    fn on_progress(&self, percent: f64, scanned: u64, total_estimate: u64) {
        let mut msg = ScanProgress {
            percent,
            scanned,
            total_estimate,
        };
        if !msg.is_final() {
            let _ = self.tx.try_send(msg);
            return;
        }
        loop {
            match self.tx.try_send(msg) {
                Ok(()) | Err(TrySendError::Disconnected(_)) => return,
                Err(TrySendError::Full(back)) => {
                    msg = back;
                    let _ = self.evict.try_recv();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_sinks() {
        let calls = std::sync::Mutex::new(Vec::new());
        let sink = |p: f64, s: u64, t: u64| calls.lock().unwrap().push((p, s, t));
        sink.on_progress(50.0, 5, 10);
        assert_eq!(*calls.lock().unwrap(), vec![(50.0, 5, 10)]);
    }

    #[test]
    fn channel_sink_drops_when_full_but_keeps_final() {
        let (sink, rx) = ChannelSink::bounded(2);
        sink.on_progress(10.0, 1, 10);
        sink.on_progress(20.0, 2, 10);
        sink.on_progress(30.0, 3, 10); // dropped: channel full

        sink.on_progress(100.0, 10, 10);
        let queued: Vec<f64> = rx.try_iter().map(|p| p.percent).collect();
        assert_eq!(queued, [20.0, 100.0]);
    }

    #[test]
    fn final_update_does_not_wait_for_a_reader() {
        let (sink, rx) = ChannelSink::bounded(1);
        for i in 0..50 {
            sink.on_progress(1.0, i, 100);
        }
        sink.on_progress(100.0, 100, 100);
        assert!(rx.try_recv().unwrap().is_final());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_sink_outlives_dropped_receiver() {
        let (sink, rx) = ChannelSink::bounded(4);
        drop(rx);
        for i in 0..10 {
            sink.on_progress(5.0, i, 20);
        }
        sink.on_progress(100.0, 20, 20);
    }
}
