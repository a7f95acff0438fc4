// Clock - Injectable timer source for delayed callbacks
//
// The controller never blocks on wall-clock time directly; it asks a Clock
// for a timer future and awaits it on a spawned task. Production code wires
// TokioClock; tests wire TestClock and fast-forward it with advance(), so
// no suite ever waits out a real delay.

use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// Timer future returned by [`Clock::start_timer`].
///
/// Dropping the future cancels the timer. Nothing in the controller does;
/// the contract is that a scheduled completion always fires.
pub type TimerFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A source of one-shot timers.
///
/// The returned future is eager: its deadline is fixed when `start_timer`
/// is called, not when the future is first polled. This is what lets a
/// controller fix its completion deadline synchronously inside the
/// activation turn, before the spawned task ever runs.
pub trait Clock: Send + Sync {
    /// Starts a timer that completes `duration` after this call.
    fn start_timer(&self, duration: Duration) -> TimerFuture;
}

/// Clock backed by the Tokio timer wheel.
///
/// With `tokio::time` paused (`#[tokio::test(start_paused = true)]`) these
/// timers are driven by virtual time, so the full stack can be tested
/// without real waiting even when production wiring is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn start_timer(&self, duration: Duration) -> TimerFuture {
        // tokio::time::sleep captures its deadline at creation time.
        Box::pin(tokio::time::sleep(duration))
    }
}

struct Sleeper {
    deadline: Duration,
    tx: oneshot::Sender<()>,
}

#[derive(Default)]
struct TestClockInner {
    now: Duration,
    sleepers: Vec<Sleeper>,
}

/// Manually driven clock for deterministic tests.
///
/// Timers only fire from [`advance`](TestClock::advance); no real time ever
/// passes. Cloning shares the same underlying clock.
///
/// # Example
///
/// ```ignore
/// let clock = TestClock::new();
/// let timer = clock.start_timer(Duration::from_millis(2000));
/// clock.advance(Duration::from_millis(1999)).await; // timer still pending
/// clock.advance(Duration::from_millis(1)).await;    // timer fires
/// timer.await;
/// ```
#[derive(Clone, Default)]
pub struct TestClock {
    inner: Arc<Mutex<TestClockInner>>,
}

impl TestClock {
    /// Creates a new clock at time zero with no pending timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the clock was created.
    pub fn now(&self) -> Duration {
        self.inner.lock().now
    }

    /// Number of timers that have been started but not yet fired.
    pub fn pending_timers(&self) -> usize {
        self.inner.lock().sleepers.len()
    }

    /// Moves virtual time forward and fires every timer whose deadline has
    /// been reached, in deadline order.
    ///
    /// Yields to the runtime afterwards so tasks blocked on fired timers
    /// get to run before this call returns. On the current-thread test
    /// runtime that makes `advance` a synchronization point: once it
    /// returns, all side effects of fired timers are observable.
    pub async fn advance(&self, duration: Duration) {
        let due: Vec<oneshot::Sender<()>> = {
            let mut inner = self.inner.lock();
            inner.now += duration;
            let now = inner.now;
            let (mut due, remaining): (Vec<_>, Vec<_>) = inner
                .sleepers
                .drain(..)
                .partition(|sleeper| sleeper.deadline <= now);
            inner.sleepers = remaining;
            due.sort_by_key(|sleeper| sleeper.deadline);
            due.into_iter().map(|sleeper| sleeper.tx).collect()
        };

        for tx in due {
            // Receiver may have been dropped (timer cancelled); ignore.
            let _ = tx.send(());
        }

        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }
}

impl Clock for TestClock {
    fn start_timer(&self, duration: Duration) -> TimerFuture {
        if duration.is_zero() {
            return Box::pin(std::future::ready(()));
        }
        let (tx, rx) = oneshot::channel();
        {
            let mut inner = self.inner.lock();
            let deadline = inner.now + duration;
            inner.sleepers.push(Sleeper { deadline, tx });
        }
        Box::pin(async move {
            // Sender dropped means the clock itself went away; treat the
            // timer as fired so the waiting task is not stranded.
            let _ = rx.await;
        })
    }
}

impl std::fmt::Debug for TestClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("TestClock")
            .field("now", &inner.now)
            .field("pending_timers", &inner.sleepers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn timer_fires_only_at_its_deadline() {
        let clock = TestClock::new();
        let fired = Arc::new(AtomicBool::new(false));

        let timer = clock.start_timer(Duration::from_millis(2000));
        let flag = Arc::clone(&fired);
        tokio::spawn(async move {
            timer.await;
            flag.store(true, Ordering::SeqCst);
        });

        clock.advance(Duration::from_millis(1999)).await;
        assert!(!fired.load(Ordering::SeqCst));

        clock.advance(Duration::from_millis(1)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn deadline_is_fixed_when_timer_is_created() {
        let clock = TestClock::new();
        let fired = Arc::new(AtomicBool::new(false));

        // Start the timer, then advance before the spawned task is ever
        // polled. The deadline must still be measured from creation time.
        let timer = clock.start_timer(Duration::from_millis(100));
        let flag = Arc::clone(&fired);
        tokio::spawn(async move {
            timer.await;
            flag.store(true, Ordering::SeqCst);
        });

        clock.advance(Duration::from_millis(100)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn timers_fire_in_deadline_order() {
        let clock = TestClock::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for (label, delay_ms) in [("slow", 300u64), ("fast", 100), ("mid", 200)] {
            let timer = clock.start_timer(Duration::from_millis(delay_ms));
            let order = Arc::clone(&order);
            tokio::spawn(async move {
                timer.await;
                order.lock().push(label);
            });
        }

        clock.advance(Duration::from_millis(300)).await;
        assert_eq!(*order.lock(), vec!["fast", "mid", "slow"]);
    }

    #[tokio::test]
    async fn zero_duration_timer_is_already_complete() {
        let clock = TestClock::new();
        clock.start_timer(Duration::ZERO).await;
        assert_eq!(clock.pending_timers(), 0);
    }

    #[tokio::test]
    async fn now_tracks_advances() {
        let clock = TestClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        clock.advance(Duration::from_millis(1500)).await;
        clock.advance(Duration::from_millis(500)).await;
        assert_eq!(clock.now(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_clock_timer_completes_under_paused_time() {
        let timer = TokioClock.start_timer(Duration::from_millis(2000));
        timer.await;
    }
}
