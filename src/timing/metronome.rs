use super::{Clock, SessionControls, beat_period};
use crossbeam::channel::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, trace};

/// Receives the audible side effect of a tick. Must not block: the
/// metronome thread calls it on the beat grid.
pub trait TickSink {
    fn tick(&mut self, index: u64);
}

impl TickSink for () {
    fn tick(&mut self, _index: u64) {}
}

impl<A: TickSink, B: TickSink> TickSink for (A, B) {
    fn tick(&mut self, index: u64) {
        self.0.tick(index);
        self.1.tick(index);
    }
}

impl<S: TickSink> TickSink for Option<S> {
    fn tick(&mut self, index: u64) {
        if let Some(sink) = self {
            sink.tick(index);
        }
    }
}

/// Forwards tick indices to another thread, e.g. for a visual beat marker.
pub struct BeatNotifier {
    tx: Sender<u64>,
}

impl BeatNotifier {
    pub fn new(tx: Sender<u64>) -> Self {
        Self { tx }
    }
}

impl TickSink for BeatNotifier {
    fn tick(&mut self, index: u64) {
        // Nobody listening is fine.
        let _ = self.tx.try_send(index);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub index: u64,
    /// Grid position this tick was scheduled for.
    pub scheduled: Duration,
    /// False when the tick was muted.
    pub audible: bool,
}

/// Free-running click on an absolute time grid. Each target is the previous
/// target plus one period at the current tempo, so a late wake-up does not
/// shift the ticks after it.
pub struct Metronome<C, S> {
    controls: Arc<SessionControls>,
    clock: C,
    sink: S,
    next_target: Duration,
    ticks: u64,
}

impl<C: Clock, S: TickSink> Metronome<C, S> {
    pub fn new(controls: Arc<SessionControls>, clock: C, sink: S) -> Self {
        let next_target = clock.now();
        Self {
            controls,
            clock,
            sink,
            next_target,
            ticks: 0,
        }
    }

    /// Waits for the next grid position and ticks.
    pub fn step(&mut self) -> Tick {
        let period = beat_period(self.controls.tempo());
        let target = self.next_target + period;

        match target.checked_sub(self.clock.now()) {
            Some(wait) if !wait.is_zero() => self.clock.sleep(wait),
            _ => trace!(tick = self.ticks, "metronome overran, ticking immediately"),
        }

        let audible = !self.controls.is_muted();
        if audible {
            self.sink.tick(self.ticks);
        }

        let tick = Tick {
            index: self.ticks,
            scheduled: target,
            audible,
        };
        self.next_target = target;
        self.ticks += 1;
        tick
    }

    pub fn run(mut self) {
        loop {
            self.step();
        }
    }
}

impl<C, S> Metronome<C, S>
where
    C: Clock + Send + 'static,
    S: TickSink + Send + 'static,
{
    /// Starts the metronome on a detached thread. It runs until the process
    /// exits.
    pub fn spawn(self) -> std::io::Result<JoinHandle<()>> {
        debug!("starting metronome thread");
        std::thread::Builder::new()
            .name("metronome".into())
            .spawn(move || self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Oversleeps by a varying amount on every call.
    struct JitterClock {
        now: Duration,
        jitter: Vec<Duration>,
        sleeps: usize,
    }

    impl JitterClock {
        fn new(start: Duration, jitter_ms: &[u64]) -> Self {
            Self {
                now: start,
                jitter: jitter_ms.iter().map(|&ms| Duration::from_millis(ms)).collect(),
                sleeps: 0,
            }
        }
    }

    impl Clock for JitterClock {
        fn now(&self) -> Duration {
            self.now
        }

        fn sleep(&mut self, duration: Duration) {
            let extra = if self.jitter.is_empty() {
                Duration::ZERO
            } else {
                self.jitter[self.sleeps % self.jitter.len()]
            };
            self.now += duration + extra;
            self.sleeps += 1;
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<u64>);

    impl TickSink for Recorder {
        fn tick(&mut self, index: u64) {
            self.0.push(index);
        }
    }

    #[test]
    fn ticks_stay_on_the_grid_despite_jitter() {
        let controls = Arc::new(SessionControls::new(120, false));
        let start = Duration::from_secs(5);
        let clock = JitterClock::new(start, &[3, 17, 0, 41, 9]);
        let mut metronome = Metronome::new(controls, clock, Recorder::default());

        let period = beat_period(120);
        for k in 1..=200u32 {
            let tick = metronome.step();
            assert_eq!(tick.scheduled, start + period * k);
            // wake-up lateness never accumulates beyond one jitter step
            assert!(metronome.clock.now() - tick.scheduled <= Duration::from_millis(41));
        }
        assert_eq!(metronome.sink.0.len(), 200);
    }

    #[test]
    fn overrun_ticks_immediately() {
        let controls = Arc::new(SessionControls::new(60, false));
        // every sleep overshoots by more than a whole period
        let clock = JitterClock::new(Duration::ZERO, &[1500]);
        let mut metronome = Metronome::new(controls, clock, Recorder::default());

        let first = metronome.step();
        assert_eq!(first.scheduled, Duration::from_secs(1));
        assert_eq!(metronome.clock.now(), Duration::from_millis(2500));

        let sleeps_before = metronome.clock.sleeps;
        let second = metronome.step();
        assert_eq!(second.scheduled, Duration::from_secs(2));
        assert_eq!(metronome.clock.sleeps, sleeps_before);
        assert_eq!(metronome.sink.0, vec![0, 1]);
    }

    #[test]
    fn tempo_change_applies_from_the_next_tick() {
        let controls = Arc::new(SessionControls::new(88, false));
        let clock = JitterClock::new(Duration::ZERO, &[]);
        let mut metronome = Metronome::new(controls.clone(), clock, ());

        let first = metronome.step();
        assert_eq!(first.scheduled, beat_period(88));

        controls.adjust_tempo(5);
        let second = metronome.step();
        assert_eq!(second.scheduled - first.scheduled, beat_period(93));
        assert_eq!(beat_period(93), Duration::from_secs_f64(60.0 / 93.0));
    }

    #[test]
    fn muted_ticks_still_advance_the_grid() {
        let controls = Arc::new(SessionControls::new(60, true));
        let clock = JitterClock::new(Duration::ZERO, &[]);
        let mut metronome = Metronome::new(controls.clone(), clock, Recorder::default());

        let muted = metronome.step();
        assert!(!muted.audible);

        controls.toggle_mute();
        let audible = metronome.step();
        assert!(audible.audible);
        assert_eq!(audible.scheduled, Duration::from_secs(2));
        assert_eq!(metronome.sink.0, vec![1]);
    }

    #[test]
    fn beat_notifier_forwards_indices() {
        let (tx, rx) = crossbeam::channel::unbounded();
        let mut sink = (BeatNotifier::new(tx), Some(Recorder::default()));
        sink.tick(0);
        sink.tick(1);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(sink.1.map(|r| r.0), Some(vec![0, 1]));
    }
}
