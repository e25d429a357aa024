use std::cell::Cell;
use std::ops::RangeInclusive;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

use algoviz_protocol::{Role, Snapshot};

use crate::algorithms::{Algorithm, AlgorithmKind};
use crate::error::{Result, VizError};
use crate::generate;
use crate::model::{Dataset, FrameStore};
use crate::playback::{DEFAULT_DELAY, PlaybackController, PlaybackState, Renderer, clamp_delay};

/// Allowed array lengths for the sorts.
pub const ARRAY_SIZES: RangeInclusive<usize> = 10..=100;
/// Allowed node counts for the traversals.
pub const GRAPH_SIZES: RangeInclusive<usize> = 5..=15;

thread_local! {
    static GUARDED: Cell<bool> = const { Cell::new(false) };
}

/// Initial choices for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub algorithm: Algorithm,
    pub size: usize,
    pub seed: u64,
    pub start_node: usize,
    pub delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bubble,
            size: 30,
            seed: 0,
            start_node: 0,
            delay: DEFAULT_DELAY,
        }
    }
}

/// One user's workspace: the current data, the chosen algorithm, and at
/// most one live playback.
///
/// Every action that invalidates the data or the algorithm first cancels
/// and discards the playback, so a stale Frame Store can never be rendered.
#[derive(Debug)]
pub struct Session {
    algorithm: Algorithm,
    size: usize,
    seed: u64,
    start_node: usize,
    delay: Duration,
    data: Dataset,
    playback: Option<PlaybackController>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self> {
        check_size(config.algorithm.kind(), config.size)?;
        let data = generate_for(config.algorithm.kind(), config.size, config.seed);
        let mut session = Self {
            algorithm: config.algorithm,
            size: config.size,
            seed: config.seed,
            start_node: 0,
            delay: clamp_delay(config.delay),
            data,
            playback: None,
        };
        if config.algorithm.kind() == AlgorithmKind::Traversal {
            session.set_start_node(config.start_node)?;
        }
        Ok(session)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn start_node(&self) -> usize {
        self.start_node
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn playback(&self) -> Option<&PlaybackController> {
        self.playback.as_ref()
    }

    pub fn playback_mut(&mut self) -> Option<&mut PlaybackController> {
        self.playback.as_mut()
    }

    /// Size bounds for the current algorithm's input kind.
    pub fn size_range(&self) -> RangeInclusive<usize> {
        size_range(self.algorithm.kind())
    }

    /// Replace the data. Any playback is cancelled and discarded first.
    pub fn generate(&mut self, size: usize, seed: u64) -> Result<()> {
        check_size(self.algorithm.kind(), size)?;
        self.discard();
        self.size = size;
        self.seed = seed;
        self.start_node = 0;
        self.data = generate_for(self.algorithm.kind(), size, seed);
        log::debug!(
            "generated {} with {size} elements (seed {seed})",
            self.data.kind_name()
        );
        Ok(())
    }

    /// Fresh data of the same size from the next seed.
    pub fn generate_next(&mut self) -> Result<()> {
        self.generate(self.size, self.seed.wrapping_add(1))
    }

    /// Switch algorithm. Crossing between sorts and traversals regenerates
    /// data of the right kind, clamping the size into its bounds.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.discard();
        let kind_changed = algorithm.kind() != self.algorithm.kind();
        self.algorithm = algorithm;
        if kind_changed {
            let range = size_range(algorithm.kind());
            self.size = self.size.clamp(*range.start(), *range.end());
            self.start_node = 0;
            self.data = generate_for(algorithm.kind(), self.size, self.seed);
        }
    }

    /// Choose the traversal start. Only existing node ids are accepted.
    pub fn set_start_node(&mut self, node: usize) -> Result<()> {
        let Some(graph) = self.data.as_graph() else {
            return Err(VizError::WrongInput {
                algorithm: self.algorithm.name(),
                expected: "a graph",
                found: self.data.kind_name(),
            });
        };
        if !graph.contains(node) {
            log::warn!("rejected start node {node}");
            return Err(VizError::InvalidStartNode {
                node,
                node_count: graph.node_count(),
            });
        }
        self.discard();
        self.start_node = node;
        Ok(())
    }

    /// Move the start node to the next id, wrapping. No-op for arrays.
    pub fn cycle_start_node(&mut self) {
        let n = self.data.len();
        if self.data.as_graph().is_some() && n > 0 {
            let next = (self.start_node + 1) % n;
            // `next` is always in range here.
            let _ = self.set_start_node(next);
        }
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = clamp_delay(delay);
        if let Some(playback) = self.playback.as_mut() {
            playback.set_delay(self.delay);
        }
    }

    /// Record a complete run of the current algorithm without playing it.
    pub fn record(&self) -> Result<FrameStore> {
        let algorithm = self.algorithm;
        let (data, start) = (&self.data, self.start_node);
        guarded(algorithm, || algorithm.run(data, start))
    }

    /// Record a complete run of the current algorithm, then start playing
    /// it from frame 0.
    ///
    /// A panic inside a driver is caught and reported as `DriverFault`;
    /// the session is then left with no playback at all.
    pub fn run(&mut self, now: Instant, renderer: &mut dyn Renderer) -> Result<()> {
        self.run_with(now, renderer, Self::record)
    }

    fn run_with(
        &mut self,
        now: Instant,
        renderer: &mut dyn Renderer,
        record: impl FnOnce(&Self) -> Result<FrameStore>,
    ) -> Result<()> {
        self.discard();
        let store = record(&*self)?;

        let mut playback = PlaybackController::new(store, self.delay);
        playback.play(now, renderer);
        if playback.state() != PlaybackState::Playing {
            // Too short to play; show it once anyway.
            playback.redraw(renderer);
        }
        self.playback = Some(playback);
        Ok(())
    }

    /// Cancel playback and drop the Frame Store, keeping the data.
    pub fn reset(&mut self) {
        self.discard();
    }

    /// Forward a timer tick to the live playback, if any.
    pub fn tick(&mut self, now: Instant, renderer: &mut dyn Renderer) -> bool {
        self.playback
            .as_mut()
            .is_some_and(|playback| playback.tick(now, renderer))
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.playback
            .as_ref()
            .and_then(|playback| playback.time_until_tick(now))
    }

    /// The data as it looks before any run: every element `Default`.
    pub fn idle_snapshot(&self) -> Snapshot {
        let values = match &self.data {
            Dataset::Array(values) => values.clone(),
            Dataset::Graph(graph) => (0..graph.node_count() as i64).collect(),
        };
        let roles = vec![Role::Default; values.len()];
        let mut snapshot = Snapshot::new(values, roles);
        snapshot.caption = match &self.data {
            Dataset::Array(_) => format!("{} ready", self.algorithm.name()),
            Dataset::Graph(_) => format!(
                "{} ready, start at node {}",
                self.algorithm.name(),
                self.start_node
            ),
        };
        snapshot
    }

    fn discard(&mut self) {
        if let Some(mut playback) = self.playback.take() {
            playback.stop();
            log::debug!("discarded playback of {} frames", playback.len());
        }
    }
}

pub fn size_range(kind: AlgorithmKind) -> RangeInclusive<usize> {
    match kind {
        AlgorithmKind::Sort => ARRAY_SIZES,
        AlgorithmKind::Traversal => GRAPH_SIZES,
    }
}

fn check_size(kind: AlgorithmKind, size: usize) -> Result<()> {
    let range = size_range(kind);
    if range.contains(&size) {
        return Ok(());
    }
    log::warn!("rejected size {size}");
    Err(VizError::SizeOutOfRange {
        what: match kind {
            AlgorithmKind::Sort => "arrays",
            AlgorithmKind::Traversal => "graphs",
        },
        size,
        min: *range.start(),
        max: *range.end(),
    })
}

fn generate_for(kind: AlgorithmKind, size: usize, seed: u64) -> Dataset {
    match kind {
        AlgorithmKind::Sort => Dataset::Array(generate::random_array(size, seed)),
        AlgorithmKind::Traversal => Dataset::Graph(generate::random_graph(size, seed)),
    }
}

/// Run `record` for `algorithm`, turning a panic into [`VizError::DriverFault`].
pub fn guarded(
    algorithm: Algorithm,
    record: impl FnOnce() -> Result<FrameStore>,
) -> Result<FrameStore> {
    GUARDED.with(|g| g.set(true));
    let outcome = catch_unwind(AssertUnwindSafe(record));
    GUARDED.with(|g| g.set(false));

    match outcome {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("{} faulted: {message}", algorithm.name());
            Err(VizError::DriverFault {
                algorithm: algorithm.name(),
                message,
            })
        }
    }
}

/// Whether this thread is inside [`guarded`]. A panic hook can use it to
/// tell a driver fault, which becomes an error, from a crash.
pub fn in_guarded_run() -> bool {
    GUARDED.with(Cell::get)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "driver panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::FrameRef;

    #[derive(Default)]
    struct Count(Vec<usize>);

    impl Renderer for Count {
        fn render(&mut self, frame: FrameRef<'_>) {
            self.0.push(frame.index);
        }
    }

    fn graph_session() -> Session {
        Session::new(SessionConfig {
            algorithm: Algorithm::Bfs,
            size: 8,
            ..SessionConfig::default()
        })
        .unwrap_or_else(|e| panic!("session: {e}"))
    }

    #[test]
    fn run_renders_first_frame_and_plays() {
        let mut session = Session::new(SessionConfig::default())
            .unwrap_or_else(|e| panic!("session: {e}"));
        let mut r = Count::default();
        let t0 = Instant::now();
        assert!(session.run(t0, &mut r).is_ok());
        assert_eq!(r.0, vec![0]);
        let playback = session.playback().map(PlaybackController::state);
        assert_eq!(playback, Some(PlaybackState::Playing));
        assert!(session.tick(t0 + session.delay(), &mut r));
        assert_eq!(r.0, vec![0, 1]);
    }

    #[test]
    fn size_bounds_enforced() {
        let mut session = Session::new(SessionConfig::default())
            .unwrap_or_else(|e| panic!("session: {e}"));
        assert!(matches!(
            session.generate(5, 0),
            Err(VizError::SizeOutOfRange { min: 10, max: 100, .. })
        ));
        let mut graphs = graph_session();
        assert!(graphs.generate(16, 0).is_err());
        assert!(graphs.generate(15, 0).is_ok());
    }

    #[test]
    fn generate_discards_playback() {
        let mut session = Session::new(SessionConfig::default())
            .unwrap_or_else(|e| panic!("session: {e}"));
        let mut r = Count::default();
        session.run(Instant::now(), &mut r).expect("run");
        assert!(session.playback().is_some());
        assert!(session.generate_next().is_ok());
        assert!(session.playback().is_none());
        assert_eq!(session.seed(), 1);
    }

    #[test]
    fn invalid_start_node_rejected_before_run() {
        let mut session = graph_session();
        assert!(matches!(
            session.set_start_node(8),
            Err(VizError::InvalidStartNode {
                node: 8,
                node_count: 8
            })
        ));
        assert_eq!(session.start_node(), 0);
        assert!(session.set_start_node(7).is_ok());
        session.cycle_start_node();
        assert_eq!(session.start_node(), 0);
    }

    #[test]
    fn switching_kind_regenerates_data() {
        let mut session = Session::new(SessionConfig {
            size: 60,
            ..SessionConfig::default()
        })
        .unwrap_or_else(|e| panic!("session: {e}"));
        session.set_algorithm(Algorithm::Dfs);
        assert!(session.data().as_graph().is_some());
        assert_eq!(session.size(), 15);
        session.set_algorithm(Algorithm::Bfs);
        assert_eq!(session.data().len(), 15);
        session.set_algorithm(Algorithm::Merge);
        assert_eq!(session.data().as_array().map(<[i64]>::len), Some(15));
    }

    #[test]
    fn start_node_on_array_is_wrong_input() {
        let mut session = Session::new(SessionConfig::default())
            .unwrap_or_else(|e| panic!("session: {e}"));
        assert!(matches!(
            session.set_start_node(0),
            Err(VizError::WrongInput { .. })
        ));
    }

    #[test]
    fn reset_keeps_data() {
        let mut session = graph_session();
        let before = session.data().clone();
        let mut r = Count::default();
        session.run(Instant::now(), &mut r).expect("run");
        session.reset();
        assert!(session.playback().is_none());
        assert_eq!(session.data(), &before);
        assert_eq!(session.idle_snapshot().len(), 8);
    }

    #[test]
    fn delay_is_forwarded_and_clamped() {
        let mut session = Session::new(SessionConfig::default())
            .unwrap_or_else(|e| panic!("session: {e}"));
        session.set_delay(Duration::from_secs(10));
        assert_eq!(session.delay(), crate::playback::MAX_DELAY);
        let mut r = Count::default();
        session.run(Instant::now(), &mut r).expect("run");
        session.set_delay(Duration::from_millis(20));
        assert_eq!(
            session.playback().map(PlaybackController::delay),
            Some(Duration::from_millis(20))
        );
    }

    #[test]
    fn guarded_turns_panics_into_driver_faults() {
        let seen_inside = Cell::new(false);
        let result = guarded(Algorithm::Merge, || {
            seen_inside.set(in_guarded_run());
            panic!("split index past the end")
        });
        assert!(seen_inside.get());
        assert!(!in_guarded_run());
        match result {
            Err(VizError::DriverFault { algorithm, message }) => {
                assert_eq!(algorithm, Algorithm::Merge.name());
                assert_eq!(message, "split index past the end");
            }
            other => panic!("expected a driver fault, got {other:?}"),
        }

        let passed = guarded(Algorithm::Merge, || Ok(FrameStore::new()));
        assert!(passed.is_ok_and(|store| store.is_empty()));
    }

    #[test]
    fn faulting_driver_leaves_no_playback_and_draws_nothing() {
        let mut session = Session::new(SessionConfig::default())
            .unwrap_or_else(|e| panic!("session: {e}"));
        let t0 = Instant::now();
        session.run(t0, &mut Count::default()).expect("first run");
        assert!(session.playback().is_some());

        let mut r = Count::default();
        let err = session.run_with(t0, &mut r, |s| {
            guarded(s.algorithm(), || panic!("driver bug"))
        });
        assert!(matches!(err, Err(VizError::DriverFault { .. })));
        assert!(session.playback().is_none());
        assert!(session.time_until_tick(t0).is_none());
        assert!(r.0.is_empty());
    }

    #[test]
    fn run_reports_playing_to_the_renderer() {
        #[derive(Default)]
        struct States(Vec<PlaybackState>);
        impl Renderer for States {
            fn render(&mut self, frame: FrameRef<'_>) {
                self.0.push(frame.state);
            }
        }
        let mut session = graph_session();
        let mut states = States::default();
        session.run(Instant::now(), &mut states).expect("run");
        assert_eq!(states.0, vec![PlaybackState::Playing]);
    }

    #[test]
    fn record_matches_the_played_store() {
        let mut session = graph_session();
        let recorded = session.record().expect("record");
        session.run(Instant::now(), &mut Count::default()).expect("run");
        assert_eq!(session.playback().map(PlaybackController::store), Some(&recorded));
    }

    #[test]
    fn panic_payloads_become_messages() {
        let caught = catch_unwind(|| panic!("index out of bounds"));
        let message = caught.err().map(|p| panic_message(p.as_ref()));
        assert_eq!(message.as_deref(), Some("index out of bounds"));
    }
}
