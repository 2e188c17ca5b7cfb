//! Shared world state for conversation capture BDD scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use turnscribe::capture::adapters::{RecordingCaptureSink, boundary_for};
use turnscribe::capture::services::CaptureHandoff;
use turnscribe::navigation::ports::ObservationControl;
use turnscribe::navigation::services::NavigationWatcher;
use turnscribe::observe::adapters::RecordingDiagnostics;
use turnscribe::observe::services::{ObservationConfig, ObservationController};
use turnscribe::page::adapters::InMemoryPage;
use turnscribe::page::domain::NodeId;
use turnscribe::page::ports::PageDom;
use turnscribe::profile::services::ProfileResolver;

/// Counts restarts while delegating to the real controller.
pub struct CountingControl {
    inner: Arc<ObservationController<DefaultClock>>,
    count: AtomicUsize,
}

impl CountingControl {
    /// Returns how many restarts have run.
    pub fn restarts(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObservationControl for CountingControl {
    async fn restart(&self, url: &str) {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.restart(url).await;
    }
}

/// A fully wired pipeline over an in-memory page.
pub struct Harness {
    pub page: Arc<InMemoryPage>,
    pub sink: Arc<RecordingCaptureSink>,
    pub diagnostics: Arc<RecordingDiagnostics>,
    pub controller: Arc<ObservationController<DefaultClock>>,
    pub control: Arc<CountingControl>,
    pub watcher: Arc<NavigationWatcher>,
}

impl Harness {
    /// Wires the pipeline against the given page and profile table.
    pub fn new(raw_page: InMemoryPage, resolver: ProfileResolver) -> Result<Self, eyre::Report> {
        let page = Arc::new(raw_page);
        let sink = Arc::new(RecordingCaptureSink::new());
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let boundary = boundary_for(page.as_ref())?;
        let handoff = Arc::new(CaptureHandoff::new(
            Arc::clone(&page) as Arc<dyn PageDom>,
            Arc::clone(&sink) as _,
            boundary,
            Arc::clone(&diagnostics) as _,
            Arc::new(DefaultClock),
        ));
        let controller = Arc::new(ObservationController::new(
            Arc::clone(&page) as Arc<dyn PageDom>,
            resolver,
            handoff,
            Arc::clone(&diagnostics) as _,
            Arc::new(DefaultClock),
            ObservationConfig::default().with_container_retries(3, Duration::from_millis(100)),
        ));
        let control = Arc::new(CountingControl {
            inner: Arc::clone(&controller),
            count: AtomicUsize::new(0),
        });
        let watcher = Arc::new(NavigationWatcher::new(
            Arc::clone(&control) as Arc<dyn ObservationControl>,
            Duration::from_millis(300),
        ));
        Ok(Self {
            page,
            sink,
            diagnostics,
            controller,
            control,
            watcher,
        })
    }
}

/// Scenario world for conversation capture behaviour tests.
#[derive(Default)]
pub struct CaptureWorld {
    pub harness: Option<Harness>,
    pub turn: Option<NodeId>,
    pub content: Option<NodeId>,
    pub indicator: Option<NodeId>,
}

impl CaptureWorld {
    /// Returns the wired pipeline, set up by a Given step.
    pub fn harness(&self) -> Result<&Harness, eyre::Report> {
        self.harness
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing harness in scenario world"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CaptureWorld {
    CaptureWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
