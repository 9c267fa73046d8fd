//! Startup sequence scenarios against stub loaders.

use async_trait::async_trait;
use modboot::{
    Bootstrapper, MarkerLog, ModbootError, ModbootResult, ModuleLoader, ProgressMarker,
    ReadyModule, deferred,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

const LOAD_DELAY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Marker(ProgressMarker),
    ReadyInvoked,
    ReadySettled,
    EntryPoint,
}

/// Shared timeline of everything the stubs and the observer saw.
#[derive(Clone, Default)]
struct Timeline(Arc<Mutex<Vec<Event>>>);

impl Timeline {
    fn push(&self, event: Event) {
        self.0.lock().push(event);
    }

    fn events(&self) -> Vec<Event> {
        self.0.lock().clone()
    }

    fn count(&self, event: &Event) -> usize {
        self.0.lock().iter().filter(|e| *e == event).count()
    }
}

impl modboot::ProgressObserver for Timeline {
    fn marker(&self, marker: ProgressMarker, _module: &str) {
        self.push(Event::Marker(marker));
    }
}

struct NoopModule {
    timeline: Timeline,
}

impl ReadyModule for NoopModule {
    fn start(self) -> ModbootResult<()> {
        self.timeline.push(Event::EntryPoint);
        Ok(())
    }
}

/// Loader that settles after a delay with a module or an error.
struct DelayedLoader {
    timeline: Timeline,
    fail_with: Option<String>,
}

#[async_trait]
impl ModuleLoader for DelayedLoader {
    type Module = NoopModule;

    async fn ready(self) -> ModbootResult<NoopModule> {
        self.timeline.push(Event::ReadyInvoked);
        tokio::time::sleep(LOAD_DELAY).await;
        self.timeline.push(Event::ReadySettled);

        match self.fail_with {
            Some(reason) => Err(ModbootError::Load(reason)),
            None => Ok(NoopModule {
                timeline: self.timeline,
            }),
        }
    }

    fn name(&self) -> &str {
        "delayed"
    }
}

#[tokio::test(start_paused = true)]
async fn success_path_orders_markers_around_readiness() {
    let timeline = Timeline::default();
    let loader = DelayedLoader {
        timeline: timeline.clone(),
        fail_with: None,
    };

    let started = tokio::time::Instant::now();
    Bootstrapper::with_observer(loader, timeline.clone())
        .run()
        .await
        .unwrap();

    assert!(started.elapsed() >= LOAD_DELAY);
    assert_eq!(
        timeline.events(),
        vec![
            Event::Marker(ProgressMarker::Requested),
            Event::ReadyInvoked,
            Event::ReadySettled,
            Event::Marker(ProgressMarker::Ready),
            Event::EntryPoint,
        ]
    );
    assert_eq!(timeline.count(&Event::EntryPoint), 1);
}

#[tokio::test(start_paused = true)]
async fn failure_path_surfaces_error_without_starting() {
    let timeline = Timeline::default();
    let loader = DelayedLoader {
        timeline: timeline.clone(),
        fail_with: Some("unsupported binary format".into()),
    };

    let result = Bootstrapper::with_observer(loader, timeline.clone())
        .run()
        .await;

    match result {
        Err(ModbootError::Load(reason)) => assert_eq!(reason, "unsupported binary format"),
        other => panic!("expected load failure, got {:?}", other),
    }
    assert_eq!(
        timeline.events(),
        vec![
            Event::Marker(ProgressMarker::Requested),
            Event::ReadyInvoked,
            Event::ReadySettled,
        ]
    );
    assert_eq!(timeline.count(&Event::EntryPoint), 0);
    assert_eq!(timeline.count(&Event::ReadyInvoked), 1);
}

#[tokio::test(start_paused = true)]
async fn entry_point_waits_for_readiness_handle() {
    let log = MarkerLog::new();
    let timeline = Timeline::default();
    let (loader, handle) = deferred();

    let run = tokio::spawn(Bootstrapper::with_observer(loader.named("search"), log.clone()).run());

    tokio::time::sleep(LOAD_DELAY).await;
    assert_eq!(log.markers(), vec![ProgressMarker::Requested]);
    assert_eq!(timeline.count(&Event::EntryPoint), 0);
    assert!(!run.is_finished());

    handle.resolve(NoopModule {
        timeline: timeline.clone(),
    });
    run.await.unwrap().unwrap();

    assert_eq!(
        log.markers(),
        vec![ProgressMarker::Requested, ProgressMarker::Ready]
    );
    assert_eq!(timeline.count(&Event::EntryPoint), 1);
}

#[tokio::test(start_paused = true)]
async fn rejected_handle_reaches_caller_unmodified() {
    let log = MarkerLog::new();
    let (loader, handle) = deferred::<NoopModule>();

    let run = tokio::spawn(Bootstrapper::with_observer(loader, log.clone()).run());

    tokio::time::sleep(LOAD_DELAY).await;
    handle.reject(ModbootError::Load("link error: missing import env.memory".into()));

    let err = run.await.unwrap().unwrap_err();
    assert_eq!(
        err.to_string(),
        "module load failed: link error: missing import env.memory"
    );
    assert_eq!(log.markers(), vec![ProgressMarker::Requested]);
}

#[tokio::test(start_paused = true)]
async fn readiness_is_never_awaited_twice() {
    let timeline = Timeline::default();
    let loader = DelayedLoader {
        timeline: timeline.clone(),
        fail_with: Some("fetch failed".into()),
    };

    let _ = Bootstrapper::with_observer(loader, timeline.clone())
        .run()
        .await;
    tokio::task::yield_now().await;

    assert_eq!(timeline.count(&Event::ReadyInvoked), 1);
    assert_eq!(timeline.count(&Event::Marker(ProgressMarker::Ready)), 0);
}
