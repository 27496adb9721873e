//! End-to-end target lifecycle checks.
//!
//! Run with: cargo test --test target_lifecycle
//! Set RUST_LOG=inspector_targets=trace to see registry logging.

use std::sync::Arc;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

use inspector_targets::{
    Agents, Connection, Environment, Error, Frame, FrameId, FrameResourceManager, Resource,
    ResourceType, RuntimeAgent, Script, ScriptId, Settings, Target, TargetEvent, TargetEventKind,
    TargetId, TargetType,
};

// ============================================================================
// Helpers
// ============================================================================

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

#[derive(Default)]
struct RecordingRuntime {
    enabled: AtomicBool,
    type_profiler: AtomicBool,
    control_flow_profiler: AtomicBool,
}

impl RuntimeAgent for RecordingRuntime {
    fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    fn enable_type_profiler(&self) {
        self.type_profiler.store(true, Ordering::SeqCst);
    }

    fn enable_control_flow_profiler(&self) {
        self.control_flow_profiler.store(true, Ordering::SeqCst);
    }
}

fn document(url: &str) -> Arc<Resource> {
    Arc::new(Resource::new(url, ResourceType::Document))
}

fn bare_worker(env: &Environment, id: &str) -> Result<Target> {
    Ok(Target::new_worker(
        env,
        id,
        "https://example.com/worker.js",
        Connection::worker(id, Agents::new()),
    )?)
}

// ============================================================================
// Adoption
// ============================================================================

#[test]
fn test_adopt_unowned_resource() -> Result<()> {
    init_tracing();
    let env = Environment::builder().build();
    let target = bare_worker(&env, "w1")?;
    let resource = document("https://example.com/");

    target.adopt_resource(Arc::clone(&resource))?;

    assert!(resource.target().expect("owner").ptr_eq(&target));
    let matching = target
        .resources()
        .iter()
        .filter(|r| r.id() == resource.id())
        .count();
    assert_eq!(matching, 1);
    Ok(())
}

#[test]
fn test_duplicate_add_resource() -> Result<()> {
    init_tracing();
    let env = Environment::builder().build();
    let target = bare_worker(&env, "w1")?;
    let resource = document("https://example.com/");

    target.add_resource(Arc::clone(&resource))?;
    let before = target.resource_count();
    let err = target.add_resource(resource).unwrap_err();

    assert!(matches!(err, Error::DuplicateEntity { .. }));
    assert_eq!(target.resource_count(), before);
    Ok(())
}

#[test]
fn test_add_script_rejects_non_script() -> Result<()> {
    init_tracing();
    let env = Environment::builder().build();
    let target = bare_worker(&env, "w1")?;
    target.add_script(Arc::new(Script::new(ScriptId::new("1"))))?;

    let err = target.add_script(document("https://example.com/")).unwrap_err();

    assert!(matches!(err, Error::InvalidType { .. }));
    assert_eq!(target.script_count(), 1);
    Ok(())
}

// ============================================================================
// Main Target
// ============================================================================

#[test]
fn test_main_resource_is_live() -> Result<()> {
    init_tracing();
    let frames = Arc::new(FrameResourceManager::new());
    let env = Environment::builder().frames(frames.clone()).build();
    let main = Target::new_main(&env)?;

    assert_eq!(main.target_type(), TargetType::Main);
    assert!(main.main_resource().is_none());

    let first = Arc::new(Frame::new(FrameId::new("f1")));
    let first_doc = document("https://a.test/");
    first.set_main_resource(Arc::clone(&first_doc));
    frames.set_main_frame(first);
    assert_eq!(main.main_resource().map(|r| r.id()), Some(first_doc.id()));

    let second = Arc::new(Frame::new(FrameId::new("f2")));
    let second_doc = document("https://b.test/");
    second.set_main_resource(Arc::clone(&second_doc));
    frames.set_main_frame(second);
    assert_eq!(main.main_resource().map(|r| r.id()), Some(second_doc.id()));

    frames.remove_frame(&FrameId::new("f2"));
    assert!(main.main_resource().is_none());
    Ok(())
}

// ============================================================================
// Worker Target
// ============================================================================

#[test]
fn test_worker_adopts_orphans() -> Result<()> {
    init_tracing();
    let frames = Arc::new(FrameResourceManager::new());
    let env = Environment::builder().frames(frames.clone()).build();

    let r1 = document("https://example.com/r1");
    let r2 = document("https://example.com/r2");
    let worker_id = TargetId::new("w1");
    frames.record_orphaned_resource(&worker_id, Arc::clone(&r1));
    frames.record_orphaned_resource(&worker_id, Arc::clone(&r2));

    let target = Target::new_worker(&env, "w1", "x", Connection::worker("w1", Agents::new()))?;

    for resource in [&r1, &r2] {
        assert!(target.has_resource(resource.id()));
        assert!(resource.target().expect("owner").ptr_eq(&target));
    }
    Ok(())
}

#[test]
fn test_profiler_settings() -> Result<()> {
    init_tracing();
    let runtime = Arc::new(RecordingRuntime::default());
    let env = Environment::builder()
        .settings(
            Settings::new()
                .with_type_information(true)
                .with_control_flow_profiler(false),
        )
        .build();
    let connection = Connection::worker("w1", Agents::new().with_runtime(runtime.clone()));

    let target = Target::new_worker(&env, "w1", "https://example.com/w.js", connection)?;

    assert!(target.execution_context().is_some());
    assert!(runtime.enabled.load(Ordering::SeqCst));
    assert!(runtime.type_profiler.load(Ordering::SeqCst));
    assert!(!runtime.control_flow_profiler.load(Ordering::SeqCst));
    Ok(())
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_resource_added_delivered_once_before_return() -> Result<()> {
    init_tracing();
    let env = Environment::builder().build();
    let target = bare_worker(&env, "w1")?;
    let events: Arc<Mutex<Vec<TargetEvent>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&events);
    target.add_event_listener(TargetEventKind::ResourceAdded, move |event| {
        sink.lock().push(event.clone());
    });

    let resource = document("https://example.com/");
    target.add_resource(Arc::clone(&resource))?;

    let events = events.lock();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].resource().map(|r| r.id()), Some(resource.id()));
    Ok(())
}

#[test]
fn test_identity_unchanged_by_operations() -> Result<()> {
    init_tracing();
    let env = Environment::builder().build();
    let target = bare_worker(&env, "w1")?;
    let (id, name, kind) = (
        target.identifier().clone(),
        target.name().to_string(),
        target.target_type(),
    );

    target.add_resource(document("https://example.com/a"))?;
    target.adopt_resource(document("https://example.com/b"))?;
    target.add_script(Arc::new(Script::new(ScriptId::new("9"))))?;
    let _ = target.add_script(document("https://example.com/c"));

    assert_eq!(target.identifier(), &id);
    assert_eq!(target.name(), name);
    assert_eq!(target.target_type(), kind);
    Ok(())
}

// ============================================================================
// Ordering Coupling
// ============================================================================

#[test]
fn test_connection_bound_before_initialization() -> Result<()> {
    init_tracing();

    struct Probe {
        connection: Mutex<Option<Connection>>,
        observed: Mutex<Option<(bool, bool)>>,
    }

    impl RuntimeAgent for Probe {
        fn enable(&self) {
            let connection = self.connection.lock().clone();
            let target = connection.and_then(|c| c.target());
            *self.observed.lock() = target.map(|t| (t.is_initialized(), t.execution_context().is_some()));
        }
        fn enable_type_profiler(&self) {}
        fn enable_control_flow_profiler(&self) {}
    }

    let probe = Arc::new(Probe {
        connection: Mutex::new(None),
        observed: Mutex::new(None),
    });
    let connection = Connection::worker("w1", Agents::new().with_runtime(probe.clone()));
    *probe.connection.lock() = Some(connection.clone());

    let env = Environment::builder().build();
    let target = Target::new_worker(&env, "w1", "w.js", connection)?;

    // Reachable during initialization, not yet marked initialized.
    assert_eq!(*probe.observed.lock(), Some((false, true)));
    assert!(target.is_initialized());

    // Break the probe -> connection cycle.
    probe.connection.lock().take();
    Ok(())
}
