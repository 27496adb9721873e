//! Worker targets.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::backend::{Connection, ConnectionKind};
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::identifiers::{ExecutionContextId, TargetId};
use crate::model::ExecutionContext;

use super::Target;
use super::core::Role;

// ============================================================================
// Target - Worker Constructor
// ============================================================================

impl Target {
    /// Creates a worker target over its own connection.
    ///
    /// `name` is the worker's script URL as reported by the remote end.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidOperation`] if `worker_id` is empty (reserved for
    ///   the main target), or if `connection` is not this worker's connection
    /// - [`Error::StaleBackReference`] if `connection` is bound to a live target
    ///
    /// Buffered orphans that cannot be adopted are skipped, not reported.
    pub fn new_worker(
        env: &Environment,
        worker_id: impl Into<TargetId>,
        name: impl Into<String>,
        connection: Connection,
    ) -> Result<Self> {
        let worker_id = worker_id.into();
        if worker_id.is_main() {
            return Err(Error::invalid_operation(
                "worker identifier must not be empty",
            ));
        }
        if !matches!(connection.kind(), ConnectionKind::Worker(id) if *id == worker_id) {
            return Err(Error::invalid_operation(format!(
                "connection {:?} does not belong to worker '{worker_id}'",
                connection.kind()
            )));
        }

        Self::construct(
            worker_id,
            name.into(),
            connection,
            Role::Worker {
                main_resource: RwLock::new(None),
            },
            env,
        )
    }
}

// ============================================================================
// Worker Initialization
// ============================================================================

/// Adopts buffered orphans, then enables whatever the connection supports.
///
/// The buffer is drained up front; a refused orphan is logged and skipped.
pub(super) fn initialize(target: &Target, env: &Environment) {
    for resource in env
        .frames()
        .adopt_orphaned_resources_for_target(target.identifier())
    {
        if let Err(error) = target.adopt_resource(Arc::clone(&resource)) {
            warn!(
                target_id = %target.identifier(),
                resource_id = %resource.id(),
                %error,
                "Orphaned resource not adopted"
            );
        }
    }

    let agents = target.connection().agents();
    let settings = env.settings();

    if let Some(runtime) = agents.runtime() {
        target.set_execution_context(ExecutionContext::new(
            target.identifier().clone(),
            ExecutionContextId::TOP_LEVEL,
            target.display_name(),
            false,
            None,
        ));
        runtime.enable();

        if settings.wants_type_profiler() {
            runtime.enable_type_profiler();
        }
        if settings.wants_control_flow_profiler() {
            runtime.enable_control_flow_profiler();
        }
        debug!(
            target_id = %target.identifier(),
            type_profiler = settings.wants_type_profiler(),
            control_flow_profiler = settings.wants_control_flow_profiler(),
            "Runtime enabled"
        );
    }

    if agents.debugger().is_some() {
        env.debugger().initialize_target(target);
    }

    if let Some(console) = agents.console() {
        console.enable();
        debug!(target_id = %target.identifier(), "Console enabled");
    }

}

// ============================================================================
// Tests
// ============================================================================
