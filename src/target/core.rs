//! Core Target struct, construction and accessors.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backend::Connection;
use crate::display::display_name_for_url;
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::events::Listeners;
use crate::identifiers::TargetId;
use crate::model::{Collection, ExecutionContext, Resource, ResourceCollection, TypeVerifier};

use super::{TargetEvent, main, worker};

// ============================================================================
// TargetType
// ============================================================================

/// Kind of debuggable context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    /// The inspected page (or bare JavaScript context).
    Main,
    /// A worker.
    Worker,
}

impl TargetType {
    /// Returns the type name.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Worker => "worker",
        }
    }
}

// ============================================================================
// Types
// ============================================================================

/// Type-specific state.
pub(crate) enum Role {
    /// Main resource is derived from the environment's frame manager.
    Main { env: Environment },
    /// Main resource is stored.
    Worker {
        main_resource: RwLock<Option<Arc<Resource>>>,
    },
}

/// Internal shared state for a target.
pub(crate) struct TargetInner {
    pub identifier: TargetId,
    pub name: String,
    pub connection: Connection,
    pub role: Role,
    pub execution_context: RwLock<Option<Arc<ExecutionContext>>>,
    pub resources: Mutex<ResourceCollection>,
    pub extra_scripts: Mutex<Collection>,
    pub listeners: Listeners<TargetEvent>,
    pub initialized: AtomicBool,
}

/// Non-owning reference to a target.
#[derive(Clone)]
pub(crate) struct WeakTarget(Weak<TargetInner>);

impl WeakTarget {
    /// Returns the target if it is still alive.
    #[inline]
    pub fn upgrade(&self) -> Option<Target> {
        self.0.upgrade().map(|inner| Target { inner })
    }

    /// Returns `true` if this refers to `target`.
    #[inline]
    pub fn points_to(&self, target: &Target) -> bool {
        std::ptr::eq(self.0.as_ptr(), Arc::as_ptr(&target.inner))
    }
}

// ============================================================================
// Target
// ============================================================================

/// A handle to a debuggable target.
///
/// Cloning is cheap; all clones refer to the same target. Identity,
/// name and type never change after construction.
#[derive(Clone)]
pub struct Target {
    pub(crate) inner: Arc<TargetInner>,
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("identifier", &self.inner.identifier)
            .field("name", &self.inner.name)
            .field("type", &self.target_type())
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Target - Constructor
// ============================================================================

impl Target {
    /// Builds, binds and initializes a target.
    pub(super) fn construct(
        identifier: TargetId,
        name: String,
        connection: Connection,
        role: Role,
        env: &Environment,
    ) -> Result<Self> {
        let target = Self {
            inner: Arc::new(TargetInner {
                identifier,
                name,
                connection,
                role,
                execution_context: RwLock::new(None),
                resources: Mutex::new(ResourceCollection::new()),
                extra_scripts: Mutex::new(Collection::new(TypeVerifier::Script)),
                listeners: Listeners::new(),
                initialized: AtomicBool::new(false),
            }),
        };

        // Bound before initialization: callbacks reached through the
        // connection during `initialize` observe `is_initialized() == false`.
        target.inner.connection.bind_target(&target)?;

        match &target.inner.role {
            Role::Main { .. } => main::initialize(&target),
            Role::Worker { .. } => worker::initialize(&target, env),
        }

        target.inner.initialized.store(true, Ordering::Release);
        debug!(
            target_id = %target.inner.identifier,
            target_type = target.target_type().as_str(),
            "Target initialized"
        );
        Ok(target)
    }

    /// Sets the execution context. The first context wins.
    pub(super) fn set_execution_context(&self, context: ExecutionContext) {
        let mut slot = self.inner.execution_context.write();
        if slot.is_some() {
            warn!(target_id = %self.inner.identifier, "Execution context already set");
            return;
        }
        *slot = Some(Arc::new(context));
    }

    /// Returns a non-owning reference.
    #[inline]
    pub(crate) fn downgrade(&self) -> WeakTarget {
        WeakTarget(Arc::downgrade(&self.inner))
    }
}

// ============================================================================
// Target - Accessors
// ============================================================================

impl Target {
    /// Returns the identifier. Empty for the main target.
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &TargetId {
        &self.inner.identifier
    }

    /// Returns the name. Empty for the main target.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the target type.
    #[inline]
    #[must_use]
    pub fn target_type(&self) -> TargetType {
        match self.inner.role {
            Role::Main { .. } => TargetType::Main,
            Role::Worker { .. } => TargetType::Worker,
        }
    }

    /// Returns the owned connection.
    #[inline]
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.inner.connection
    }

    /// Returns the execution context, once initialization created one.
    #[must_use]
    pub fn execution_context(&self) -> Option<Arc<ExecutionContext>> {
        self.inner.execution_context.read().clone()
    }

    /// Returns `true` once construction has finished.
    #[inline]
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.load(Ordering::Acquire)
    }

    /// Returns a user-facing label.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.inner.role {
            Role::Main { env } => main::display_name(env).to_string(),
            Role::Worker { .. } => display_name_for_url(&self.inner.name),
        }
    }

    /// Returns the target's top-level document or script.
    ///
    /// For the main target this reads the frame manager's current main
    /// frame on every call.
    #[must_use]
    pub fn main_resource(&self) -> Option<Arc<Resource>> {
        match &self.inner.role {
            Role::Main { env } => main::main_resource(env),
            Role::Worker { main_resource } => main_resource.read().clone(),
        }
    }

    /// Sets the main resource of a worker target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOperation`] on the main target, whose main
    /// resource is derived from the frame manager.
    pub fn set_main_resource(&self, resource: Option<Arc<Resource>>) -> Result<()> {
        match &self.inner.role {
            Role::Main { .. } => Err(Error::invalid_operation(
                "main target's main resource follows the main frame",
            )),
            Role::Worker { main_resource } => {
                *main_resource.write() = resource;
                Ok(())
            }
        }
    }

    /// Returns `true` if both handles refer to the same target.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Target) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// ============================================================================
// Tests
// ============================================================================
