//! Main target: the inspected page or JavaScript context.

use std::sync::Arc;

use crate::backend::ConnectionKind;
use crate::environment::{DebuggableType, Environment};
use crate::error::{Error, Result};
use crate::identifiers::{ExecutionContextId, TargetId};
use crate::model::{ExecutionContext, Resource};

use super::Target;
use super::core::Role;

// ============================================================================
// Target - Main Constructor
// ============================================================================

impl Target {
    /// Creates the main target over the environment's main connection.
    ///
    /// Identifier and name are empty. Initialization creates the top-level
    /// page execution context.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidOperation`] if the environment's main connection is
    ///   a worker connection
    /// - [`Error::StaleBackReference`] if a live main target already exists
    ///   for this environment
    pub fn new_main(env: &Environment) -> Result<Self> {
        if *env.main_connection().kind() != ConnectionKind::Main {
            return Err(Error::invalid_operation(format!(
                "main target needs the main connection, got {:?}",
                env.main_connection().kind()
            )));
        }

        Self::construct(
            TargetId::main(),
            String::new(),
            env.main_connection().clone(),
            Role::Main { env: env.clone() },
            env,
        )
    }
}

// ============================================================================
// Main Behavior
// ============================================================================

pub(super) fn display_name(env: &Environment) -> &str {
    match env.debuggable_type() {
        DebuggableType::Web => env.ui_string("Main Frame"),
        DebuggableType::JavaScript => env.ui_string("Main Context"),
    }
}

pub(super) fn main_resource(env: &Environment) -> Option<Arc<Resource>> {
    env.frames().main_frame().and_then(|frame| frame.main_resource())
}

pub(super) fn initialize(target: &Target) {
    target.set_execution_context(ExecutionContext::new(
        target.identifier().clone(),
        ExecutionContextId::TOP_LEVEL,
        target.display_name(),
        true,
        None,
    ));
}

// ============================================================================
// Tests
// ============================================================================
