//! Resource and script registration.

use std::sync::Arc;

use tracing::trace;

use crate::error::Result;
use crate::identifiers::{ListenerId, ResourceId, ScriptId};
use crate::model::{Entity, EntityKey, Resource, ResourceType, Script};

use super::{Target, TargetEvent, TargetEventKind};

// ============================================================================
// Target - Registration
// ============================================================================

impl Target {
    /// Adds a resource and publishes [`TargetEvent::ResourceAdded`].
    ///
    /// Does not touch the resource's owner back-reference; use
    /// [`Target::adopt_resource`] for resources discovered elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEntity`](crate::Error::DuplicateEntity) if
    /// the resource is already present. Nothing is published in that case.
    pub fn add_resource(&self, resource: Arc<Resource>) -> Result<()> {
        self.inner.resources.lock().add(Arc::clone(&resource))?;

        trace!(
            target_id = %self.inner.identifier,
            resource_id = %resource.id(),
            url = resource.url(),
            "Resource added"
        );
        self.inner
            .listeners
            .dispatch(&TargetEvent::ResourceAdded { resource });
        Ok(())
    }

    /// Re-parents a resource to this target, then adds it.
    ///
    /// The owner is set before the resource is added, so `ResourceAdded`
    /// listeners always see `resource.target()` pointing here.
    ///
    /// The owner is otherwise fixed once set, with one deliberate exception:
    /// a resource whose owner has been dropped may be adopted again.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyAdopted`](crate::Error::AlreadyAdopted) if another
    ///   live target owns the resource
    /// - [`Error::DuplicateEntity`](crate::Error::DuplicateEntity) if the
    ///   resource is already in this target's collection
    pub fn adopt_resource(&self, resource: Arc<Resource>) -> Result<()> {
        resource.set_target(self)?;
        self.add_resource(resource)
    }

    /// Adds a script and publishes [`TargetEvent::ScriptAdded`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidType`](crate::Error::InvalidType) if `script` is not a script
    /// - [`Error::DuplicateEntity`](crate::Error::DuplicateEntity) if already present
    pub fn add_script(&self, script: impl Into<Entity>) -> Result<()> {
        let entity = script.into();
        self.inner.extra_scripts.lock().add(entity.clone())?;

        if let Entity::Script(script) = entity {
            trace!(target_id = %self.inner.identifier, script_id = %script.id(), "Script added");
            self.inner
                .listeners
                .dispatch(&TargetEvent::ScriptAdded { script });
        }
        Ok(())
    }
}

// ============================================================================
// Target - Queries
// ============================================================================

impl Target {
    /// Returns the target's resources in insertion order.
    #[must_use]
    pub fn resources(&self) -> Vec<Arc<Resource>> {
        self.inner.resources.lock().iter().cloned().collect()
    }

    /// Returns the number of resources.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.inner.resources.lock().len()
    }

    /// Returns `true` if the resource is in this target's collection.
    #[must_use]
    pub fn has_resource(&self, id: ResourceId) -> bool {
        self.inner.resources.lock().contains(id)
    }

    /// Returns the resource registered for `url`.
    #[must_use]
    pub fn resource_for_url(&self, url: &str) -> Option<Arc<Resource>> {
        self.inner.resources.lock().resource_for_url(url).cloned()
    }

    /// Returns all resources of `resource_type`.
    #[must_use]
    pub fn resources_with_type(&self, resource_type: ResourceType) -> Vec<Arc<Resource>> {
        self.inner.resources.lock().resources_with_type(resource_type)
    }

    /// Returns the extra scripts in insertion order.
    #[must_use]
    pub fn extra_scripts(&self) -> Vec<Arc<Script>> {
        self.inner.extra_scripts.lock().scripts().cloned().collect()
    }

    /// Returns the number of extra scripts.
    #[must_use]
    pub fn script_count(&self) -> usize {
        self.inner.extra_scripts.lock().len()
    }

    /// Returns `true` if the script is in this target's collection.
    #[must_use]
    pub fn has_script(&self, id: &ScriptId) -> bool {
        self.inner
            .extra_scripts
            .lock()
            .contains(&EntityKey::Script(id.clone()))
    }
}

// ============================================================================
// Target - Listeners
// ============================================================================

impl Target {
    /// Registers a listener for events of `kind`.
    ///
    /// Listeners run synchronously, in registration order, before the
    /// publishing call returns.
    pub fn add_event_listener(
        &self,
        kind: TargetEventKind,
        listener: impl Fn(&TargetEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.inner.listeners.add(move |event: &TargetEvent| {
            if event.kind() == kind {
                listener(event);
            }
        })
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.inner.listeners.remove(id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use parking_lot::Mutex;

    use crate::backend::{Agents, Connection};
    use crate::environment::Environment;
    use crate::error::Error;
    use crate::identifiers::TargetId;

    fn worker(env: &Environment, id: &str) -> Target {
        Target::new_worker(env, id, "https://example.com/w.js", Connection::worker(id, Agents::new()))
            .unwrap()
    }

    fn resource(url: &str) -> Arc<Resource> {
        Arc::new(Resource::new(url, ResourceType::Script))
    }

    // ------------------------------------------------------------------------
    // add_resource
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_resource_does_not_set_owner() {
        let env = Environment::builder().build();
        let target = worker(&env, "w1");
        let r = resource("https://example.com/a.js");

        target.add_resource(Arc::clone(&r)).unwrap();

        assert!(target.has_resource(r.id()));
        assert!(r.target().is_none());
    }

    #[test]
    fn test_add_resource_duplicate() {
        let env = Environment::builder().build();
        let target = worker(&env, "w1");
        let r = resource("https://example.com/a.js");

        target.add_resource(Arc::clone(&r)).unwrap();
        let err = target.add_resource(Arc::clone(&r)).unwrap_err();

        assert!(matches!(err, Error::DuplicateEntity { .. }));
        assert_eq!(target.resource_count(), 1);
    }

    #[test]
    fn test_resource_lookups() {
        let env = Environment::builder().build();
        let target = worker(&env, "w1");
        target.add_resource(resource("https://example.com/a.js")).unwrap();
        target
            .add_resource(Arc::new(Resource::new("https://example.com/x", ResourceType::Fetch)))
            .unwrap();

        assert!(target.resource_for_url("https://example.com/a.js").is_some());
        assert!(target.resource_for_url("https://example.com/b.js").is_none());
        assert_eq!(target.resources_with_type(ResourceType::Fetch).len(), 1);
        assert_eq!(target.resources().len(), 2);
    }

    // ------------------------------------------------------------------------
    // adopt_resource
    // ------------------------------------------------------------------------

    #[test]
    fn test_adopt_sets_owner_before_notification() {
        let env = Environment::builder().build();
        let target = worker(&env, "w1");
        let r = resource("https://example.com/a.js");

        let owner_seen = Arc::new(Mutex::new(None));
        let seen = Arc::clone(&owner_seen);
        target.add_event_listener(TargetEventKind::ResourceAdded, move |event| {
            let owner = event.resource().and_then(|r| r.target_id());
            *seen.lock() = owner;
        });

        target.adopt_resource(Arc::clone(&r)).unwrap();

        assert_eq!(owner_seen.lock().clone(), Some(target.identifier().clone()));
        assert!(r.target().unwrap().ptr_eq(&target));
    }

    #[test]
    fn test_adopt_owned_by_other_live_target() {
        let env = Environment::builder().build();
        let first = worker(&env, "w1");
        let second = worker(&env, "w2");
        let r = resource("https://example.com/a.js");

        first.adopt_resource(Arc::clone(&r)).unwrap();
        let err = second.adopt_resource(Arc::clone(&r)).unwrap_err();

        assert!(matches!(err, Error::AlreadyAdopted { .. }));
        assert!(!second.has_resource(r.id()));
        assert!(r.target().unwrap().ptr_eq(&first));
    }

    #[test]
    fn test_adopt_twice_same_target() {
        let env = Environment::builder().build();
        let target = worker(&env, "w1");
        let r = resource("https://example.com/a.js");

        target.adopt_resource(Arc::clone(&r)).unwrap();
        let err = target.adopt_resource(Arc::clone(&r)).unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(target.resource_count(), 1);
    }

    #[test]
    fn test_adopt_after_owner_dropped() {
        let env = Environment::builder().build();
        let r = resource("https://example.com/a.js");

        let first = worker(&env, "w1");
        first.adopt_resource(Arc::clone(&r)).unwrap();
        drop(first);
        assert!(r.target().is_none());

        let second = worker(&env, "w2");
        second.adopt_resource(Arc::clone(&r)).unwrap();

        assert!(r.target().unwrap().ptr_eq(&second));
        assert_eq!(r.target_id(), Some(TargetId::new("w2")));
    }

    // ------------------------------------------------------------------------
    // add_script
    // ------------------------------------------------------------------------

    #[test]
    fn test_add_script() {
        let env = Environment::builder().build();
        let target = worker(&env, "w1");
        let script = Arc::new(Script::new(ScriptId::new("42")));

        target.add_script(Arc::clone(&script)).unwrap();

        assert!(target.has_script(script.id()));
        assert_eq!(target.extra_scripts().len(), 1);
    }

    #[test]
    fn test_add_script_rejects_resource() {
        let env = Environment::builder().build();
        let target = worker(&env, "w1");

        let notified = Arc::new(Mutex::new(0));
        let count = Arc::clone(&notified);
        target.add_event_listener(TargetEventKind::ScriptAdded, move |_| *count.lock() += 1);

        let err = target.add_script(resource("https://example.com/a.js")).unwrap_err();

        assert!(matches!(err, Error::InvalidType { .. }));
        assert_eq!(target.script_count(), 0);
        assert_eq!(*notified.lock(), 0);
    }

    // ------------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------------

    #[test]
    fn test_listener_filters_by_kind() {
        let env = Environment::builder().build();
        let target = worker(&env, "w1");

        let kinds = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&kinds);
        target.add_event_listener(TargetEventKind::ScriptAdded, move |e| seen.lock().push(e.kind()));

        target.add_resource(resource("https://example.com/a.js")).unwrap();
        target.add_script(Arc::new(Script::new(ScriptId::new("1")))).unwrap();

        assert_eq!(*kinds.lock(), [TargetEventKind::ScriptAdded]);
    }

    #[test]
    fn test_remove_event_listener() {
        let env = Environment::builder().build();
        let target = worker(&env, "w1");

        let count = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&count);
        let id = target.add_event_listener(TargetEventKind::ResourceAdded, move |_| *counter.lock() += 1);

        assert!(target.remove_event_listener(id));
        target.add_resource(resource("https://example.com/a.js")).unwrap();
        assert_eq!(*count.lock(), 0);
    }

    #[test]
    fn test_listener_may_reenter_target() {
        let env = Environment::builder().build();
        let target = worker(&env, "w1");

        let observed = Arc::new(Mutex::new(0));
        let seen = Arc::clone(&observed);
        let handle = target.clone();
        target.add_event_listener(TargetEventKind::ResourceAdded, move |_| {
            *seen.lock() = handle.resource_count();
        });

        target.add_resource(resource("https://example.com/a.js")).unwrap();
        assert_eq!(*observed.lock(), 1);
    }
}
