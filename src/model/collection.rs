//! Ordered, type-checked entity collections.
//!
//! A [`Collection`] holds [`Entity`] values and rejects kinds its
//! [`TypeVerifier`] does not accept. Membership is unique per
//! [`EntityKey`]; iteration follows insertion order.
//!
//! # Example
//!
//! ```ignore
//! let mut scripts = Collection::new(TypeVerifier::Script);
//! scripts.add(script.clone())?;
//!
//! // Rejected: wrong kind
//! assert!(scripts.add(resource).is_err());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{Error, Result};
use crate::identifiers::{FrameId, ResourceId, ScriptId};

use super::{Frame, Resource, ResourceType, Script};

// ============================================================================
// EntityKind
// ============================================================================

/// Kind of a collection entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A [`Frame`].
    Frame,
    /// A [`Resource`].
    Resource,
    /// A [`Script`].
    Script,
}

impl EntityKind {
    /// Returns the kind name.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Frame => "frame",
            Self::Resource => "resource",
            Self::Script => "script",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TypeVerifier
// ============================================================================

/// Restricts which entity kinds a collection accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeVerifier {
    /// Accepts every kind.
    #[default]
    Any,
    /// Frames only.
    Frame,
    /// Resources only.
    Resource,
    /// Scripts only.
    Script,
}

impl TypeVerifier {
    /// Returns `true` if this verifier accepts `kind`.
    #[inline]
    #[must_use]
    pub const fn accepts(&self, kind: EntityKind) -> bool {
        matches!(
            (self, kind),
            (Self::Any, _)
                | (Self::Frame, EntityKind::Frame)
                | (Self::Resource, EntityKind::Resource)
                | (Self::Script, EntityKind::Script)
        )
    }
}

impl fmt::Display for TypeVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Any => "any entity",
            Self::Frame => "frames",
            Self::Resource => "resources",
            Self::Script => "scripts",
        })
    }
}

// ============================================================================
// Entity
// ============================================================================

/// Identity key of an entity within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    /// Frame identity.
    Frame(FrameId),
    /// Resource identity.
    Resource(ResourceId),
    /// Script identity.
    Script(ScriptId),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frame(id) => write!(f, "{id}"),
            Self::Resource(id) => write!(f, "{id}"),
            Self::Script(id) => write!(f, "{id}"),
        }
    }
}

/// A value storable in a [`Collection`].
#[derive(Debug, Clone)]
pub enum Entity {
    /// A frame.
    Frame(Arc<Frame>),
    /// A resource.
    Resource(Arc<Resource>),
    /// A script.
    Script(Arc<Script>),
}

impl Entity {
    /// Returns the entity kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Frame(_) => EntityKind::Frame,
            Self::Resource(_) => EntityKind::Resource,
            Self::Script(_) => EntityKind::Script,
        }
    }

    /// Returns the identity key.
    #[must_use]
    pub fn key(&self) -> EntityKey {
        match self {
            Self::Frame(frame) => EntityKey::Frame(frame.id().clone()),
            Self::Resource(resource) => EntityKey::Resource(resource.id()),
            Self::Script(script) => EntityKey::Script(script.id().clone()),
        }
    }

    /// Returns the frame, if this is one.
    #[inline]
    #[must_use]
    pub fn as_frame(&self) -> Option<&Arc<Frame>> {
        match self {
            Self::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    /// Returns the resource, if this is one.
    #[inline]
    #[must_use]
    pub fn as_resource(&self) -> Option<&Arc<Resource>> {
        match self {
            Self::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Returns the script, if this is one.
    #[inline]
    #[must_use]
    pub fn as_script(&self) -> Option<&Arc<Script>> {
        match self {
            Self::Script(script) => Some(script),
            _ => None,
        }
    }
}

impl From<Arc<Frame>> for Entity {
    fn from(frame: Arc<Frame>) -> Self {
        Self::Frame(frame)
    }
}

impl From<Arc<Resource>> for Entity {
    fn from(resource: Arc<Resource>) -> Self {
        Self::Resource(resource)
    }
}

impl From<Arc<Script>> for Entity {
    fn from(script: Arc<Script>) -> Self {
        Self::Script(script)
    }
}

// ============================================================================
// Collection
// ============================================================================

/// Ordered container of unique, type-checked entities.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    verifier: TypeVerifier,
    items: Vec<Entity>,
    keys: FxHashSet<EntityKey>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(verifier: TypeVerifier) -> Self {
        Self {
            verifier,
            items: Vec::new(),
            keys: FxHashSet::default(),
        }
    }

    /// Returns the type verifier.
    #[inline]
    #[must_use]
    pub fn verifier(&self) -> TypeVerifier {
        self.verifier
    }

    /// Adds an entity.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidType`] if the verifier rejects the entity kind
    /// - [`Error::DuplicateEntity`] if an entity with the same key is present
    ///
    /// The collection is unchanged on error.
    pub fn add(&mut self, entity: impl Into<Entity>) -> Result<()> {
        let entity = entity.into();
        let kind = entity.kind();

        if !self.verifier.accepts(kind) {
            return Err(Error::invalid_type(self.verifier, kind));
        }

        let key = entity.key();
        if self.keys.contains(&key) {
            return Err(Error::duplicate(kind, key.to_string()));
        }

        self.keys.insert(key);
        self.items.push(entity);
        Ok(())
    }

    /// Removes the entity with `key`, returning it.
    pub fn remove(&mut self, key: &EntityKey) -> Option<Entity> {
        if !self.keys.remove(key) {
            return None;
        }
        let index = self.items.iter().position(|item| item.key() == *key)?;
        Some(self.items.remove(index))
    }

    /// Returns `true` if an entity with `key` is present.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &EntityKey) -> bool {
        self.keys.contains(key)
    }

    /// Returns the entity with `key`.
    #[must_use]
    pub fn get(&self, key: &EntityKey) -> Option<&Entity> {
        if !self.contains(key) {
            return None;
        }
        self.items.iter().find(|item| item.key() == *key)
    }

    /// Returns the number of entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.items.iter()
    }

    /// Iterates contained frames.
    pub fn frames(&self) -> impl Iterator<Item = &Arc<Frame>> {
        self.items.iter().filter_map(Entity::as_frame)
    }

    /// Iterates contained resources.
    pub fn resources(&self) -> impl Iterator<Item = &Arc<Resource>> {
        self.items.iter().filter_map(Entity::as_resource)
    }

    /// Iterates contained scripts.
    pub fn scripts(&self) -> impl Iterator<Item = &Arc<Script>> {
        self.items.iter().filter_map(Entity::as_script)
    }

    /// Removes every entity.
    pub fn clear(&mut self) {
        self.items.clear();
        self.keys.clear();
    }
}

// ============================================================================
// ResourceCollection
// ============================================================================

/// Resource-only collection with URL lookup.
#[derive(Debug, Clone)]
pub struct ResourceCollection {
    items: Collection,
    /// First resource registered per URL.
    by_url: FxHashMap<String, Arc<Resource>>,
}

impl Default for ResourceCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceCollection {
    /// Creates an empty resource collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Collection::new(TypeVerifier::Resource),
            by_url: FxHashMap::default(),
        }
    }

    /// Adds a resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEntity`] if the resource is already present.
    pub fn add(&mut self, resource: Arc<Resource>) -> Result<()> {
        self.items.add(Arc::clone(&resource))?;
        self.by_url
            .entry(resource.url().to_string())
            .or_insert(resource);
        Ok(())
    }

    /// Removes a resource by identity.
    pub fn remove(&mut self, id: ResourceId) -> Option<Arc<Resource>> {
        let removed = self
            .items
            .remove(&EntityKey::Resource(id))?
            .as_resource()
            .cloned()?;

        if self
            .by_url
            .get(removed.url())
            .is_some_and(|indexed| indexed.id() == id)
        {
            self.by_url.remove(removed.url());
            if let Some(next) = self.items.resources().find(|r| r.url() == removed.url()) {
                self.by_url
                    .insert(next.url().to_string(), Arc::clone(next));
            }
        }

        Some(removed)
    }

    /// Returns `true` if the resource is present.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ResourceId) -> bool {
        self.items.contains(&EntityKey::Resource(id))
    }

    /// Returns the resource registered for `url`.
    #[must_use]
    pub fn resource_for_url(&self, url: &str) -> Option<&Arc<Resource>> {
        self.by_url.get(url)
    }

    /// Returns all resources of the given type.
    #[must_use]
    pub fn resources_with_type(&self, resource_type: ResourceType) -> Vec<Arc<Resource>> {
        self.items
            .resources()
            .filter(|r| r.resource_type() == resource_type)
            .cloned()
            .collect()
    }

    /// Returns the number of resources.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates resources in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Resource>> {
        self.items.resources()
    }
}

// ============================================================================
// Tests
// ============================================================================
