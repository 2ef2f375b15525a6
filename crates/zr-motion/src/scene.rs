//! Engine-side collaborators.
//!
//! The rendering engine owns every transform.  The scheduler reads waypoint
//! and entity transforms and writes entity transforms through
//! [`SceneTransforms`], and asks [`EntityFactory`] for a new entity the first
//! time it sees a mover id.  Both calls are synchronous and must not block.

use std::sync::Arc;

use zr_core::{EntityId, MoverId, Transform, WaypointId};

use crate::MotionResult;

/// Read/write access to world transforms.
pub trait SceneTransforms: Send + Sync {
    /// World transform of a registered waypoint.
    fn waypoint_transform(&self, waypoint: WaypointId) -> Transform;

    /// Current world transform of a mobile entity.
    fn entity_transform(&self, entity: EntityId) -> Transform;

    /// Overwrite the world transform of a mobile entity.
    fn set_entity_transform(&self, entity: EntityId, transform: Transform);
}

/// Instantiates the renderable entity for a mover.
pub trait EntityFactory: Send + Sync {
    /// Create an entity and tag it with `mover`.
    ///
    /// # Errors
    ///
    /// Implementations return [`MotionError::MissingMarker`] when the
    /// instantiated entity has nothing to carry the tag, and
    /// `CoreError::MissingDependency` when they cannot instantiate at all.
    /// The scheduler does not register a mover on error.
    ///
    /// [`MotionError::MissingMarker`]: crate::MotionError::MissingMarker
    fn create_entity(&self, mover: MoverId) -> MotionResult<EntityId>;
}

impl<T: SceneTransforms + ?Sized> SceneTransforms for Arc<T> {
    fn waypoint_transform(&self, waypoint: WaypointId) -> Transform {
        (**self).waypoint_transform(waypoint)
    }

    fn entity_transform(&self, entity: EntityId) -> Transform {
        (**self).entity_transform(entity)
    }

    fn set_entity_transform(&self, entity: EntityId, transform: Transform) {
        (**self).set_entity_transform(entity, transform)
    }
}

impl<T: EntityFactory + ?Sized> EntityFactory for Arc<T> {
    fn create_entity(&self, mover: MoverId) -> MotionResult<EntityId> {
        (**self).create_entity(mover)
    }
}
