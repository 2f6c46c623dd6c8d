//! The small part of a host scene graph that the simulation needs: rotatable group
//! nodes, and a registry of the root nodes attached to a scene.

use core::num::NonZeroU64;
use core::sync::atomic::{AtomicU64, Ordering::Relaxed};

use arcstr::ArcStr;
use hashbrown::HashSet;
use manyfmt::Refmt as _;

use crate::math::{FreeRotation, snap_to_right_angles};
use crate::util::ConciseDebug;

/// Name of the [`GroupNode`] which carries the backdrop (skybox) of a [`Game`](crate::game::Game).
pub const BACKDROP_NODE_NAME: &str = "skybox";

/// A transform node which rotates everything attached to it about the world origin.
#[derive(Clone, PartialEq)]
pub struct GroupNode {
    name: ArcStr,
    rotation: FreeRotation,
}

impl GroupNode {
    /// Constructs a node with the identity rotation.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            rotation: FreeRotation::identity(),
        }
    }

    /// Returns the name this node is registered under in a [`Scene`].
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Returns the accumulated rotation of this node.
    pub fn rotation(&self) -> FreeRotation {
        self.rotation
    }

    /// Applies `rotation` after the rotation this node already has.
    pub fn rotate(&mut self, rotation: &FreeRotation) {
        self.rotation = self.rotation.then(rotation);
    }

    /// Removes accumulated rounding error, assuming the node has been turned only by
    /// whole quarter turns.
    pub fn snap_to_right_angles(&mut self) {
        self.rotation = snap_to_right_angles(&self.rotation);
    }
}

impl core::fmt::Debug for GroupNode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GroupNode")
            .field("name", &self.name)
            .field("rotation", &self.rotation.refmt(&ConciseDebug))
            .finish()
    }
}

/// Identifies a [`Scene`], so that attempts to detach nodes from the wrong scene can be
/// detected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SceneId(NonZeroU64);

impl SceneId {
    fn new() -> Self {
        static SCENE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

        let id = SCENE_ID_COUNTER
            .fetch_update(Relaxed, Relaxed, |counter| counter.checked_add(1))
            .expect("scene id overflow");
        Self(NonZeroU64::new(id).expect("scene ids start at 1"))
    }
}

/// The host scene that root [`GroupNode`]s are attached to.
///
/// Only the names of the attached roots are recorded; drawing them is the host's business.
#[derive(Debug)]
pub struct Scene {
    id: SceneId,
    roots: HashSet<ArcStr>,
}

impl Scene {
    /// Creates an empty scene with a fresh [`SceneId`].
    #[expect(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            id: SceneId::new(),
            roots: HashSet::new(),
        }
    }

    /// Returns the identity of this scene.
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Attaches a root node by name. Returns false if it was already attached.
    pub fn add_root(&mut self, name: ArcStr) -> bool {
        self.roots.insert(name)
    }

    /// Detaches a root node by name. Returns false if it was not attached.
    pub fn remove_root(&mut self, name: &str) -> bool {
        self.roots.remove(name)
    }

    /// Returns whether a root node with this name is attached.
    pub fn contains_root(&self, name: &str) -> bool {
        self.roots.contains(name)
    }

    /// Iterates over the names of the attached root nodes, in no particular order.
    pub fn roots(&self) -> impl Iterator<Item = &ArcStr> + '_ {
        self.roots.iter()
    }
}
