//! The shell: a hollow cube built from a lattice of sub-cube cells, which turns as one
//! rigid group.

use arcstr::ArcStr;
use hashbrown::HashMap;

use crate::math::{Aab, CellCoordinate, FreeCoordinate, FreeRotation};
use crate::scene::{GroupNode, Scene, SceneId};

mod generate;
pub use generate::*;


/// Name of the [`GroupNode`] that every part of a [`Shell`] is attached to.
pub const SHELL_ROOT_NAME: &str = "multi-cube-root";

/// Name of the solid which fills the inside of a [`Shell`].
pub const CORE_BODY_NAME: &str = "mc-body";

/// Fraction of the lattice spacing occupied by each cell's solid, so that neighboring
/// cells show a seam.
pub(crate) const CELL_SOLID_SCALE: FreeCoordinate = 0.99;

/// A static, collidable cuboid.
///
/// Its bounds are given in the shell's own coordinates, before the shell's rotation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Solid {
    local_bounds: Aab,
}

impl Solid {
    pub(crate) fn new(local_bounds: Aab) -> Self {
        Self { local_bounds }
    }

    /// Bounds of this solid relative to the unrotated shell.
    pub fn local_bounds(&self) -> Aab {
        self.local_bounds
    }

    /// Axis-aligned bounds of this solid after the shell has been turned by `rotation`.
    pub fn world_bounds(&self, rotation: &FreeRotation) -> Aab {
        self.local_bounds.rotate_bounds(rotation)
    }
}

/// One lattice position on the outside of a [`Shell`].
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    coordinates: [CellCoordinate; 3],
    name: ArcStr,
    corner: bool,
    present: bool,
    solid: Option<Solid>,
}

impl Cell {
    /// Lattice coordinates of this cell, each in `0..cell_count`.
    pub fn coordinates(&self) -> [CellCoordinate; 3] {
        self.coordinates
    }

    /// The name of this cell, `"x,y,z"`.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Whether every coordinate of this cell is at the edge of the lattice.
    /// Corner cells are always present when generated.
    pub fn is_corner(&self) -> bool {
        self.corner
    }

    /// Whether this cell currently has a collidable solid.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// The solid of this cell, if it has ever been present.
    ///
    /// Use [`Cell::is_present()`] to find out whether the solid is in effect.
    pub fn solid(&self) -> Option<&Solid> {
        self.solid.as_ref()
    }
}

/// The generated shell: its cells, the core body filling its interior, and the group
/// node they are all attached to.
///
/// Construct with [`ShellGenerator::generate()`].
#[derive(Clone, Debug)]
pub struct Shell {
    params: ShellParams,
    /// In generation order: z outermost, then y, then x.
    cells: Vec<Cell>,
    by_name: HashMap<ArcStr, usize>,
    core_body: Solid,
    root: GroupNode,
    bound_to: Option<SceneId>,
}

impl Shell {
    /// The parameters this shell was generated from.
    pub fn params(&self) -> &ShellParams {
        &self.params
    }

    /// All generated cells, present or not, in generation order (z outermost, then y,
    /// then x).
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Looks up a cell by its `"x,y,z"` name.
    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.by_name.get(name).map(|&index| &self.cells[index])
    }

    /// Number of cells which currently have a solid in effect.
    pub fn present_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.present).count()
    }

    /// The solid which fills the interior of the shell. It is always present.
    pub fn core_body(&self) -> &Solid {
        &self.core_body
    }

    /// The group node every solid of the shell is attached to.
    pub fn root(&self) -> &GroupNode {
        &self.root
    }

    /// Current rotation of the whole shell about the world origin.
    pub fn rotation(&self) -> FreeRotation {
        self.root.rotation()
    }

    pub(crate) fn root_mut(&mut self) -> &mut GroupNode {
        &mut self.root
    }

    /// Returns whether `other` touches or overlaps the core body or any present cell,
    /// taking the shell's current rotation into account.
    pub fn intersects(&self, other: Aab) -> bool {
        let rotation = self.root.rotation();
        core::iter::once(&self.core_body)
            .chain(
                self.cells
                    .iter()
                    .filter(|cell| cell.present)
                    .filter_map(|cell| cell.solid.as_ref()),
            )
            .any(|solid| solid.world_bounds(&rotation).intersects(other))
    }

    /// Enables or disables the cell with the given name.
    ///
    /// Enabling a cell which was never present creates its solid.
    /// Returns the previous presence of the cell.
    pub fn set_present(&mut self, name: &str, present: bool) -> Result<bool, ShellError> {
        let &index = self
            .by_name
            .get(name)
            .ok_or_else(|| ShellError::UnknownCell(ArcStr::from(name)))?;
        let params = self.params;
        let cell = &mut self.cells[index];
        let was_present = cell.present;
        if present && cell.solid.is_none() {
            cell.solid = Some(Solid::new(params.cell_bounds(cell.coordinates)));
        }
        cell.present = present;
        if was_present != present {
            log::debug!("cell {name} present: {present}");
        }
        Ok(was_present)
    }

    /// Attaches the shell's root node to `scene`.
    pub fn bind(&mut self, scene: &mut Scene) -> Result<(), ShellError> {
        if let Some(bound) = self.bound_to {
            return Err(ShellError::AlreadyBound(bound));
        }
        scene.add_root(self.root.name().clone());
        self.bound_to = Some(scene.id());
        Ok(())
    }

    /// Moves the shell's root node from `from` to `to`, keeping all generated geometry.
    pub fn rebind(&mut self, from: &mut Scene, to: &mut Scene) -> Result<(), ShellError> {
        let bound = self.bound_scene()?;
        if bound != from.id() {
            return Err(ShellError::WrongScene {
                bound,
                given: from.id(),
            });
        }
        from.remove_root(self.root.name());
        to.add_root(self.root.name().clone());
        self.bound_to = Some(to.id());
        log::debug!("shell rebound from {:?} to {:?}", from.id(), to.id());
        Ok(())
    }

    /// Returns the scene the shell is currently attached to.
    pub fn bound_scene(&self) -> Result<SceneId, ShellError> {
        self.bound_to.ok_or(ShellError::NotInitialized)
    }
}

/// Errors from generating or manipulating a [`Shell`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ShellError {
    /// Fewer than three cells per edge leaves no room for non-corner cells.
    #[error("cell count must be at least 3, but was {0}")]
    CellCountTooSmall(CellCoordinate),
    /// An even number of cells per edge would leave no cell at the center of each face.
    #[error("cell count must be odd, but was {0}")]
    EvenCellCount(CellCoordinate),
    /// The total size is zero, negative, or not finite.
    #[error("total size must be finite and positive, but was {0}")]
    InvalidTotalSize(FreeCoordinate),
    /// The probability of keeping a cell is outside `0.0..=1.0`.
    #[error("keep probability must be between 0 and 1, but was {0}")]
    InvalidKeepProbability(f64),
    /// The shell has not been attached to any scene.
    #[error("shell is not bound to a scene")]
    NotInitialized,
    /// The shell was asked to leave a scene it is not attached to.
    #[error("shell is bound to scene {bound:?}, not {given:?}")]
    WrongScene {
        /// The scene the shell is attached to.
        bound: SceneId,
        /// The scene that was specified.
        given: SceneId,
    },
    /// The shell is already attached to a scene; use [`Shell::rebind()`] to move it.
    #[error("shell is already bound to scene {0:?}")]
    AlreadyBound(SceneId),
    /// There is no cell with this name.
    #[error("no cell named {0:?}")]
    UnknownCell(ArcStr),
}
