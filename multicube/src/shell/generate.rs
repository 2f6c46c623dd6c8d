use arcstr::ArcStr;
use hashbrown::HashMap;
use itertools::iproduct;
use rand::Rng;

use crate::math::{Aab, CellCoordinate, FreeCoordinate, FreePoint};
use crate::scene::GroupNode;
use crate::shell::{
    CELL_SOLID_SCALE, CORE_BODY_NAME, Cell, SHELL_ROOT_NAME, Shell, ShellError, Solid,
};

/// Thickness, in cell edges, of the gap between the outer surface of the shell and the
/// core body: one layer of cells on each side, plus a little slack.
const CORE_BODY_INSET: FreeCoordinate = 2.2;

/// Parameters for [`ShellGenerator::generate()`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[expect(clippy::exhaustive_structs)]
pub struct ShellParams {
    /// Number of cells along each edge of the shell. Must be odd and at least 3.
    pub cell_count: CellCoordinate,
    /// Edge length of the whole shell.
    pub total_size: FreeCoordinate,
    /// Probability that each outer cell which is not a corner is present.
    pub keep_probability: f64,
}

impl Default for ShellParams {
    fn default() -> Self {
        Self {
            cell_count: 5,
            total_size: 3.0,
            keep_probability: 0.3,
        }
    }
}

impl ShellParams {
    /// Checks the parameters without generating anything.
    pub fn validate(&self) -> Result<(), ShellError> {
        let &Self {
            cell_count,
            total_size,
            keep_probability,
        } = self;
        if cell_count < 3 {
            return Err(ShellError::CellCountTooSmall(cell_count));
        }
        if cell_count.is_multiple_of(2) {
            return Err(ShellError::EvenCellCount(cell_count));
        }
        if !(total_size.is_finite() && total_size > 0.0) {
            return Err(ShellError::InvalidTotalSize(total_size));
        }
        if !(0.0..=1.0).contains(&keep_probability) {
            return Err(ShellError::InvalidKeepProbability(keep_probability));
        }
        Ok(())
    }

    /// Lattice spacing, which is also the edge length of the cells before shrinking.
    pub fn cube_edge(&self) -> FreeCoordinate {
        self.total_size / FreeCoordinate::from(self.cell_count)
    }

    /// Bounds of the solid for the cell at `coordinates`, in shell coordinates.
    pub(crate) fn cell_bounds(&self, coordinates: [CellCoordinate; 3]) -> Aab {
        let edge = self.cube_edge();
        let offset = FreeCoordinate::from(self.cell_count - 1) / 2.0;
        let [x, y, z] = coordinates.map(|c| (FreeCoordinate::from(c) - offset) * edge);
        Aab::centered_cube(FreePoint::new(x, y, z), edge * CELL_SOLID_SCALE)
    }

    /// Bounds of the core body, which fills the interior of the shell.
    fn core_body_bounds(&self) -> Aab {
        Aab::centered_cube(
            FreePoint::origin(),
            self.total_size - CORE_BODY_INSET * self.cube_edge(),
        )
    }
}

/// Builds [`Shell`]s, choosing which cells are present.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct ShellGenerator;

impl ShellGenerator {
    /// Generates a shell.
    ///
    /// Only cells on the outer layer of the lattice are generated. Corner cells are
    /// always present; every other outer cell is present if a single
    /// `random_bool(keep_probability)` draw from `rng` succeeds. Draws happen in
    /// generation order (z outermost, then y, then x), so a seeded `rng` always produces
    /// the same shell.
    ///
    /// The parameters are checked before anything is built.
    pub fn generate<R: Rng + ?Sized>(
        params: ShellParams,
        rng: &mut R,
    ) -> Result<Shell, ShellError> {
        params.validate()?;

        let n = params.cell_count;
        let last = n - 1;
        let mut cells = Vec::new();
        let mut by_name = HashMap::new();

        for (z, y, x) in iproduct!(0..n, 0..n, 0..n) {
            let coordinates = [x, y, z];
            let on_edge = coordinates.map(|c| c == 0 || c == last);
            if !on_edge.contains(&true) {
                // Interior cells are never generated.
                continue;
            }
            let corner = !on_edge.contains(&false);
            let present = corner || rng.random_bool(params.keep_probability);

            let name = arcstr::format!("{x},{y},{z}");
            by_name.insert(name.clone(), cells.len());
            cells.push(Cell {
                coordinates,
                name,
                corner,
                present,
                solid: present.then(|| Solid::new(params.cell_bounds(coordinates))),
            });
        }

        let shell = Shell {
            params,
            cells,
            by_name,
            core_body: Solid::new(params.core_body_bounds()),
            root: GroupNode::new(ArcStr::from(SHELL_ROOT_NAME)),
            bound_to: None,
        };
        log::debug!(
            "generated shell of {n}³ cells: {present} of {outer} outer cells present, \
            {CORE_BODY_NAME} edge {core_edge:.3}",
            present = shell.present_cell_count(),
            outer = shell.cells.len(),
            core_edge = shell.core_body.local_bounds().size().width,
        );
        Ok(shell)
    }
}
