//! Owned board arena used by the world crate.

use track_builder_core::{
    BoardView, Cell, CellCoord, CellKind, PieceId, PlacementError, TrackGenerator, TrackPiece,
    TrackShape,
};

/// Dense, row-major grid of cells addressed by `(column, row)`.
///
/// The board is square. The start cell sits at `(0, 0)` and holds a
/// horizontal piece from creation; the end cell sits in the opposite corner.
/// Cell kinds never change once the board exists. The only mutation is
/// attaching a piece to an empty or bonus cell.
#[derive(Clone, Debug)]
pub(crate) struct Board {
    side: u32,
    cells: Vec<Cell>,
}

impl Board {
    /// Lays out a fresh board, asking the generator for every interior cell.
    pub(crate) fn generate(side: u32, level: u32, generator: &mut dyn TrackGenerator) -> Self {
        let last = side.saturating_sub(1);
        let capacity_u64 = u64::from(side) * u64::from(side);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut cells = Vec::with_capacity(capacity);

        for row in 0..side {
            for column in 0..side {
                let coord = CellCoord::new(column, row);
                let cell = if column == 0 && row == 0 {
                    Cell::with_piece(
                        CellKind::Start,
                        TrackPiece::new(PieceId::START, TrackShape::Horizontal),
                    )
                } else if column == last && row == last {
                    Cell::new(CellKind::End)
                } else {
                    Cell::new(generator.terrain(coord, level).into())
                };
                cells.push(cell);
            }
        }

        Self { side, cells }
    }

    /// Borrows a read-only view of the board.
    pub(crate) fn view(&self) -> BoardView<'_> {
        BoardView::new(&self.cells, self.side)
    }

    /// Attaches a piece to the cell after checking the placement rules.
    pub(crate) fn place(&mut self, cell: CellCoord, piece: TrackPiece) -> Result<(), PlacementError> {
        if let Some(error) = self.view().placement_error(cell) {
            return Err(error);
        }

        let index = self.index(cell).ok_or(PlacementError::OutOfBounds)?;
        let slot = self
            .cells
            .get_mut(index)
            .ok_or(PlacementError::OutOfBounds)?;
        *slot = Cell::with_piece(slot.kind(), piece);
        Ok(())
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.side && cell.row() < self.side {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.side).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
