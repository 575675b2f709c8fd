//! # Sticker Grid
//!
//! Six `size × size` faces of colors, stored flat:
//!
//! ```text
//!   index = (face * size + row) * size + col
//!
//!   ┌──────┬──────┬───────┬───────┬──────┬────────┐
//!   │ Top  │ Left │ Front │ Right │ Back │ Bottom │   each size² cells, row-major
//!   └──────┴──────┴───────┴───────┴──────┴────────┘
//! ```
//!
//! Cells are atomic so that several rotations on distinct planes of one axis
//! can write through a shared reference at the same time. The coordinator's
//! mutex orders every admission and exit, so `Relaxed` is enough here: no
//! two admitted operations ever touch the same cell concurrently.

mod ring;
mod snapshot;

use std::sync::atomic::{AtomicU8, Ordering};

use concube_shared::{classify, Color, Face, GeometryError, GeometryResult, RotationRequest};

use self::ring::ring_for;
pub use self::snapshot::Snapshot;

/// The cube's stickers.
#[derive(Debug)]
pub struct Grid {
    size: usize,
    cells: Box<[AtomicU8]>,
}

impl Grid {
    /// Creates a solved grid.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidSize`] when `size` is zero.
    pub fn new(size: usize) -> GeometryResult<Self> {
        if size == 0 {
            return Err(GeometryError::InvalidSize(size));
        }
        let area = size * size;
        let cells = Face::ALL
            .iter()
            .flat_map(|&face| (0..area).map(move |_| AtomicU8::new(Color::solved(face) as u8)))
            .collect();
        Ok(Self { size, cells })
    }

    /// Number of layers along every axis.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Resets every face to its solved color.
    pub fn solve(&self) {
        let area = self.size * self.size;
        for (i, cell) in self.cells.iter().enumerate() {
            cell.store(Color::ALL[i / area] as u8, Ordering::Relaxed);
        }
    }

    /// Turns one layer a quarter turn clockwise, as seen from the request's
    /// face.
    ///
    /// Only the cells of the request's ring and, for outer layers, the
    /// adjacent face are written.
    ///
    /// # Errors
    ///
    /// Rejects requests whose layer does not fit this grid's size.
    pub fn apply(&self, request: &RotationRequest) -> GeometryResult<()> {
        let face = request.face();
        let layer = request.layer();
        classify(self.size, face, layer)?;

        self.cycle_ring(face, layer);
        if layer == 0 {
            self.turn_face_clockwise(face);
        } else if layer == self.size - 1 {
            self.turn_face_counter_clockwise(face.opposite());
        }
        Ok(())
    }

    /// Applies `requests` in order. Stops at the first rejected request.
    ///
    /// # Errors
    ///
    /// Same as [`apply`](Self::apply).
    pub fn apply_all(&self, requests: &[RotationRequest]) -> GeometryResult<()> {
        requests.iter().try_for_each(|request| self.apply(request))
    }

    /// Copies every cell, face by face.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let colors = (0..self.cells.len()).map(|i| self.color_at(i)).collect();
        Snapshot::from_cells(self.size, colors)
    }

    #[inline]
    fn index(&self, face: Face, row: usize, col: usize) -> usize {
        (face.index() * self.size + row) * self.size + col
    }

    /// Cells are only ever stored from `Color` discriminants (`new`, `solve`
    /// and permutations of existing values), so the fallback is unreachable.
    #[inline]
    fn color_at(&self, index: usize) -> Color {
        Color::from_u8(self.cells[index].load(Ordering::Relaxed)).unwrap_or(Color::White)
    }

    #[inline]
    fn load(&self, face: Face, row: usize, col: usize) -> u8 {
        self.cells[self.index(face, row, col)].load(Ordering::Relaxed)
    }

    #[inline]
    fn store(&self, face: Face, row: usize, col: usize, value: u8) {
        self.cells[self.index(face, row, col)].store(value, Ordering::Relaxed);
    }

    fn cycle_ring(&self, face: Face, layer: usize) {
        let size = self.size;
        let ring = ring_for(face);

        let strips: Vec<Vec<u8>> = ring
            .iter()
            .map(|strip| {
                (0..size)
                    .map(|k| {
                        let (row, col) = strip.coords(size, layer, k);
                        self.load(strip.face, row, col)
                    })
                    .collect()
            })
            .collect();

        for (i, strip) in ring.iter().enumerate() {
            let source = &strips[(i + 1) % ring.len()];
            for (k, &value) in source.iter().enumerate() {
                let (row, col) = strip.coords(size, layer, k);
                self.store(strip.face, row, col, value);
            }
        }
    }

    fn read_face(&self, face: Face) -> Vec<u8> {
        let area = self.size * self.size;
        let start = face.index() * area;
        self.cells[start..start + area]
            .iter()
            .map(|cell| cell.load(Ordering::Relaxed))
            .collect()
    }

    /// `new[r][c] = old[n-1-c][r]`
    fn turn_face_clockwise(&self, face: Face) {
        let n = self.size;
        let old = self.read_face(face);
        for row in 0..n {
            for col in 0..n {
                self.store(face, row, col, old[(n - 1 - col) * n + row]);
            }
        }
    }

    /// `new[r][c] = old[c][n-1-r]`
    fn turn_face_counter_clockwise(&self, face: Face) {
        let n = self.size;
        let old = self.read_face(face);
        for row in 0..n {
            for col in 0..n {
                self.store(face, row, col, old[col * n + (n - 1 - row)]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotated(size: usize, face: Face, layer: usize) -> String {
        let grid = Grid::new(size).unwrap();
        grid.apply(&RotationRequest::new(size, face, layer).unwrap())
            .unwrap();
        grid.snapshot().to_string()
    }

    #[test]
    fn test_new_grid_is_solved() {
        let grid = Grid::new(2).unwrap();
        let snapshot = grid.snapshot();
        assert!(snapshot.is_solved());
        assert_eq!(snapshot.to_string(), "000011112222333344445555");
        assert_eq!(Grid::new(0).unwrap_err(), GeometryError::InvalidSize(0));
    }

    #[test]
    fn test_outer_layer_rotations_from_solved() {
        let cases = [
            (
                Face::Top,
                "000000000222111111333222222444333333111444444555555555",
            ),
            (
                Face::Left,
                "400400400111111111022022022333333333445445445255255255",
            ),
            (
                Face::Front,
                "000000111115115115222222222033033033444444444333555555",
            ),
            (
                Face::Right,
                "002002002111111111225225225333333333044044044554554554",
            ),
            (
                Face::Back,
                "333000000011011011222222222335335335444444444555555111",
            ),
            (
                Face::Bottom,
                "000000000111111444222222111333333222444444333555555555",
            ),
        ];
        for (face, expected) in cases {
            assert_eq!(rotated(3, face, 0), expected, "{face} layer 0");
        }
    }

    #[test]
    fn test_face_turn_is_clockwise() {
        let grid = Grid::new(3).unwrap();
        // Mark the Front face's top-left corner by turning Left first.
        grid.apply(&RotationRequest::new(3, Face::Left, 0).unwrap())
            .unwrap();
        grid.apply(&RotationRequest::new(3, Face::Front, 0).unwrap())
            .unwrap();
        let snapshot = grid.snapshot();
        // The white column that Left pushed onto Front's column 0 is now
        // Front's row 0.
        assert_eq!(
            snapshot.face(Face::Front),
            &[
                Color::White,
                Color::White,
                Color::White,
                Color::Red,
                Color::Red,
                Color::Red,
                Color::Red,
                Color::Red,
                Color::Red,
            ]
        );
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        let size = 4;
        let grid = Grid::new(size).unwrap();
        // Scramble first so face turns are observable.
        for (face, layer) in [(Face::Front, 1), (Face::Top, 0), (Face::Right, 3)] {
            grid.apply(&RotationRequest::new(size, face, layer).unwrap())
                .unwrap();
        }
        let before = grid.snapshot();
        for face in Face::ALL {
            for layer in 0..size {
                let request = RotationRequest::new(size, face, layer).unwrap();
                grid.apply_all(&[request; 4]).unwrap();
                assert_eq!(grid.snapshot(), before, "{face} layer {layer}");
            }
        }
    }

    #[test]
    fn test_antagonist_undoes_rotation() {
        let size = 3;
        let grid = Grid::new(size).unwrap();
        grid.apply(&RotationRequest::new(size, Face::Back, 0).unwrap())
            .unwrap();
        let before = grid.snapshot();
        for face in Face::ALL {
            for layer in 0..size {
                let request = RotationRequest::new(size, face, layer).unwrap();
                grid.apply_all(&[request, request.antagonist(size).unwrap()])
                    .unwrap();
                assert_eq!(grid.snapshot(), before, "{face} layer {layer}");
            }
        }
    }

    #[test]
    fn test_single_cell_cube() {
        for face in Face::ALL {
            let text = rotated(1, face, 0);
            assert_eq!(text.len(), 6);
            let grid = Grid::new(1).unwrap();
            let request = RotationRequest::new(1, face, 0).unwrap();
            grid.apply_all(&[request; 4]).unwrap();
            assert!(grid.snapshot().is_solved());
        }
    }

    #[test]
    fn test_rejects_request_for_other_size() {
        let grid = Grid::new(2).unwrap();
        let request = RotationRequest::new(5, Face::Top, 4).unwrap();
        assert_eq!(
            grid.apply(&request),
            Err(GeometryError::LayerOutOfRange { layer: 4, size: 2 })
        );
        assert!(grid.snapshot().is_solved());
    }

    #[test]
    fn test_cells_always_hold_valid_colors() {
        let size = 4;
        let grid = Grid::new(size).unwrap();
        for face in Face::ALL {
            for layer in 0..size {
                grid.apply(&RotationRequest::new(size, face, layer).unwrap())
                    .unwrap();
                assert!(grid
                    .cells
                    .iter()
                    .all(|cell| Color::from_u8(cell.load(Ordering::Relaxed)).is_some()));
            }
        }
        grid.solve();
        assert!(grid
            .cells
            .iter()
            .all(|cell| Color::from_u8(cell.load(Ordering::Relaxed)).is_some()));
    }

    #[test]
    fn test_solve_resets() {
        let grid = Grid::new(3).unwrap();
        grid.apply(&RotationRequest::new(3, Face::Right, 1).unwrap())
            .unwrap();
        assert!(!grid.snapshot().is_solved());
        assert!(grid.snapshot().is_legal());
        grid.solve();
        assert!(grid.snapshot().is_solved());
    }
}
