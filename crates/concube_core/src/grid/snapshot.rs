//! Read-only copy of every sticker on the cube.

use std::fmt;

use concube_shared::{Color, Face, COLOR_COUNT, FACE_COUNT};

/// A deterministic, face-by-face, row-major copy of the grid.
///
/// `Display` renders it as `6 * size * size` ASCII digits, which is exactly
/// what [`Cube::show`](crate::Cube::show) returns.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot {
    size: usize,
    cells: Vec<Color>,
}

impl Snapshot {
    pub(crate) fn from_cells(size: usize, cells: Vec<Color>) -> Self {
        debug_assert_eq!(cells.len(), FACE_COUNT * size * size);
        Self { size, cells }
    }

    /// Number of layers along every axis.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Every sticker of one face, row-major.
    #[must_use]
    pub fn face(&self, face: Face) -> &[Color] {
        let area = self.size * self.size;
        let start = face.index() * area;
        &self.cells[start..start + area]
    }

    /// How many stickers of each color the cube carries.
    #[must_use]
    pub fn color_counts(&self) -> [usize; COLOR_COUNT] {
        let mut counts = [0; COLOR_COUNT];
        for color in &self.cells {
            counts[color.index()] += 1;
        }
        counts
    }

    /// Whether every color appears exactly `size²` times.
    ///
    /// Any sequence of whole rotations preserves this; a torn write does not.
    #[must_use]
    pub fn is_legal(&self) -> bool {
        let area = self.size * self.size;
        self.color_counts().iter().all(|&count| count == area)
    }

    /// Whether every face carries only its own solved color.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        Face::ALL.iter().all(|&face| {
            let color = Color::solved(face);
            self.face(face).iter().all(|&c| c == color)
        })
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = String::with_capacity(self.cells.len());
        rendered.extend(self.cells.iter().map(|c| c.digit()));
        f.write_str(&rendered)
    }
}
