//! Ring permutation table.
//!
//! Turning a layer moves four strips of `size` cells around the side faces.
//! Each face's entry lists the strips in cycle order: strip `i` receives the
//! old contents of strip `i + 1`, and strip 3 receives strip 0.
//!
//! ```text
//!   Top, layer L:   Left.row[L] <- Front.row[L] <- Right.row[L] <- Back.row[L] <- Left
//! ```
//!
//! A strip is read along its row or column; `reversed` strips are read from
//! the far end, which is how the Back face's mirrored coordinates line up
//! with the rest of the ring.

use concube_shared::{Face, FACE_COUNT};

use self::Line::{Column, Row};
use self::Offset::{Layer, Mirror};

/// Whether a strip runs along a row or a column of its face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Line {
    Row,
    Column,
}

/// Which row/column of the face the strip occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Offset {
    /// Index equals the turned layer.
    Layer,
    /// Index equals `size - 1 - layer`.
    Mirror,
}

/// One quarter of a ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Strip {
    pub face: Face,
    pub line: Line,
    pub offset: Offset,
    pub reversed: bool,
}

impl Strip {
    const fn new(face: Face, line: Line, offset: Offset, reversed: bool) -> Self {
        Self {
            face,
            line,
            offset,
            reversed,
        }
    }

    /// Row/column index of this strip for the given layer.
    #[inline]
    pub fn line_index(&self, size: usize, layer: usize) -> usize {
        match self.offset {
            Offset::Layer => layer,
            Offset::Mirror => size - 1 - layer,
        }
    }

    /// `(row, col)` of the `k`-th cell along the strip.
    #[inline]
    pub fn coords(&self, size: usize, layer: usize, k: usize) -> (usize, usize) {
        let line = self.line_index(size, layer);
        let along = if self.reversed { size - 1 - k } else { k };
        match self.line {
            Line::Row => (line, along),
            Line::Column => (along, line),
        }
    }
}

/// Ring cycles indexed by [`Face::index`].
pub(crate) const RING_TABLE: [[Strip; 4]; FACE_COUNT] = [
    // Top
    [
        Strip::new(Face::Left, Row, Layer, false),
        Strip::new(Face::Front, Row, Layer, false),
        Strip::new(Face::Right, Row, Layer, false),
        Strip::new(Face::Back, Row, Layer, false),
    ],
    // Left
    [
        Strip::new(Face::Bottom, Column, Layer, false),
        Strip::new(Face::Front, Column, Layer, false),
        Strip::new(Face::Top, Column, Layer, false),
        Strip::new(Face::Back, Column, Mirror, true),
    ],
    // Front
    [
        Strip::new(Face::Left, Column, Mirror, false),
        Strip::new(Face::Bottom, Row, Layer, false),
        Strip::new(Face::Right, Column, Layer, true),
        Strip::new(Face::Top, Row, Mirror, true),
    ],
    // Right
    [
        Strip::new(Face::Top, Column, Mirror, false),
        Strip::new(Face::Front, Column, Mirror, false),
        Strip::new(Face::Bottom, Column, Mirror, false),
        Strip::new(Face::Back, Column, Layer, true),
    ],
    // Back
    [
        Strip::new(Face::Bottom, Row, Mirror, false),
        Strip::new(Face::Left, Column, Layer, false),
        Strip::new(Face::Top, Row, Layer, true),
        Strip::new(Face::Right, Column, Mirror, true),
    ],
    // Bottom
    [
        Strip::new(Face::Left, Row, Mirror, false),
        Strip::new(Face::Back, Row, Mirror, false),
        Strip::new(Face::Right, Row, Mirror, false),
        Strip::new(Face::Front, Row, Mirror, false),
    ],
];

/// The ring cycle turned by `face`.
#[inline]
pub(crate) fn ring_for(face: Face) -> &'static [Strip; 4] {
    &RING_TABLE[face.index()]
}
