//! Faces, rotation axes and sticker colors.
//!
//! The numeric order of every enum here is part of the external format:
//! `show` serializes faces in [`Face::ALL`] order and colors as the digit of
//! their index.

use std::fmt;

use crate::error::{GeometryError, GeometryResult};

/// Number of faces on a cube.
pub const FACE_COUNT: usize = 6;

/// Number of rotation axes.
pub const AXIS_COUNT: usize = 3;

/// Number of sticker colors.
pub const COLOR_COUNT: usize = 6;

/// One of the six faces of the cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Face {
    /// Upper face.
    Top = 0,
    /// Left face.
    Left = 1,
    /// Face pointing at the viewer.
    Front = 2,
    /// Right face.
    Right = 3,
    /// Face pointing away from the viewer.
    Back = 4,
    /// Lower face.
    Bottom = 5,
}

impl Face {
    /// All faces in serialization order.
    pub const ALL: [Self; FACE_COUNT] = [
        Self::Top,
        Self::Left,
        Self::Front,
        Self::Right,
        Self::Back,
        Self::Bottom,
    ];

    /// Looks up a face by its numeric index.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidFace`] for indices outside `0..6`.
    pub fn from_index(index: usize) -> GeometryResult<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(GeometryError::InvalidFace(index))
    }

    /// Numeric index of this face.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The face on the other side of the cube.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Left => Self::Right,
            Self::Front => Self::Back,
            Self::Right => Self::Left,
            Self::Back => Self::Front,
            Self::Bottom => Self::Top,
        }
    }

    /// Axis this face rotates around.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Top | Self::Bottom => Axis::TopBottom,
            Self::Left | Self::Right => Axis::LeftRight,
            Self::Front | Self::Back => Axis::FrontBack,
        }
    }

    /// Whether this face names its axis's planes directly (plane == layer).
    ///
    /// Top, Left and Front are primary; their opposites count layers from
    /// the far side.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Top | Self::Left | Self::Front)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Left => "left",
            Self::Front => "front",
            Self::Right => "right",
            Self::Back => "back",
            Self::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Rotation axis shared by a face and its opposite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Axis {
    /// Rotations of Top / Bottom.
    TopBottom = 0,
    /// Rotations of Left / Right.
    LeftRight = 1,
    /// Rotations of Front / Back.
    FrontBack = 2,
}

impl Axis {
    /// All axes in round-robin order.
    pub const ALL: [Self; AXIS_COUNT] = [Self::TopBottom, Self::LeftRight, Self::FrontBack];

    /// Numeric index of this axis.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The axis after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % AXIS_COUNT]
    }
}

/// Sticker color. In the solved state face `i` is entirely color `i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Color {
    /// Top in the solved state.
    White = 0,
    /// Left in the solved state.
    Green = 1,
    /// Front in the solved state.
    Red = 2,
    /// Right in the solved state.
    Blue = 3,
    /// Back in the solved state.
    Orange = 4,
    /// Bottom in the solved state.
    Yellow = 5,
}

impl Color {
    /// All colors in index order.
    pub const ALL: [Self; COLOR_COUNT] = [
        Self::White,
        Self::Green,
        Self::Red,
        Self::Blue,
        Self::Orange,
        Self::Yellow,
    ];

    /// Color of `face` in the solved state.
    #[must_use]
    pub const fn solved(face: Face) -> Self {
        Self::ALL[face.index()]
    }

    /// Decodes a raw color byte. Values outside `0..6` are rejected.
    #[must_use]
    pub const fn from_u8(raw: u8) -> Option<Self> {
        if (raw as usize) < COLOR_COUNT {
            Some(Self::ALL[raw as usize])
        } else {
            None
        }
    }

    /// Numeric index of this color.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// ASCII digit used by the textual rendering.
    #[inline]
    #[must_use]
    pub const fn digit(self) -> char {
        (b'0' + self as u8) as char
    }
}
