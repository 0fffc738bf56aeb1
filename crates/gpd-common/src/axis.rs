//! Axis identifiers and the selected slice position.

use serde::Serialize;
use std::fmt;

/// An axis of the GPD sample grid.
///
/// The four named axes follow the on-disk storage order of `gpd_4d.bin`:
/// `x`, `xi`, `t`, `Q2`. Views of other ranks label their dimensions with
/// [`Axis::Dim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Xi,
    T,
    Q2,
    Dim(usize),
}

impl Axis {
    /// The GPD axes in storage order.
    pub const GPD_ORDER: [Axis; 4] = [Axis::X, Axis::Xi, Axis::T, Axis::Q2];

    /// Label for dimension `dim` of a view with the given rank.
    pub fn for_dim(rank: usize, dim: usize) -> Axis {
        if rank == Self::GPD_ORDER.len() {
            Self::GPD_ORDER[dim]
        } else {
            Axis::Dim(dim)
        }
    }

    /// Position of a named axis in the GPD storage order.
    pub fn position(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Xi => 1,
            Axis::T => 2,
            Axis::Q2 => 3,
            Axis::Dim(d) => *d,
        }
    }

    /// Default file name of the axis values (`x.bin`, `Q2.bin`, ...).
    pub fn file_name(&self) -> String {
        format!("{}.bin", self)
    }

    /// Parse an axis name as written in selection events.
    pub fn parse(name: &str) -> Option<Axis> {
        match name {
            "x" | "X" => Some(Axis::X),
            "xi" | "XI" | "Xi" => Some(Axis::Xi),
            "t" | "T" => Some(Axis::T),
            "q2" | "Q2" => Some(Axis::Q2),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Xi => write!(f, "xi"),
            Axis::T => write!(f, "t"),
            Axis::Q2 => write!(f, "Q2"),
            Axis::Dim(d) => write!(f, "dim{}", d),
        }
    }
}

/// The two fixed indices that select a 2D slice of the GPD grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SliceIndex {
    pub x_index: usize,
    pub t_index: usize,
}

impl SliceIndex {
    pub fn new(x_index: usize, t_index: usize) -> Self {
        Self { x_index, t_index }
    }
}
