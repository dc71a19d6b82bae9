use crate::algorithm::coordinate_position::CoordPos;
use std::fmt;

/// A position relative to a directed edge: on the edge itself, or on its
/// left or right side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    On,
    Left,
    Right,
}

impl Position {
    pub fn opposite(self) -> Position {
        match self {
            Position::On => Position::On,
            Position::Left => Position::Right,
            Position::Right => Position::Left,
        }
    }
}

/// The topological location of an edge relative to a single areal geometry:
/// a `CoordPos` for the edge itself and for each of its sides. `None` means
/// the position has not been determined.
#[derive(Clone, Copy, PartialEq, Default)]
pub(crate) struct TopologyLocation {
    on: Option<CoordPos>,
    left: Option<CoordPos>,
    right: Option<CoordPos>,
}

impl fmt::Debug for TopologyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn ch(pos: Option<CoordPos>) -> char {
            match pos {
                Some(CoordPos::Inside) => 'i',
                Some(CoordPos::OnBoundary) => 'b',
                Some(CoordPos::Outside) => 'e',
                None => '-',
            }
        }
        write!(f, "{}{}{}", ch(self.left), ch(self.on), ch(self.right))
    }
}

impl TopologyLocation {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn area(on: CoordPos, left: CoordPos, right: CoordPos) -> Self {
        TopologyLocation {
            on: Some(on),
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn get(&self, position: Position) -> Option<CoordPos> {
        match position {
            Position::On => self.on,
            Position::Left => self.left,
            Position::Right => self.right,
        }
    }

    pub fn set(&mut self, position: Position, value: CoordPos) {
        match position {
            Position::On => self.on = Some(value),
            Position::Left => self.left = Some(value),
            Position::Right => self.right = Some(value),
        }
    }

    /// Exchange the side positions.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    /// Fill any undetermined position from `other`.
    pub fn merge(&mut self, other: &TopologyLocation) {
        if self.on.is_none() {
            self.on = other.on;
        }
        if self.left.is_none() {
            self.left = other.left;
        }
        if self.right.is_none() {
            self.right = other.right;
        }
    }
}

/// Topological labelling of a graph component relative to up to two parent
/// geometries. The buffer pipeline labels its curves against a single
/// geometry, in slot 0; the second slot stays empty but keeps the labelling
/// shape shared with two-geometry overlay operations.
#[derive(Clone, Copy, PartialEq)]
pub(crate) struct Label {
    geometries: [TopologyLocation; 2],
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Label {{ A: {:?}, B: {:?} }}",
            self.geometries[0], self.geometries[1]
        )
    }
}

impl Label {
    /// A label with `on`/`left`/`right` positions for the geometry in
    /// `geom_index`, and the other slot empty.
    pub fn new(geom_index: usize, on: CoordPos, left: CoordPos, right: CoordPos) -> Self {
        let mut label = Label {
            geometries: [TopologyLocation::empty(), TopologyLocation::empty()],
        };
        label.geometries[geom_index] = TopologyLocation::area(on, left, right);
        label
    }

    pub fn location(&self, geom_index: usize, position: Position) -> Option<CoordPos> {
        self.geometries[geom_index].get(position)
    }

    pub fn set_location(&mut self, geom_index: usize, position: Position, value: CoordPos) {
        self.geometries[geom_index].set(position, value);
    }

    /// Exchange the left and right side locations of both geometries.
    pub fn flip(&mut self) {
        self.geometries[0].flip();
        self.geometries[1].flip();
    }

    /// The flipped copy of this label.
    pub fn flipped(&self) -> Label {
        let mut label = *self;
        label.flip();
        label
    }

    /// Fill any undetermined position from `other`.
    pub fn merge(&mut self, other: &Label) {
        self.geometries[0].merge(&other.geometries[0]);
        self.geometries[1].merge(&other.geometries[1]);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flip_swaps_sides_only() {
        let mut label = Label::new(
            0,
            CoordPos::OnBoundary,
            CoordPos::Outside,
            CoordPos::Inside,
        );
        label.flip();
        assert_eq!(label.location(0, Position::On), Some(CoordPos::OnBoundary));
        assert_eq!(label.location(0, Position::Left), Some(CoordPos::Inside));
        assert_eq!(label.location(0, Position::Right), Some(CoordPos::Outside));
    }

    #[test]
    fn merge_fills_empty_slots() {
        let mut label = Label::new(
            0,
            CoordPos::OnBoundary,
            CoordPos::Outside,
            CoordPos::Inside,
        );
        let other = Label::new(
            1,
            CoordPos::OnBoundary,
            CoordPos::Inside,
            CoordPos::Outside,
        );
        label.merge(&other);
        assert_eq!(label.location(1, Position::Left), Some(CoordPos::Inside));
        // established positions win over merged ones
        assert_eq!(label.location(0, Position::Left), Some(CoordPos::Outside));
    }
}
