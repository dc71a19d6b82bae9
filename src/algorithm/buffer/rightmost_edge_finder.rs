use super::graph::{DirEdgeId, PlanarGraph, Position};
use crate::algorithm::kernels::{orient2d, Orientation};
use geo_types::Coord;

/// Finds the directed edge of a subgraph whose rightmost vertex has the
/// greatest x ordinate, oriented so that the subgraph exterior lies on its
/// right side. That edge seeds the depth assignment: the depth on its right
/// is the outside depth of the whole subgraph.
pub(crate) struct RightmostEdgeFinder {
    min_index: Option<usize>,
    min_coord: Option<Coord<f64>>,
    min_de: Option<DirEdgeId>,
    oriented_de: Option<DirEdgeId>,
}

impl RightmostEdgeFinder {
    pub fn new() -> RightmostEdgeFinder {
        RightmostEdgeFinder {
            min_index: None,
            min_coord: None,
            min_de: None,
            oriented_de: None,
        }
    }

    /// The oriented rightmost edge found by [`RightmostEdgeFinder::find_edge`].
    pub fn edge(&self) -> DirEdgeId {
        self.oriented_de.expect("find_edge has been called")
    }

    /// The rightmost coordinate of the subgraph.
    pub fn coordinate(&self) -> Coord<f64> {
        self.min_coord.expect("find_edge has been called")
    }

    pub fn find_edge(&mut self, dir_edges: &[DirEdgeId], graph: &PlanarGraph) {
        // only the forward orientation of each edge needs checking; the
        // backward one visits the same vertices
        for &de in dir_edges {
            if !graph.dir_edges[de].is_forward {
                continue;
            }
            self.check_for_rightmost_coordinate(de, graph);
        }

        let min_index = self.min_index.expect("subgraph has at least one edge");
        debug_assert!(
            min_index != 0
                || self.min_coord.unwrap() == graph.dir_edges[self.min_de.unwrap()].p0,
            "inconsistency in rightmost processing"
        );

        if min_index == 0 {
            self.find_rightmost_edge_at_node(graph);
        } else {
            self.find_rightmost_edge_at_vertex(graph);
        }

        let min_de = self.min_de.unwrap();
        self.oriented_de = Some(min_de);
        let rightmost_side = Self::rightmost_side(min_de, self.min_index.unwrap(), graph);
        if rightmost_side == Some(Position::Left) {
            self.oriented_de = Some(graph.dir_edges[min_de].sym);
        }
    }

    fn check_for_rightmost_coordinate(&mut self, de: DirEdgeId, graph: &PlanarGraph) {
        let coords = &graph.edges[graph.dir_edges[de].edge].coords;
        // the last coordinate is skipped: it is the first coordinate of some
        // other edge at the far node
        for (i, coord) in coords[..coords.len() - 1].iter().enumerate() {
            if self.min_coord.map(|min| coord.x > min.x).unwrap_or(true) {
                self.min_de = Some(de);
                self.min_index = Some(i);
                self.min_coord = Some(*coord);
            }
        }
    }

    /// The rightmost point is a node of the graph: pick the rightmost edge
    /// of the node's star.
    fn find_rightmost_edge_at_node(&mut self, graph: &PlanarGraph) {
        let node = graph.dir_edges[self.min_de.unwrap()].node;
        let mut min_de = graph.rightmost_edge_at(node);
        // the star edge is not necessarily forward; use its twin if not
        if !graph.dir_edges[min_de].is_forward {
            min_de = graph.dir_edges[min_de].sym;
            let coords_len = graph.edges[graph.dir_edges[min_de].edge].coords.len();
            self.min_index = Some(coords_len - 1);
        }
        self.min_de = Some(min_de);
    }

    /// The rightmost point is an interior vertex of an edge, so both its
    /// neighbouring segments are present in the same edge. When both
    /// neighbours lie on the same vertical side of the vertex, their mutual
    /// orientation decides which segment is rightmost.
    fn find_rightmost_edge_at_vertex(&mut self, graph: &PlanarGraph) {
        let min_index = self.min_index.unwrap();
        let coords = &graph.edges[graph.dir_edges[self.min_de.unwrap()].edge].coords;
        debug_assert!(
            min_index > 0 && min_index < coords.len(),
            "rightmost point expected to be interior vertex of edge"
        );
        let min_coord = self.min_coord.unwrap();
        let p_prev = coords[min_index - 1];
        let p_next = coords[min_index + 1];
        let orientation = orient2d(min_coord, p_next, p_prev);
        let mut use_prev = false;
        if p_prev.y < min_coord.y
            && p_next.y < min_coord.y
            && orientation == Orientation::CounterClockwise
        {
            use_prev = true;
        } else if p_prev.y > min_coord.y
            && p_next.y > min_coord.y
            && orientation == Orientation::Clockwise
        {
            use_prev = true;
        }
        // when the segments straddle the vertex vertically, either is a safe
        // rightmost segment
        if use_prev {
            self.min_index = Some(min_index - 1);
        }
    }

    /// The side of the edge on which its rightmost vertex lies, judged from
    /// the vertical direction of the segments adjacent to the vertex.
    /// `None` when both adjacent segments are horizontal.
    fn rightmost_side(de: DirEdgeId, index: usize, graph: &PlanarGraph) -> Option<Position> {
        Self::rightmost_side_of_segment(de, index, graph).or_else(|| {
            index
                .checked_sub(1)
                .and_then(|prev| Self::rightmost_side_of_segment(de, prev, graph))
        })
    }

    fn rightmost_side_of_segment(
        de: DirEdgeId,
        index: usize,
        graph: &PlanarGraph,
    ) -> Option<Position> {
        let coords = &graph.edges[graph.dir_edges[de].edge].coords;
        if index + 1 >= coords.len() {
            return None;
        }
        if coords[index].y == coords[index + 1].y {
            // segment is parallel to the x-axis
            return None;
        }
        if coords[index].y < coords[index + 1].y {
            Some(Position::Right)
        } else {
            Some(Position::Left)
        }
    }
}
