use super::graph::{DirEdgeId, PlanarGraph};
use crate::algorithm::bounding_rect::bounding_rect_of_coords;
use crate::algorithm::winding_order::is_ccw;
use crate::Error;
use geo_types::{Coord, Rect};

/// A closed ring of in-result directed edges, traced through the overlay
/// `next` / `next_min` linkage.
///
/// Counter-clockwise rings are holes (result shells come out of the buffer
/// pipeline clockwise); shells collect the holes assigned to them.
#[derive(Debug)]
pub(crate) struct EdgeRing {
    pub edges: Vec<DirEdgeId>,
    pub coords: Vec<Coord<f64>>,
    pub is_hole: bool,
    pub shell: Option<usize>,
    pub holes: Vec<usize>,
}

/// Which linkage pointer a ring traversal follows.
#[derive(Clone, Copy, PartialEq)]
pub(crate) enum RingKind {
    /// Follow `next`: the maximal ring through every linked edge.
    Maximal,
    /// Follow `next_min`: the minimal ring after node-splitting.
    Minimal,
}

impl EdgeRing {
    /// Trace the ring starting at `start`, stamping `ring_id` into each
    /// visited edge's ring slot (`edge_ring` for maximal rings,
    /// `min_edge_ring` for minimal ones).
    pub fn trace(
        start: DirEdgeId,
        kind: RingKind,
        ring_id: usize,
        graph: &mut PlanarGraph,
    ) -> Result<EdgeRing, Error> {
        let mut edges = vec![];
        let mut coords: Vec<Coord<f64>> = vec![];
        let mut de = start;
        let mut is_first_edge = true;

        loop {
            let already_in_this_ring = match kind {
                RingKind::Maximal => graph.dir_edges[de].edge_ring == Some(ring_id),
                RingKind::Minimal => graph.dir_edges[de].min_edge_ring == Some(ring_id),
            };
            if already_in_this_ring {
                return Err(Error::topology(
                    "directed edge visited twice during ring building",
                    graph.dir_edges[de].p0,
                ));
            }

            edges.push(de);
            Self::add_points(de, is_first_edge, &mut coords, graph);
            is_first_edge = false;
            match kind {
                RingKind::Maximal => graph.dir_edges[de].edge_ring = Some(ring_id),
                RingKind::Minimal => graph.dir_edges[de].min_edge_ring = Some(ring_id),
            }

            let next = match kind {
                RingKind::Maximal => graph.dir_edges[de].next,
                RingKind::Minimal => graph.dir_edges[de].next_min,
            };
            de = next.ok_or_else(|| {
                Error::topology("found null DirectedEdge", graph.dir_edges[de].p1)
            })?;
            if de == start {
                break;
            }
        }

        let is_hole = is_ccw(&coords);
        Ok(EdgeRing {
            edges,
            coords,
            is_hole,
            shell: None,
            holes: vec![],
        })
    }

    fn add_points(
        de: DirEdgeId,
        is_first_edge: bool,
        coords: &mut Vec<Coord<f64>>,
        graph: &PlanarGraph,
    ) {
        let edge_coords = &graph.edges[graph.dir_edges[de].edge].coords;
        if graph.dir_edges[de].is_forward {
            let start_index = if is_first_edge { 0 } else { 1 };
            coords.extend_from_slice(&edge_coords[start_index..]);
        } else {
            let end_index = if is_first_edge {
                edge_coords.len()
            } else {
                edge_coords.len() - 1
            };
            coords.extend(edge_coords[..end_index].iter().rev());
        }
    }

    /// The highest number of this ring's edges leaving any single node.
    /// More than one means the ring pinches through a node and must be
    /// split into minimal rings.
    pub fn max_outgoing_degree(&self, ring_id: usize, graph: &PlanarGraph) -> usize {
        let mut max_degree = 0;
        for &de in &self.edges {
            let node = graph.dir_edges[de].node;
            let degree = graph.nodes[node]
                .star
                .iter()
                .filter(|&&star_de| graph.dir_edges[star_de].edge_ring == Some(ring_id))
                .count();
            max_degree = max_degree.max(degree);
        }
        max_degree
    }

    pub fn envelope(&self) -> Rect<f64> {
        bounding_rect_of_coords(self.coords.iter().copied()).expect("ring is non-empty")
    }
}
