use super::graph::{DirEdgeId, PlanarGraph, Position};
use super::subgraph::BufferSubgraph;
use crate::algorithm::line_segment::LineSegmentOps;
use geo_types::{Coord, Line};
use std::cmp::Ordering;

/// Locates the depth of the plane at a query coordinate, relative to a set
/// of already-processed subgraphs.
///
/// A horizontal ray is shot to the right from the query point; every
/// non-horizontal segment of the processed subgraphs which crosses the ray
/// is collected with the depth of its left side. The leftmost stabbed
/// segment is the one immediately to the right of the query point, and its
/// left depth is the depth of the plane there.
pub(crate) struct SubgraphDepthLocater<'g> {
    graph: &'g PlanarGraph,
}

/// A segment stabbed by the ray, normalised to point upward, tagged with
/// the depth on its (normalised) left side.
#[derive(Debug, Clone, Copy)]
struct DepthSegment {
    upward_seg: Line<f64>,
    left_depth: i32,
}

impl DepthSegment {
    /// A determinate left-to-right ordering for segments crossing the
    /// stabbing ray: trivial x-extent comparison, then orientation of one
    /// segment against the other (both ways), then lexicographic order for
    /// segments that remain indistinguishable.
    fn compare(&self, other: &DepthSegment) -> Ordering {
        // fast checks when the segments are trivially ordered along x
        if self.upward_seg.start.x.min(self.upward_seg.end.x)
            >= other.upward_seg.start.x.max(other.upward_seg.end.x)
        {
            return Ordering::Greater;
        }
        if self.upward_seg.start.x.max(self.upward_seg.end.x)
            <= other.upward_seg.start.x.min(other.upward_seg.end.x)
        {
            return Ordering::Less;
        }
        // a segment with the other entirely on its left is the rightmost
        let orient = self.upward_seg.orientation_index_of(&other.upward_seg);
        if orient != 0 {
            return if orient > 0 {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        let orient = -other.upward_seg.orientation_index_of(&self.upward_seg);
        if orient != 0 {
            return if orient > 0 {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        // segments are collinear: fall back to a lexicographic order
        self.upward_seg.cmp_segments(&other.upward_seg)
    }
}

impl<'g> SubgraphDepthLocater<'g> {
    pub fn new(graph: &'g PlanarGraph) -> SubgraphDepthLocater<'g> {
        SubgraphDepthLocater { graph }
    }

    /// The depth of the plane immediately left of the leftmost segment
    /// stabbed by the rightward ray from `coord`. Zero when the ray
    /// escapes every processed subgraph.
    pub fn depth(&self, coord: Coord<f64>, subgraphs: &mut [BufferSubgraph]) -> i32 {
        let mut stabbed = self.find_stabbed_segments(coord, subgraphs);
        if stabbed.is_empty() {
            return 0;
        }
        stabbed.sort_by(DepthSegment::compare);
        stabbed[0].left_depth
    }

    fn find_stabbed_segments(
        &self,
        stabbing_ray_left_pt: Coord<f64>,
        subgraphs: &mut [BufferSubgraph],
    ) -> Vec<DepthSegment> {
        let mut stabbed = vec![];
        for subgraph in subgraphs {
            // skip subgraphs the horizontal ray cannot touch
            let env = subgraph.envelope(self.graph);
            if stabbing_ray_left_pt.y < env.min().y || stabbing_ray_left_pt.y > env.max().y {
                continue;
            }
            for &de in &subgraph.dir_edges {
                if !self.graph.dir_edges[de].is_forward {
                    continue;
                }
                self.find_stabbed_in_edge(stabbing_ray_left_pt, de, &mut stabbed);
            }
        }
        stabbed
    }

    fn find_stabbed_in_edge(
        &self,
        stabbing_ray_left_pt: Coord<f64>,
        dir_edge: DirEdgeId,
        stabbed: &mut Vec<DepthSegment>,
    ) {
        let coords = &self.graph.edges[self.graph.dir_edges[dir_edge].edge].coords;
        for i in 0..coords.len() - 1 {
            let mut seg = Line::new(coords[i], coords[i + 1]);
            // ensure the segment always points upward
            if seg.start.y > seg.end.y {
                seg = seg.reversed();
            }

            // skip segments entirely left of the stabbing ray
            if seg.start.x.max(seg.end.x) < stabbing_ray_left_pt.x {
                continue;
            }
            // skip horizontal segments: a non-horizontal one carries the
            // same depth information
            if seg.is_horizontal() {
                continue;
            }
            // skip segments which don't span the ray's y
            if stabbing_ray_left_pt.y < seg.start.y || stabbing_ray_left_pt.y > seg.end.y {
                continue;
            }
            // skip if the ray origin is right of the segment
            if seg.orientation_of(stabbing_ray_left_pt) == crate::algorithm::kernels::Orientation::Clockwise
            {
                continue;
            }

            // the depth on the left of the upward segment; flipped segments
            // carry it on the directed edge's right
            let mut depth = self.graph.dir_edges[dir_edge].depth(Position::Left);
            if seg.start != coords[i] {
                depth = self.graph.dir_edges[dir_edge].depth(Position::Right);
            }
            stabbed.push(DepthSegment {
                upward_seg: seg,
                left_depth: depth,
            });
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::buffer::graph::{Edge, Label};
    use crate::algorithm::coordinate_position::CoordPos;
    use geo_types::coord;

    fn cw_square_graph() -> (PlanarGraph, Vec<BufferSubgraph>) {
        let mut graph = PlanarGraph::new();
        graph.add_edges(vec![Edge::new(
            vec![
                coord! { x: 0.0, y: 0.0 },
                coord! { x: 0.0, y: 10.0 },
                coord! { x: 10.0, y: 10.0 },
                coord! { x: 10.0, y: 0.0 },
                coord! { x: 0.0, y: 0.0 },
            ],
            Label::new(
                0,
                CoordPos::OnBoundary,
                CoordPos::Outside,
                CoordPos::Inside,
            ),
        )]);
        let mut subgraph = BufferSubgraph::create(0, &mut graph);
        subgraph.compute_depth(0, &mut graph).unwrap();
        (graph, vec![subgraph])
    }

    #[test]
    fn point_inside_ring_sees_interior_depth() {
        let (graph, mut subgraphs) = cw_square_graph();
        let locater = SubgraphDepthLocater::new(&graph);
        assert_eq!(locater.depth(coord! { x: 5.0, y: 5.0 }, &mut subgraphs), 1);
    }

    #[test]
    fn point_outside_ring_sees_zero_depth() {
        let (graph, mut subgraphs) = cw_square_graph();
        let locater = SubgraphDepthLocater::new(&graph);
        assert_eq!(
            locater.depth(coord! { x: -5.0, y: 5.0 }, &mut subgraphs),
            0
        );
        assert_eq!(
            locater.depth(coord! { x: 11.0, y: 5.0 }, &mut subgraphs),
            0
        );
        // above the envelope the ray misses everything
        assert_eq!(
            locater.depth(coord! { x: 5.0, y: 50.0 }, &mut subgraphs),
            0
        );
    }

    #[test]
    fn depth_segment_ordering_is_left_to_right() {
        let left = DepthSegment {
            upward_seg: Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 0.0, y: 10.0 }),
            left_depth: 0,
        };
        let right = DepthSegment {
            upward_seg: Line::new(coord! { x: 5.0, y: 0.0 }, coord! { x: 5.0, y: 10.0 }),
            left_depth: 1,
        };
        assert_eq!(left.compare(&right), Ordering::Less);
        assert_eq!(right.compare(&left), Ordering::Greater);

        // crossing x-extents defer to orientation
        let slanted = DepthSegment {
            upward_seg: Line::new(coord! { x: 4.0, y: 0.0 }, coord! { x: 1.0, y: 10.0 }),
            left_depth: 2,
        };
        let steep = DepthSegment {
            upward_seg: Line::new(coord! { x: 2.0, y: 0.0 }, coord! { x: 3.0, y: 10.0 }),
            left_depth: 3,
        };
        let ord1 = slanted.compare(&steep);
        let ord2 = steep.compare(&slanted);
        assert_ne!(ord1, ord2);
    }
}
