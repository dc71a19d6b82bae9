use super::graph::{Edge, Label, PlanarGraph};
use super::noding::{IteratedNoder, McIndexNoder, Noder, SegmentString};
use super::offset_curve_builder::OffsetCurveBuilder;
use super::offset_curve_set_builder::OffsetCurveSetBuilder;
use super::polygon_builder::PolygonBuilder;
use super::subgraph::{sort_subgraphs, BufferSubgraph};
use super::subgraph_depth_locater::SubgraphDepthLocater;
use super::{BufferParams, NoderKind};
use crate::{Error, GeometryFactory, PrecisionModel};
use geo_types::{Coord, Geometry};
use std::collections::BTreeMap;

/// Orchestrates the buffer pipeline: offset-curve generation, noding, graph
/// assembly, depth assignment, and polygon extraction.
///
/// A builder carries mutable working state and must not be shared across
/// threads; configure one per operation. Configuration is the curve
/// approximation (`BufferParams`), an optional working precision model that
/// overrides the input's model for all intermediate arithmetic, and the
/// noding strategy.
pub struct BufferBuilder {
    params: BufferParams,
    working_precision_model: Option<PrecisionModel>,
    noder: NoderKind,
}

impl Default for BufferBuilder {
    fn default() -> Self {
        Self::new(BufferParams::default())
    }
}

impl BufferBuilder {
    pub fn new(params: BufferParams) -> BufferBuilder {
        BufferBuilder {
            params,
            working_precision_model: None,
            noder: NoderKind::MonotoneChainIndex,
        }
    }

    /// Override the precision model used for intermediate arithmetic and
    /// final rounding.
    pub fn set_working_precision_model(&mut self, precision_model: PrecisionModel) -> &mut Self {
        self.working_precision_model = Some(precision_model);
        self
    }

    pub fn set_quadrant_segments(&mut self, quadrant_segments: u32) -> &mut Self {
        self.params = self.params.with_quadrant_segments(quadrant_segments);
        self
    }

    pub fn set_end_cap_style(&mut self, end_cap_style: super::EndCapStyle) -> &mut Self {
        self.params = self.params.with_end_cap_style(end_cap_style);
        self
    }

    pub fn set_noder(&mut self, noder: NoderKind) -> &mut Self {
        self.noder = noder;
        self
    }

    /// Compute the buffer of `geometry` at the signed `distance`.
    pub fn buffer(&mut self, geometry: &Geometry<f64>, distance: f64) -> Result<Geometry<f64>, Error> {
        let precision_model = self.working_precision_model.unwrap_or_default();
        let factory = GeometryFactory::new(precision_model);

        let curve_builder = OffsetCurveBuilder::new(
            precision_model,
            self.params.quadrant_segments(),
            self.params.end_cap_style(),
        );
        let curves = OffsetCurveSetBuilder::new(geometry, distance, curve_builder).curves();
        if curves.is_empty() {
            return Ok(factory.build_geometry(vec![]));
        }

        let noded = self.node_curves(curves, precision_model)?;

        let mut edge_list = EdgeList::new();
        for string in noded {
            edge_list.add(string.coords, string.label);
        }
        let edges = edge_list.into_edges();
        if edges.is_empty() {
            return Ok(factory.build_geometry(vec![]));
        }

        let mut graph = PlanarGraph::new();
        graph.add_edges(edges);

        let mut subgraphs = vec![];
        for node in 0..graph.nodes.len() {
            if !graph.nodes[node].visited {
                subgraphs.push(BufferSubgraph::create(node, &mut graph));
            }
        }
        // shells are processed before the holes nested inside them
        sort_subgraphs(&mut subgraphs);

        let mut polygon_builder = PolygonBuilder::new();
        let mut processed: Vec<BufferSubgraph> = vec![];
        for mut subgraph in subgraphs {
            let outside_depth = {
                let locater = SubgraphDepthLocater::new(&graph);
                locater.depth(subgraph.rightmost_coordinate(), &mut processed)
            };
            subgraph.compute_depth(outside_depth, &mut graph)?;
            subgraph.find_result_edges(&mut graph);
            polygon_builder.add(&subgraph, &mut graph)?;
            processed.push(subgraph);
        }

        let polygons = polygon_builder.polygons(&factory);
        Ok(factory.build_geometry(polygons))
    }

    fn node_curves(
        &self,
        curves: Vec<SegmentString>,
        precision_model: PrecisionModel,
    ) -> Result<Vec<SegmentString>, Error> {
        match self.noder {
            NoderKind::MonotoneChainIndex => McIndexNoder::new(precision_model).node(curves),
            NoderKind::Iterated => IteratedNoder::new(precision_model).node(curves),
        }
    }
}

/// The edge set of the buffer graph, with duplicate-edge merging.
///
/// A noded curve equal to an existing edge (forward or reversed) does not
/// insert a second edge: its label is merged (flipped when reversed) and
/// its depth delta added to the existing edge's. This collapses the doubled
/// curves that arise where offset curves retrace each other.
struct EdgeList {
    edges: Vec<Edge>,
    index: BTreeMap<Vec<(u64, u64)>, usize>,
}

impl EdgeList {
    fn new() -> EdgeList {
        EdgeList {
            edges: vec![],
            index: BTreeMap::new(),
        }
    }

    fn add(&mut self, coords: Vec<Coord<f64>>, label: Label) {
        // dedup again at insertion: noding can emit retraced vertices
        let mut coords = coords;
        coords.dedup();
        if coords.len() < 2 {
            return;
        }

        let forward_key = Self::key_of(coords.iter());
        let reverse_key = Self::key_of(coords.iter().rev());
        let canonical = forward_key.clone().min(reverse_key);

        match self.index.get(&canonical) {
            Some(&existing_index) => {
                let existing = &mut self.edges[existing_index];
                let mut label_to_merge = label;
                // a reversed duplicate flips its label before merging
                if existing.coords != coords {
                    label_to_merge.flip();
                }
                existing.label.merge(&label_to_merge);
                existing.depth_delta += Edge::depth_delta_of(&label_to_merge);
            }
            None => {
                self.index.insert(canonical, self.edges.len());
                self.edges.push(Edge::new(coords, label));
            }
        }
    }

    fn into_edges(self) -> Vec<Edge> {
        self.edges
    }

    fn key_of<'a, I>(coords: I) -> Vec<(u64, u64)>
    where
        I: Iterator<Item = &'a Coord<f64>>,
    {
        // exact bit patterns: post-noding duplicates are exact copies
        coords.map(|c| (c.x.to_bits(), c.y.to_bits())).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::coordinate_position::CoordPos;
    use crate::algorithm::buffer::graph::Position;
    use geo_types::coord;

    fn label(left: CoordPos, right: CoordPos) -> Label {
        Label::new(0, CoordPos::OnBoundary, left, right)
    }

    #[test]
    fn equal_edges_merge_depth_deltas() {
        let mut list = EdgeList::new();
        let coords = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }];
        list.add(coords.clone(), label(CoordPos::Inside, CoordPos::Outside));
        list.add(coords, label(CoordPos::Inside, CoordPos::Outside));
        let edges = list.into_edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].depth_delta, 2);
    }

    #[test]
    fn reversed_duplicate_flips_before_merging() {
        let mut list = EdgeList::new();
        let forward = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }];
        let reversed: Vec<_> = forward.iter().rev().copied().collect();
        list.add(forward, label(CoordPos::Inside, CoordPos::Outside));
        // the reversed edge sees the same sides mirrored, so its flipped
        // label carries the same depth delta
        list.add(reversed, label(CoordPos::Outside, CoordPos::Inside));
        let edges = list.into_edges();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].depth_delta, 2);
        assert_eq!(
            edges[0].label.location(0, Position::Left),
            Some(CoordPos::Inside)
        );
    }

    #[test]
    fn distinct_edges_stay_distinct() {
        let mut list = EdgeList::new();
        list.add(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }],
            label(CoordPos::Inside, CoordPos::Outside),
        );
        list.add(
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 0.0, y: 1.0 }],
            label(CoordPos::Inside, CoordPos::Outside),
        );
        assert_eq!(list.into_edges().len(), 2);
    }

    #[test]
    fn collapsed_substrings_are_dropped() {
        let mut list = EdgeList::new();
        let c = coord! { x: 1.0, y: 1.0 };
        list.add(vec![c, c], label(CoordPos::Inside, CoordPos::Outside));
        assert!(list.into_edges().is_empty());
    }
}
