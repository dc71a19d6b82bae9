use super::edge_ring::{EdgeRing, RingKind};
use super::graph::{DirEdgeId, PlanarGraph};
use super::subgraph::BufferSubgraph;
use crate::utils::rect_contains_rect;
use crate::Error;
use crate::GeometryFactory;
use geo_types::{LineString, Polygon};

/// Assembles the in-result directed edges of successive subgraphs into
/// polygons with correctly assigned holes.
///
/// Subgraphs must be added in descending rightmost-x order: a hole ring can
/// then only belong to a shell that has already been built.
pub(crate) struct PolygonBuilder {
    rings: Vec<EdgeRing>,
    shells: Vec<usize>,
    maximal_ring_count: usize,
}

impl PolygonBuilder {
    pub fn new() -> PolygonBuilder {
        PolygonBuilder {
            rings: vec![],
            shells: vec![],
            maximal_ring_count: 0,
        }
    }

    /// Incorporate one subgraph's result edges.
    pub fn add(&mut self, subgraph: &BufferSubgraph, graph: &mut PlanarGraph) -> Result<(), Error> {
        for &node in &subgraph.nodes {
            graph.link_result_directed_edges(node)?;
        }

        let maximal_rings = self.build_maximal_edge_rings(&subgraph.dir_edges, graph)?;
        let mut free_holes: Vec<usize> = vec![];

        for (ring_id, maximal_ring) in maximal_rings {
            if maximal_ring.max_outgoing_degree(ring_id, graph) > 1 {
                // the ring passes through at least one node more than once:
                // relink at those nodes and split into minimal rings
                for &de in &maximal_ring.edges {
                    let node = graph.dir_edges[de].node;
                    graph.link_minimal_directed_edges(node, ring_id)?;
                }
                let minimal_rings = self.build_minimal_edge_rings(&maximal_ring, graph)?;

                if let Some(shell_index) = self.find_shell(&minimal_rings)? {
                    self.place_polygon_holes(shell_index, &minimal_rings);
                    self.shells.push(shell_index);
                } else {
                    free_holes.extend(&minimal_rings);
                }
            } else {
                // the maximal ring is already minimal
                let index = self.rings.len();
                let is_hole = maximal_ring.is_hole;
                self.rings.push(maximal_ring);
                if is_hole {
                    free_holes.push(index);
                } else {
                    self.shells.push(index);
                }
            }
        }

        self.place_free_holes(free_holes)?;
        Ok(())
    }

    /// The assembled polygons, shells with their holes.
    pub fn polygons(self, factory: &GeometryFactory) -> Vec<Polygon<f64>> {
        let mut polygons = vec![];
        for &shell_index in &self.shells {
            let shell = &self.rings[shell_index];
            let exterior = LineString::new(shell.coords.clone());
            let interiors = shell
                .holes
                .iter()
                .map(|&hole| LineString::new(self.rings[hole].coords.clone()))
                .collect();
            polygons.push(factory.create_polygon(exterior, interiors));
        }
        polygons
    }

    /// Trace a maximal ring from every in-result edge not yet assigned to
    /// one.
    fn build_maximal_edge_rings(
        &mut self,
        dir_edges: &[DirEdgeId],
        graph: &mut PlanarGraph,
    ) -> Result<Vec<(usize, EdgeRing)>, Error> {
        let mut rings = vec![];
        for &de in dir_edges {
            if !graph.dir_edges[de].in_result || graph.dir_edges[de].edge_ring.is_some() {
                continue;
            }
            let ring_id = self.maximal_ring_count;
            self.maximal_ring_count += 1;
            rings.push((ring_id, EdgeRing::trace(de, RingKind::Maximal, ring_id, graph)?));
        }
        Ok(rings)
    }

    /// Trace the minimal rings of a split maximal ring, pushing each into
    /// the ring arena and returning their indices.
    fn build_minimal_edge_rings(
        &mut self,
        maximal_ring: &EdgeRing,
        graph: &mut PlanarGraph,
    ) -> Result<Vec<usize>, Error> {
        let mut indices = vec![];
        for &de in &maximal_ring.edges {
            if graph.dir_edges[de].min_edge_ring.is_some() {
                continue;
            }
            let index = self.rings.len();
            let ring = EdgeRing::trace(de, RingKind::Minimal, index, graph)?;
            self.rings.push(ring);
            indices.push(index);
        }
        Ok(indices)
    }

    /// The unique shell among the minimal rings of one maximal ring, if
    /// any. Multiple shells indicate a corrupted graph.
    fn find_shell(&self, minimal_rings: &[usize]) -> Result<Option<usize>, Error> {
        let mut shell = None;
        for &index in minimal_rings {
            if !self.rings[index].is_hole {
                if shell.is_some() {
                    return Err(Error::TopologyError {
                        message: "found two shells in minimal ring collection",
                        coordinate: self.rings[index].coords.first().copied(),
                    });
                }
                shell = Some(index);
            }
        }
        Ok(shell)
    }

    /// Assign the hole rings split off a maximal ring to the shell split
    /// off the same ring. They are guaranteed to belong to it.
    fn place_polygon_holes(&mut self, shell_index: usize, minimal_rings: &[usize]) {
        for &index in minimal_rings {
            if self.rings[index].is_hole && self.rings[index].shell.is_none() {
                self.rings[index].shell = Some(shell_index);
                self.rings[shell_index].holes.push(index);
            }
        }
    }

    /// Place holes which did not come with their own shell into the
    /// smallest already-built shell containing them.
    fn place_free_holes(&mut self, free_holes: Vec<usize>) -> Result<(), Error> {
        for hole_index in free_holes {
            if self.rings[hole_index].shell.is_some() {
                continue;
            }
            let shell_index = self.find_ring_containing(hole_index).ok_or_else(|| {
                Error::TopologyError {
                    message: "unable to assign hole to a shell",
                    coordinate: self.rings[hole_index].coords.first().copied(),
                }
            })?;
            self.rings[hole_index].shell = Some(shell_index);
            self.rings[shell_index].holes.push(hole_index);
        }
        Ok(())
    }

    /// The smallest shell (by envelope containment) whose interior contains
    /// the test ring.
    fn find_ring_containing(&self, hole_index: usize) -> Option<usize> {
        let hole = &self.rings[hole_index];
        let hole_env = hole.envelope();
        let test_coord = hole.coords[0];

        let mut min_shell: Option<usize> = None;
        for &shell_index in &self.shells {
            let shell = &self.rings[shell_index];
            let shell_env = shell.envelope();
            let contained = rect_contains_rect(&shell_env, &hole_env)
                && crate::algorithm::coordinate_position::is_coord_in_ring(
                    test_coord,
                    &shell.coords,
                );
            if contained {
                let smaller = match min_shell {
                    None => true,
                    Some(current) => rect_contains_rect(&self.rings[current].envelope(), &shell_env),
                };
                if smaller {
                    min_shell = Some(shell_index);
                }
            }
        }
        min_shell
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::buffer::graph::{Edge, Label};
    use crate::algorithm::buffer::subgraph::{sort_subgraphs, BufferSubgraph};
    use crate::algorithm::coordinate_position::CoordPos;
    use crate::algorithm::winding_order::{RingOrientation, WindingOrder};
    use geo_types::coord;

    fn ring_edge(coords: Vec<geo_types::Coord<f64>>) -> Edge {
        Edge::new(
            coords,
            Label::new(
                0,
                CoordPos::OnBoundary,
                CoordPos::Outside,
                CoordPos::Inside,
            ),
        )
    }

    fn cw_square(x0: f64, y0: f64, size: f64) -> Vec<geo_types::Coord<f64>> {
        vec![
            coord! { x: x0, y: y0 },
            coord! { x: x0, y: y0 + size },
            coord! { x: x0 + size, y: y0 + size },
            coord! { x: x0 + size, y: y0 },
            coord! { x: x0, y: y0 },
        ]
    }

    fn build_polygons(edges: Vec<Edge>) -> Vec<Polygon<f64>> {
        let mut graph = PlanarGraph::new();
        graph.add_edges(edges);

        let mut subgraphs = vec![];
        for node in 0..graph.nodes.len() {
            if !graph.nodes[node].visited {
                subgraphs.push(BufferSubgraph::create(node, &mut graph));
            }
        }
        sort_subgraphs(&mut subgraphs);

        let mut builder = PolygonBuilder::new();
        let mut processed: Vec<BufferSubgraph> = vec![];
        for mut subgraph in subgraphs {
            let outside_depth = {
                let locater =
                    crate::algorithm::buffer::subgraph_depth_locater::SubgraphDepthLocater::new(
                        &graph,
                    );
                locater.depth(subgraph.rightmost_coordinate(), &mut processed)
            };
            subgraph.compute_depth(outside_depth, &mut graph).unwrap();
            subgraph.find_result_edges(&mut graph);
            builder.add(&subgraph, &mut graph).unwrap();
            processed.push(subgraph);
        }
        builder.polygons(&GeometryFactory::default())
    }

    #[test]
    fn single_ring_becomes_one_polygon() {
        let polygons = build_polygons(vec![ring_edge(cw_square(0.0, 0.0, 10.0))]);
        assert_eq!(polygons.len(), 1);
        assert!(polygons[0].interiors().is_empty());
        assert_eq!(
            RingOrientation::of(&polygons[0].exterior().0),
            Some(WindingOrder::Clockwise)
        );
    }

    #[test]
    fn nested_ring_becomes_a_hole() {
        // outer CW shell; inner ring wound CCW so its interior lies outside
        let mut inner = cw_square(3.0, 3.0, 4.0);
        inner.reverse();
        let polygons = build_polygons(vec![
            ring_edge(cw_square(0.0, 0.0, 10.0)),
            ring_edge(inner),
        ]);
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].interiors().len(), 1);
    }

    #[test]
    fn disjoint_rings_become_two_polygons() {
        let polygons = build_polygons(vec![
            ring_edge(cw_square(0.0, 0.0, 10.0)),
            ring_edge(cw_square(100.0, 0.0, 10.0)),
        ]);
        assert_eq!(polygons.len(), 2);
    }
}
