use super::graph::{DirEdgeId, NodeId, PlanarGraph, Position};
use super::rightmost_edge_finder::RightmostEdgeFinder;
use crate::utils::rect_expanded_to_include;
use crate::Error;
use geo_types::{Coord, Rect};

/// A connected component of the noded buffer graph: its directed edges and
/// nodes, the rightmost coordinate used to order subgraphs, and the cached
/// envelope the depth locator prunes against.
pub(crate) struct BufferSubgraph {
    pub dir_edges: Vec<DirEdgeId>,
    pub nodes: Vec<NodeId>,
    rightmost_coord: Coord<f64>,
    rightmost_edge: DirEdgeId,
    envelope: Option<Rect<f64>>,
}

impl BufferSubgraph {
    /// Collect the component reachable from `start`, marking its nodes
    /// visited, and locate its rightmost edge.
    pub fn create(start: NodeId, graph: &mut PlanarGraph) -> BufferSubgraph {
        let mut dir_edges = vec![];
        let mut nodes = vec![];
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            if graph.nodes[node].visited {
                continue;
            }
            graph.nodes[node].visited = true;
            nodes.push(node);
            for i in 0..graph.nodes[node].star.len() {
                let de = graph.nodes[node].star[i];
                dir_edges.push(de);
                let sym_node = graph.dir_edges[graph.dir_edges[de].sym].node;
                if !graph.nodes[sym_node].visited {
                    stack.push(sym_node);
                }
            }
        }

        let mut finder = RightmostEdgeFinder::new();
        finder.find_edge(&dir_edges, graph);

        BufferSubgraph {
            dir_edges,
            nodes,
            rightmost_coord: finder.coordinate(),
            rightmost_edge: finder.edge(),
            envelope: None,
        }
    }

    pub fn rightmost_coordinate(&self) -> Coord<f64> {
        self.rightmost_coord
    }

    /// The envelope of all the subgraph's edges, computed once and cached.
    pub fn envelope(&mut self, graph: &PlanarGraph) -> Rect<f64> {
        if let Some(env) = self.envelope {
            return env;
        }
        let mut env: Option<Rect<f64>> = None;
        for &de in &self.dir_edges {
            for coord in &graph.edges[graph.dir_edges[de].edge].coords {
                env = Some(match env {
                    Some(env) => rect_expanded_to_include(env, *coord),
                    None => Rect::new(*coord, *coord),
                });
            }
        }
        let env = env.expect("subgraph has at least one edge");
        self.envelope = Some(env);
        env
    }

    /// Assign depths to every edge of the subgraph, seeded with the depth
    /// on the outside of the rightmost edge, then propagated node by node
    /// in breadth-first order.
    pub fn compute_depth(&mut self, outside_depth: i32, graph: &mut PlanarGraph) -> Result<(), Error> {
        self.clear_visited_edges(graph);
        let de = self.rightmost_edge;
        // the finder oriented the edge so its right side faces outward
        graph.set_edge_depths(de, Position::Right, outside_depth);
        graph.copy_sym_depths(de);
        self.compute_depths(de, graph)
    }

    fn clear_visited_edges(&self, graph: &mut PlanarGraph) {
        for &de in &self.dir_edges {
            graph.dir_edges[de].visited = false;
        }
    }

    fn compute_depths(&self, start_edge: DirEdgeId, graph: &mut PlanarGraph) -> Result<(), Error> {
        let start_node = graph.dir_edges[start_edge].node;
        graph.dir_edges[start_edge].visited = true;

        let mut visited_nodes = vec![false; graph.nodes.len()];
        let mut queue = std::collections::VecDeque::new();
        visited_nodes[start_node] = true;
        queue.push_back(start_node);

        while let Some(node) = queue.pop_front() {
            // compute depths around this node, starting from an edge which
            // already has them assigned
            graph.compute_node_depths(node)?;

            for i in 0..graph.nodes[node].star.len() {
                let de = graph.nodes[node].star[i];
                let sym = graph.dir_edges[de].sym;
                if graph.dir_edges[sym].visited {
                    continue;
                }
                let adjacent = graph.dir_edges[sym].node;
                if !visited_nodes[adjacent] {
                    visited_nodes[adjacent] = true;
                    queue.push_back(adjacent);
                }
            }
        }
        Ok(())
    }

    /// Flag the edges enclosing result area: interior depth on the right,
    /// exterior depth on the left.
    ///
    /// Rounding artifacts can drive depths negative, so any depth at or
    /// past the interior threshold counts as interior.
    pub fn find_result_edges(&self, graph: &mut PlanarGraph) {
        for &de in &self.dir_edges {
            let edge = &graph.dir_edges[de];
            if edge.depth(Position::Right) >= 1
                && edge.depth(Position::Left) <= 0
                && !edge.is_interior_area_edge()
            {
                graph.dir_edges[de].in_result = true;
            }
        }
    }
}

/// Order subgraphs by descending rightmost x, so that every shell is built
/// before the holes nested inside it.
pub(crate) fn sort_subgraphs(subgraphs: &mut [BufferSubgraph]) {
    subgraphs.sort_by(|a, b| {
        b.rightmost_coordinate()
            .x
            .partial_cmp(&a.rightmost_coordinate().x)
            .unwrap()
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::buffer::graph::{Edge, Label};
    use crate::algorithm::coordinate_position::CoordPos;
    use geo_types::coord;

    fn cw_square(offset_x: f64) -> Edge {
        Edge::new(
            vec![
                coord! { x: offset_x, y: 0.0 },
                coord! { x: offset_x, y: 10.0 },
                coord! { x: offset_x + 10.0, y: 10.0 },
                coord! { x: offset_x + 10.0, y: 0.0 },
                coord! { x: offset_x, y: 0.0 },
            ],
            Label::new(
                0,
                CoordPos::OnBoundary,
                CoordPos::Outside,
                CoordPos::Inside,
            ),
        )
    }

    #[test]
    fn disconnected_rings_form_two_subgraphs() {
        let mut graph = PlanarGraph::new();
        graph.add_edges(vec![cw_square(0.0), cw_square(100.0)]);

        let mut subgraphs = vec![];
        for node in 0..graph.nodes.len() {
            if !graph.nodes[node].visited {
                subgraphs.push(BufferSubgraph::create(node, &mut graph));
            }
        }
        assert_eq!(subgraphs.len(), 2);

        sort_subgraphs(&mut subgraphs);
        // descending rightmost x
        assert_eq!(subgraphs[0].rightmost_coordinate().x, 110.0);
        assert_eq!(subgraphs[1].rightmost_coordinate().x, 10.0);
    }

    #[test]
    fn depths_assign_interior_to_the_ring_inside() {
        let mut graph = PlanarGraph::new();
        graph.add_edges(vec![cw_square(0.0)]);
        let mut subgraph = BufferSubgraph::create(0, &mut graph);
        subgraph.compute_depth(0, &mut graph).unwrap();
        subgraph.find_result_edges(&mut graph);

        let in_result: Vec<_> = (0..graph.dir_edges.len())
            .filter(|&de| graph.dir_edges[de].in_result)
            .collect();
        assert_eq!(in_result.len(), 1);
        // the in-result orientation keeps the interior on its right... the
        // CW ring edge itself (not its twin) bounds the area
        let de = &graph.dir_edges[in_result[0]];
        assert_eq!(de.depth(Position::Right), 1);
        assert_eq!(de.depth(Position::Left), 0);
    }

    #[test]
    fn envelope_covers_all_edges() {
        let mut graph = PlanarGraph::new();
        graph.add_edges(vec![cw_square(5.0)]);
        let mut subgraph = BufferSubgraph::create(0, &mut graph);
        let env = subgraph.envelope(&graph);
        assert_eq!(env.min(), coord! { x: 5.0, y: 0.0 });
        assert_eq!(env.max(), coord! { x: 15.0, y: 10.0 });
    }
}
