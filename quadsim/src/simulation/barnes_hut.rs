//! # Barnes–Hut Quadtree (2D)
//!
//! This module implements a **2D Barnes–Hut quadtree** for approximating the
//! net gravitational force on every body of a [`Universe`]. It replaces the
//! naive `O(N²)` all-pairs sum with an approximate `O(N log N)` traversal.
//!
//! ## Core Concepts
//!
//! - The simulation square is recursively subdivided into 4 quadrants
//!   (NW, NE, SW, SE, see [`crate::simulation::region`]).
//! - Every quadrant is a node of the tree. A node is either empty, a leaf
//!   holding exactly one body, or an internal node with four children.
//! - Internal nodes carry an *aggregate* pseudo-body: the total mass of their
//!   subtree placed at its center of mass.
//! - During force evaluation, an internal node whose `width / distance` is at
//!   most `theta` is treated as that single pseudo-body.
//!
//! ## Storage
//!
//! Nodes live in one `Vec<Node>` and refer to each other through [`NodeId`]
//! handles. The tree is built once per step, read concurrently by the force
//! pass, and dropped with the step.
//!
//! ## Merging
//!
//! Bodies at numerically identical positions are merged (masses summed,
//! velocities averaged, position kept) instead of subdividing forever. The
//! same fallback applies when two distinct bodies are still sharing a leaf at
//! [`MAX_DEPTH`].

use log::{debug, trace, warn};

use crate::simulation::error::Result;
use crate::simulation::forces::gravity_force;
use crate::simulation::region::Region;
use crate::simulation::states::{validate_masses, Body, NVec2, Universe};

/// Deepest level (root = 0) at which a leaf may still be subdivided.
///
/// Two distinct bodies closer than `width / 2^MAX_DEPTH` end up merged.
pub const MAX_DEPTH: usize = 40;

/// Handle of a node in [`QuadTree`]'s arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize, "NodeId overflow");
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single quadtree node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node {
    /// No body in this quadrant.
    Empty,

    /// Exactly one body (possibly the result of merges).
    Leaf { body: Body, region: Region },

    /// Subdivided quadrant.
    Internal {
        /// Pseudo-body: summed mass at the mass-weighted centroid of the subtree
        aggregate: Body,
        region: Region,
        /// Children indexed NW, NE, SW, SE
        children: [NodeId; 4],
    },
}

/// A complete Barnes–Hut quadtree over one snapshot.
pub struct QuadTree {
    nodes: Vec<Node>,
    root: NodeId,
    region: Region,
}

impl QuadTree {
    /// Build a quadtree covering `region` from a slice of body slots.
    ///
    /// Absent slots are skipped; present bodies are inserted in slice order.
    ///
    /// # Errors
    /// - [`SimError::DegenerateRegion`](crate::SimError::DegenerateRegion) if
    ///   `region.width` is not finite and positive.
    /// - [`SimError::InvalidMass`](crate::SimError::InvalidMass) if any present
    ///   body has a mass that is not finite and positive.
    ///
    /// Both checks run before any node is created.
    pub fn build(region: Region, bodies: &[Option<Body>]) -> Result<Self> {
        let region = Region::new(region.x, region.y, region.width)?;
        validate_masses(bodies)?;

        let mut tree = QuadTree {
            nodes: Vec::with_capacity(bodies.len() * 2 + 1),
            root: NodeId::new(0),
            region,
        };
        tree.nodes.push(Node::Empty);

        for body in bodies.iter().flatten() {
            tree.insert(tree.root, body, region, 0);
        }

        trace!("quadtree: {} bodies -> {} nodes", bodies.len(), tree.nodes.len());
        Ok(tree)
    }

    /// Build the tree for a whole snapshot over its simulation region.
    pub fn from_universe(universe: &Universe) -> Result<Self> {
        Self::build(universe.region(), universe.bodies())
    }

    /// Net gravitational force (not acceleration) on `target`.
    ///
    /// Leaves contribute the exact pairwise force, skipped at zero distance so
    /// a body never pulls on itself. Internal nodes with
    /// `region.width / distance <= theta` contribute their aggregate; any other
    /// internal node is opened and its four children summed.
    ///
    /// `theta = 0` visits every leaf and reproduces direct summation.
    pub fn force_on(&self, target: &Body, theta: f64, g: f64) -> NVec2 {
        self.force_from(self.root, target, theta, g)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Number of nodes in the arena (diagnostics)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// The pseudo-body standing for the whole tree, `None` if it is empty.
    pub fn root_aggregate(&self) -> Option<Body> {
        match self.node(self.root) {
            Node::Empty => None,
            Node::Leaf { body, .. } => Some(*body),
            Node::Internal { aggregate, .. } => Some(*aggregate),
        }
    }

    /// Number of levels below the root of the deepest node.
    pub fn depth(&self) -> usize {
        self.depth_from(self.root)
    }

    // helpers ==============================================================================

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Insert `body` into the node `id` whose quadrant is `region`.
    ///
    /// The node is taken out of the arena, its replacement is computed (which
    /// may recurse into its children) and then written back in its place:
    ///
    /// - **Empty**: becomes a leaf holding a copy of `body`.
    /// - **Leaf**, same position: merge.
    /// - **Leaf** at `MAX_DEPTH`: merge (subdivision budget exhausted).
    /// - **Leaf** otherwise: becomes internal with four empty children; the
    ///   old occupant and `body` are both pushed one level down. If they share
    ///   a quadrant, the child leaf subdivides again on the second insert.
    /// - **Internal**, aggregate at the same position: merge into the aggregate.
    /// - **Internal** otherwise: aggregate updated first, then descend into the
    ///   child whose quadrant contains `body`.
    fn insert(&mut self, id: NodeId, body: &Body, region: Region, depth: usize) {
        let node = std::mem::replace(&mut self.nodes[id.index()], Node::Empty);

        let replacement = match node {
            Node::Empty => Node::Leaf {
                body: *body,
                region,
            },

            Node::Leaf {
                body: mut occupant,
                region,
            } => {
                if occupant.position == body.position {
                    let (x, y) = (body.position.x, body.position.y);
                    debug!("merging coincident bodies at ({x}, {y})");
                    occupant.merge(body);
                    Node::Leaf {
                        body: occupant,
                        region,
                    }
                } else if depth >= MAX_DEPTH {
                    warn!(
                        "depth limit {} reached at ({}, {}); merging near-coincident bodies",
                        MAX_DEPTH, body.position.x, body.position.y
                    );
                    occupant.merge(body);
                    Node::Leaf {
                        body: occupant,
                        region,
                    }
                } else {
                    let children = [(); 4].map(|_| self.alloc(Node::Empty));

                    let mut aggregate = occupant;
                    aggregate.absorb_into_centroid(body);

                    self.insert_into_child(&children, &occupant, region, depth);
                    self.insert_into_child(&children, body, region, depth);

                    Node::Internal {
                        aggregate,
                        region,
                        children,
                    }
                }
            }

            Node::Internal {
                mut aggregate,
                region,
                children,
            } => {
                if aggregate.position == body.position {
                    let (x, y) = (body.position.x, body.position.y);
                    debug!("merging body into aggregate at ({x}, {y})");
                    aggregate.merge(body);
                } else {
                    aggregate.absorb_into_centroid(body);
                    self.insert_into_child(&children, body, region, depth);
                }
                Node::Internal {
                    aggregate,
                    region,
                    children,
                }
            }
        };

        self.nodes[id.index()] = replacement;
    }

    /// Route `body` to the child of `region` that contains it.
    fn insert_into_child(
        &mut self,
        children: &[NodeId; 4],
        body: &Body,
        region: Region,
        depth: usize,
    ) {
        let q = region.quadrant_of(&body.position);
        self.insert(children[q.index()], body, region.child(q), depth + 1);
    }

    fn force_from(&self, id: NodeId, target: &Body, theta: f64, g: f64) -> NVec2 {
        match self.node(id) {
            Node::Empty => NVec2::zeros(),

            Node::Leaf { body, .. } => gravity_force(target, body.position, body.mass, g),

            Node::Internal {
                aggregate,
                region,
                children,
            } => {
                // a target sitting on the centroid always opens the node
                let dist = target.distance_to(&aggregate.position);
                if dist > 0.0 && region.width / dist <= theta {
                    gravity_force(target, aggregate.position, aggregate.mass, g)
                } else {
                    children
                        .iter()
                        .map(|&child| self.force_from(child, target, theta, g))
                        .fold(NVec2::zeros(), |acc, f| acc + f)
                }
            }
        }
    }

    fn depth_from(&self, id: NodeId) -> usize {
        match self.node(id) {
            Node::Internal { children, .. } => {
                1 + children
                    .iter()
                    .map(|&c| self.depth_from(c))
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }
}
