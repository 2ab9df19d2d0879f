//! Route tree core - hot path for route matching.

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::params::{ParamVec, Params};
use crate::path::segments;

/// Prefix marking a named parameter segment (`:name`)
pub const PARAM_SIGIL: char = ':';

/// Segment acting as a catch-all for the remainder of the path
pub const WILDCARD: &str = "*";

/// Index of a node inside a [`RouteTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone)]
enum Segment {
    Root,
    Static(Box<str>),
    Param(Arc<str>),
    Wildcard,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Root => Ok(()),
            Segment::Static(text) => f.write_str(text),
            Segment::Param(name) => write!(f, "{}{}", PARAM_SIGIL, name),
            Segment::Wildcard => f.write_str(WILDCARD),
        }
    }
}

#[derive(Clone)]
struct Node<H> {
    segment: Segment,
    /// Set only on nodes that terminate a registered route
    handler: Option<H>,
    /// Diagnostics only; never followed while matching
    parent: Option<NodeId>,
    static_children: Vec<NodeId>,
    param_children: Vec<NodeId>,
    wildcard: Option<NodeId>,
}

impl<H> Node<H> {
    fn new(segment: Segment, parent: Option<NodeId>) -> Self {
        Self {
            segment,
            handler: None,
            parent,
            static_children: Vec::new(),
            param_children: Vec::new(),
            wildcard: None,
        }
    }

    fn is_static(&self, text: &str) -> bool {
        matches!(&self.segment, Segment::Static(s) if s.as_ref() == text)
    }

    fn is_param(&self, name: &str) -> bool {
        matches!(&self.segment, Segment::Param(n) if n.as_ref() == name)
    }
}

/// Result of a successful lookup
#[derive(Debug)]
pub struct Match<'t, H> {
    /// The value registered for the matched route
    pub value: &'t H,
    /// Parameters bound along the matched branch
    pub params: Params,
    /// Terminal node of the match, usable with [`RouteTree::pattern`]
    pub node: NodeId,
}

/// Prefix tree of path segments mapping routes to values of type `H`
#[derive(Clone)]
pub struct RouteTree<H> {
    nodes: Vec<Node<H>>,
    routes: usize,
}

impl<H> Default for RouteTree<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for RouteTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTree")
            .field("routes", &self.routes())
            .finish()
    }
}

impl<H> RouteTree<H> {
    /// Create a tree holding only the root node
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Segment::Root, None)],
            routes: 0,
        }
    }

    fn node(&self, id: NodeId) -> &Node<H> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<H> {
        &mut self.nodes[id.0]
    }

    fn add_child(&mut self, parent: NodeId, segment: Segment) -> NodeId {
        let id = NodeId(self.nodes.len());
        let slot = self.node_mut(parent);
        match &segment {
            Segment::Param(_) => slot.param_children.push(id),
            Segment::Wildcard => slot.wildcard = Some(id),
            Segment::Static(_) | Segment::Root => slot.static_children.push(id),
        }
        self.nodes.push(Node::new(segment, Some(parent)));
        id
    }

    fn static_child(&mut self, parent: NodeId, text: &str) -> NodeId {
        let existing = self
            .node(parent)
            .static_children
            .iter()
            .copied()
            .find(|&c| self.node(c).is_static(text));
        match existing {
            Some(id) => id,
            None => self.add_child(parent, Segment::Static(text.into())),
        }
    }

    fn param_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        assert!(
            !name.is_empty(),
            "route parameter under '{}' has an empty name",
            self.pattern(parent)
        );
        let existing = self
            .node(parent)
            .param_children
            .iter()
            .copied()
            .find(|&c| self.node(c).is_param(name));
        match existing {
            Some(id) => id,
            None => self.add_child(parent, Segment::Param(Arc::from(name))),
        }
    }

    fn wildcard_child(&mut self, parent: NodeId) -> NodeId {
        match self.node(parent).wildcard {
            Some(id) => id,
            None => self.add_child(parent, Segment::Wildcard),
        }
    }

    /// Register `value` under the route `path`.
    ///
    /// The path is normalized first. `:name` segments become parameter nodes,
    /// a `*` segment becomes the catch-all for its level and ends the route:
    /// anything after it is ignored. Registering an existing route replaces
    /// its value and returns the previous one.
    ///
    /// # Panics
    ///
    /// Panics on a parameter segment without a name (`/users/:`). Routes are
    /// registered by trusted startup code, so this is a programming error.
    pub fn insert(&mut self, path: &str, value: H) -> Option<H> {
        let parts = segments(path);
        let mut current = NodeId::ROOT;

        for (idx, part) in parts.iter().enumerate() {
            if *part == WILDCARD {
                current = self.wildcard_child(current);
                if idx + 1 < parts.len() {
                    warn!(
                        route = %path,
                        ignored = %parts[idx + 1..].join("/"),
                        "Segments after catch-all are ignored"
                    );
                }
                break;
            }

            current = match part.strip_prefix(PARAM_SIGIL) {
                Some(name) => self.param_child(current, name),
                None => self.static_child(current, part),
            };
        }

        let previous = self.node_mut(current).handler.replace(value);
        if previous.is_none() {
            self.routes += 1;
        }
        previous
    }

    /// Look up the route matching `path`.
    ///
    /// Returns `None` when nothing matches; an unmatched path is a routine
    /// outcome, not an error.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<Match<'_, H>> {
        self.find_segments(&segments(path))
    }

    /// Look up a route from already-normalized segments
    #[must_use]
    pub fn find_segments(&self, parts: &[&str]) -> Option<Match<'_, H>> {
        let mut bindings = ParamVec::new();
        let node = self.search(NodeId::ROOT, parts, &mut bindings)?;
        let value = self.node(node).handler.as_ref()?;
        Some(Match {
            value,
            params: Params::from_vec(bindings),
            node,
        })
    }

    fn search(&self, id: NodeId, parts: &[&str], bindings: &mut ParamVec) -> Option<NodeId> {
        let node = self.node(id);
        let Some((first, rest)) = parts.split_first() else {
            return node.handler.as_ref().map(|_| id);
        };

        // Static children are unique by text, so at most one candidate
        let literal = node
            .static_children
            .iter()
            .copied()
            .find(|&c| self.node(c).is_static(first));
        if let Some(child) = literal {
            if let Some(found) = self.search(child, rest, bindings) {
                return Some(found);
            }
        }

        for &child in &node.param_children {
            if let Segment::Param(name) = &self.node(child).segment {
                let mark = bindings.len();
                bindings.push((Arc::clone(name), (*first).to_string()));
                if let Some(found) = self.search(child, rest, bindings) {
                    return Some(found);
                }
                bindings.truncate(mark);
            }
        }

        node.wildcard.filter(|&w| self.node(w).handler.is_some())
    }

    /// Render the registered pattern of `node`, e.g. `/users/:id/*`
    #[must_use]
    pub fn pattern(&self, node: NodeId) -> RoutePattern<'_, H> {
        RoutePattern { tree: self, node }
    }

    /// Patterns of every registered route, in node creation order
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.handler.is_some())
            .map(|(idx, _)| self.pattern(NodeId(idx)).to_string())
            .collect()
    }

    /// Number of registered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes
    }

    /// True when no route has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }
}

/// Lazily formatted route pattern, built by walking parent links
pub struct RoutePattern<'t, H> {
    tree: &'t RouteTree<H>,
    node: NodeId,
}

impl<H> fmt::Display for RoutePattern<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chain: SmallVec<[NodeId; 16]> = SmallVec::new();
        let mut current = Some(self.node);
        while let Some(id) = current {
            let node = self.tree.node(id);
            if !matches!(node.segment, Segment::Root) {
                chain.push(id);
            }
            current = node.parent;
        }

        if chain.is_empty() {
            return f.write_str("/");
        }
        for id in chain.iter().rev() {
            write!(f, "/{}", self.tree.node(*id).segment)?;
        }
        Ok(())
    }
}

impl<H> fmt::Debug for RoutePattern<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
