//! Concrete syntax tree storage.
//!
//! The tree is an arena: nodes live in one vector and refer to their children
//! by [`NodeId`]. Nodes are appended in pre-order, so arena order is document
//! order, and neither building, traversing nor dropping the tree recurses.

use std::fmt;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A terminal: one matched lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src, R> {
    pub kind: R,
    pub text: &'src str,
    /// 1-based line of the first character.
    pub line: usize,
    /// 0-based character offset within the line.
    pub column: usize,
}

/// A non-terminal: a grammar rule with its children in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production<R> {
    pub rule: R,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'src, R> {
    Token(Token<'src, R>),
    Production(Production<R>),
}

impl<'src, R> Node<'src, R> {
    pub fn as_token(&self) -> Option<&Token<'src, R>> {
        match self {
            Node::Token(token) => Some(token),
            Node::Production(_) => None,
        }
    }

    pub fn as_production(&self) -> Option<&Production<R>> {
        match self {
            Node::Production(production) => Some(production),
            Node::Token(_) => None,
        }
    }
}

/// A rooted, ordered CST whose tokens borrow from the source buffer.
#[derive(Debug, Clone)]
pub struct Tree<'src, R> {
    nodes: Vec<Node<'src, R>>,
    root: NodeId,
}

impl<'src, R> Tree<'src, R> {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// # Panics
    /// If `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &Node<'src, R> {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node with its id, in pre-order. Children always follow their
    /// parent, so iterating in reverse visits children before parents.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NodeId, &Node<'src, R>)> + ExactSizeIterator {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// All tokens in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token<'src, R>> {
        self.nodes.iter().filter_map(Node::as_token)
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Node::Production(production) = self.node(id) {
                stack.extend(production.children.iter().map(|&child| (child, depth + 1)));
            }
        }
        deepest
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Appends nodes in pre-order and links each one to its parent.
#[derive(Debug)]
pub struct TreeBuilder<'src, R> {
    nodes: Vec<Node<'src, R>>,
}

impl<'src, R> TreeBuilder<'src, R> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a node under `parent`; `None` makes it the root candidate.
    ///
    /// Fails only when the arena cannot grow.
    pub fn push(
        &mut self,
        parent: Option<NodeId>,
        node: Node<'src, R>,
    ) -> Result<NodeId, std::collections::TryReserveError> {
        self.nodes.try_reserve(1)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        if let Some(parent) = parent {
            if let Some(Node::Production(production)) = self.nodes.get_mut(parent.0) {
                production.children.try_reserve(1)?;
                production.children.push(id);
            }
        }
        Ok(id)
    }

    /// Finishes the tree rooted at the first pushed node.
    pub fn finish(self) -> Option<Tree<'src, R>> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(Tree {
            nodes: self.nodes,
            root: NodeId(0),
        })
    }
}

impl<'src, R> Default for TreeBuilder<'src, R> {
    fn default() -> Self {
        Self::new()
    }
}
