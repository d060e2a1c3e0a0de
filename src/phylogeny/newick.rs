//! Newick parsing into an arena-backed tree.
//!
//! Supports nested clades, quoted labels (`'Rana boylii'`, with `''` as an
//! escaped quote), branch lengths after `:`, `[...]` comments, and an
//! optional trailing `;`. Underscores in unquoted labels read as spaces and
//! whitespace runs inside unquoted labels collapse to one space.

/// Label given to an unlabeled root.
pub const ROOT_LABEL: &str = "root";

/// Position of a node in a [`NewickTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Raw arena position.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Label as written in the Newick string.
    pub label: Option<String>,
    /// Branch length to the parent.
    pub branch_length: Option<f64>,
    /// Parent node; `None` for the root.
    pub parent: Option<NodeIndex>,
    /// Children in the order written.
    pub children: Vec<NodeIndex>,
}

impl Node {
    /// Whether the node has at least one child.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Errors raised while reading a Newick string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NewickError {
    /// Nothing but whitespace or comments.
    #[error("no tree found in input")]
    Empty,

    /// Input ended before the tree was complete.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: &'static str,
    },

    /// A character that cannot appear at this point.
    #[error("unexpected '{found}' at position {position}")]
    UnexpectedChar {
        /// The offending character.
        found: char,
        /// Character offset into the input.
        position: usize,
    },

    /// A terminal node with no label.
    #[error("empty terminal node at position {position}")]
    EmptyTerminal {
        /// Character offset into the input.
        position: usize,
    },

    /// A branch length that is not a number.
    #[error("invalid branch length '{value}' at position {position}")]
    InvalidBranchLength {
        /// Text following the colon.
        value: String,
        /// Character offset into the input.
        position: usize,
    },

    /// A quoted label with no closing quote.
    #[error("unterminated quoted label starting at position {position}")]
    UnterminatedQuote {
        /// Character offset of the opening quote.
        position: usize,
    },

    /// A comment with no closing bracket.
    #[error("unterminated comment starting at position {position}")]
    UnterminatedComment {
        /// Character offset of the opening bracket.
        position: usize,
    },
}

/// A rooted tree parsed from Newick notation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewickTree {
    nodes: Vec<Node>,
}

impl NewickTree {
    /// Parses a Newick string.
    ///
    /// # Errors
    ///
    /// Returns a [`NewickError`] describing the first syntax problem found.
    pub fn parse(newick: &str) -> Result<Self, NewickError> {
        Parser::new(newick).parse_tree()
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Looks up a node.
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a parsed tree has at least a root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node indices in pre-order (parent before children).
    #[must_use]
    pub fn preorder(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.node(index).children.iter().rev().copied());
        }
        order
    }

    /// Effective label of a node: its written label, or [`ROOT_LABEL`] for
    /// an unlabeled root. Other unlabeled nodes have no label.
    #[must_use]
    pub fn node_label(&self, index: NodeIndex) -> Option<&str> {
        match self.node(index).label.as_deref() {
            Some(label) => Some(label),
            None if index == self.root() => Some(ROOT_LABEL),
            None => None,
        }
    }

    /// First node whose effective label is `label`.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<NodeIndex> {
        self.preorder().into_iter().find(|&index| self.node_label(index) == Some(label))
    }

    fn push(&mut self, parent: Option<NodeIndex>) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(Node { label: None, branch_length: None, parent, children: Vec::new() });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(index);
        }
        index
    }
}

const STRUCTURAL: &[char] = &['(', ')', ',', ':', ';', '[', '\''];

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self { chars: input.chars().collect(), pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_insignificant(&mut self) -> Result<(), NewickError> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += 1;
            } else if c == '[' {
                let start = self.pos;
                while self.peek().is_some_and(|c| c != ']') {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(NewickError::UnterminatedComment { position: start });
                }
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn parse_tree(mut self) -> Result<NewickTree, NewickError> {
        self.skip_insignificant()?;
        if self.peek().is_none() {
            return Err(NewickError::Empty);
        }

        let mut tree = NewickTree { nodes: Vec::new() };
        self.parse_nodes(&mut tree)?;

        self.skip_insignificant()?;
        if self.peek() == Some(';') {
            self.pos += 1;
            self.skip_insignificant()?;
        }
        match self.peek() {
            None => Ok(tree),
            Some(found) => Err(NewickError::UnexpectedChar { found, position: self.pos }),
        }
    }

    /// Reads the whole tree, keeping open clades on an explicit stack so
    /// nesting depth is bounded by memory rather than the call stack.
    fn parse_nodes(&mut self, tree: &mut NewickTree) -> Result<(), NewickError> {
        let mut open: Vec<(NodeIndex, usize)> = Vec::new();
        loop {
            self.skip_insignificant()?;
            let start = self.pos;
            let index = tree.push(open.last().map(|&(clade, _)| clade));
            if self.peek() == Some('(') {
                self.pos += 1;
                open.push((index, start));
                continue;
            }
            self.finish_node(tree, index, start)?;

            // Close clades until the next sibling starts or the root is done.
            loop {
                let Some(&(clade, clade_start)) = open.last() else {
                    return Ok(());
                };
                self.skip_insignificant()?;
                match self.peek() {
                    Some(',') => {
                        self.pos += 1;
                        break;
                    }
                    Some(')') => {
                        self.pos += 1;
                        open.pop();
                        self.finish_node(tree, clade, clade_start)?;
                    }
                    Some(found) => {
                        return Err(NewickError::UnexpectedChar { found, position: self.pos })
                    }
                    None => return Err(NewickError::UnexpectedEnd { expected: "',' or ')'" }),
                }
            }
        }
    }

    /// Reads the label and branch length that follow a node's children.
    fn finish_node(
        &mut self,
        tree: &mut NewickTree,
        index: NodeIndex,
        start: usize,
    ) -> Result<(), NewickError> {
        let label = self.parse_label()?;
        let branch_length = self.parse_branch_length()?;

        let is_terminal = tree.nodes[index.0].children.is_empty();
        if is_terminal && label.is_none() {
            return match self.peek() {
                None if branch_length.is_none() => {
                    Err(NewickError::UnexpectedEnd { expected: "a node" })
                }
                _ => Err(NewickError::EmptyTerminal { position: start }),
            };
        }

        let node = &mut tree.nodes[index.0];
        node.label = label;
        node.branch_length = branch_length;
        Ok(())
    }

    fn parse_label(&mut self) -> Result<Option<String>, NewickError> {
        self.skip_insignificant()?;
        if self.peek() == Some('\'') {
            return self.parse_quoted_label().map(Some);
        }

        let mut raw = String::new();
        while let Some(c) = self.peek() {
            if STRUCTURAL.contains(&c) {
                break;
            }
            raw.push(c);
            self.pos += 1;
        }

        let label = raw.replace('_', " ").split_whitespace().collect::<Vec<_>>().join(" ");
        Ok((!label.is_empty()).then_some(label))
    }

    fn parse_quoted_label(&mut self) -> Result<String, NewickError> {
        let start = self.pos;
        self.pos += 1;
        let mut label = String::new();
        loop {
            match self.peek() {
                None => return Err(NewickError::UnterminatedQuote { position: start }),
                Some('\'') if self.chars.get(self.pos + 1) == Some(&'\'') => {
                    label.push('\'');
                    self.pos += 2;
                }
                Some('\'') => {
                    self.pos += 1;
                    return Ok(label);
                }
                Some(c) => {
                    label.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn parse_branch_length(&mut self) -> Result<Option<f64>, NewickError> {
        self.skip_insignificant()?;
        if self.peek() != Some(':') {
            return Ok(None);
        }
        self.pos += 1;
        self.skip_insignificant()?;

        let start = self.pos;
        let mut raw = String::new();
        while let Some(c) = self.peek() {
            if STRUCTURAL.contains(&c) || c.is_whitespace() {
                break;
            }
            raw.push(c);
            self.pos += 1;
        }

        raw.parse::<f64>()
            .map(Some)
            .map_err(|_| NewickError::InvalidBranchLength { value: raw, position: start })
    }
}
