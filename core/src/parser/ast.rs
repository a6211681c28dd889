//! Binary expression tree.
//!
//! Nodes live in a flat arena indexed by [`NodeId`]. Because the tree is
//! built from postfix order, every child has a smaller id than its parent.
//! The tree is immutable once built; evaluation keeps resolved values in a
//! side table keyed by `NodeId` (see `scheduler`).

use core::fmt;

use crate::parser::{CompileError, Operator, Span, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(f64),
    Binary {
        op: Operator,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Number(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    nodes: Vec<Node>,
    spans: Vec<Span>,
    root: NodeId,
}

impl Ast {
    /// Build a tree from postfix tokens.
    ///
    /// Numerals push leaves. An operator pops two nodes: the earlier one
    /// becomes `left`, the later one `right`.
    pub fn from_postfix(postfix: &[Token]) -> Result<Self, CompileError> {
        let mut nodes = Vec::with_capacity(postfix.len());
        let mut spans = Vec::with_capacity(postfix.len());
        let mut stack: Vec<NodeId> = Vec::new();

        for token in postfix {
            let id = NodeId(nodes.len());
            match &token.kind {
                TokenKind::Numeral(text) => {
                    let value = text.parse::<f64>().map_err(|_| CompileError::MalformedToken {
                        token: text.clone(),
                        span: token.span.clone(),
                    })?;
                    nodes.push(Node::Number(value));
                    spans.push(token.span.clone());
                }
                TokenKind::Operator(op) => {
                    let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                        return Err(CompileError::InvalidPostfix {
                            reason: format!("operator '{}' is missing an operand", op),
                            span: token.span.clone(),
                        });
                    };
                    nodes.push(Node::Binary {
                        op: *op,
                        left,
                        right,
                    });
                    spans.push(Span::combine(&spans[left.0], &spans[right.0]));
                }
                TokenKind::LParen | TokenKind::RParen => {
                    return Err(CompileError::InvalidPostfix {
                        reason: "parenthesis in postfix input".to_string(),
                        span: token.span.clone(),
                    });
                }
            }
            stack.push(id);
        }

        match stack.as_slice() {
            [root] => Ok(Self {
                nodes,
                spans,
                root: *root,
            }),
            [] => Err(CompileError::InvalidPostfix {
                reason: "empty expression".to_string(),
                span: Span::new(0, 0),
            }),
            [_, extra, ..] => {
                let last = stack[stack.len() - 1];
                Err(CompileError::InvalidPostfix {
                    reason: format!("{} operands are not joined by an operator", stack.len()),
                    span: Span::combine(&spans[extra.0], &spans[last.0]),
                })
            }
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn span(&self, id: NodeId) -> &Span {
        &self.spans[id.0]
    }

    /// Total number of nodes (leaves and operators).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of operator nodes, i.e. the number of tasks an evaluation emits.
    pub fn operator_count(&self) -> usize {
        self.nodes.iter().filter(|node| !node.is_leaf()).count()
    }

    /// Height of the tree; a single number has depth 1.
    pub fn depth(&self) -> usize {
        // Children precede parents, so one forward pass suffices.
        let mut depths = vec![0usize; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            depths[i] = match node {
                Node::Number(_) => 1,
                Node::Binary { left, right, .. } => 1 + depths[left.0].max(depths[right.0]),
            };
        }
        depths[self.root.0]
    }
}

/// Pending output while rendering without recursion.
enum Render {
    Node(NodeId),
    Op(Operator),
    Close,
}

/// Fully parenthesized rendering, e.g. `(2 + (3 * 4))`.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Render::Node(self.root)];
        while let Some(step) = stack.pop() {
            match step {
                Render::Node(id) => match self.node(id) {
                    Node::Number(value) => write!(f, "{}", value)?,
                    Node::Binary { op, left, right } => {
                        f.write_str("(")?;
                        stack.push(Render::Close);
                        stack.push(Render::Node(*right));
                        stack.push(Render::Op(*op));
                        stack.push(Render::Node(*left));
                    }
                },
                Render::Op(op) => write!(f, " {} ", op)?,
                Render::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}
