//! Syntax trees consumed by the evaluator.
//!
//! The parser produces a tree of reference-counted [`SyntaxNode`]s. Nodes
//! are immutable once built; quoting shares them as runtime values and
//! quasiquotation builds fresh trees that reuse untouched subtrees.
//!
//! Trees can also be assembled directly with [`SyntaxBuilder`].

use std::fmt;
use std::rc::Rc;

use crate::{Span, Symbol};

mod builder;

pub use builder::SyntaxBuilder;

/// Shared handle to a syntax node.
pub type Syntax = Rc<SyntaxNode>;

/// A syntax node with its source span.
#[derive(Clone, PartialEq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
}

impl SyntaxNode {
    #[inline]
    pub fn new(kind: NodeKind, span: Span) -> Syntax {
        Rc::new(SyntaxNode { kind, span })
    }

    /// Node without a source location, for trees built by the host.
    #[inline]
    pub fn synthetic(kind: NodeKind) -> Syntax {
        Self::new(kind, Span::DUMMY)
    }
}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// One `key: expression` arm of a switch.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    /// Integer key, typed bindable name, or the `_` wildcard identifier.
    pub key: Syntax,
    pub value: Syntax,
}

/// Node kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Parser-recovered syntax error.
    Error { message: Rc<str> },

    // Literals
    LiteralInteger(i64),
    LiteralFloat(f64),
    LiteralCharacter(char),
    LiteralString(Rc<str>),
    LiteralSymbol(Symbol),

    Identifier(Symbol),

    /// `function(arguments...)`
    Application {
        function: Syntax,
        arguments: Vec<Syntax>,
    },
    /// `receiver selector: arguments...`
    MessageSend {
        receiver: Syntax,
        selector: Syntax,
        arguments: Vec<Syntax>,
    },
    /// `receiver first; second; third`
    MessageCascade {
        receiver: Syntax,
        messages: Vec<Syntax>,
    },
    /// One receiver-less element of a cascade.
    CascadeMessage {
        selector: Syntax,
        arguments: Vec<Syntax>,
    },
    /// `operand op operand op operand ...`
    ///
    /// Operands at even positions, operator selectors at odd positions.
    BinaryOperatorSequence(Vec<Syntax>),
    Sequence(Vec<Syntax>),

    Tuple(Vec<Syntax>),
    Array(Vec<Syntax>),
    ByteArray(Vec<Syntax>),
    Dictionary(Vec<Syntax>),
    Association {
        key: Syntax,
        value: Option<Syntax>,
    },

    /// `{ :(params) :: result | body }` or `{ body }`.
    ///
    /// Without a function type this is a lexical block.
    BlockClosure {
        function_type: Option<Syntax>,
        body: Syntax,
    },
    LexicalBlock {
        body: Syntax,
    },

    Quote(Syntax),
    Quasiquote(Syntax),
    Unquote(Syntax),
    Splice(Syntax),

    /// `(arguments...) :: result`
    FunctionalDependentType {
        arguments: Vec<Syntax>,
        result_type: Option<Syntax>,
    },
    /// `:x`, `:!x`, `:(Type)x`
    BindableName {
        type_expression: Option<Syntax>,
        name: Option<Syntax>,
        is_mutable: bool,
    },
    Assignment {
        store: Syntax,
        value: Syntax,
    },

    If {
        condition: Syntax,
        true_branch: Option<Syntax>,
        false_branch: Option<Syntax>,
    },
    While {
        condition: Syntax,
        body: Option<Syntax>,
        continue_expression: Option<Syntax>,
    },
    DoWhile {
        body: Option<Syntax>,
        condition: Syntax,
        continue_expression: Option<Syntax>,
    },
    Switch {
        key: Syntax,
        cases: Vec<SwitchCase>,
    },
    SwitchPattern {
        value: Syntax,
        value_type: Syntax,
        cases: Vec<SwitchCase>,
    },

    NamespaceDefinition {
        name: Syntax,
        body: Option<Syntax>,
    },

    /// `assert(condition, message)`
    Assert {
        condition: Syntax,
        message: Option<Syntax>,
    },
}

impl NodeKind {
    /// Name of the node kind, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Error { .. } => "error",
            NodeKind::LiteralInteger(_) => "integer literal",
            NodeKind::LiteralFloat(_) => "float literal",
            NodeKind::LiteralCharacter(_) => "character literal",
            NodeKind::LiteralString(_) => "string literal",
            NodeKind::LiteralSymbol(_) => "symbol literal",
            NodeKind::Identifier(_) => "identifier",
            NodeKind::Application { .. } => "application",
            NodeKind::MessageSend { .. } => "message send",
            NodeKind::MessageCascade { .. } => "message cascade",
            NodeKind::CascadeMessage { .. } => "cascaded message",
            NodeKind::BinaryOperatorSequence(_) => "binary operator sequence",
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Tuple(_) => "tuple",
            NodeKind::Array(_) => "array",
            NodeKind::ByteArray(_) => "byte array",
            NodeKind::Dictionary(_) => "dictionary",
            NodeKind::Association { .. } => "association",
            NodeKind::BlockClosure { .. } => "block closure",
            NodeKind::LexicalBlock { .. } => "lexical block",
            NodeKind::Quote(_) => "quote",
            NodeKind::Quasiquote(_) => "quasiquote",
            NodeKind::Unquote(_) => "unquote",
            NodeKind::Splice(_) => "splice",
            NodeKind::FunctionalDependentType { .. } => "functional dependent type",
            NodeKind::BindableName { .. } => "bindable name",
            NodeKind::Assignment { .. } => "assignment",
            NodeKind::If { .. } => "if",
            NodeKind::While { .. } => "while",
            NodeKind::DoWhile { .. } => "do-while",
            NodeKind::Switch { .. } => "switch",
            NodeKind::SwitchPattern { .. } => "switch by pattern",
            NodeKind::NamespaceDefinition { .. } => "namespace definition",
            NodeKind::Assert { .. } => "assert",
        }
    }

    /// Whether this is one of the five literal kinds.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::LiteralInteger(_)
                | NodeKind::LiteralFloat(_)
                | NodeKind::LiteralCharacter(_)
                | NodeKind::LiteralString(_)
                | NodeKind::LiteralSymbol(_)
        )
    }
}

#[cfg(test)]
mod tests;
