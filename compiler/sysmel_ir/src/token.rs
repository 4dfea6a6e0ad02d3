//! Token types produced by the lexer.
//!
//! Scanning is not part of this crate; these are the structures a lexer
//! hands over. Each token carries its kind (with any literal payload) and a
//! [`TokenSpan`] with line/column positions and the source it came from.

use std::fmt;

use crate::{Span, Symbol};

crate::define_index! {
    /// Handle of a source text registered by the host.
    pub struct SourceId;
}

/// Line/column/byte position inside a source text.
///
/// Lines and columns are 1-based; the offset is a 0-based byte index.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl SourcePosition {
    #[inline]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        SourcePosition {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Debug for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Full location of a token: the source plus start and end positions.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TokenSpan {
    pub source: SourceId,
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl TokenSpan {
    #[inline]
    pub const fn new(source: SourceId, start: SourcePosition, end: SourcePosition) -> Self {
        TokenSpan { source, start, end }
    }

    /// Byte-offset span, as carried by syntax nodes.
    #[inline]
    pub const fn to_span(self) -> Span {
        Span::new(self.start.offset, self.end.offset)
    }

    /// Span covering both `self` and `other`.
    ///
    /// Both spans are expected to come from the same source.
    pub fn merge(self, other: TokenSpan) -> TokenSpan {
        debug_assert_eq!(self.source, other.source);
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        TokenSpan {
            source: self.source,
            start,
            end,
        }
    }
}

impl fmt::Debug for TokenSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.start, self.end)
    }
}

impl fmt::Display for TokenSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start.line, self.start.column)
    }
}

/// A token with its location.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TokenSpan,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TokenSpan) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Token kinds.
///
/// Textual payloads are interned. Float literals are stored as `f64`, so
/// the enum is `PartialEq` only.
#[derive(Clone, PartialEq)]
pub enum TokenKind {
    /// Plain identifier: `foo`
    Identifier(Symbol),
    /// Single keyword part: `at:`
    Keyword(Symbol),
    /// Several keyword parts written together: `at:put:`
    MultiKeyword(Symbol),

    Integer(i64),
    Float(f64),
    String(Symbol),
    Character(char),
    /// Symbol literal: `#foo`, `#at:put:`
    Symbol(Symbol),

    /// Binary operator: `+`, `<=`, `,`
    Operator(Symbol),

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftCurlyBracket,
    RightCurlyBracket,
    /// `#(`
    LiteralArrayStart,
    /// `#[`
    ByteArrayStart,
    /// `#{`
    DictionaryStart,
    Colon,
    ColonColon,
    Dot,
    Comma,
    Semicolon,
    Bar,
    Bang,
    /// `:=`
    Assignment,
    /// `` ` ``'
    Quote,
    /// `` ` ``"
    Quasiquote,
    /// `` ` ``,
    Unquote,
    /// `` ` ``@
    Splice,

    EndOfSource,
    /// Lexical error with its message.
    Error(Symbol),
}

impl TokenKind {
    /// Whether this token is one of the five literal kinds.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer(_)
                | TokenKind::Float(_)
                | TokenKind::String(_)
                | TokenKind::Character(_)
                | TokenKind::Symbol(_)
        )
    }

    /// Short human-readable description, used in parser diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Keyword(_) => "keyword",
            TokenKind::MultiKeyword(_) => "multi-keyword",
            TokenKind::Integer(_) => "integer literal",
            TokenKind::Float(_) => "float literal",
            TokenKind::String(_) => "string literal",
            TokenKind::Character(_) => "character literal",
            TokenKind::Symbol(_) => "symbol literal",
            TokenKind::Operator(_) => "operator",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::LeftCurlyBracket => "{",
            TokenKind::RightCurlyBracket => "}",
            TokenKind::LiteralArrayStart => "#(",
            TokenKind::ByteArrayStart => "#[",
            TokenKind::DictionaryStart => "#{",
            TokenKind::Colon => ":",
            TokenKind::ColonColon => "::",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Bar => "|",
            TokenKind::Bang => "!",
            TokenKind::Assignment => ":=",
            TokenKind::Quote => "`'",
            TokenKind::Quasiquote => "`\"",
            TokenKind::Unquote => "`,",
            TokenKind::Splice => "`@",
            TokenKind::EndOfSource => "end of source",
            TokenKind::Error(_) => "error",
        }
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(symbol)
            | TokenKind::Keyword(symbol)
            | TokenKind::MultiKeyword(symbol)
            | TokenKind::String(symbol)
            | TokenKind::Symbol(symbol)
            | TokenKind::Operator(symbol)
            | TokenKind::Error(symbol) => write!(f, "{}({:?})", self.display_name(), symbol),
            TokenKind::Integer(value) => write!(f, "integer({value})"),
            TokenKind::Float(value) => write!(f, "float({value})"),
            TokenKind::Character(value) => write!(f, "character({value:?})"),
            _ => f.write_str(self.display_name()),
        }
    }
}
