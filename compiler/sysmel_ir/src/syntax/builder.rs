//! Programmatic construction of syntax trees.

use std::rc::Rc;

use super::{NodeKind, SwitchCase, Syntax, SyntaxNode};
use crate::{Interner, Symbol};

/// Builds synthetic syntax trees, interning names as it goes.
///
/// Every node gets [`Span::DUMMY`](crate::Span::DUMMY). Selectors are
/// written as plain text (`"at:put:"`, `"+"`) and become symbol literals.
#[derive(Copy, Clone)]
pub struct SyntaxBuilder<'a> {
    interner: &'a Interner,
}

impl<'a> SyntaxBuilder<'a> {
    pub fn new(interner: &'a Interner) -> Self {
        SyntaxBuilder { interner }
    }

    #[inline]
    fn node(kind: NodeKind) -> Syntax {
        SyntaxNode::synthetic(kind)
    }

    fn name(&self, text: &str) -> Symbol {
        self.interner.intern(text)
    }

    // Literals

    pub fn integer(&self, value: i64) -> Syntax {
        Self::node(NodeKind::LiteralInteger(value))
    }

    pub fn float(&self, value: f64) -> Syntax {
        Self::node(NodeKind::LiteralFloat(value))
    }

    pub fn character(&self, value: char) -> Syntax {
        Self::node(NodeKind::LiteralCharacter(value))
    }

    pub fn string(&self, value: &str) -> Syntax {
        Self::node(NodeKind::LiteralString(Rc::from(value)))
    }

    pub fn symbol(&self, text: &str) -> Syntax {
        Self::node(NodeKind::LiteralSymbol(self.name(text)))
    }

    pub fn identifier(&self, text: &str) -> Syntax {
        Self::node(NodeKind::Identifier(self.name(text)))
    }

    /// The `_` wildcard used as a switch key.
    pub fn wildcard(&self) -> Syntax {
        self.identifier("_")
    }

    pub fn error(&self, message: &str) -> Syntax {
        Self::node(NodeKind::Error {
            message: Rc::from(message),
        })
    }

    // Calls and messages

    pub fn apply(&self, function: Syntax, arguments: Vec<Syntax>) -> Syntax {
        Self::node(NodeKind::Application {
            function,
            arguments,
        })
    }

    pub fn send(&self, receiver: Syntax, selector: &str, arguments: Vec<Syntax>) -> Syntax {
        Self::node(NodeKind::MessageSend {
            receiver,
            selector: self.symbol(selector),
            arguments,
        })
    }

    /// Zero-argument message send.
    pub fn unary(&self, receiver: Syntax, selector: &str) -> Syntax {
        self.send(receiver, selector, Vec::new())
    }

    pub fn cascade_message(&self, selector: &str, arguments: Vec<Syntax>) -> Syntax {
        Self::node(NodeKind::CascadeMessage {
            selector: self.symbol(selector),
            arguments,
        })
    }

    pub fn cascade(&self, receiver: Syntax, messages: Vec<Syntax>) -> Syntax {
        Self::node(NodeKind::MessageCascade { receiver, messages })
    }

    /// `first op operand op operand ...`
    pub fn binary_sequence(&self, first: Syntax, rest: Vec<(&str, Syntax)>) -> Syntax {
        let mut elements = Vec::with_capacity(1 + rest.len() * 2);
        elements.push(first);
        for (operator, operand) in rest {
            elements.push(self.symbol(operator));
            elements.push(operand);
        }
        Self::node(NodeKind::BinaryOperatorSequence(elements))
    }

    pub fn sequence(&self, elements: Vec<Syntax>) -> Syntax {
        Self::node(NodeKind::Sequence(elements))
    }

    // Aggregates

    pub fn tuple(&self, elements: Vec<Syntax>) -> Syntax {
        Self::node(NodeKind::Tuple(elements))
    }

    pub fn array(&self, elements: Vec<Syntax>) -> Syntax {
        Self::node(NodeKind::Array(elements))
    }

    pub fn byte_array(&self, elements: Vec<Syntax>) -> Syntax {
        Self::node(NodeKind::ByteArray(elements))
    }

    pub fn dictionary(&self, elements: Vec<Syntax>) -> Syntax {
        Self::node(NodeKind::Dictionary(elements))
    }

    pub fn association(&self, key: Syntax, value: Option<Syntax>) -> Syntax {
        Self::node(NodeKind::Association { key, value })
    }

    // Blocks and quoting

    /// Block closure whose parameters are bindable names.
    pub fn block(&self, parameters: Vec<Syntax>, body: Syntax) -> Syntax {
        Self::node(NodeKind::BlockClosure {
            function_type: Some(self.function_type(parameters, None)),
            body,
        })
    }

    /// Block without a parameter clause, evaluated in place.
    pub fn lexical_block(&self, body: Syntax) -> Syntax {
        Self::node(NodeKind::BlockClosure {
            function_type: None,
            body,
        })
    }

    pub fn function_type(&self, arguments: Vec<Syntax>, result_type: Option<Syntax>) -> Syntax {
        Self::node(NodeKind::FunctionalDependentType {
            arguments,
            result_type,
        })
    }

    pub fn quote(&self, node: Syntax) -> Syntax {
        Self::node(NodeKind::Quote(node))
    }

    pub fn quasiquote(&self, node: Syntax) -> Syntax {
        Self::node(NodeKind::Quasiquote(node))
    }

    pub fn unquote(&self, node: Syntax) -> Syntax {
        Self::node(NodeKind::Unquote(node))
    }

    pub fn splice(&self, node: Syntax) -> Syntax {
        Self::node(NodeKind::Splice(node))
    }

    // Bindings

    /// `:name`
    pub fn bindable(&self, name: &str) -> Syntax {
        self.bindable_name(None, Some(name), false)
    }

    /// `:!name`
    pub fn mutable_bindable(&self, name: &str) -> Syntax {
        self.bindable_name(None, Some(name), true)
    }

    /// `:(type)name`, with an optional name.
    pub fn typed_bindable(&self, type_expression: Syntax, name: Option<&str>) -> Syntax {
        self.bindable_name(Some(type_expression), name, false)
    }

    pub fn bindable_name(
        &self,
        type_expression: Option<Syntax>,
        name: Option<&str>,
        is_mutable: bool,
    ) -> Syntax {
        Self::node(NodeKind::BindableName {
            type_expression,
            name: name.map(|name| self.symbol(name)),
            is_mutable,
        })
    }

    pub fn assign(&self, store: Syntax, value: Syntax) -> Syntax {
        Self::node(NodeKind::Assignment { store, value })
    }

    // Control flow

    pub fn if_(
        &self,
        condition: Syntax,
        true_branch: Option<Syntax>,
        false_branch: Option<Syntax>,
    ) -> Syntax {
        Self::node(NodeKind::If {
            condition,
            true_branch,
            false_branch,
        })
    }

    pub fn while_(
        &self,
        condition: Syntax,
        body: Option<Syntax>,
        continue_expression: Option<Syntax>,
    ) -> Syntax {
        Self::node(NodeKind::While {
            condition,
            body,
            continue_expression,
        })
    }

    pub fn do_while(
        &self,
        body: Option<Syntax>,
        condition: Syntax,
        continue_expression: Option<Syntax>,
    ) -> Syntax {
        Self::node(NodeKind::DoWhile {
            body,
            condition,
            continue_expression,
        })
    }

    pub fn switch(&self, key: Syntax, cases: Vec<(Syntax, Syntax)>) -> Syntax {
        Self::node(NodeKind::Switch {
            key,
            cases: Self::cases(cases),
        })
    }

    pub fn switch_pattern(
        &self,
        value: Syntax,
        value_type: Syntax,
        cases: Vec<(Syntax, Syntax)>,
    ) -> Syntax {
        Self::node(NodeKind::SwitchPattern {
            value,
            value_type,
            cases: Self::cases(cases),
        })
    }

    fn cases(cases: Vec<(Syntax, Syntax)>) -> Vec<SwitchCase> {
        cases
            .into_iter()
            .map(|(key, value)| SwitchCase { key, value })
            .collect()
    }

    pub fn namespace(&self, name: &str, body: Option<Syntax>) -> Syntax {
        Self::node(NodeKind::NamespaceDefinition {
            name: self.symbol(name),
            body,
        })
    }

    pub fn assert(&self, condition: Syntax, message: Option<Syntax>) -> Syntax {
        Self::node(NodeKind::Assert { condition, message })
    }
}
