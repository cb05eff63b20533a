use crate::ast::{
    FieldPredicate, FunctionCall, Node, Operator, Query, SortClause, SortDirection, Value,
};


///
/// FieldExpr
///
/// Method-based predicate builder for one field path. Carries the path
/// as an owned string because field codes are runtime data fetched from
/// the record service. Construction never validates shape; the
/// Validator owns the operator/value rules.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldExpr {
    name: String,
}

/// Entry point for explicit predicate construction:
/// `field("Status").eq("Open")`.
pub fn field(name: impl Into<String>) -> FieldExpr {
    FieldExpr { name: name.into() }
}

impl FieldExpr {
    /// The underlying field path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    // ------------------------------------------------------------------
    // Comparison predicates
    // ------------------------------------------------------------------

    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Node {
        self.predicate(Operator::Eq, Some(value.into()))
    }

    #[must_use]
    pub fn ne(self, value: impl Into<Value>) -> Node {
        self.predicate(Operator::Ne, Some(value.into()))
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Node {
        self.predicate(Operator::Gt, Some(value.into()))
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Node {
        self.predicate(Operator::Gte, Some(value.into()))
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Node {
        self.predicate(Operator::Lt, Some(value.into()))
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Node {
        self.predicate(Operator::Lte, Some(value.into()))
    }

    // ------------------------------------------------------------------
    // Membership predicates
    // ------------------------------------------------------------------

    /// Membership test against a fixed list.
    #[must_use]
    pub fn in_list<I, V>(self, values: I) -> Node
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items = values.into_iter().map(Into::into).collect();
        self.predicate(Operator::In, Some(Value::List(items)))
    }

    /// Negated membership test against a fixed list.
    #[must_use]
    pub fn not_in_list<I, V>(self, values: I) -> Node
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items = values.into_iter().map(Into::into).collect();
        self.predicate(Operator::NotIn, Some(Value::List(items)))
    }

    /// Membership test against a server-evaluated function value.
    #[must_use]
    pub fn in_func(self, call: FunctionCall) -> Node {
        self.predicate(Operator::In, Some(Value::Func(call)))
    }

    /// Negated membership test against a server-evaluated function value.
    #[must_use]
    pub fn not_in_func(self, call: FunctionCall) -> Node {
        self.predicate(Operator::NotIn, Some(Value::Func(call)))
    }

    // ------------------------------------------------------------------
    // Pattern and structural predicates
    // ------------------------------------------------------------------

    #[must_use]
    pub fn like(self, pattern: impl Into<String>) -> Node {
        self.predicate(Operator::Like, Some(Value::Text(pattern.into())))
    }

    #[must_use]
    pub fn not_like(self, pattern: impl Into<String>) -> Node {
        self.predicate(Operator::NotLike, Some(Value::Text(pattern.into())))
    }

    #[must_use]
    pub fn is_empty(self) -> Node {
        self.predicate(Operator::IsEmpty, None)
    }

    #[must_use]
    pub fn is_not_empty(self) -> Node {
        self.predicate(Operator::IsNotEmpty, None)
    }

    fn predicate(self, op: Operator, value: Option<Value>) -> Node {
        Node::Predicate(FieldPredicate {
            field: self.name,
            op,
            value,
        })
    }
}

// ----------------------------------------------------------------------
// Free combinators
// ----------------------------------------------------------------------

/// Binary AND join of two predicate subtrees.
#[must_use]
pub fn and(left: Node, right: Node) -> Node {
    Node::and(left, right)
}

/// Binary OR join of two predicate subtrees.
#[must_use]
pub fn or(left: Node, right: Node) -> Node {
    Node::or(left, right)
}

/// Negation of a predicate subtree.
#[must_use]
pub fn not(operand: Node) -> Node {
    Node::not(operand)
}

///
/// QueryBuilder
///
/// Declarative builder collecting predicate, ordering, and pagination
/// into a `Query`. Purely structural: no validation occurs here beyond
/// composition; `validate` checks the result when the caller wants
/// guarantees.
///

#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    predicate: Option<Node>,
    order: Vec<SortClause>,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl QueryBuilder {
    /// Create a new empty query builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            predicate: None,
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Add a predicate, implicitly AND-ing with any existing predicate.
    #[must_use]
    pub fn filter(mut self, predicate: Node) -> Self {
        self.predicate = match self.predicate.take() {
            Some(existing) => Some(Node::and(existing, predicate)),
            None => Some(predicate),
        };
        self
    }

    /// Explicit AND combinator for predicates.
    #[must_use]
    pub fn and(self, predicate: Node) -> Self {
        self.filter(predicate)
    }

    /// Explicit OR combinator for predicates.
    #[must_use]
    pub fn or(mut self, predicate: Node) -> Self {
        self.predicate = match self.predicate.take() {
            Some(existing) => Some(Node::or(existing, predicate)),
            None => Some(predicate),
        };
        self
    }

    /// Append an ascending sort key.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order.push(SortClause {
            field: field.into(),
            direction: SortDirection::Asc,
        });
        self
    }

    /// Append a descending sort key.
    #[must_use]
    pub fn order_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order.push(SortClause {
            field: field.into(),
            direction: SortDirection::Desc,
        });
        self
    }

    /// Set or replace the result limit.
    #[must_use]
    pub const fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set or replace the result offset.
    #[must_use]
    pub const fn offset(mut self, n: u32) -> Self {
        self.offset = Some(n);
        self
    }

    /// Finalize the builder into an immutable `Query`.
    #[must_use]
    pub fn build(self) -> Query {
        Query {
            predicate: self.predicate,
            order: self.order,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

impl From<Query> for QueryBuilder {
    /// Reopen an existing query for copy-and-modify construction.
    fn from(query: Query) -> Self {
        Self {
            predicate: query.predicate,
            order: query.order,
            limit: query.limit,
            offset: query.offset,
        }
    }
}
