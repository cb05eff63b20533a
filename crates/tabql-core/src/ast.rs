use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr};

///
/// Query AST
///
/// Pure, schema-agnostic representation of filter queries.
/// This layer contains no grammar, shape validation, or rendering
/// logic. All interpretation occurs in later passes:
///
/// - parsing (text to tree)
/// - validation (operator/value shape, pagination bounds)
/// - serialization (tree to canonical text)
///
/// All nodes are immutable value objects; "modify" always produces a
/// new value by structural copy.
///

///
/// Operator
///
/// The closed set of comparison operators the grammar understands.
/// Two-word forms render with a single interior space.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum Operator {
    #[display("=")]
    Eq,
    #[display("!=")]
    Ne,
    #[display(">")]
    Gt,
    #[display("<")]
    Lt,
    #[display(">=")]
    Gte,
    #[display("<=")]
    Lte,
    #[display("in")]
    In,
    #[display("not in")]
    NotIn,
    #[display("like")]
    Like,
    #[display("not like")]
    NotLike,
    #[display("is empty")]
    IsEmpty,
    #[display("is not empty")]
    IsNotEmpty,
}

impl Operator {
    /// True for the two operators that carry no right-hand value.
    #[must_use]
    pub const fn is_empty_shape(self) -> bool {
        matches!(self, Self::IsEmpty | Self::IsNotEmpty)
    }

    /// True for membership operators, which require an array or function.
    #[must_use]
    pub const fn is_membership(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// True for pattern operators, which require a string value.
    #[must_use]
    pub const fn is_pattern(self) -> bool {
        matches!(self, Self::Like | Self::NotLike)
    }
}

///
/// FunctionName
///
/// Fixed vocabulary of server-evaluated dynamic values. The engine never
/// evaluates these; they travel through parse/serialize opaquely.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum FunctionName {
    #[display("TODAY")]
    Today,
    #[display("NOW")]
    Now,
    #[display("YESTERDAY")]
    Yesterday,
    #[display("TOMORROW")]
    Tomorrow,
    #[display("FROM_TODAY")]
    FromToday,
    #[display("THIS_WEEK")]
    ThisWeek,
    #[display("LAST_WEEK")]
    LastWeek,
    #[display("NEXT_WEEK")]
    NextWeek,
    #[display("THIS_MONTH")]
    ThisMonth,
    #[display("LAST_MONTH")]
    LastMonth,
    #[display("NEXT_MONTH")]
    NextMonth,
    #[display("THIS_YEAR")]
    ThisYear,
    #[display("LOGINUSER")]
    LoginUser,
    #[display("PRIMARY_ORGANIZATION")]
    PrimaryOrganization,
}

impl FunctionName {
    pub const ALL: [Self; 14] = [
        Self::Today,
        Self::Now,
        Self::Yesterday,
        Self::Tomorrow,
        Self::FromToday,
        Self::ThisWeek,
        Self::LastWeek,
        Self::NextWeek,
        Self::ThisMonth,
        Self::LastMonth,
        Self::NextMonth,
        Self::ThisYear,
        Self::LoginUser,
        Self::PrimaryOrganization,
    ];

    /// Resolve a lexed uppercase name against the fixed vocabulary.
    #[must_use]
    pub fn resolve(name: &str) -> Option<Self> {
        match name {
            "TODAY" => Some(Self::Today),
            "NOW" => Some(Self::Now),
            "YESTERDAY" => Some(Self::Yesterday),
            "TOMORROW" => Some(Self::Tomorrow),
            "FROM_TODAY" => Some(Self::FromToday),
            "THIS_WEEK" => Some(Self::ThisWeek),
            "LAST_WEEK" => Some(Self::LastWeek),
            "NEXT_WEEK" => Some(Self::NextWeek),
            "THIS_MONTH" => Some(Self::ThisMonth),
            "LAST_MONTH" => Some(Self::LastMonth),
            "NEXT_MONTH" => Some(Self::NextMonth),
            "THIS_YEAR" => Some(Self::ThisYear),
            "LOGINUSER" => Some(Self::LoginUser),
            "PRIMARY_ORGANIZATION" => Some(Self::PrimaryOrganization),
            _ => None,
        }
    }
}

///
/// FunctionCall
///
/// A named, argument-optional placeholder for a server-evaluated value,
/// e.g. `TODAY()` or `FROM_TODAY(5, DAYS)`. Arguments are scalars; bare
/// uppercase text arguments denote grammar constants such as time units.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: FunctionName,
    pub args: Vec<Value>,
}

impl FunctionCall {
    /// Construct a zero-argument call.
    #[must_use]
    pub const fn new(name: FunctionName) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    /// Append one positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }
}

///
/// Value
///
/// Right-hand side of a field predicate: a scalar, an array, or a
/// function call. Numbers are stored as `f64`; Rust's shortest-roundtrip
/// float formatting keeps their serialized form stable.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Number(f64),
    Func(FunctionCall),
    List(Vec<Self>),
}

impl Value {
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<FunctionCall> for Value {
    fn from(call: FunctionCall) -> Self {
        Self::Func(call)
    }
}

impl From<Vec<Self>> for Value {
    fn from(values: Vec<Self>) -> Self {
        Self::List(values)
    }
}

///
/// FieldPredicate
///
/// Leaf selection condition. `field` is a bare identifier or a
/// two-segment `table.field` dotted path into a nested table. The value
/// is absent only for the empty-shape operators; the Validator enforces
/// this, construction does not.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldPredicate {
    pub field: String,
    pub op: Operator,
    pub value: Option<Value>,
}

impl FieldPredicate {
    #[must_use]
    pub fn new(field: impl Into<String>, op: Operator, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }
}

///
/// CombinatorKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum CombinatorKind {
    #[display("and")]
    And,
    #[display("or")]
    Or,
}

///
/// Combinator
///
/// Strictly binary logical join. A chain of N same-kind combinators is
/// represented as N-1 left-associated binary nodes.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Combinator {
    pub kind: CombinatorKind,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

///
/// Node
///
/// A predicate subtree: a leaf, a binary combinator, or a negation.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Predicate(FieldPredicate),
    Combinator(Combinator),
    Not(Box<Self>),
}

impl Node {
    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::Combinator(Combinator {
            kind: CombinatorKind::And,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::Combinator(Combinator {
            kind: CombinatorKind::Or,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(operand: Self) -> Self {
        Self::Not(Box::new(operand))
    }
}

impl From<FieldPredicate> for Node {
    fn from(predicate: FieldPredicate) -> Self {
        Self::Predicate(predicate)
    }
}

impl BitAnd for Node {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::and(self, rhs)
    }
}

impl BitOr for Node {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::or(self, rhs)
    }
}

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[display("asc")]
    Asc,
    #[display("desc")]
    Desc,
}

///
/// SortClause
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortClause {
    pub field: String,
    pub direction: SortDirection,
}

impl SortClause {
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

///
/// Query
///
/// The complete query envelope. Any subset of the four parts may be
/// absent; an all-absent query serializes to the empty string. An empty
/// `order` list means no sort clause.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub predicate: Option<Node>,
    pub order: Vec<SortClause>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Query {
    /// Create an all-absent query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            predicate: None,
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// True when every part is absent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.predicate.is_none()
            && self.order.is_empty()
            && self.limit.is_none()
            && self.offset.is_none()
    }

    // ------------------------------------------------------------------
    // Copy-and-modify helpers
    // ------------------------------------------------------------------

    /// New query with the predicate replaced.
    #[must_use]
    pub fn with_predicate(mut self, predicate: Node) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// New query with the sort clauses replaced.
    #[must_use]
    pub fn with_order(mut self, order: Vec<SortClause>) -> Self {
        self.order = order;
        self
    }

    /// New query with the limit replaced.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// New query with the offset replaced.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}
