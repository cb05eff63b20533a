
use crate::{
    ast::{
        FieldPredicate, FunctionCall, FunctionName, Node, Operator, Query, SortClause,
        SortDirection, Value,
    },
    error::{ParseError, ValidateError},
    parse::parse,
};

fn pred(field: &str, op: Operator, value: Option<Value>) -> Node {
    Node::Predicate(FieldPredicate::new(field, op, value))
}

fn text(s: &str) -> Option<Value> {
    Some(Value::Text(s.to_string()))
}

fn number(n: f64) -> Option<Value> {
    Some(Value::Number(n))
}

// ----------------------------------------------------------------------
// Whole-query structure
// ----------------------------------------------------------------------

#[test]
fn empty_input_is_an_empty_query() {
    let query = parse("").unwrap();
    assert!(query.is_empty());
    assert_eq!(query, Query::new());
}

#[test]
fn whitespace_only_input_is_an_empty_query() {
    assert!(parse("   \t \n ").unwrap().is_empty());
}

#[test]
fn predicate_with_pagination_and_order() {
    let query = parse("Status = \"Open\" order by Priority desc, DueDate asc limit 50 offset 10")
        .unwrap();

    assert_eq!(
        query,
        Query {
            predicate: Some(pred("Status", Operator::Eq, text("Open"))),
            order: vec![SortClause::desc("Priority"), SortClause::asc("DueDate")],
            limit: Some(50),
            offset: Some(10),
        }
    );
}

#[test]
fn clause_only_input_has_no_predicate() {
    let query = parse("order by Priority desc limit 10 offset 20").unwrap();
    assert_eq!(query.predicate, None);
    assert_eq!(query.order, vec![SortClause::desc("Priority")]);
    assert_eq!(query.limit, Some(10));
    assert_eq!(query.offset, Some(20));
}

#[test]
fn sort_direction_defaults_to_ascending() {
    let query = parse("order by A, B desc").unwrap();
    assert_eq!(
        query.order,
        vec![SortClause::asc("A"), SortClause::desc("B")]
    );
    assert_eq!(query.order[0].direction, SortDirection::Asc);
}

#[test]
fn order_without_by_is_rejected() {
    assert_eq!(
        parse("order Priority"),
        Err(ParseError::ExpectedKeyword {
            keyword: "by",
            offset: 6,
            fragment: "Priority".to_string(),
        })
    );
}

#[test]
fn field_named_orderly_does_not_shadow_the_order_keyword() {
    let query = parse("orderly = 1 order by orderly desc").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred("orderly", Operator::Eq, number(1.0)))
    );
    assert_eq!(query.order, vec![SortClause::desc("orderly")]);
}

#[test]
fn trailing_input_after_predicate_is_fatal() {
    assert_eq!(
        parse("Status = \"Open\" garbage"),
        Err(ParseError::TrailingInput {
            offset: 16,
            fragment: "garbage".to_string(),
        })
    );
}

#[test]
fn trailing_input_after_pagination_is_fatal() {
    assert_eq!(
        parse("limit 10 oops"),
        Err(ParseError::TrailingInput {
            offset: 9,
            fragment: "oops".to_string(),
        })
    );
}

// ----------------------------------------------------------------------
// Predicate grammar
// ----------------------------------------------------------------------

#[test]
fn and_joins_two_comparisons() {
    let query = parse("Status = \"Open\" and Priority > 5").unwrap();
    assert_eq!(
        query.predicate,
        Some(Node::and(
            pred("Status", Operator::Eq, text("Open")),
            pred("Priority", Operator::Gt, number(5.0)),
        ))
    );
}

#[test]
fn and_binds_tighter_than_or() {
    let query = parse("A = 1 or B = 2 and C = 3").unwrap();
    assert_eq!(
        query.predicate,
        Some(Node::or(
            pred("A", Operator::Eq, number(1.0)),
            Node::and(
                pred("B", Operator::Eq, number(2.0)),
                pred("C", Operator::Eq, number(3.0)),
            ),
        ))
    );
}

#[test]
fn parentheses_override_precedence() {
    let query = parse("(A = 1 or B = 2) and C = 3").unwrap();
    assert_eq!(
        query.predicate,
        Some(Node::and(
            Node::or(
                pred("A", Operator::Eq, number(1.0)),
                pred("B", Operator::Eq, number(2.0)),
            ),
            pred("C", Operator::Eq, number(3.0)),
        ))
    );
}

#[test]
fn same_kind_chains_associate_left() {
    let query = parse("A = 1 and B = 2 and C = 3").unwrap();
    assert_eq!(
        query.predicate,
        Some(Node::and(
            Node::and(
                pred("A", Operator::Eq, number(1.0)),
                pred("B", Operator::Eq, number(2.0)),
            ),
            pred("C", Operator::Eq, number(3.0)),
        ))
    );
}

#[test]
fn not_prefixes_a_single_primary() {
    let query = parse("not A = 1 and B = 2").unwrap();
    assert_eq!(
        query.predicate,
        Some(Node::and(
            Node::not(pred("A", Operator::Eq, number(1.0))),
            pred("B", Operator::Eq, number(2.0)),
        ))
    );
}

#[test]
fn not_prefixes_a_parenthesized_group() {
    let query = parse("not (A = 1 or B = 2)").unwrap();
    assert_eq!(
        query.predicate,
        Some(Node::not(Node::or(
            pred("A", Operator::Eq, number(1.0)),
            pred("B", Operator::Eq, number(2.0)),
        )))
    );
}

#[test]
fn dotted_path_selects_into_a_nested_table() {
    let query = parse("OrderItems.Quantity > 10").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred("OrderItems.Quantity", Operator::Gt, number(10.0)))
    );
}

#[test]
fn native_script_identifiers_parse() {
    let query = parse("名前 = \"太郎\"").unwrap();
    assert_eq!(query.predicate, Some(pred("名前", Operator::Eq, text("太郎"))));
}

#[test]
fn unbalanced_group_is_rejected() {
    assert!(matches!(
        parse("(A = 1"),
        Err(ParseError::UnexpectedToken { .. })
    ));
}

// ----------------------------------------------------------------------
// Operators
// ----------------------------------------------------------------------

#[test]
fn symbol_operators_lex_longest_first() {
    for (input, op) in [
        ("A >= 1", Operator::Gte),
        ("A <= 1", Operator::Lte),
        ("A != 1", Operator::Ne),
        ("A = 1", Operator::Eq),
        ("A > 1", Operator::Gt),
        ("A < 1", Operator::Lt),
    ] {
        let query = parse(input).unwrap();
        assert_eq!(query.predicate, Some(pred("A", op, number(1.0))), "{input}");
    }
}

#[test]
fn two_word_operators_allow_interior_whitespace() {
    let query = parse("Status not   in (\"Open\")").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred(
            "Status",
            Operator::NotIn,
            Some(Value::List(vec![Value::Text("Open".to_string())])),
        ))
    );
}

#[test]
fn not_like_is_one_operator() {
    let query = parse("Title not like \"draft\"").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred("Title", Operator::NotLike, text("draft")))
    );
}

#[test]
fn empty_shape_operators_take_no_value() {
    let query = parse("Description is empty").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred("Description", Operator::IsEmpty, None))
    );

    let query = parse("Description is not empty").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred("Description", Operator::IsNotEmpty, None))
    );
}

#[test]
fn membership_operator_needs_no_space_before_the_array() {
    let query = parse("A in(1, 2)").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred(
            "A",
            Operator::In,
            Some(Value::List(vec![Value::Number(1.0), Value::Number(2.0)])),
        ))
    );
}

#[test]
fn missing_operator_is_reported_at_its_offset() {
    assert_eq!(
        parse("Status banana"),
        Err(ParseError::ExpectedOperator {
            offset: 7,
            fragment: "banana".to_string(),
        })
    );
}

#[test]
fn missing_value_is_end_of_input() {
    assert_eq!(
        parse("Status ="),
        Err(ParseError::UnexpectedEndOfInput { offset: 8 })
    );
}

// ----------------------------------------------------------------------
// Values
// ----------------------------------------------------------------------

#[test]
fn string_escapes_cover_quote_and_backslash() {
    let query = parse(r#"Note = "say \"hi\" to A\\B""#).unwrap();
    assert_eq!(
        query.predicate,
        Some(pred("Note", Operator::Eq, text("say \"hi\" to A\\B")))
    );
}

#[test]
fn unterminated_string_points_at_the_opening_quote() {
    assert_eq!(
        parse("Status = \"Open"),
        Err(ParseError::UnterminatedString { offset: 9 })
    );
}

#[test]
fn negative_and_fractional_numbers_parse() {
    assert_eq!(
        parse("A = -5").unwrap().predicate,
        Some(pred("A", Operator::Eq, number(-5.0)))
    );
    assert_eq!(
        parse("A = 50.5").unwrap().predicate,
        Some(pred("A", Operator::Eq, number(50.5)))
    );
    assert_eq!(
        parse("A = .5").unwrap().predicate,
        Some(pred("A", Operator::Eq, number(0.5)))
    );
}

#[test]
fn array_values_are_comma_separated() {
    let query = parse("Status in (\"Open\", \"In Progress\")").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred(
            "Status",
            Operator::In,
            Some(Value::List(vec![
                Value::Text("Open".to_string()),
                Value::Text("In Progress".to_string()),
            ])),
        ))
    );
}

#[test]
fn empty_array_is_a_valid_membership_value() {
    let query = parse("Status in ()").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred("Status", Operator::In, Some(Value::List(Vec::new()))))
    );
}

#[test]
fn zero_argument_function_value() {
    let query = parse("DueDate < TODAY()").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred(
            "DueDate",
            Operator::Lt,
            Some(Value::Func(FunctionCall::new(FunctionName::Today))),
        ))
    );
}

#[test]
fn function_arguments_take_numbers_and_bare_constants() {
    let query = parse("DueDate < FROM_TODAY(5, DAYS)").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred(
            "DueDate",
            Operator::Lt,
            Some(Value::Func(
                FunctionCall::new(FunctionName::FromToday)
                    .arg(Value::Number(5.0))
                    .arg(Value::Text("DAYS".to_string())),
            )),
        ))
    );
}

#[test]
fn membership_accepts_a_function_value() {
    let query = parse("Assignee in LOGINUSER()").unwrap();
    assert_eq!(
        query.predicate,
        Some(pred(
            "Assignee",
            Operator::In,
            Some(Value::Func(FunctionCall::new(FunctionName::LoginUser))),
        ))
    );
}

#[test]
fn unknown_function_names_are_rejected() {
    assert_eq!(
        parse("DueDate < SOMEDAY()"),
        Err(ParseError::UnexpectedToken {
            offset: 10,
            fragment: "SOMEDAY()".to_string(),
        })
    );
}

// ----------------------------------------------------------------------
// Pagination bounds
// ----------------------------------------------------------------------

#[test]
fn limit_bounds_are_inclusive() {
    assert_eq!(parse("limit 1").unwrap().limit, Some(1));
    assert_eq!(parse("limit 500").unwrap().limit, Some(500));
}

#[test]
fn out_of_range_limits_fail_during_parse() {
    assert_eq!(
        parse("limit 0"),
        Err(ParseError::Validate(ValidateError::LimitOutOfRange {
            value: 0
        }))
    );
    assert_eq!(
        parse("limit 501"),
        Err(ParseError::Validate(ValidateError::LimitOutOfRange {
            value: 501
        }))
    );
}

#[test]
fn fractional_limit_is_an_invalid_number() {
    assert_eq!(
        parse("limit 50.5"),
        Err(ParseError::InvalidNumber {
            offset: 6,
            fragment: "50.5".to_string(),
        })
    );
}

#[test]
fn offset_bounds_are_inclusive() {
    assert_eq!(parse("offset 0").unwrap().offset, Some(0));
    assert_eq!(parse("offset 10000").unwrap().offset, Some(10000));
}

#[test]
fn out_of_range_offsets_fail_during_parse() {
    assert_eq!(
        parse("offset -1"),
        Err(ParseError::Validate(ValidateError::OffsetOutOfRange {
            value: -1
        }))
    );
    assert_eq!(
        parse("offset 10001"),
        Err(ParseError::Validate(ValidateError::OffsetOutOfRange {
            value: 10001
        }))
    );
}

// ----------------------------------------------------------------------
// Shape rules applied at construction time
// ----------------------------------------------------------------------

#[test]
fn pattern_operator_rejects_a_number_value() {
    assert_eq!(
        parse("Status like 5"),
        Err(ParseError::Validate(ValidateError::ValueShape {
            field: "Status".to_string(),
            op: Operator::Like,
            expected: "a string value",
        }))
    );
}

#[test]
fn membership_operator_rejects_a_scalar_value() {
    assert_eq!(
        parse("Status in \"Open\""),
        Err(ParseError::Validate(ValidateError::ValueShape {
            field: "Status".to_string(),
            op: Operator::In,
            expected: "an array or function value",
        }))
    );
}

#[test]
fn comparison_operator_rejects_an_array_value() {
    assert_eq!(
        parse("Status = (\"Open\")"),
        Err(ParseError::Validate(ValidateError::ValueShape {
            field: "Status".to_string(),
            op: Operator::Eq,
            expected: "a scalar or function value",
        }))
    );
}
