//! End-to-end checks of the event streams the parsers emit.

use rivrdf::vocab::{rdf, xsd};
use rivrdf::{
    BlankNode, GraphName, Literal, NamedNode, Statement, Subject, Term,
};
use rivttl::{NTriplesParser, ReaderEvent, StatementFlags, TriGParser, TurtleParser};

fn statement_events(events: &[ReaderEvent]) -> Vec<(Statement, StatementFlags)> {
    events
        .iter()
        .filter_map(|event| {
            if let ReaderEvent::Statement {
                statement, flags, ..
            } = event
            {
                Some((statement.clone(), *flags))
            } else {
                None
            }
        })
        .collect()
}

#[test]
fn ntriples_minimal() {
    let events: Vec<ReaderEvent> = NTriplesParser::new()
        .for_slice("<http://a> <http://b> <http://c> .\n")
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(events.len(), 1);
    let ReaderEvent::Statement {
        statement,
        flags,
        caret,
    } = &events[0]
    else {
        panic!("expected a statement event, got {:?}", events[0]);
    };
    assert_eq!(*flags, StatementFlags::NONE);
    assert_eq!(
        *statement,
        Statement::triple(
            NamedNode::new_unchecked("http://a"),
            NamedNode::new_unchecked("http://b"),
            NamedNode::new_unchecked("http://c"),
        )
    );
    assert_eq!(statement.graph_name, GraphName::DefaultGraph);
    assert!(caret.is_some());
}

#[test]
fn turtle_prefix_and_list() {
    let file = "@prefix : <http://x/> .\n:s :p ( :a :b ) .\n";
    let events: Vec<ReaderEvent> = TurtleParser::new()
        .global_blank_ids()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        events[0],
        ReaderEvent::Prefix {
            name: String::new(),
            iri: NamedNode::new_unchecked("http://x/"),
        }
    );
    let s = NamedNode::new_unchecked("http://x/s");
    let p = NamedNode::new_unchecked("http://x/p");
    let a = NamedNode::new_unchecked("http://x/a");
    let b = NamedNode::new_unchecked("http://x/b");
    let g1 = BlankNode::new_unchecked("b1");
    let g2 = BlankNode::new_unchecked("b2");
    assert_eq!(
        statement_events(&events),
        [
            (
                Statement::triple(s, p, g1.clone()),
                StatementFlags::LIST_OBJECT
            ),
            (
                Statement::triple(g1.clone(), rdf::FIRST, a),
                StatementFlags::NONE
            ),
            (
                Statement::triple(g1, rdf::REST, g2.clone()),
                StatementFlags::NONE
            ),
            (
                Statement::triple(g2.clone(), rdf::FIRST, b),
                StatementFlags::NONE
            ),
            (
                Statement::triple(g2, rdf::REST, rdf::NIL),
                StatementFlags::NONE
            ),
        ]
    );
}

#[test]
fn long_string_with_embedded_quotes() {
    let file = "<http://a> <http://b> \"\"\"he said \"\"hi\"\" loud\"\"\" .";
    let events: Vec<ReaderEvent> = TurtleParser::new()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    let statements = statement_events(&events);
    assert_eq!(statements.len(), 1);
    assert_eq!(
        statements[0].0.object,
        Term::Literal(Literal::new_simple_literal("he said \"\"hi\"\" loud"))
    );
}

#[test]
fn dot_ambiguity_in_decimal() {
    let file = "<http://a> <http://b> 1.5 . <http://a> <http://b> 1 .";
    let events: Vec<ReaderEvent> = TurtleParser::new()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    let statements = statement_events(&events);
    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[0].0.object,
        Term::Literal(Literal::new_typed_literal("1.5", xsd::DECIMAL))
    );
    assert_eq!(
        statements[1].0.object,
        Term::Literal(Literal::new_typed_literal("1", xsd::INTEGER))
    );
}

#[test]
fn blank_label_clash_is_reported() {
    let file = "_:b1 <http://p> _:B1 .";
    let results: Vec<_> = TurtleParser::new().for_slice(file).collect();
    let error = results
        .into_iter()
        .find_map(Result::err)
        .expect("a label clash error");
    assert!(error.message().contains("clashes"), "{error}");
}

#[test]
fn blank_label_clash_modes() {
    let file = "_:b1 <http://p> _:B1 .";
    // Both labels are kept as written
    let events: Vec<ReaderEvent> = TurtleParser::new()
        .exact_blank_ids()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    let statements = statement_events(&events);
    assert_eq!(
        statements[0].0.subject,
        Subject::BlankNode(BlankNode::new_unchecked("b1"))
    );
    assert_eq!(
        statements[0].0.object,
        Term::BlankNode(BlankNode::new_unchecked("B1"))
    );
}

#[test]
fn generated_looking_labels_are_rewritten() {
    let file = "_:b1 <http://p> <http://o> .";
    let events: Vec<ReaderEvent> = TurtleParser::new()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        statement_events(&events)[0].0.subject,
        Subject::BlankNode(BlankNode::new_unchecked("B1"))
    );
}

#[test]
fn anonymous_object() {
    let file = "<http://s> <http://p> [ <http://q> <http://r> ] .";
    let events: Vec<ReaderEvent> = TurtleParser::new()
        .global_blank_ids()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    let node = BlankNode::new_unchecked("b1");
    assert_eq!(
        statement_events(&events),
        [
            (
                Statement::triple(
                    NamedNode::new_unchecked("http://s"),
                    NamedNode::new_unchecked("http://p"),
                    node.clone(),
                ),
                StatementFlags::ANON_OBJECT
            ),
            (
                Statement::triple(
                    node.clone(),
                    NamedNode::new_unchecked("http://q"),
                    NamedNode::new_unchecked("http://r"),
                ),
                StatementFlags::NONE
            ),
        ]
    );
    assert_eq!(
        events.last(),
        Some(&ReaderEvent::EndAnonymous { node })
    );
}

#[test]
fn directives_are_rejected_in_ntriples() {
    let results: Vec<_> = NTriplesParser::new()
        .for_slice("@prefix ex: <http://example.com/> .\n")
        .collect();
    let error = results
        .into_iter()
        .find_map(Result::err)
        .expect("a directive error");
    assert!(error.to_string().contains("not allowed"), "{error}");
}

#[test]
fn carets_are_monotonic() {
    let file = "<http://a> <http://b> ( 1 2 3 ) .\n<http://a> <http://b> \"x\" .\n";
    let mut previous = None;
    for event in TurtleParser::new().for_slice(file) {
        if let ReaderEvent::Statement { caret, .. } = event.unwrap() {
            let caret = caret.expect("statements carry carets");
            if let Some((line, column)) = previous {
                assert!((caret.line, caret.column) >= (line, column));
            }
            previous = Some((caret.line, caret.column));
        }
    }
    assert!(previous.is_some());
}

#[test]
fn trig_graphs() {
    let file = "<http://g> { <http://s> <http://p> <http://o> . }\nGRAPH <http://g2> { <http://s> <http://p> <http://o2> }";
    let events: Vec<ReaderEvent> = TriGParser::new()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    let statements = statement_events(&events);
    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[0].0.graph_name,
        GraphName::NamedNode(NamedNode::new_unchecked("http://g"))
    );
    assert_eq!(
        statements[1].0.graph_name,
        GraphName::NamedNode(NamedNode::new_unchecked("http://g2"))
    );
}

#[test]
fn base_resolution() {
    let file = "@base <http://example.com/dir/> .\n<name> <p> </root> .";
    let events: Vec<ReaderEvent> = TurtleParser::new()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        events[0],
        ReaderEvent::Base {
            iri: NamedNode::new_unchecked("http://example.com/dir/"),
        }
    );
    let statements = statement_events(&events);
    assert_eq!(
        statements[0].0.subject,
        Subject::NamedNode(NamedNode::new_unchecked("http://example.com/dir/name"))
    );
    assert_eq!(
        statements[0].0.object,
        Term::NamedNode(NamedNode::new_unchecked("http://example.com/root"))
    );
}

#[test]
fn relative_iris_are_kept_on_demand() {
    let file = "@base <http://example.com/dir/> .\n<name> <p> <o> .";
    let events: Vec<ReaderEvent> = TurtleParser::new()
        .keep_relative_iris()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        statement_events(&events)[0].0.subject,
        Subject::NamedNode(NamedNode::new_unchecked("name"))
    );
}

#[test]
fn lenient_mode_recovers_line_by_line() {
    let file = "<http://a> <http://b> bogus .\n<http://a> <http://b> <http://c> .\n";
    let mut errors = 0;
    let mut statements = 0;
    for event in TurtleParser::new().lenient().for_slice(file) {
        match event {
            Ok(ReaderEvent::Statement { .. }) => statements += 1,
            Ok(_) => (),
            Err(_) => errors += 1,
        }
    }
    assert_eq!(errors, 1);
    assert_eq!(statements, 1);
}

#[test]
fn variables_are_accepted_on_demand() {
    let file = "?s <http://p> $o .";
    TurtleParser::new()
        .for_slice(file)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_err();
    let events: Vec<ReaderEvent> = TurtleParser::new()
        .with_variables()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    let statements = statement_events(&events);
    assert_eq!(
        statements[0].0.subject,
        Subject::Variable(rivrdf::Variable::new_unchecked("s"))
    );
    assert_eq!(
        statements[0].0.object,
        Term::Variable(rivrdf::Variable::new_unchecked("o"))
    );
}

#[test]
fn empty_anonymous_subject() {
    let file = "[] <http://p> <http://o> .";
    let events: Vec<ReaderEvent> = TurtleParser::new()
        .global_blank_ids()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    let statements = statement_events(&events);
    assert_eq!(statements.len(), 1);
    assert!(statements[0].1.contains(StatementFlags::EMPTY_SUBJECT));
}

#[test]
fn anonymous_subject_with_properties() {
    let file = "[ <http://p> <http://o> ] <http://q> <http://r> .";
    let events: Vec<ReaderEvent> = TurtleParser::new()
        .global_blank_ids()
        .for_slice(file)
        .collect::<Result<_, _>>()
        .unwrap();
    let statements = statement_events(&events);
    assert_eq!(statements.len(), 2);
    assert!(statements[0].1.contains(StatementFlags::ANON_SUBJECT));
    assert_eq!(statements[0].0.subject, statements[1].0.subject);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, ReaderEvent::EndAnonymous { .. }))
    );
}

#[test]
fn unterminated_statement_is_an_error() {
    let results: Vec<_> = TurtleParser::new()
        .for_slice("<http://a> <http://b> ")
        .collect();
    assert!(results.into_iter().any(|r| r.is_err()));
}

#[test]
fn byte_order_mark_is_skipped() {
    let mut file = Vec::new();
    file.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
    file.extend_from_slice(b"<http://a> <http://b> <http://c> .\n");
    let events: Vec<ReaderEvent> = NTriplesParser::new()
        .for_slice(&file)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(statement_events(&events).len(), 1);
}
