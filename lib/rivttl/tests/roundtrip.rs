//! Parse → serialize → parse round trips: abbreviations must be
//! semantically transparent.

use rivttl::{NTriplesSerializer, TriGParser, TriGSerializer, TurtleParser, TurtleSerializer};

/// The statement multiset of a Turtle document, as sorted N-Quads lines.
fn turtle_statements(file: &str) -> Vec<String> {
    let mut statements: Vec<String> = TurtleParser::new()
        .global_blank_ids()
        .exact_blank_ids()
        .for_slice(file)
        .map(|event| event.unwrap())
        .filter_map(|event| Some(event.into_statement()?.to_string()))
        .collect();
    statements.sort();
    statements
}

fn trig_statements(file: &str) -> Vec<String> {
    let mut statements: Vec<String> = TriGParser::new()
        .global_blank_ids()
        .exact_blank_ids()
        .for_slice(file)
        .map(|event| event.unwrap())
        .filter_map(|event| Some(event.into_statement()?.to_string()))
        .collect();
    statements.sort();
    statements
}

fn turtle_round_trip(file: &str) -> String {
    let mut serializer = TurtleSerializer::new().for_writer(Vec::new());
    for event in TurtleParser::new().global_blank_ids().for_slice(file) {
        serializer.serialize_event(&event.unwrap()).unwrap();
    }
    let written = String::from_utf8(serializer.finish().unwrap()).unwrap();
    assert_eq!(
        turtle_statements(file),
        turtle_statements(&written),
        "round trip of {file:?} through {written:?}"
    );
    written
}

#[test]
fn round_trip_plain_triples() {
    let written = turtle_round_trip(
        "<http://example.com/s> <http://example.com/p> <http://example.com/o> , \"foo\" ;\n\t<http://example.com/q> 1 .\n",
    );
    assert!(written.contains(" , "));
    assert!(written.contains(" ;"));
}

#[test]
fn round_trip_prefixes() {
    let written = turtle_round_trip(
        "@prefix ex: <http://example.com/ns#> .\nex:s ex:p ex:o .\n",
    );
    assert!(written.starts_with("@prefix ex: <http://example.com/ns#> .\n"));
    assert!(written.contains("ex:s ex:p ex:o ."));
}

#[test]
fn round_trip_list() {
    let written = turtle_round_trip(
        "@prefix : <http://x/> .\n:s :p ( :a :b ) .\n",
    );
    assert!(written.contains("( :a :b )"), "{written}");
}

#[test]
fn round_trip_empty_list() {
    let written = turtle_round_trip("<http://s> <http://p> () .\n");
    assert!(written.contains("()"), "{written}");
}

#[test]
fn round_trip_anonymous_object() {
    let written = turtle_round_trip(
        "<http://s> <http://p> [ <http://q> <http://r> ; <http://q2> \"v\" ] .\n",
    );
    assert!(written.contains('['), "{written}");
    assert!(written.contains(']'), "{written}");
}

#[test]
fn round_trip_empty_anonymous_object() {
    let written = turtle_round_trip("<http://s> <http://p> [] .\n");
    assert!(written.contains("[]"), "{written}");
}

#[test]
fn round_trip_nested_anonymous() {
    turtle_round_trip(
        "<http://s> <http://p> [ <http://q> [ <http://r> 1 ] ] .\n",
    );
}

#[test]
fn round_trip_list_of_anonymous() {
    turtle_round_trip(
        "@prefix : <http://x/> .\n:s :p ( [ :q 1 ] [ :q 2 ] ) .\n",
    );
}

#[test]
fn round_trip_anonymous_subject() {
    turtle_round_trip(
        "[ <http://p> <http://o> ] <http://q> <http://r> .\n",
    );
}

#[test]
fn round_trip_rdf_type_and_boolean() {
    let written = turtle_round_trip(
        "<http://s> a <http://C> ; <http://p> true, false .\n",
    );
    assert!(written.contains(" a "), "{written}");
    assert!(written.contains("true"), "{written}");
}

#[test]
fn round_trip_long_string() {
    let written = turtle_round_trip(
        "<http://s> <http://p> \"\"\"a \"quoted\" word\nover two lines\"\"\" .\n",
    );
    assert!(written.contains("\"\"\""), "{written}");
}

#[test]
fn round_trip_short_string_escapes() {
    turtle_round_trip("<http://s> <http://p> \"tab\\there \\\\ done\" .\n");
}

#[test]
fn round_trip_language_and_datatype() {
    turtle_round_trip(
        "<http://s> <http://p> \"x\"@en-us , \"y\"^^<http://example.com/dt> , 1.5 , 1.2e3 .\n",
    );
}

#[test]
fn round_trip_decimal_with_trailing_dot_is_quoted() {
    // "5." is not a valid bare decimal, the writer must fall back to the
    // quoted form
    let written = turtle_round_trip(
        "<http://s> <http://p> \"5.\"^^<http://www.w3.org/2001/XMLSchema#decimal> .\n",
    );
    assert!(written.contains("\"5.\""), "{written}");
}

#[test]
fn round_trip_trig_graphs() {
    let file = "@prefix ex: <http://example.com/> .\nex:g1 { ex:s ex:p ex:o , ex:o2 . }\nex:s ex:p ex:o3 .\nex:g2 { ex:s ex:p [ ex:q ex:r ] . }\n";
    let mut serializer = TriGSerializer::new().for_writer(Vec::new());
    for event in TriGParser::new().global_blank_ids().for_slice(file) {
        serializer.serialize_event(&event.unwrap()).unwrap();
    }
    let written = String::from_utf8(serializer.finish().unwrap()).unwrap();
    assert_eq!(
        trig_statements(file),
        trig_statements(&written),
        "round trip through {written:?}"
    );
    assert!(written.contains('{'), "{written}");
    assert!(written.matches('}').count() == 2, "{written}");
}

#[test]
fn turtle_to_ntriples_pipeline() {
    let file = "@prefix schema: <http://schema.org/> .\n<http://example.com/foo> a schema:Person ; schema:name \"Foo\" .\n";
    let mut serializer = NTriplesSerializer::new().for_writer(Vec::new());
    for event in TurtleParser::new().for_slice(file) {
        event.unwrap().dispatch(&mut serializer).unwrap();
    }
    let written = String::from_utf8(serializer.finish().unwrap()).unwrap();
    assert_eq!(
        written,
        "<http://example.com/foo> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .\n<http://example.com/foo> <http://schema.org/name> \"Foo\" .\n"
    );
}

#[test]
fn terse_output_has_no_line_jumps() {
    let file = "<http://s> <http://p> [ <http://q> ( 1 2 ) ] ; <http://p2> \"x\" .\n";
    let mut serializer = TurtleSerializer::new().terse().for_writer(Vec::new());
    for event in TurtleParser::new().global_blank_ids().for_slice(file) {
        serializer.serialize_event(&event.unwrap()).unwrap();
    }
    let written = String::from_utf8(serializer.finish().unwrap()).unwrap();
    assert!(!written.contains('\n'), "{written}");
    assert_eq!(turtle_statements(file), turtle_statements(&written));
}

#[test]
fn written_brackets_are_balanced() {
    let file = "<http://s> <http://p> [ <http://q> ( 1 [ <http://r> 2 ] ) ] .\n";
    let written = turtle_round_trip(file);
    for (open, close) in [('[', ']'), ('(', ')')] {
        assert_eq!(
            written.matches(open).count(),
            written.matches(close).count(),
            "{written}"
        );
    }
}

#[test]
fn expanded_output_uses_no_sugar() {
    let file = "@prefix ex: <http://example.com/> .\nex:s a ex:C ; ex:p () .\n";
    let mut serializer = TurtleSerializer::new().expanded().for_writer(Vec::new());
    for event in TurtleParser::new().for_slice(file) {
        serializer.serialize_event(&event.unwrap()).unwrap();
    }
    let written = String::from_utf8(serializer.finish().unwrap()).unwrap();
    assert!(!written.contains(" a "), "{written}");
    assert!(!written.contains("()"), "{written}");
    assert!(!written.contains("ex:s"), "{written}");
    assert_eq!(turtle_statements(file), turtle_statements(&written));
}

#[test]
fn ascii_output_is_ascii() {
    let file = "<http://s> <http://p> \"caf\u{E9} \u{1F600}\" , <http://example.com/\u{E9}> .\n";
    let mut serializer = TurtleSerializer::new().ascii().for_writer(Vec::new());
    for event in TurtleParser::new().for_slice(file) {
        serializer.serialize_event(&event.unwrap()).unwrap();
    }
    let written = String::from_utf8(serializer.finish().unwrap()).unwrap();
    assert!(written.is_ascii(), "{written}");
    assert_eq!(turtle_statements(file), turtle_statements(&written));
}

#[test]
fn contextual_output_has_no_prelude() {
    let file = "@prefix ex: <http://example.com/> .\nex:s ex:p ex:o .\n";
    let mut serializer = TurtleSerializer::new().contextual().for_writer(Vec::new());
    for event in TurtleParser::new().for_slice(file) {
        serializer.serialize_event(&event.unwrap()).unwrap();
    }
    let written = String::from_utf8(serializer.finish().unwrap()).unwrap();
    assert_eq!(written, "ex:s ex:p ex:o .\n");
}
