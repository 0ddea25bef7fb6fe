//! End-to-end tests for the jsz parser and arena.
//!
//! These exercise the public surface the way a consumer would: parse a
//! document, walk the tree through `first_child` / `next_sibling`, check
//! the zero-copy and escape-handling guarantees, and recycle the arena
//! between parses.

use jsz::{Arena, Node, NodeType, ParseErrorKind, Parser};

/// Helper to parse a document that must succeed.
fn parse<'a>(input: &'a [u8], arena: &'a Arena) -> &'a Node<'a> {
    Parser::new(input, arena)
        .parse_any()
        .unwrap_or_else(|err| panic!("parse failed: {err}"))
}

/// Helper to parse a document that must fail, returning the error kind.
fn parse_err(input: &[u8]) -> ParseErrorKind {
    let arena = Arena::new();
    Parser::new(input, &arena)
        .parse_any()
        .expect_err("parse should have failed")
        .kind
}

#[test]
fn empty_object() {
    let arena = Arena::new();
    let root = parse(b"{}", &arena);
    assert_eq!(root.node_type(), NodeType::Object);
    assert!(root.first_child().is_none());
}

#[test]
fn array_of_numbers_in_source_order() {
    let arena = Arena::new();
    let root = parse(b"[1,2,3]", &arena);
    assert_eq!(root.node_type(), NodeType::Array);

    let mut values = Vec::new();
    let mut child = root.first_child();
    while let Some(node) = child {
        assert_eq!(node.node_type(), NodeType::Number);
        values.push(node.value());
        child = node.next_sibling();
    }
    assert_eq!(values, [b"1", b"2", b"3"]);
}

#[test]
fn object_members_in_source_order() {
    let arena = Arena::new();
    let root = parse(br#"{"a":true,"b":null,"c":false}"#, &arena);

    let members: Vec<_> = root
        .children()
        .map(|n| (n.key_str().unwrap(), n.node_type()))
        .collect();
    assert_eq!(
        members,
        [
            ("a", NodeType::True),
            ("b", NodeType::Null),
            ("c", NodeType::False),
        ]
    );
}

#[test]
fn escaped_quotes_stay_inside_the_string() {
    let arena = Arena::new();
    let root = parse(br#"{"s":"hello \"world\""}"#, &arena);
    let s = root.first_child().unwrap();
    assert_eq!(s.key(), b"s");
    assert_eq!(s.node_type(), NodeType::String);
    assert_eq!(s.value(), br#"hello \"world\""#);
    assert_eq!(s.value().len(), 15);
}

#[test]
fn even_backslash_run_ends_the_string() {
    let arena = Arena::new();
    let root = parse(br#"{"p":"C:\\\\X"}"#, &arena);
    let p = root.first_child().unwrap();
    assert_eq!(p.value(), br#"C:\\\\X"#);
    assert_eq!(p.value().len(), 7);
    assert!(p.next_sibling().is_none());
}

#[test]
fn nested_containers() {
    let arena = Arena::new();
    let root = parse(br#"[{"x":[1,2]},{"x":[]}]"#, &arena);

    let objects: Vec<_> = root.children().collect();
    assert_eq!(objects.len(), 2);
    for object in &objects {
        assert_eq!(object.node_type(), NodeType::Object);
    }

    let first = objects[0].first_child().unwrap();
    assert_eq!(first.key(), b"x");
    assert_eq!(first.node_type(), NodeType::Array);
    assert_eq!(first.children().count(), 2);

    let second = objects[1].first_child().unwrap();
    assert_eq!(second.key(), b"x");
    assert!(second.first_child().is_none());
}

#[test]
fn malformed_inputs_report_their_error_kind() {
    assert_eq!(parse_err(b"[1,"), ParseErrorKind::UnexpectedEof);
    assert_eq!(parse_err(b"{1:2}"), ParseErrorKind::UnexpectedByte(b'1'));
    assert_eq!(parse_err(b"truf"), ParseErrorKind::BadLiteral);
    assert_eq!(parse_err(b"\"oops"), ParseErrorKind::UnterminatedString);
}

#[test]
fn views_point_into_the_input_buffer() {
    let arena = Arena::new();
    let input: Vec<u8> = br#"{"k":"value","n":1234,"arr":["deep string"]}"#.to_vec();
    let root = parse(&input, &arena);

    let range = input.as_ptr() as usize..input.as_ptr() as usize + input.len();

    fn walk<'a>(node: &'a Node<'a>, range: &std::ops::Range<usize>) {
        if matches!(node.node_type(), NodeType::String | NodeType::Number) {
            let ptr = node.value().as_ptr() as usize;
            assert!(range.contains(&ptr), "value view escaped the input buffer");
        }
        if !node.key().is_empty() {
            let ptr = node.key().as_ptr() as usize;
            assert!(range.contains(&ptr), "key view escaped the input buffer");
        }
        for child in node.children() {
            walk(child, range);
        }
    }
    walk(root, &range);
}

#[test]
fn string_view_starts_after_the_opening_quote() {
    // For any escape byte x, the view spans from after `"` to the first
    // quote not preceded by an odd backslash run.
    let arena = Arena::new();
    for escaped in 0u8..=255 {
        if escaped == b'"' || escaped == b'\\' {
            continue;
        }
        let mut input = vec![b'"', b'\\', escaped];
        input.extend_from_slice(b"tail\"");
        let root = parse(&input, &arena);
        assert_eq!(root.value(), &input[1..input.len() - 1], "escaped={escaped}");
    }
}

#[test]
fn deep_nesting_parses() {
    let depth = 128;
    let mut input = Vec::new();
    input.extend(std::iter::repeat(b'[').take(depth));
    input.push(b'7');
    input.extend(std::iter::repeat(b']').take(depth));

    let arena = Arena::new();
    let mut node = parse(&input, &arena);
    for _ in 0..depth {
        assert_eq!(node.node_type(), NodeType::Array);
        node = node.first_child().unwrap();
    }
    assert_eq!(node.value(), b"7");
}

#[test]
fn arena_grows_then_replays_without_new_chunks() {
    // A workload comfortably past the 4096-byte first chunk.
    let mut document = Vec::new();
    document.push(b'[');
    for i in 0..500 {
        if i > 0 {
            document.push(b',');
        }
        document.extend_from_slice(br#"{"id":"#);
        document.extend_from_slice(i.to_string().as_bytes());
        document.extend_from_slice(br#","ok":true}"#);
    }
    document.push(b']');

    let mut arena = Arena::new();
    {
        let root = parse(&document, &arena);
        assert_eq!(root.children().count(), 500);
    }
    let warm_chunks = arena.chunk_count();
    let warm_footprint = arena.footprint();
    assert!(warm_chunks >= 2, "workload should have forced growth");

    // Replaying the same workload after reset must not touch the host
    // allocator: same chunks, same footprint.
    for _ in 0..3 {
        arena.reset();
        let root = parse(&document, &arena);
        assert_eq!(root.children().count(), 500);
        assert_eq!(arena.chunk_count(), warm_chunks);
        assert_eq!(arena.footprint(), warm_footprint);
    }
}

#[test]
fn one_arena_serves_many_documents() {
    let mut arena = Arena::new();
    let documents: [&[u8]; 4] = [
        br#"{"a":1}"#,
        b"[true,false,null]",
        br#""just a string""#,
        b"-42",
    ];
    for document in documents {
        arena.reset();
        let root = parse(document, &arena);
        match root.node_type() {
            NodeType::Object => assert_eq!(root.first_child().unwrap().key(), b"a"),
            NodeType::Array => assert_eq!(root.children().count(), 3),
            NodeType::String => assert_eq!(root.value(), b"just a string"),
            NodeType::Number => assert_eq!(root.value(), b"-42"),
            other => panic!("unexpected root type {other}"),
        }
    }
}
