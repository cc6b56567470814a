// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Reference recording, word lookup, and query failure semantics

use javalens_core::Occurrence;
use javalens_semantic::{QueryEngine, SemanticError};
use javalens_test_utils::{build_fixture, build_single, occ, occ_nth};

#[test]
fn references_round_trip_to_one_definition() {
    let src = "class R {\n    int value;\n    int twice() { return value + value; }\n}\n";
    let table = build_single("R.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    // declaration plus two uses
    let refs = engine
        .get_references("value", &occ_nth("R.java", src, "value", 3))
        .unwrap();
    assert_eq!(refs.len(), 3);

    let resolved: Vec<_> = refs.iter().map(|r| r.resolved).collect();
    assert!(resolved.iter().all(|r| *r == resolved[0] && r.is_some()));

    // every recorded reference answers the same definition
    let expected = occ_nth("R.java", src, "value", 1);
    for reference in refs {
        let def = engine
            .get_definition("value", &reference.occurrence)
            .unwrap()
            .unwrap();
        assert_eq!(def.occurrence(), Some(&expected));
    }
}

#[test]
fn references_come_back_in_file_order() {
    let a = "class A {\n    int shared;\n}\n";
    let b = "class B {\n    int use(A a) { return a.shared; }\n}\n";
    let table = build_fixture(&[("B.java", b), ("A.java", a)]).unwrap();
    let engine = QueryEngine::new(&table);

    let refs = engine
        .get_references("shared", &occ("A.java", a, "shared"))
        .unwrap();
    assert_eq!(refs.len(), 2);
    assert_eq!(refs[0].occurrence.file, std::path::PathBuf::from("A.java"));
    assert_eq!(refs[1].occurrence.file, std::path::PathBuf::from("B.java"));
}

#[test]
fn loop_counter_reference_count() {
    let src = "class Loop {\n    int run() {\n        int sum = 0;\n        for (int i = 0; i < 3; i = i + 1) {\n            sum = sum + i;\n        }\n        return sum;\n    }\n}\n";
    let table = build_single("Loop.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    // declaration, condition, two in the update, one in the body
    let refs = engine
        .get_references("i", &occ_nth("Loop.java", src, "i", 1))
        .unwrap();
    assert_eq!(refs.len(), 5);
}

#[test]
fn word_at_occurrence_covers_whole_token() {
    let src = "class Widget {\n    int size;\n}\n";
    let table = build_single("Widget.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let word = |line, column| {
        engine
            .get_word_at_occurrence(&Occurrence::new("Widget.java", line, column))
            .unwrap()
    };

    // "Widget" spans columns 6..12
    assert_eq!(word(0, 6), Some("Widget"), "first character");
    assert_eq!(word(0, 11), Some("Widget"), "last character");
    assert_eq!(word(0, 12), None, "just past the token");
    assert_eq!(word(0, 5), None, "whitespace before the token");

    // keywords and punctuation are not identifier tokens
    assert_eq!(word(0, 0), None);
    assert_eq!(word(1, 4), None);
    assert_eq!(word(1, 8), Some("size"));
}

#[test]
fn querying_an_unbuilt_file_fails_fast() {
    let src = "class Real {\n}\n";
    let table = build_single("Real.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let ghost = Occurrence::new("Ghost.java", 0, 0);
    assert!(matches!(
        engine.get_definition("Real", &ghost),
        Err(SemanticError::FileNotBuilt(_))
    ));
    assert!(matches!(
        engine.get_word_at_occurrence(&ghost),
        Err(SemanticError::FileNotBuilt(_))
    ));
    assert!(matches!(
        engine.get_references("Real", &ghost),
        Err(SemanticError::FileNotBuilt(_))
    ));
}

#[test]
fn out_of_range_occurrence_fails_fast() {
    let src = "class Real {\n}\n";
    let table = build_single("Real.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let beyond = Occurrence::new("Real.java", 999, 0);
    assert!(matches!(
        engine.get_word_at_occurrence(&beyond),
        Err(SemanticError::OccurrenceOutOfRange(_))
    ));
    assert!(matches!(
        engine.get_definition("Real", &beyond),
        Err(SemanticError::OccurrenceOutOfRange(_))
    ));
}

#[test]
fn undeclared_name_is_none_not_an_error() {
    let src = "class Lonely {\n    void m() {\n    }\n}\n";
    let table = build_single("Lonely.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let inside = occ("Lonely.java", src, "m");
    assert!(engine
        .get_definition("nowhereToBeFound", &inside)
        .unwrap()
        .is_none());
    assert!(engine
        .get_references("nowhereToBeFound", &inside)
        .unwrap()
        .is_empty());
}

#[test]
fn qualified_names_reach_the_platform_registry() {
    let src = "class Q {\n}\n";
    let table = build_single("Q.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let anywhere = occ("Q.java", src, "Q");
    let def = engine
        .get_definition("java.lang.String", &anywhere)
        .unwrap()
        .unwrap();
    assert_eq!(def.qualified_name(), "java.lang.String");

    assert!(engine
        .get_definition("java.lang.NoSuchClass", &anywhere)
        .unwrap()
        .is_none());
}

#[test]
fn declaration_identifier_counts_as_a_reference() {
    let src = "class OneShot {\n    void never() {\n    }\n}\n";
    let table = build_single("OneShot.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let refs = engine
        .get_references("never", &occ("OneShot.java", src, "never"))
        .unwrap();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].occurrence, occ("OneShot.java", src, "never"));
}
