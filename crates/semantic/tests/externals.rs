// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The bridge to non-source types: platform members, arrays, custom
//! provider surfaces

use javalens_platform::{PrimitiveType, StaticPlatform};
use javalens_semantic::{Definition, QueryEngine, TypeRef};
use javalens_test_utils::{build_fixture_with, build_single, occ, occ_nth, MockPlatform};

#[test]
fn static_field_chain_resolves_through_platform_types() {
    let src = "class Sys {\n    void p(String msg) {\n        System.out.println(msg);\n    }\n}\n";
    let table = build_single("Sys.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let system_use = occ("Sys.java", src, "System");
    let def = engine.get_definition("System", &system_use).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "java.lang.System");

    let out_use = occ("Sys.java", src, "out");
    let def = engine.get_definition("out", &out_use).unwrap().unwrap();
    assert!(matches!(def, Definition::Variable(_)));
    assert_eq!(def.qualified_name(), "java.lang.System.out");

    let println_use = occ("Sys.java", src, "println");
    let def = engine.get_definition("println", &println_use).unwrap().unwrap();
    assert_eq!(
        def.qualified_name(),
        "java.io.PrintStream.println"
    );
}

#[test]
fn array_length_is_a_fixed_int_member() {
    let src = "class Arr {\n    int size(int[] data) {\n        return data.length;\n    }\n}\n";
    let table = build_single("Arr.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let length_use = occ("Arr.java", src, "length");
    let def = engine.get_definition("length", &length_use).unwrap().unwrap();
    assert_eq!(def.name(), "length");
    assert_eq!(
        def.get_type(),
        Some(&TypeRef::Primitive(PrimitiveType::Int))
    );
}

#[test]
fn platform_method_on_local_variable() {
    let src = "class S {\n    int len(String s) {\n        return s.length();\n    }\n}\n";
    let table = build_single("S.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ_nth("S.java", src, "length", 1);
    let def = engine.get_definition("length", &call).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "java.lang.String.length");
    assert_eq!(
        def.get_type(),
        Some(&TypeRef::Primitive(PrimitiveType::Int))
    );
}

#[test]
fn throws_clause_links_exception_types() {
    let src = "import java.io.IOException;\nclass R {\n    void run() throws IOException {\n    }\n}\n";
    let table = build_single("R.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let decl = occ("R.java", src, "run");
    let def = engine.get_definition("run", &decl).unwrap().unwrap();
    let exceptions = def.get_exceptions();
    assert_eq!(exceptions.len(), 1);
    assert_eq!(table.type_display(&exceptions[0]), "java.io.IOException");
}

#[test]
fn yaml_description_extends_the_surface() {
    let extra = "
- qualified_name: demo.Clock
  superclass: java.lang.Object
  methods:
    - name: millis
      return_type: long
";
    let platform = StaticPlatform::from_yaml(extra).unwrap();
    let src = "import demo.Clock;\nclass UsesClock {\n    long now(Clock c) {\n        return c.millis();\n    }\n}\n";
    let table = build_fixture_with(&[("UsesClock.java", src)], &platform).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ("UsesClock.java", src, "millis");
    let def = engine.get_definition("millis", &call).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "demo.Clock.millis");
    assert_eq!(
        def.get_type(),
        Some(&TypeRef::Primitive(PrimitiveType::Long))
    );
}

#[test]
fn minimal_mock_platform_still_roots_classes() {
    let src = "class M {\n}\n";
    let platform = MockPlatform::with_root();
    let table = build_fixture_with(&[("M.java", src)], &platform).unwrap();

    let m = table.class_by_qualified_name("M").unwrap();
    let superclass = table.superclass_of(m).unwrap();
    assert_eq!(table.def(superclass).qualified_name(), "java.lang.Object");
}

#[test]
fn external_constructor_resolves_for_new_expressions() {
    let src = "import java.util.Random;\nclass Dice {\n    int roll() {\n        Random r = new Random();\n        return r.nextInt(6);\n    }\n}\n";
    let table = build_single("Dice.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let new_site = occ_nth("Dice.java", src, "Random", 3);
    let def = engine.get_definition("Random", &new_site).unwrap().unwrap();
    assert!(matches!(def, Definition::Method(_)));
    assert!(def.is_constructor());

    let call = occ("Dice.java", src, "nextInt");
    let def = engine.get_definition("nextInt", &call).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "java.util.Random.nextInt");
}

#[test]
fn string_concatenation_types_as_string() {
    let src = "class Concat {\n    String shout(String base) {\n        return (base + 1).toUpperCase();\n    }\n}\n";
    let table = build_single("Concat.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    // `base + 1` is a String, so toUpperCase resolves on java.lang.String
    let call = occ("Concat.java", src, "toUpperCase");
    let def = engine.get_definition("toUpperCase", &call).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "java.lang.String.toUpperCase");
}

#[test]
fn cast_expression_steers_member_lookup() {
    let src = "class Cast {\n    int len(Object o) {\n        return ((String) o).length();\n    }\n}\n";
    let table = build_single("Cast.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ("Cast.java", src, "length");
    let def = engine.get_definition("length", &call).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "java.lang.String.length");
}
