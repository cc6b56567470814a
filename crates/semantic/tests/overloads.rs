// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Overload selection: widening, promotion, specificity, constructors

use javalens_platform::PrimitiveType;
use javalens_semantic::{Definition, QueryEngine, TypeRef};
use javalens_test_utils::{build_fixture, build_single, occ_nth};

fn selected_parameters<'t>(
    engine: &QueryEngine<'t>,
    name: &str,
    at: &javalens_core::Occurrence,
) -> Vec<TypeRef> {
    let def = engine.get_definition(name, at).unwrap().unwrap();
    def.as_method()
        .expect("expected a method definition")
        .signature
        .parameters()
        .to_vec()
}

#[test]
fn char_argument_widens_to_int_not_short() {
    let src = "class Over {\n    void f(short s) {\n    }\n    void f(int i) {\n    }\n    void f(long l) {\n    }\n    void f(double d) {\n    }\n    void call() {\n        char c = 'x';\n        f(c);\n    }\n}\n";
    let table = build_single("Over.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ_nth("Over.java", src, "f", 5);
    let params = selected_parameters(&engine, "f", &call);
    assert_eq!(params, vec![TypeRef::Primitive(PrimitiveType::Int)]);
}

#[test]
fn binary_promotion_drives_selection() {
    let src = "class P {\n    void g(float x) {\n    }\n    void g(double x) {\n    }\n    void call(long l, float f) {\n        g(l + f);\n    }\n}\n";
    let table = build_single("P.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    // long + float promotes to float, so the float overload wins exactly
    let call = occ_nth("P.java", src, "g", 3);
    let params = selected_parameters(&engine, "g", &call);
    assert_eq!(params, vec![TypeRef::Primitive(PrimitiveType::Float)]);
}

#[test]
fn exact_match_beats_widened_match() {
    let src = "class E {\n    void h(int x) {\n    }\n    void h(long x) {\n    }\n    void call() {\n        h(5);\n    }\n}\n";
    let table = build_single("E.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ_nth("E.java", src, "h", 3);
    let params = selected_parameters(&engine, "h", &call);
    assert_eq!(params, vec![TypeRef::Primitive(PrimitiveType::Int)]);
}

#[test]
fn undeclared_constructor_synthesizes_default() {
    let src = "class NoCtor {\n}\nclass Maker {\n    NoCtor make() { return new NoCtor(); }\n}\n";
    let table = build_fixture(&[("NoCtor.java", src)]).unwrap();
    let engine = QueryEngine::new(&table);

    let new_site = occ_nth("NoCtor.java", src, "NoCtor", 3);
    let def = engine.get_definition("NoCtor", &new_site).unwrap().unwrap();
    assert!(matches!(def, Definition::DefaultConstructor(_)));
    assert_eq!(def.name(), "NoCtor");
}

#[test]
fn declared_constructors_selected_by_arguments() {
    let src = "class With {\n    With(int n) {\n    }\n    With(String s) {\n    }\n    void call() {\n        new With(3);\n        new With(\"x\");\n    }\n}\n";
    let table = build_single("With.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let int_site = occ_nth("With.java", src, "With", 4);
    let params = selected_parameters(&engine, "With", &int_site);
    assert_eq!(params, vec![TypeRef::Primitive(PrimitiveType::Int)]);

    let string_site = occ_nth("With.java", src, "With", 5);
    let def = engine.get_definition("With", &string_site).unwrap().unwrap();
    let params = def.as_method().unwrap().signature.parameters();
    assert!(matches!(params[0], TypeRef::Named(_)));
}

#[test]
fn equal_specificity_breaks_to_first_declared() {
    let src = "class Tie {\n    void t(int a, long b) {\n    }\n    void t(long a, int b) {\n    }\n    void call() {\n        t(1, 2);\n    }\n}\n";
    let table = build_single("Tie.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let first_decl = occ_nth("Tie.java", src, "t", 1);
    let call = occ_nth("Tie.java", src, "t", 3);
    let def = engine.get_definition("t", &call).unwrap().unwrap();
    assert_eq!(def.occurrence(), Some(&first_decl));
}

#[test]
fn null_argument_matches_reference_parameter() {
    let src = "class N {\n    void take(String s) {\n    }\n    void call() {\n        take(null);\n    }\n}\n";
    let table = build_single("N.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ_nth("N.java", src, "take", 2);
    let def = engine.get_definition("take", &call).unwrap().unwrap();
    assert!(matches!(def, Definition::Method(_)));
}

#[test]
fn subclass_argument_accepted_for_superclass_parameter() {
    let src = "class Shape {\n}\nclass Circle extends Shape {\n}\nclass Picker {\n    void pick(Shape s) {\n    }\n    void call() {\n        pick(new Circle());\n    }\n}\n";
    let table = build_fixture(&[("Picker.java", src)]).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ_nth("Picker.java", src, "pick", 2);
    let def = engine.get_definition("pick", &call).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "Picker.pick");
}

#[test]
fn most_specific_reference_overload_wins() {
    let src = "class Shape {\n}\nclass Circle extends Shape {\n}\nclass Feeder {\n    void feed(Object o) {\n    }\n    void feed(Shape s) {\n    }\n    void call() {\n        feed(new Circle());\n    }\n}\n";
    let table = build_fixture(&[("Feeder.java", src)]).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ_nth("Feeder.java", src, "feed", 3);
    let def = engine.get_definition("feed", &call).unwrap().unwrap();
    let params = def.as_method().unwrap().signature.parameters();
    let TypeRef::Named(param) = &params[0] else {
        panic!("expected a named parameter type");
    };
    assert_eq!(table.def(*param).name(), "Shape");
}

#[test]
fn interface_typed_argument_accepted() {
    let src = "class Acceptor {\n    void on(Runnable r) {\n    }\n    void call() {\n        Thread t = new Thread();\n        on(t);\n    }\n}\n";
    let table = build_single("Acceptor.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ_nth("Acceptor.java", src, "on", 2);
    let def = engine.get_definition("on", &call).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "Acceptor.on");
}

#[test]
fn platform_overloads_pick_exact_parameter() {
    let src = "class Printer {\n    void say(String msg) {\n        System.out.println(msg);\n        System.out.println(42);\n    }\n}\n";
    let table = build_single("Printer.java", src).unwrap();
    let engine = QueryEngine::new(&table);

    let string_call = occ_nth("Printer.java", src, "println", 1);
    let def = engine.get_definition("println", &string_call).unwrap().unwrap();
    let params = def.as_method().unwrap().signature.parameters();
    let TypeRef::Named(param) = &params[0] else {
        panic!("expected a named parameter type");
    };
    assert_eq!(table.def(*param).qualified_name(), "java.lang.String");

    let int_call = occ_nth("Printer.java", src, "println", 2);
    let params = selected_parameters(&engine, "println", &int_call);
    assert_eq!(params, vec![TypeRef::Primitive(PrimitiveType::Int)]);
}
