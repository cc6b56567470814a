// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Package scopes and import visibility

use javalens_semantic::{Definition, QueryEngine};
use javalens_test_utils::{build_fixture, occ, occ_nth};

#[test]
fn same_package_types_see_each_other_across_files() {
    let a = "package demo;\nclass A {\n}\n";
    let b = "package demo;\nclass B extends A {\n}\n";
    let table = build_fixture(&[("demo/A.java", a), ("demo/B.java", b)]).unwrap();

    let b_id = table.class_by_qualified_name("demo.B").unwrap();
    let superclass = table.superclass_of(b_id).unwrap();
    assert_eq!(table.def(superclass).qualified_name(), "demo.A");
}

#[test]
fn single_type_import_resolves_simple_name() {
    let point = "package geometry;\npublic class Point {\n    public int x;\n}\n";
    let main = "package app;\nimport geometry.Point;\nclass Main {\n    Point p = new Point();\n}\n";
    let table = build_fixture(&[("geometry/Point.java", point), ("app/Main.java", main)]).unwrap();
    let engine = QueryEngine::new(&table);

    let type_use = occ_nth("app/Main.java", main, "Point", 2);
    let def = engine.get_definition("Point", &type_use).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "geometry.Point");
}

#[test]
fn on_demand_import_exposes_package_types() {
    let point = "package geometry;\npublic class Point {\n}\n";
    let main = "package app;\nimport geometry.*;\nclass Main {\n    Point p;\n}\n";
    let table = build_fixture(&[("geometry/Point.java", point), ("app/Main.java", main)]).unwrap();
    let engine = QueryEngine::new(&table);

    let type_use = occ("app/Main.java", main, "Point");
    let def = engine.get_definition("Point", &type_use).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "geometry.Point");
}

#[test]
fn on_demand_import_does_not_reach_subpackages() {
    let circle = "package geometry.shapes;\npublic class Circle {\n}\n";
    let main = "package app;\nimport geometry.*;\nclass Main {\n    Circle c;\n}\n";
    let table = build_fixture(&[
        ("geometry/shapes/Circle.java", circle),
        ("app/Main.java", main),
    ])
    .unwrap();
    let engine = QueryEngine::new(&table);

    // the star import names geometry, not geometry.shapes
    let type_use = occ("app/Main.java", main, "Circle");
    assert!(engine.get_definition("Circle", &type_use).unwrap().is_none());
}

#[test]
fn unnamed_package_is_shared_per_directory() {
    let a = "class A {\n}\n";
    let sibling = "class Sibling extends A {\n}\n";
    let stranger = "class Stranger extends A {\n}\n";
    let table = build_fixture(&[
        ("x/A.java", a),
        ("x/Sibling.java", sibling),
        ("y/Stranger.java", stranger),
    ])
    .unwrap();

    let a_id = table.class_by_qualified_name("A").unwrap();

    // the sibling in the same directory linked against A
    let sibling_id = table.class_by_qualified_name("Sibling").unwrap();
    assert_eq!(table.superclass_of(sibling_id), Some(a_id));

    // the file in another directory shares no unnamed package with A and
    // fell back to the root class
    let stranger_id = table.class_by_qualified_name("Stranger").unwrap();
    let fallback = table.superclass_of(stranger_id).unwrap();
    assert_eq!(table.def(fallback).qualified_name(), "java.lang.Object");

    let subclasses = &table.def(a_id).as_class().unwrap().subclasses;
    assert_eq!(subclasses.len(), 1);
    assert_eq!(table.def(subclasses[0]).name(), "Sibling");
}

#[test]
fn java_lang_is_visible_without_imports() {
    let src = "class Text {\n    String name;\n}\n";
    let table = build_fixture(&[("Text.java", src)]).unwrap();
    let engine = QueryEngine::new(&table);

    let type_use = occ("Text.java", src, "String");
    let def = engine.get_definition("String", &type_use).unwrap().unwrap();
    assert!(matches!(def, Definition::Class(_)));
    assert_eq!(def.qualified_name(), "java.lang.String");
}

#[test]
fn source_type_shadows_on_demand_import() {
    // a type declared in the file's own package wins over a star import
    let local = "package app;\npublic class Clock {\n}\n";
    let foreign = "package time;\npublic class Clock {\n}\n";
    let main = "package app;\nimport time.*;\nclass Main {\n    Clock c;\n}\n";
    let table = build_fixture(&[
        ("app/Clock.java", local),
        ("time/Clock.java", foreign),
        ("app/Main.java", main),
    ])
    .unwrap();
    let engine = QueryEngine::new(&table);

    let type_use = occ("app/Main.java", main, "Clock");
    let def = engine.get_definition("Clock", &type_use).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "app.Clock");
}
