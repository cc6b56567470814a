// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Inheritance-based lookup and class graph bookkeeping

use javalens_semantic::{Definition, QueryEngine};
use javalens_test_utils::{build_fixture, occ, occ_nth};

#[test]
fn method_found_two_levels_up() {
    let a = "class A {\n    int base() { return 1; }\n}\n";
    let b = "class B extends A {\n}\n";
    let c = "class C extends B {\n    int use() { return base(); }\n}\n";
    let table = build_fixture(&[("A.java", a), ("B.java", b), ("C.java", c)]).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ_nth("C.java", c, "base", 1);
    let def = engine.get_definition("base", &call).unwrap().unwrap();
    assert_eq!(def.occurrence().unwrap().file, std::path::PathBuf::from("A.java"));
    assert_eq!(def.qualified_name(), "A.base");
}

#[test]
fn inherited_field_resolves_from_subclass_body() {
    let src = "class Animal {\n    int legs;\n}\nclass Dog extends Animal {\n    int countLegs() { return legs; }\n}\n";
    let table = build_fixture(&[("Animals.java", src)]).unwrap();
    let engine = QueryEngine::new(&table);

    let use_site = occ_nth("Animals.java", src, "legs", 2);
    let def = engine.get_definition("legs", &use_site).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "Animal.legs");
}

#[test]
fn interface_method_resolves_through_implementing_type() {
    let src = "interface Greeter {\n    String greet(String name);\n}\nclass Friendly implements Greeter {\n    public String greet(String name) { return name; }\n}\nclass Caller {\n    String call(Greeter g) { return g.greet(\"x\"); }\n}\n";
    let table = build_fixture(&[("Greeter.java", src)]).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ_nth("Greeter.java", src, "greet", 3);
    let def = engine.get_definition("greet", &call).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "Greeter.greet");
}

#[test]
fn subclass_lists_are_build_order_independent() {
    let a = "class A {\n}\n";
    let b = "class B extends A {\n}\n";
    let c = "class C extends A {\n}\n";

    for files in [
        vec![("A.java", a), ("B.java", b), ("C.java", c)],
        vec![("C.java", c), ("B.java", b), ("A.java", a)],
    ] {
        let table = build_fixture(&files).unwrap();
        let id = table.class_by_qualified_name("A").unwrap();
        let class = table.def(id).as_class().unwrap();

        let mut names: Vec<&str> = class
            .subclasses
            .iter()
            .map(|&sub| table.def(sub).name())
            .collect();
        names.sort_unstable();
        assert_eq!(names, ["B", "C"]);
    }
}

#[test]
fn implementor_lists_track_interfaces() {
    let src = "interface Pump {\n}\nclass WaterPump implements Pump {\n}\nclass AirPump implements Pump {\n}\n";
    let table = build_fixture(&[("Pumps.java", src)]).unwrap();

    let id = table.class_by_qualified_name("Pump").unwrap();
    let interface = table.def(id).as_class().unwrap();
    assert!(interface.is_interface);

    let mut names: Vec<&str> = interface
        .implementors
        .iter()
        .map(|&class| table.def(class).name())
        .collect();
    names.sort_unstable();
    assert_eq!(names, ["AirPump", "WaterPump"]);
}

#[test]
fn inherited_member_beats_enclosing_class_member() {
    let src = "class Base {\n    int width;\n}\nclass Host {\n    int width;\n    class Inner extends Base {\n        int use() { return width; }\n    }\n}\n";
    let table = build_fixture(&[("Host.java", src)]).unwrap();
    let engine = QueryEngine::new(&table);

    // inside Inner, the inherited Base.width wins over the lexically
    // enclosing Host.width
    let use_site = occ_nth("Host.java", src, "width", 3);
    let def = engine.get_definition("width", &use_site).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "Base.width");
}

#[test]
fn platform_superclass_supplies_members() {
    let src = "class MyException extends RuntimeException {\n    String describe() { return getMessage(); }\n}\n";
    let table = build_fixture(&[("MyException.java", src)]).unwrap();
    let engine = QueryEngine::new(&table);

    let call = occ("MyException.java", src, "getMessage");
    let def = engine.get_definition("getMessage", &call).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "java.lang.Throwable.getMessage");

    // the source class is recorded as a subclass of the platform class
    let runtime = table
        .class_by_qualified_name("java.lang.RuntimeException")
        .unwrap();
    let subclasses = table.def(runtime).as_class().unwrap();
    assert!(subclasses
        .subclasses
        .iter()
        .any(|&sub| table.def(sub).name() == "MyException"));
}

#[test]
fn every_class_defaults_to_the_root_superclass() {
    let src = "class Plain {\n}\n";
    let table = build_fixture(&[("Plain.java", src)]).unwrap();

    let plain = table.class_by_qualified_name("Plain").unwrap();
    let superclass = table.superclass_of(plain).unwrap();
    assert_eq!(
        table.def(superclass).qualified_name(),
        "java.lang.Object"
    );
}

#[test]
fn anonymous_class_takes_interface_as_contract() {
    let src = "class Host {\n    Runnable job() {\n        return new Runnable() {\n            public void run() { tick(); }\n        };\n    }\n    void tick() {\n    }\n}\n";
    let table = build_fixture(&[("Host.java", src)]).unwrap();
    let engine = QueryEngine::new(&table);

    // run() is declared on the synthetic anonymous class
    let run_decl = occ_nth("Host.java", src, "run", 1);
    let def = engine.get_definition("run", &run_decl).unwrap().unwrap();
    let method = def.as_method().unwrap();
    let owner = table.def(method.owner).as_class().unwrap();
    assert!(owner.common.name.starts_with("~Anonymous~"));
    assert!(owner
        .interfaces
        .iter()
        .any(|&i| table.def(i).qualified_name() == "java.lang.Runnable"));

    // the body still reaches the enclosing class's methods
    let tick_call = occ_nth("Host.java", src, "tick", 1);
    let def = engine.get_definition("tick", &tick_call).unwrap().unwrap();
    assert_eq!(def.qualified_name(), "Host.tick");
}

#[test]
fn definition_accessors_expose_the_graph() {
    let src = "class Parent {\n}\nclass Child extends Parent {\n}\n";
    let table = build_fixture(&[("Family.java", src)]).unwrap();
    let engine = QueryEngine::new(&table);

    let child = engine
        .get_definition("Child", &occ_nth("Family.java", src, "Child", 1))
        .unwrap()
        .unwrap();
    let Definition::Class(child) = child else {
        panic!("expected a class definition");
    };
    let superclass = child.superclass.unwrap();
    assert_eq!(table.def(superclass).name(), "Parent");
    assert!(child.subclasses.is_empty());
}
