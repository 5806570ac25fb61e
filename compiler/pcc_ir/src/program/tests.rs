#![allow(clippy::unwrap_used)]

use super::*;
use crate::{FieldDecl, Mark, Modifiers, StructRef, Type};
use pretty_assertions::assert_eq;

fn at(file: u32) -> Mark {
    Mark::new(FileId::new(file), 0)
}

fn global(name: &str, file: u32, modifiers: Modifiers) -> Item {
    Item {
        kind: ItemKind::Global(GlobalField {
            name: name.to_string(),
            ty: Type::Int,
            init: None,
            const_value: None,
            mark: at(file),
        }),
        file: FileId::new(file),
        modifiers,
    }
}

fn structure(name: &str, field: &str, file: u32, modifiers: Modifiers) -> Item {
    Item {
        kind: ItemKind::Struct(StructDef {
            name: name.to_string(),
            fields: vec![FieldDecl {
                ty: Type::Int,
                name: field.to_string(),
                mark: at(file),
            }],
            mark: at(file),
        }),
        file: FileId::new(file),
        modifiers,
    }
}

fn method(name: &str, params: Vec<Type>, file: u32, modifiers: Modifiers) -> Item {
    Item {
        kind: ItemKind::Method(Method {
            name: name.to_string(),
            ret: Type::Void,
            params: params
                .into_iter()
                .enumerate()
                .map(|(i, ty)| crate::Param {
                    ty,
                    name: format!("p{i}"),
                })
                .collect(),
            body: None,
            mark: at(file),
        }),
        file: FileId::new(file),
        modifiers,
    }
}

#[test]
fn test_private_items_only_visible_in_their_file() {
    let mut program = Program::new();
    program.push(global("hidden", 0, Modifiers::empty()));
    program.push(global("shown", 0, Modifiers::PUBLIC));
    assert!(program.global("hidden", Some(FileId::new(0))).is_some());
    assert!(program.global("hidden", Some(FileId::new(1))).is_none());
    assert!(program.global("shown", Some(FileId::new(1))).is_some());
    assert!(program.global("hidden", None).is_some());
}

#[test]
fn test_global_lookup_takes_first_match() {
    let mut program = Program::new();
    let first = program.push(global("g", 0, Modifiers::PUBLIC));
    program.push(global("g", 1, Modifiers::PUBLIC));
    let (found, _) = program.global("g", Some(FileId::new(1))).unwrap();
    assert_eq!(found, first);
}

#[test]
fn test_struct_resolution_takes_last_visible_match() {
    let mut program = Program::new();
    program.push(structure("P", "a", 0, Modifiers::PUBLIC));
    let own = program.push(structure("P", "b", 1, Modifiers::empty()));
    program.push(structure("P", "c", 2, Modifiers::empty()));

    let (id, def) = program.resolve_struct("P", FileId::new(1)).unwrap();
    assert_eq!(id, own);
    assert_eq!(def.fields[0].name, "b");

    let (_, def) = program.resolve_struct("P", FileId::new(3)).unwrap();
    assert_eq!(def.fields[0].name, "a");
    assert!(program.resolve_struct("Q", FileId::new(0)).is_none());
}

#[test]
fn test_methods_named_keeps_overloads_in_order() {
    let mut program = Program::new();
    program.push(method("f", vec![], 0, Modifiers::PUBLIC));
    program.push(method("g", vec![], 0, Modifiers::PUBLIC));
    program.push(method("f", vec![Type::Int], 0, Modifiers::empty()));
    program.push(method(
        "f",
        vec![Type::Struct(StructRef {
            name: "P".to_string(),
            mark: at(1),
        })],
        1,
        Modifiers::empty(),
    ));

    let arities: Vec<usize> = program
        .methods_named("f", FileId::new(0))
        .map(|(_, m)| m.params.len())
        .collect();
    assert_eq!(arities, vec![0, 1]);

    let from_other: Vec<String> = program
        .methods_named("f", FileId::new(1))
        .map(|(_, m)| m.params.iter().map(|p| p.ty.to_string()).collect())
        .collect();
    assert_eq!(from_other, vec![String::new(), "P".to_string()]);
}

#[test]
fn test_globals_and_structs_ignore_visibility() {
    let mut program = Program::new();
    program.push(global("a", 0, Modifiers::empty()));
    program.push(structure("S", "x", 1, Modifiers::empty()));
    program.push(global("b", 1, Modifiers::CONST));
    let names: Vec<&str> = program.globals().map(|(_, g)| g.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(program.structs().count(), 1);
    assert!(program.item(ItemId(2)).is_const());
}
