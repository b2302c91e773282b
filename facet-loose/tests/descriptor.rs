//! Per-type member metadata and override validation.

use std::collections::HashMap;
use std::sync::Arc;

use facet::Facet;
use facet_loose as loose;
use facet_loose::{BindingKind, DeserializeError, TypeDescriptor};
use facet_testhelpers::test;

#[derive(Facet, Debug, Default)]
struct Friend {
    name: String,
}

#[derive(Facet, Debug)]
struct Person {
    name: String,
    #[facet(rename = "years")]
    age: u32,
    #[facet(loose::attribute)]
    #[facet(loose::name = "ID")]
    id: i32,
    friends: Vec<Friend>,
    #[facet(skip)]
    cache: String,
}

#[test]
fn members_in_declaration_order() {
    let descriptor = TypeDescriptor::of::<Person>().unwrap();
    assert_eq!(descriptor.type_name(), "Person");
    let names: Vec<_> = descriptor.members().iter().map(|m| m.field_name()).collect();
    assert_eq!(names, ["name", "age", "id", "friends", "cache"]);
}

#[test]
fn member_hints() {
    let descriptor = TypeDescriptor::of::<Person>().unwrap();

    let age = descriptor.member("age").unwrap();
    assert_eq!(age.name(), "years");
    assert!(std::ptr::eq(age, descriptor.member("years").unwrap()));
    assert_eq!(age.binding(), None);

    let id = descriptor.member("id").unwrap();
    assert_eq!(id.binding(), Some(BindingKind::Attribute));
    assert_eq!(id.explicit_name(), Some("ID"));

    assert!(descriptor.member("friends").unwrap().is_sequence());
    assert!(descriptor.member("cache").unwrap().is_skipped());
    assert!(descriptor.content_member().is_none());
}

#[test]
fn descriptors_are_cached() {
    let first = TypeDescriptor::of::<Person>().unwrap();
    let second = TypeDescriptor::of::<Person>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn two_content_members_conflict() {
    #[derive(Facet, Debug)]
    struct TwoContents {
        #[facet(loose::content)]
        first: String,
        #[facet(loose::content)]
        second: String,
    }

    let err = TypeDescriptor::of::<TwoContents>().unwrap_err();
    let DeserializeError::SchemaConflict(conflict) = err else {
        panic!("expected a schema conflict, got {err:?}");
    };
    assert_eq!(conflict.members, ["first", "second"]);

    // the conflict surfaces from deserialization too, whatever the document
    let err = loose::from_str::<TwoContents>("<x>text</x>").unwrap_err();
    assert!(matches!(err, DeserializeError::SchemaConflict(_)));
}

#[test]
fn composite_attribute_conflicts() {
    #[derive(Facet, Debug)]
    struct AttributeComposite {
        #[facet(loose::attribute)]
        friend: Friend,
    }

    let err = TypeDescriptor::of::<AttributeComposite>().unwrap_err();
    assert!(matches!(err, DeserializeError::SchemaConflict(_)));
}

#[test]
fn several_bindings_on_one_member_conflict() {
    #[derive(Facet, Debug)]
    struct Torn {
        #[facet(loose::attribute)]
        #[facet(loose::element)]
        value: String,
    }

    let err = TypeDescriptor::of::<Torn>().unwrap_err();
    assert!(matches!(err, DeserializeError::SchemaConflict(c) if c.members == ["value"]));
}

#[test]
fn content_member_is_found() {
    #[derive(Facet, Debug)]
    struct Note {
        title: String,
        #[facet(loose::content)]
        message: Option<String>,
    }

    let descriptor = TypeDescriptor::of::<Note>().unwrap();
    assert_eq!(descriptor.content_member().unwrap().name(), "message");
}

#[test]
fn non_struct_types_are_unsupported() {
    assert!(matches!(
        TypeDescriptor::of::<u32>(),
        Err(DeserializeError::Unsupported { .. })
    ));
}

#[test]
fn unsupported_member_type() {
    #[derive(Facet, Debug)]
    struct WithMap {
        lookup: HashMap<String, String>,
    }

    let err = loose::from_str::<WithMap>("<WithMap/>").unwrap_err();
    let DeserializeError::Unsupported { path, .. } = err else {
        panic!("expected unsupported, got {err:?}");
    };
    assert_eq!(path, "WithMap.lookup");
}

#[test]
fn pointers_sets_and_arrays_are_supported() {
    #[derive(Facet, Debug)]
    struct Node {
        value: Box<u32>,
        labels: std::collections::BTreeSet<String>,
        window: [u8; 2],
        #[facet(recursive_type)]
        next: Option<Box<Node>>,
    }

    let node: Node = loose::from_str(indoc::indoc! {r#"
        <Node>
          <value>1</value>
          <labels><label>x</label></labels>
          <window><b>9</b></window>
          <next><value>2</value></next>
        </Node>
    "#})
    .unwrap();
    assert_eq!(*node.value, 1);
    assert!(node.labels.contains("x"));
    assert_eq!(node.window, [9, 0]);
    let next = node.next.unwrap();
    assert_eq!(*next.value, 2);
    assert!(next.next.is_none());
    assert_eq!(next.window, [0, 0]);
}
