//! Member binding: lenient names, attribute fallback, overrides and defaults.

use chrono::{NaiveDate, NaiveDateTime};
use facet::Facet;
use facet_loose as loose;
use facet_testhelpers::test;
use indoc::indoc;

#[derive(Facet, Debug, PartialEq)]
struct Person {
    start_date: NaiveDateTime,
    age: i32,
}

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2009, 9, 25)
        .unwrap()
        .and_hms_opt(0, 6, 1)
        .unwrap()
}

#[test]
fn separator_and_case_variants_all_bind() {
    for tag in ["Start_Date", "start_date", "Start-Date", "StartDate", "startdate"] {
        let xml = format!("<Person><{tag}>2009-09-25T00:06:01</{tag}><Age>28</Age></Person>");
        let person: Person = loose::from_str(&xml).unwrap();
        assert_eq!(person, Person { start_date: start(), age: 28 }, "tag {tag}");
    }
}

#[test]
fn attributes_bind_when_no_element_matches() {
    let person: Person =
        loose::from_str(r#"<Person StartDate="2009-09-25T00:06:01" AGE="28"/>"#).unwrap();
    assert_eq!(person, Person { start_date: start(), age: 28 });
}

#[test]
fn elements_win_over_attributes() {
    let person: Person = loose::from_str(indoc! {r#"
        <Person age="1">
          <age>2</age>
        </Person>
    "#})
    .unwrap();
    assert_eq!(person.age, 2);
}

#[test]
fn closer_match_wins_over_document_order() {
    #[derive(Facet, Debug)]
    struct Item {
        name: String,
    }

    let item: Item = loose::from_str(indoc! {r#"
        <Item>
          <NAME>shouting</NAME>
          <n-a-m-e>dashed</n-a-m-e>
          <name>exact</name>
        </Item>
    "#})
    .unwrap();
    assert_eq!(item.name, "exact");

    let item: Item =
        loose::from_str("<Item><n-a-m-e>dashed</n-a-m-e><NAME>shouting</NAME></Item>").unwrap();
    assert_eq!(item.name, "shouting");
}

#[test]
fn missing_members_keep_defaults() {
    #[derive(Facet, Debug)]
    struct Sparse {
        name: String,
        count: u64,
        ratio: f64,
        enabled: bool,
        nickname: Option<String>,
        tags: Vec<String>,
        when: NaiveDateTime,
    }

    let sparse: Sparse = loose::from_str("<Sparse><unrelated>1</unrelated></Sparse>").unwrap();
    assert_eq!(sparse.name, "");
    assert_eq!(sparse.count, 0);
    assert_eq!(sparse.ratio, 0.0);
    assert!(!sparse.enabled);
    assert_eq!(sparse.nickname, None);
    assert!(sparse.tags.is_empty());
    assert_eq!(sparse.when, NaiveDateTime::default());
}

#[test]
fn nested_composites() {
    #[derive(Facet, Debug, PartialEq)]
    struct Address {
        street: String,
        city: String,
    }

    #[derive(Facet, Debug, PartialEq)]
    struct Customer {
        name: String,
        billing_address: Address,
        shipping_address: Option<Address>,
        other_address: Address,
    }

    let customer: Customer = loose::from_str(indoc! {r#"
        <Customer>
          <Name>Ada</Name>
          <BillingAddress City="London">
            <Street>1 Main St</Street>
          </BillingAddress>
          <shipping-address>
            <street>2 Side St</street>
            <city>Paris</city>
          </shipping-address>
        </Customer>
    "#})
    .unwrap();

    assert_eq!(customer.name, "Ada");
    assert_eq!(
        customer.billing_address,
        Address {
            street: "1 Main St".into(),
            city: "London".into(),
        }
    );
    assert_eq!(customer.shipping_address.unwrap().city, "Paris");
    // absent composites are built from defaults
    assert_eq!(
        customer.other_address,
        Address {
            street: String::new(),
            city: String::new(),
        }
    );
}

#[test]
fn optional_members() {
    #[derive(Facet, Debug)]
    struct Maybe {
        count: Option<i32>,
        label: Option<String>,
        missing: Option<i32>,
    }

    let maybe: Maybe = loose::from_str("<Maybe count=\"7\"><label></label></Maybe>").unwrap();
    assert_eq!(maybe.count, Some(7));
    assert_eq!(maybe.label, None);
    assert_eq!(maybe.missing, None);
}

#[test]
fn strings_keep_surrounding_whitespace() {
    #[derive(Facet, Debug)]
    struct Padded {
        text: String,
        number: i32,
    }

    let padded: Padded =
        loose::from_str("<Padded><text>  spaced  </text><number> 42 </number></Padded>").unwrap();
    assert_eq!(padded.text, "  spaced  ");
    assert_eq!(padded.number, 42);
}

#[test]
fn rename_is_the_declared_name() {
    #[derive(Facet, Debug)]
    struct Product {
        #[facet(rename = "sku")]
        code: String,
    }

    let product: Product = loose::from_str("<Product><SKU>A-1</SKU></Product>").unwrap();
    assert_eq!(product.code, "A-1");
}

#[test]
fn skipped_members_are_never_bound() {
    #[derive(Facet, Debug)]
    struct Cached {
        value: i32,
        #[facet(skip)]
        cache: String,
    }

    let cached: Cached = loose::from_str("<Cached><value>1</value><cache>x</cache></Cached>").unwrap();
    assert_eq!(cached.value, 1);
    assert_eq!(cached.cache, "");
}

#[test]
fn namespace_prefixes_are_ignored() {
    #[derive(Facet, Debug)]
    struct Feed {
        title: String,
        id: String,
    }

    let feed: Feed = loose::from_str(indoc! {r#"
        <atom:feed xmlns:atom="http://www.w3.org/2005/Atom" atom:id="urn:1">
          <atom:title>News</atom:title>
        </atom:feed>
    "#})
    .unwrap();
    assert_eq!(feed.title, "News");
    assert_eq!(feed.id, "urn:1");
}
