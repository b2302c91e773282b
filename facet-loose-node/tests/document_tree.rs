use facet_loose_node::{Content, Element, ParseError, parse};
use facet_testhelpers::test;
use indoc::indoc;

#[test]
fn feed_document() {
    let root = parse(indoc! {r#"
        <?xml version="1.0" encoding="utf-8"?>
        <!DOCTYPE rss>
        <rss version="2.0">
          <channel>
            <title>News &amp; Views</title>
            <!-- items follow -->
            <item><title>First</title><description><![CDATA[<b>bold</b>]]></description></item>
            <item><title>Second</title></item>
          </channel>
        </rss>
    "#})
    .unwrap();

    assert_eq!(root.tag, "rss");
    assert_eq!(root.get_attr("version"), Some("2.0"));

    let channel = root.child_elements().next().unwrap();
    let titles: Vec<_> = channel
        .descendants_or_self()
        .filter(|e| e.tag == "title")
        .map(|e| e.text_content())
        .collect();
    assert_eq!(titles, ["News & Views", "First", "Second"]);

    let description = channel
        .descendants_or_self()
        .find(|e| e.tag == "description")
        .unwrap();
    assert_eq!(description.own_text(), "<b>bold</b>");
    assert!(!description.has_child_elements());
}

#[test]
fn mixed_content_keeps_text_between_elements() {
    let root = parse("<note>Hello <b>big</b> world</note>").unwrap();
    assert_eq!(root.own_text(), "Hello  world");
    assert_eq!(root.text_content(), "Hello big world");
    assert!(matches!(root.children[1], Content::Element(ref b) if b.tag == "b"));
}

#[test]
fn parsed_and_built_trees_agree() {
    let parsed = parse(r#"<person age="36"><name>John</name></person>"#).unwrap();
    let built = Element::new("person")
        .with_attr("age", "36")
        .with_child(Element::new("name").with_text("John"));
    assert_eq!(parsed, built);
}

#[test]
fn byte_order_mark_is_ignored() {
    let root = parse("\u{feff}<a/>").unwrap();
    assert!(root.is_empty());
}

#[test]
fn empty_body_has_no_root() {
    assert!(matches!(parse("   "), Err(ParseError::NoRootElement)));
}
