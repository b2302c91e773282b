//! Struct deserialization: binding each member to an element, attribute, or text.

use std::borrow::Cow;

use facet_loose_node::Element;

use super::descriptor::{BindingKind, MemberDescriptor, Target, describe};
use super::{Deserializer, MemberPath, Wip};
use crate::error::DeserializeError;
use crate::naming::find_match;
use crate::trace;

/// Where a member's value was found.
enum Located<'n> {
    Element(&'n Element),
    Text(Cow<'n, str>),
}

impl Deserializer {
    /// Populate every member of the struct in `wip` from `node`, in
    /// declaration order.
    pub(crate) fn deserialize_struct(
        &self,
        mut wip: Wip,
        node: &Element,
        path: &MemberPath<'_>,
    ) -> Result<Wip, DeserializeError> {
        let descriptor = describe(wip.shape())?;
        trace!(
            type_name = descriptor.type_name(),
            tag = %node.tag,
            members = descriptor.members().len(),
            "deserializing struct"
        );

        for member in descriptor.members() {
            let member_path = path.member(member.name());
            wip = wip.begin_nth_field(member.index)?;
            wip = self.bind_member(wip, node, member, &member_path)?;
            wip = wip.end()?;
        }
        Ok(wip)
    }

    fn bind_member(
        &self,
        wip: Wip,
        node: &Element,
        member: &MemberDescriptor,
        path: &MemberPath<'_>,
    ) -> Result<Wip, DeserializeError> {
        if let Target::Sequence { kind, item, target } = &member.target {
            let items = self.member_items(node, member, *item);
            return self.fill_sequence(wip, *kind, items, target, path);
        }

        match locate(node, member) {
            Some(Located::Element(child)) => {
                trace!(member = member.name(), tag = %child.tag, "matched element");
                self.deserialize_node(wip, child, &member.target, path)
            }
            Some(Located::Text(text)) => {
                trace!(member = member.name(), text = %text, "matched text");
                self.deserialize_text(wip, &text, &member.target, path)
            }
            None => self.deserialize_missing(wip, &member.target, path),
        }
    }
}

/// Find the node holding a non-sequence member's value.
///
/// Forced bindings search only their own kind. Otherwise child elements are
/// searched first, then (for text-valued members) attributes.
fn locate<'n>(node: &'n Element, member: &MemberDescriptor) -> Option<Located<'n>> {
    if member.is_skipped() {
        return None;
    }
    let name = member.name();
    let explicit = member.explicit_name();

    let element = || {
        let idx = find_match(node.child_elements().map(|e| e.tag.as_str()), name, explicit)?;
        node.child_elements().nth(idx).map(Located::Element)
    };
    let attribute = || {
        let idx = find_match(node.attributes().map(|(k, _)| k), name, explicit)?;
        Some(Located::Text(Cow::Borrowed(node.attrs[idx].1.as_str())))
    };

    match member.binding() {
        Some(BindingKind::Content) => {
            let text = node.own_text();
            (!text.trim().is_empty()).then_some(Located::Text(text))
        }
        Some(BindingKind::Attribute) => attribute(),
        Some(BindingKind::Element) => element(),
        None if member.target.is_text_valued() => element().or_else(attribute),
        None => element(),
    }
}
