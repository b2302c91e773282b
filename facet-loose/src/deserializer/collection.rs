//! Sequence members: finding the items in any of the accepted list shapes.
//!
//! A `Vec` member named `images` with element type `Image` accepts
//!
//! ```xml
//! <!-- nested: one wrapper, items are its children -->
//! <images><image/><image/></images>
//!
//! <!-- inline: repeated siblings named after the item type or the member -->
//! <image/><image/>
//! ```
//!
//! When the target itself is a sequence, the element's children are the items.
//! Sets and fixed-size arrays take their items the same way as `Vec`.

use facet_core::{Def, Shape};
use facet_loose_node::Element;

use super::descriptor::{MemberDescriptor, SeqKind, Target};
use super::{Deserializer, MemberPath, Wip};
use crate::error::DeserializeError;
use crate::naming::matches;
use crate::trace;

impl Deserializer {
    /// Build a sequence in `wip` from `items`, in order. No items gives an
    /// empty list or set; an array takes its item defaults.
    pub(crate) fn fill_sequence<'n>(
        &self,
        wip: Wip,
        kind: SeqKind,
        items: impl IntoIterator<Item = &'n Element>,
        target: &Target,
        path: &MemberPath<'_>,
    ) -> Result<Wip, DeserializeError> {
        let mut items = items.into_iter();
        match kind {
            SeqKind::List => {
                let mut wip = wip.init_list()?;
                for (idx, item) in items.enumerate() {
                    wip = wip.begin_list_item()?;
                    wip = self.deserialize_node(wip, item, target, &path.index(idx))?;
                    wip = wip.end()?;
                }
                Ok(wip)
            }
            SeqKind::Set => {
                let mut wip = wip.init_set()?;
                for (idx, item) in items.enumerate() {
                    wip = wip.begin_set_item()?;
                    wip = self.deserialize_node(wip, item, target, &path.index(idx))?;
                    wip = wip.end()?;
                }
                Ok(wip)
            }
            SeqKind::Array(len) => {
                let mut wip = wip.init_array()?;
                for idx in 0..len {
                    let item_path = path.index(idx);
                    wip = wip.begin_nth_field(idx)?;
                    wip = match items.next() {
                        Some(item) => self.deserialize_node(wip, item, target, &item_path)?,
                        None => self.deserialize_missing(wip, target, &item_path)?,
                    };
                    wip = wip.end()?;
                }
                if items.next().is_some() {
                    trace!(len, "ignoring items past the end of the array");
                }
                Ok(wip)
            }
        }
    }

    /// The elements under `node` that make up a sequence member.
    pub(crate) fn member_items<'n>(
        &self,
        node: &'n Element,
        member: &MemberDescriptor,
        item: &'static Shape,
    ) -> Vec<&'n Element> {
        if member.is_skipped() {
            return Vec::new();
        }
        let name = member.name();
        let explicit = member.explicit_name();
        let item_name = item_type_name(item);

        let mut named = node
            .child_elements()
            .filter(|child| matches(&child.tag, name, explicit));
        if let (Some(wrapper), None) = (named.next(), named.next())
            && is_wrapper(wrapper, item_name)
        {
            trace!(member = name, wrapper = %wrapper.tag, "nested list");
            return wrapper.child_elements().collect();
        }

        let items: Vec<&Element> = node
            .child_elements()
            .filter(|child| match explicit {
                Some(explicit) => child.tag == explicit,
                None => matches(&child.tag, item_name, None) || matches(&child.tag, name, None),
            })
            .collect();
        trace!(member = name, item = item_name, count = items.len(), "inline list");
        items
    }
}

/// Whether the single element named after a member wraps the items, rather
/// than being the only item itself.
fn is_wrapper(candidate: &Element, item_name: &str) -> bool {
    if !candidate.has_child_elements() {
        // `<tags/>` is an empty wrapper; `<tag>a</tag>` is one item.
        return candidate.own_text().trim().is_empty();
    }
    // `<image><url/></image>` is one item when it is itself named after the
    // item type and none of its children are.
    !(matches(&candidate.tag, item_name, None)
        && !candidate
            .child_elements()
            .any(|c| matches(&c.tag, item_name, None)))
}

/// The element name items of this type are expected under: the type's
/// `rename`, or its type name. `Option<T>` and `Box<T>` items use `T`'s.
fn item_type_name(shape: &'static Shape) -> &'static str {
    match &shape.def {
        Def::Option(option_def) => return item_type_name(option_def.t()),
        Def::Pointer(ptr_def) => {
            if let Some(pointee) = ptr_def.pointee() {
                return item_type_name(pointee);
            }
        }
        _ => {}
    }
    shape
        .get_builtin_attr_value::<&str>("rename")
        .unwrap_or(shape.type_identifier)
}
