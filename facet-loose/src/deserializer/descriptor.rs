//! Per-type member metadata, derived once per shape and cached.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use facet_core::{Def, Facet, Field, Shape, Type, UserType};

use crate::error::{DeserializeError, SchemaConflict};
use crate::trace;
use crate::value::ScalarKind;

/// Where a member's value is read from, when forced by an override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// A child element (`loose::element`).
    Element,
    /// An attribute of the current element (`loose::attribute`).
    Attribute,
    /// The current element's own text (`loose::content`).
    Content,
}

/// What a member holds, as far as binding is concerned.
#[derive(Debug)]
pub(crate) enum Target {
    /// Populated from text.
    Scalar(ScalarKind),
    /// `Option<T>`.
    Optional(Box<Target>),
    /// `Box<T>`, `Rc<T>` or `Arc<T>` around a sized `T`.
    Pointer(Box<Target>),
    /// A struct, populated member by member from an element.
    Composite,
    /// `Vec<T>`, a set, or `[T; N]`.
    Sequence {
        kind: SeqKind,
        item: &'static Shape,
        target: Box<Target>,
    },
    /// Never bound; always left at its default.
    Skipped,
}

/// How a sequence is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SeqKind {
    List,
    Set,
    /// Fixed length; missing items take their defaults, extra items are ignored.
    Array(usize),
}

impl Target {
    pub(crate) fn of(shape: &'static Shape) -> Option<Self> {
        let sequence = |kind, item: &'static Shape| {
            Target::of(item).map(|t| Target::Sequence {
                kind,
                item,
                target: Box::new(t),
            })
        };
        match &shape.def {
            Def::Option(option_def) => {
                return Target::of(option_def.t()).map(|t| Target::Optional(Box::new(t)));
            }
            Def::List(list_def) => return sequence(SeqKind::List, list_def.t()),
            Def::Set(set_def) => return sequence(SeqKind::Set, set_def.t()),
            Def::Array(array_def) => return sequence(SeqKind::Array(array_def.n), array_def.t()),
            // Slice and `str` pointees have no target of their own.
            Def::Pointer(ptr_def) => {
                return Target::of(ptr_def.pointee()?).map(|t| Target::Pointer(Box::new(t)));
            }
            _ => {}
        }
        if let Some(kind) = ScalarKind::of(shape) {
            return Some(Target::Scalar(kind));
        }
        match &shape.ty {
            Type::User(UserType::Struct(_)) => Some(Target::Composite),
            _ => None,
        }
    }

    /// Whether the member can be read from an attribute or text.
    pub(crate) fn is_text_valued(&self) -> bool {
        match self {
            Target::Scalar(_) => true,
            Target::Optional(inner) | Target::Pointer(inner) => inner.is_text_valued(),
            _ => false,
        }
    }
}

/// How one struct field is bound.
#[derive(Debug)]
pub struct MemberDescriptor {
    pub(crate) index: usize,
    field: &'static Field,
    explicit_name: Option<&'static str>,
    binding: Option<BindingKind>,
    pub(crate) target: Target,
}

impl MemberDescriptor {
    /// The declared name (the field name, or its `rename`).
    pub fn name(&self) -> &'static str {
        self.field.effective_name()
    }

    /// The Rust field name.
    pub fn field_name(&self) -> &'static str {
        self.field.name
    }

    /// The exact name from `loose::name`, if any.
    pub fn explicit_name(&self) -> Option<&'static str> {
        self.explicit_name
    }

    /// The forced binding kind, if any.
    pub fn binding(&self) -> Option<BindingKind> {
        self.binding
    }

    /// Whether the member is a `Vec`, a set or an array.
    pub fn is_sequence(&self) -> bool {
        matches!(self.target, Target::Sequence { .. })
    }

    /// Whether the member is excluded from deserialization.
    pub fn is_skipped(&self) -> bool {
        matches!(self.target, Target::Skipped)
    }
}

/// The members of a struct type, in declaration order.
///
/// ```
/// use facet::Facet;
/// use facet_loose::{BindingKind, TypeDescriptor};
/// use facet_loose as loose;
///
/// #[derive(Facet)]
/// struct Note {
///     #[facet(loose::content)]
///     body: String,
///     #[facet(loose::name = "lang")]
///     language: Option<String>,
/// }
///
/// let descriptor = TypeDescriptor::of::<Note>().unwrap();
/// let body = &descriptor.members()[0];
/// assert_eq!(body.binding(), Some(BindingKind::Content));
/// assert_eq!(descriptor.members()[1].explicit_name(), Some("lang"));
/// ```
#[derive(Debug)]
pub struct TypeDescriptor {
    type_name: String,
    members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    /// The cached descriptor for `T`.
    ///
    /// # Errors
    ///
    /// Fails if `T` is not a struct, has a member type that cannot be
    /// populated, or declares conflicting overrides.
    pub fn of<T: Facet<'static>>() -> Result<Arc<TypeDescriptor>, DeserializeError> {
        describe(T::SHAPE)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// The member with this declared or field name.
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members
            .iter()
            .find(|m| m.name() == name || m.field_name() == name)
    }

    /// The member bound to the element's own text, if any.
    pub fn content_member(&self) -> Option<&MemberDescriptor> {
        self.members
            .iter()
            .find(|m| m.binding == Some(BindingKind::Content))
    }

    fn derive(shape: &'static Shape) -> Result<Self, DeserializeError> {
        let type_name = shape.to_string();
        let Type::User(UserType::Struct(struct_type)) = &shape.ty else {
            return Err(DeserializeError::Unsupported {
                path: type_name.clone(),
                type_name,
            });
        };

        let mut members = Vec::with_capacity(struct_type.fields.len());
        for (index, field) in struct_type.fields.iter().enumerate() {
            members.push(describe_member(&type_name, index, field)?);
        }

        let content: Vec<_> = members
            .iter()
            .filter(|m| m.binding == Some(BindingKind::Content))
            .map(|m| m.field.name)
            .collect();
        if content.len() > 1 {
            return Err(SchemaConflict {
                type_name,
                members: content,
                reason: "more than one member is bound to the element's content",
            }
            .into());
        }

        trace!(type_name = %type_name, members = members.len(), "derived type descriptor");
        Ok(Self { type_name, members })
    }
}

fn describe_member(
    type_name: &str,
    index: usize,
    field: &'static Field,
) -> Result<MemberDescriptor, DeserializeError> {
    let conflict = |reason| SchemaConflict {
        type_name: type_name.to_string(),
        members: vec![field.name],
        reason,
    };

    let kinds = [
        ("element", BindingKind::Element),
        ("attribute", BindingKind::Attribute),
        ("content", BindingKind::Content),
    ];
    let mut declared = kinds
        .iter()
        .filter(|(key, _)| field.has_attr(Some("loose"), key))
        .map(|(_, kind)| *kind);
    let binding = declared.next();
    if declared.next().is_some() {
        return Err(conflict("member has more than one binding override").into());
    }

    let explicit_name = field
        .get_attr(Some("loose"), "name")
        .and_then(|attr| attr.get_as::<&str>().copied());

    let target = if field.should_skip_deserializing() {
        Target::Skipped
    } else {
        let shape = field.shape();
        Target::of(shape).ok_or_else(|| DeserializeError::Unsupported {
            path: format!("{type_name}.{}", field.name),
            type_name: shape.to_string(),
        })?
    };

    if matches!(binding, Some(BindingKind::Attribute | BindingKind::Content))
        && !target.is_text_valued()
        && !matches!(target, Target::Skipped)
    {
        return Err(conflict("attribute and content bindings need a text-valued member").into());
    }

    Ok(MemberDescriptor {
        index,
        field,
        explicit_name,
        binding,
        target,
    })
}

static REGISTRY: LazyLock<RwLock<HashMap<usize, Arc<TypeDescriptor>>>> =
    LazyLock::new(Default::default);

/// Look up, or derive and cache, the descriptor for a struct shape.
///
/// Two threads may derive the same descriptor concurrently; the first one
/// stored wins and both results are identical.
pub(crate) fn describe(shape: &'static Shape) -> Result<Arc<TypeDescriptor>, DeserializeError> {
    let key = std::ptr::from_ref(shape) as usize;
    if let Some(found) = REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return Ok(Arc::clone(found));
    }

    let descriptor = Arc::new(TypeDescriptor::derive(shape)?);
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    Ok(Arc::clone(registry.entry(key).or_insert(descriptor)))
}
