//! Resolving text to a unit enum variant.

use facet_core::{EnumType, StructKind, Variant};

use crate::naming::{MatchTier, match_tier, spellings};

/// Whether every variant of the enum carries no data.
pub(crate) fn is_unit_only(enum_type: &EnumType) -> bool {
    enum_type
        .variants
        .iter()
        .all(|v| v.data.kind == StructKind::Unit)
}

/// Find the variant named by `text`.
///
/// Names are tried exactly, then ignoring case, then in the variant's
/// snake/kebab/camel/Pascal/SCREAMING spellings, then ignoring separators.
/// If no name matches, integer text selects the variant with that
/// discriminant (or, without explicit discriminants, that position).
pub(crate) fn variant_index(enum_type: &EnumType, text: &str) -> Option<usize> {
    let text = text.trim();
    let variants = enum_type.variants;

    let by_tier = |tier: MatchTier| {
        variants.iter().position(|v| {
            names(v).any(|name| match_tier(text, name).is_some_and(|t| t <= tier))
        })
    };

    by_tier(MatchTier::Exact)
        .or_else(|| by_tier(MatchTier::CaseInsensitive))
        .or_else(|| {
            variants.iter().position(|v| {
                spellings(v.name)
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(text))
            })
        })
        .or_else(|| by_tier(MatchTier::Normalized))
        .or_else(|| by_discriminant(variants, text))
}

fn names(variant: &Variant) -> impl Iterator<Item = &'static str> {
    let name = variant.name;
    let effective = variant.effective_name();
    std::iter::once(effective).chain((effective != name).then_some(name))
}

fn by_discriminant(variants: &[Variant], text: &str) -> Option<usize> {
    let value = text.parse::<i64>().ok()?;
    variants
        .iter()
        .enumerate()
        .position(|(idx, v)| v.discriminant.unwrap_or(idx as i64) == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet::Facet;
    use facet_core::{Type, UserType};
    use facet_testhelpers::test;

    #[derive(Facet)]
    #[repr(u8)]
    #[allow(dead_code)]
    enum Disposition {
        Friendly,
        SoSo,
        SteerClear,
        #[facet(rename = "meh")]
        Indifferent,
    }

    #[derive(Facet)]
    #[repr(u8)]
    #[allow(dead_code)]
    enum Level {
        Low = 10,
        High = 20,
    }

    fn enum_type<T: Facet<'static>>() -> &'static EnumType {
        match &T::SHAPE.ty {
            Type::User(UserType::Enum(e)) => e,
            _ => panic!("not an enum"),
        }
    }

    #[test]
    fn test_variant_names() {
        let e = enum_type::<Disposition>();
        assert!(is_unit_only(e));
        assert_eq!(variant_index(e, "Friendly"), Some(0));
        assert_eq!(variant_index(e, "friendly"), Some(0));
        assert_eq!(variant_index(e, "SOSO"), Some(1));
        assert_eq!(variant_index(e, "so_so"), Some(1));
        assert_eq!(variant_index(e, "so-so"), Some(1));
        assert_eq!(variant_index(e, "STEER_CLEAR"), Some(2));
        assert_eq!(variant_index(e, "steerClear"), Some(2));
        assert_eq!(variant_index(e, "meh"), Some(3));
        assert_eq!(variant_index(e, "Indifferent"), Some(3));
        assert_eq!(variant_index(e, "steer clear"), None);
    }

    #[test]
    fn test_integer_fallback() {
        let e = enum_type::<Disposition>();
        assert_eq!(variant_index(e, "2"), Some(2));
        assert_eq!(variant_index(e, "9"), None);

        let e = enum_type::<Level>();
        assert_eq!(variant_index(e, "20"), Some(1));
        assert_eq!(variant_index(e, "1"), None);
    }
}
