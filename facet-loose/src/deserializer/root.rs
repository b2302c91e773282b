//! Locating the element deserialization starts from.

use facet_loose_node::Element;

use crate::error::DeserializeError;
use crate::naming::find_match;

/// Follow `path` from the document root.
///
/// Segments are separated by `.` or `/`. The first segment is searched among
/// the root and all its descendants, each following segment among the
/// descendants of the previous match. Names match leniently; the best match
/// wins, then the first in document order.
pub(crate) fn resolve<'n>(
    document: &'n Element,
    path: Option<&str>,
) -> Result<&'n Element, DeserializeError> {
    let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(document);
    };

    let mut current = document;
    let segments = path.split(['.', '/']).filter(|s| !s.is_empty());
    for (depth, segment) in segments.enumerate() {
        let skip = usize::from(depth > 0);
        let candidates: Vec<&Element> = current.descendants_or_self().skip(skip).collect();
        let idx = find_match(candidates.iter().map(|e| e.tag.as_str()), segment, None).ok_or_else(
            || DeserializeError::RootNotFound {
                path: path.to_string(),
            },
        )?;
        current = candidates[idx];
    }
    Ok(current)
}
