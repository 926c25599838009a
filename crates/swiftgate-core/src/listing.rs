//! Shared pagination and delimiter grouping for the listing operations.
//!
//! Both ListParts and ListMultipartUploads page the same way: entries are
//! already sorted and marker-filtered, the page holds at most `limit` items,
//! and truncation is detected by looking one entry past the limit instead of
//! issuing a second listing.

use std::collections::BTreeSet;

use swiftgate_model::types::CommonPrefix;

/// One page of grouped listing results.
#[derive(Debug, Clone)]
pub struct GroupedPage<T> {
    /// Entries on this page, in input order.
    pub items: Vec<T>,
    /// Key groups rolled up under the delimiter, deduplicated and sorted.
    pub common_prefixes: Vec<CommonPrefix>,
    /// Whether entries remain past this page.
    pub is_truncated: bool,
}

/// Paginate sorted, marker-filtered entries and roll up delimiter groups.
///
/// `entries` pairs each candidate key with its payload. Keys that equal the
/// prefix exactly (nothing left after prefix removal) are dropped. With a
/// delimiter, a key whose post-prefix remainder contains the delimiter
/// contributes a common prefix instead of an item; each distinct common
/// prefix counts once against `limit`.
#[must_use]
pub fn paginate<T>(
    entries: Vec<(String, T)>,
    prefix: &str,
    delimiter: Option<&str>,
    limit: usize,
) -> GroupedPage<T> {
    let mut items = Vec::new();
    let mut prefixes: BTreeSet<String> = BTreeSet::new();
    let mut is_truncated = false;

    for (key, payload) in entries {
        let Some(remainder) = key.strip_prefix(prefix) else {
            continue;
        };
        if remainder.is_empty() {
            continue;
        }

        if let Some(delim) = delimiter
            && !delim.is_empty()
            && let Some(pos) = remainder.find(delim)
        {
            let group = format!("{prefix}{}{delim}", &remainder[..pos]);
            if prefixes.contains(&group) {
                continue;
            }
            if items.len() + prefixes.len() >= limit {
                is_truncated = true;
                break;
            }
            prefixes.insert(group);
            continue;
        }

        if items.len() + prefixes.len() >= limit {
            is_truncated = true;
            break;
        }
        items.push(payload);
    }

    GroupedPage {
        items,
        common_prefixes: prefixes
            .into_iter()
            .map(|p| CommonPrefix { prefix: Some(p) })
            .collect(),
        is_truncated,
    }
}
