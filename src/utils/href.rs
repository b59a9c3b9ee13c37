// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Whether `href` can be used without a base: it has a URL scheme or is an
/// absolute filesystem path.
pub fn is_absolute_href(href: &str) -> bool {
    href.starts_with('/') || href.contains("://")
}

/// Resolve `href` against the location of the document at `base`.
///
/// `base` names a file, so relative hrefs resolve against its parent. `.` and
/// `..` segments of the relative part are collapsed.
///
/// ```
/// use stac_task::utils::make_absolute_href;
///
/// assert_eq!(
///     make_absolute_href("item.json", Some("s3://bucket/payloads/input.json")),
///     "s3://bucket/payloads/item.json"
/// );
/// assert_eq!(
///     make_absolute_href("../items/a.json", Some("/data/payloads/input.json")),
///     "/data/items/a.json"
/// );
/// assert_eq!(make_absolute_href("a.json", None), "a.json");
/// ```
pub fn make_absolute_href(href: &str, base: Option<&str>) -> String {
    let base = match base {
        Some(base) if !is_absolute_href(href) => base,
        _ => return href.to_string(),
    };

    let (root, base_path) = match base.find("://") {
        Some(index) => {
            let after_scheme = index + 3;
            match base[after_scheme..].find('/') {
                Some(slash) => base.split_at(after_scheme + slash),
                None => (base, ""),
            }
        }
        None => ("", base),
    };

    let mut segments: Vec<&str> = base_path.split('/').collect();
    // drop the file name
    segments.pop();

    for segment in href.split('/') {
        match segment {
            "." | "" => {}
            ".." => {
                if segments.len() > 1 || segments.first().is_some_and(|s| !s.is_empty()) {
                    segments.pop();
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if root.is_empty() && !base_path.starts_with('/') {
        joined.trim_start_matches('/').to_string()
    } else if joined.starts_with('/') {
        format!("{}{}", root, joined)
    } else {
        format!("{}/{}", root, joined)
    }
}
