//! Minimal tag extraction for the two places mason reads XML-shaped
//! text: existing `pom.xml` descriptors and `maven-metadata.xml`
//! responses. Deliberately not an XML parser — the descriptor contract
//! is "read a flat property bag", nothing more.

/// Content of the first `<name>...</name>` pair, trimmed.
pub(crate) fn first_tag<'a>(xml: &'a str, name: &str) -> Option<&'a str> {
    let open = format!("<{name}>");
    let close = format!("</{name}>");
    let start = xml.find(&open)? + open.len();
    let end = xml[start..].find(&close)? + start;
    Some(xml[start..end].trim())
}

/// Content of every `<name>...</name>` pair, in document order.
pub(crate) fn all_tags<'a>(xml: &'a str, name: &str) -> Vec<&'a str> {
    let open = format!("<{name}>");
    let close = format!("</{name}>");
    let mut found = Vec::new();
    let mut rest = xml;
    while let Some(start) = rest.find(&open) {
        let content_start = start + open.len();
        let Some(end) = rest[content_start..].find(&close) else {
            break;
        };
        found.push(rest[content_start..content_start + end].trim());
        rest = &rest[content_start + end + close.len()..];
    }
    found
}

/// The document with the first `<name>...</name>` block removed.
pub(crate) fn strip_block(xml: &str, name: &str) -> String {
    let open = format!("<{name}>");
    let close = format!("</{name}>");
    match (xml.find(&open), xml.find(&close)) {
        (Some(start), Some(end)) if end > start => {
            let mut stripped = String::with_capacity(xml.len());
            stripped.push_str(&xml[..start]);
            stripped.push_str(&xml[end + close.len()..]);
            stripped
        }
        _ => xml.to_string(),
    }
}
