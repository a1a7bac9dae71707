use std::collections::HashSet;

use crate::models::TocEntry;

/// Scan article HTML for h2–h4 headings and derive table-of-contents
/// anchors. Ids are slugs of the heading text; duplicates get a numeric
/// suffix so anchors stay stable and unique within one article.
pub fn extract_toc(html: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut pos = 0;

    while let Some(offset) = html[pos..].find("<h") {
        let start = pos + offset;
        let after = &html[start + 2..];

        let level = match after.chars().next() {
            Some(c @ '2'..='4') => c as u8 - b'0',
            _ => {
                pos = start + 2;
                continue;
            }
        };

        // Either `<h2>` or `<h2 class="...">`; anything else is not a heading tag.
        let tag_rest = &after[1..];
        if !tag_rest.starts_with('>') && !tag_rest.starts_with(char::is_whitespace) {
            pos = start + 2;
            continue;
        }
        let Some(open_end) = tag_rest.find('>') else {
            break;
        };
        let content_start = start + 3 + open_end + 1;

        let close_tag = format!("</h{level}>");
        let Some(close_rel) = html[content_start..].find(&close_tag) else {
            pos = content_start;
            continue;
        };

        let text = strip_tags(&html[content_start..content_start + close_rel]);
        pos = content_start + close_rel + close_tag.len();

        if text.is_empty() {
            continue;
        }

        // Suffix until the id is free; a heading may slugify to an id an
        // earlier suffixed heading already produced.
        let base = slugify(&text);
        let mut id = base.clone();
        let mut n = 1;
        while !seen.insert(id.clone()) {
            n += 1;
            id = format!("{base}-{n}");
        }

        entries.push(TocEntry { id, text, level });
    }

    entries
}

/// Drop inline markup and decode the entities that show up in authored
/// headings, collapsing runs of whitespace.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }

    let decoded = out
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_dash = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}
