//! Markdown input.
//!
//! Code identifiers, URLs and markup are missing from any word-frequency
//! corpus, so grading them as prose would count every one as a rare word.
//! [`strip_to_prose`] keeps only the text a reader would read as sentences.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Reduce markdown to the prose a reader sees.
///
/// Code (fenced, indented and inline), headings, tables, images, raw HTML
/// and a leading `---` frontmatter block are dropped. Link text, emphasis
/// and blockquotes stay. Paragraphs, list items and line breaks are joined
/// with a space so neighbouring words never fuse.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let body = strip_frontmatter(text);
    let mut prose = String::with_capacity(body.len() / 2);
    // Depth of dropped containers we are inside.
    let mut hidden: usize = 0;

    for event in Parser::new_ext(body, Options::ENABLE_TABLES) {
        match event {
            Event::Start(
                Tag::CodeBlock(_) | Tag::Heading { .. } | Tag::Table(_) | Tag::Image { .. },
            ) => hidden += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Heading(_) | TagEnd::Table | TagEnd::Image) => {
                hidden = hidden.saturating_sub(1);
            }
            Event::Text(t) if hidden == 0 => prose.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Item)
                if hidden == 0 =>
            {
                prose.push(' ');
            }
            _ => {}
        }
    }

    prose
}

/// The text after a leading `---` ... `---` block, or all of it.
fn strip_frontmatter(text: &str) -> &str {
    let Some(block) = text.trim_start().strip_prefix("---") else {
        return text;
    };
    match block.find("\n---") {
        Some(end) => {
            let rest = &block[end + "\n---".len()..];
            rest.strip_prefix('\n').unwrap_or(rest)
        }
        None => text,
    }
}
