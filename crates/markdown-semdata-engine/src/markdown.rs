//! # Markdown Integration
//!
//! Runs a [`SemanticDataProcessor`] over a `pulldown-cmark` document.
//!
//! ## Inline runs
//!
//! Consecutive inline events (text, breaks, emphasis, links, code spans) are
//! buffered into a run. The recognizer sees the run's *source* text, so an
//! occurrence may wrap across a soft break or hold inline markup such as
//! `*emphasis*` in its content. Container prefixes on continuation lines
//! (`> `, list indentation) are blanked out before matching.
//!
//! ## Splicing
//!
//! Events lying inside an accepted occurrence are dropped and the built
//! element is emitted once as inline HTML. Text events straddling an
//! occurrence edge are cut at the edge.
//!
//! ## Raw zones
//!
//! Code blocks pass through untouched. Within a run, an occurrence is
//! rejected if it overlaps a code span, math, or an image, if it cuts an
//! inline container in half, or if either delimiter is not in plain text
//! (e.g. inside a link destination).

use std::ops::Range;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::{
    error::Result,
    semantic::{Replacement, SemanticDataProcessor},
    span::Span,
};

type Spanned<'a> = (Event<'a>, Range<usize>);

/// Rewrites a document's events, given with their source ranges.
///
/// `source` must be the text the events were parsed from.
pub fn rewrite_events<'a, I>(
    source: &str,
    events: I,
    processor: &SemanticDataProcessor,
) -> Result<Vec<Event<'a>>>
where
    I: IntoIterator<Item = Spanned<'a>>,
{
    let mut out = vec![];
    let mut run: Vec<Spanned<'a>> = vec![];
    let mut raw_depth = 0usize;

    for (event, range) in events {
        if raw_depth == 0 && is_inline(&event) {
            run.push((event, range));
            continue;
        }
        flush_run(source, std::mem::take(&mut run), processor, &mut out)?;

        match &event {
            Event::Start(Tag::CodeBlock(_) | Tag::MetadataBlock(_)) => raw_depth += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::MetadataBlock(_)) => {
                raw_depth = raw_depth.saturating_sub(1)
            }
            _ => {}
        }
        out.push(event);
    }
    flush_run(source, run, processor, &mut out)?;

    Ok(out)
}

fn is_inline(event: &Event<'_>) -> bool {
    match event {
        Event::Text(_)
        | Event::Code(_)
        | Event::InlineMath(_)
        | Event::DisplayMath(_)
        | Event::InlineHtml(_)
        | Event::SoftBreak
        | Event::HardBreak
        | Event::FootnoteReference(_) => true,
        Event::Start(tag) => matches!(
            tag,
            Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
        ),
        Event::End(end) => matches!(
            end,
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
        ),
        _ => false,
    }
}

fn flush_run<'a>(
    source: &str,
    run: Vec<Spanned<'a>>,
    processor: &SemanticDataProcessor,
    out: &mut Vec<Event<'a>>,
) -> Result<()> {
    let (Some(start), Some(end)) = (
        run.iter().map(|(_, r)| r.start).min(),
        run.iter().map(|(_, r)| r.end).max(),
    ) else {
        return Ok(());
    };

    let text = run_text(source, start..end, &run);
    let mut replacements = vec![];
    for raw in processor.pattern().find_iter(&text, start) {
        if fits(raw.span, &run) {
            replacements.push(processor.build(&raw)?);
        } else {
            log::trace!("semantic data at {} crosses a raw zone, left as text", raw.span);
        }
    }

    if replacements.is_empty() {
        out.extend(run.into_iter().map(|(event, _)| event));
    } else {
        splice(source, run, &replacements, out);
    }
    Ok(())
}

/// The source text of a run, with continuation-line container prefixes
/// replaced by spaces so byte offsets still line up with `source`.
fn run_text(source: &str, range: Range<usize>, run: &[Spanned<'_>]) -> String {
    let mut starts: Vec<usize> = run
        .iter()
        .filter(|(e, _)| !matches!(e, Event::End(_)))
        .map(|(_, r)| r.start)
        .collect();
    starts.sort_unstable();

    let mut gaps: Vec<Range<usize>> = run
        .iter()
        .filter(|(e, _)| matches!(e, Event::SoftBreak | Event::HardBreak))
        .filter_map(|(_, r)| {
            let next = starts.iter().copied().find(|&s| s >= r.end)?;
            (next > r.end).then_some(r.end..next)
        })
        .collect();
    gaps.sort_by_key(|g| g.start);

    let mut text = String::with_capacity(range.len());
    let mut cursor = range.start;
    for gap in gaps {
        if gap.start < cursor {
            continue;
        }
        text.push_str(&source[cursor..gap.start]);
        text.extend(std::iter::repeat_n(' ', gap.len()));
        cursor = gap.end;
    }
    text.push_str(&source[cursor..range.end]);
    text
}

fn overlaps(span: Span, r: &Range<usize>) -> bool {
    r.start < span.end && span.start < r.end
}

fn contains(span: Span, r: &Range<usize>) -> bool {
    span.start <= r.start && r.end <= span.end
}

/// Whether an occurrence can replace the events it covers without breaking
/// the surrounding structure or reaching into a raw zone.
fn fits(span: Span, run: &[Spanned<'_>]) -> bool {
    let in_text = |pos: usize| {
        run.iter()
            .any(|(e, r)| matches!(e, Event::Text(_)) && r.contains(&pos))
    };
    if span.is_empty() || !in_text(span.start) || !in_text(span.end - 1) {
        return false;
    }

    run.iter().all(|(event, r)| {
        if !overlaps(span, r) {
            return true;
        }
        match event {
            Event::Text(_) => true,
            Event::Code(_) | Event::InlineMath(_) | Event::DisplayMath(_) => false,
            Event::Start(Tag::Image { .. }) | Event::End(TagEnd::Image) => false,
            // Either swallowed whole or the occurrence sits inside it
            Event::Start(_) | Event::End(_) => {
                contains(span, r) || (r.start <= span.start && span.end <= r.end)
            }
            _ => contains(span, r),
        }
    })
}

fn splice<'a>(
    source: &str,
    run: Vec<Spanned<'a>>,
    replacements: &[Replacement],
    out: &mut Vec<Event<'a>>,
) {
    let mut emitted = vec![false; replacements.len()];
    let mut emit = |i: usize, out: &mut Vec<Event<'a>>| {
        if !emitted[i] {
            emitted[i] = true;
            out.push(Event::InlineHtml(CowStr::from(
                replacements[i].element.to_html(),
            )));
        }
    };

    for (event, r) in run {
        // End events share their Start's range; they sit at its far edge
        let pos = if matches!(event, Event::End(_)) {
            r.end
        } else {
            r.start
        };
        for (i, rep) in replacements.iter().enumerate() {
            if rep.span.end <= pos {
                emit(i, out);
            }
        }

        if let Some(i) = replacements.iter().position(|rep| contains(rep.span, &r)) {
            emit(i, out);
            continue;
        }

        match event {
            Event::Text(text) => {
                let cuts: Vec<usize> = (0..replacements.len())
                    .filter(|&i| overlaps(replacements[i].span, &r))
                    .collect();
                if cuts.is_empty() {
                    out.push(Event::Text(text));
                    continue;
                }
                let mut cursor = r.start;
                for i in cuts {
                    let span = replacements[i].span;
                    if span.start > cursor {
                        out.push(Event::Text(CowStr::from(
                            source[cursor..span.start].to_string(),
                        )));
                    }
                    emit(i, out);
                    cursor = cursor.max(span.end);
                }
                if cursor < r.end {
                    out.push(Event::Text(CowStr::from(source[cursor..r.end].to_string())));
                }
            }
            event => out.push(event),
        }
    }

    for i in 0..replacements.len() {
        emit(i, out);
    }
}

/// Renders `markdown` to HTML with occurrences rewritten.
pub fn to_html(markdown: &str, processor: &SemanticDataProcessor) -> Result<String> {
    to_html_with_options(markdown, Options::empty(), processor)
}

/// As [`to_html`], with explicit parser extensions.
pub fn to_html_with_options(
    markdown: &str,
    options: Options,
    processor: &SemanticDataProcessor,
) -> Result<String> {
    let parser = Parser::new_ext(markdown, options).into_offset_iter();
    let events = rewrite_events(markdown, parser, processor)?;

    let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::push_html(&mut out, events.into_iter());
    Ok(out)
}
