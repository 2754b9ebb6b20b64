//! Word wrapping against a measured width

use crate::metrics::TextMeasure;

/// Wrap a block of text into lines no wider than `max_width`
///
/// Each `\n`-separated logical line is wrapped on its own; blank logical
/// lines are kept. Leading indentation survives on the first wrapped line of
/// a logical line. A word is only split when it cannot fit on a line by
/// itself.
pub fn wrap_text<M>(text: &str, max_width: f64, font_size: f64, measure: &M) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    text.split('\n')
        .flat_map(|line| wrap_line(line, max_width, font_size, measure))
        .collect()
}

fn wrap_line<M>(line: &str, max_width: f64, font_size: f64, measure: &M) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let line = line.trim_end();
    if line.is_empty() {
        return vec![String::new()];
    }
    if measure.width(line, font_size) <= max_width {
        return vec![line.to_string()];
    }

    let body = line.trim_start();
    let mut current = line[..line.len() - body.len()].to_string();
    let mut has_word = false;
    let mut out = Vec::new();

    for word in body.split_whitespace() {
        let candidate = if has_word {
            format!("{} {}", current, word)
        } else {
            format!("{}{}", current, word)
        };
        if measure.width(&candidate, font_size) <= max_width {
            current = candidate;
            has_word = true;
            continue;
        }

        // Close the current line; continuation lines carry no indentation.
        if has_word {
            out.push(std::mem::take(&mut current));
        } else {
            current.clear();
        }

        if measure.width(word, font_size) <= max_width {
            current.push_str(word);
        } else {
            let mut pieces = hard_break(word, max_width, font_size, measure);
            current = pieces.pop().unwrap_or_default();
            out.extend(pieces);
        }
        has_word = true;
    }

    if has_word {
        out.push(current);
    }
    out
}

/// Split an over-wide word into the longest prefixes that fit
///
/// Every piece holds at least one character, so progress is guaranteed even
/// when a single glyph is wider than the line.
fn hard_break<M>(word: &str, max_width: f64, font_size: f64, measure: &M) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        piece.push(c);
        if piece.chars().count() > 1 && measure.width(&piece, font_size) > max_width {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
