/// Greedy word wrap.
///
/// Words (runs of non-whitespace) are appended to the current line separated by one space.
/// When the candidate line measures wider than `max_width` and the current line already
/// holds a word, the current line is committed and the word starts the next one. A word
/// wider than `max_width` is never split; it becomes its own overflowing line.
///
/// `measure` returns the pixel width of a candidate line under the active font.
pub fn wrap_words<F>(text: &str, max_width: f32, mut measure: F) -> Vec<String>
where
    F: FnMut(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
