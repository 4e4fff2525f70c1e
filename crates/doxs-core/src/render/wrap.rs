//! Line splitting and greedy word wrapping

/// Lines of a text block with trailing whitespace removed and surrounding
/// blank lines dropped. Interior blank lines are kept.
pub fn text_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    lines[start..end].to_vec()
}

fn columns(s: &str) -> usize {
    s.chars().count()
}

/// Fill one logical line. The first output line starts with `initial`, the
/// rest with `subsequent`. A line that already fits, or `width == None`,
/// comes back unchanged apart from surrounding whitespace. Words longer than
/// the width are never split.
pub fn fill(text: &str, initial: &str, subsequent: &str, width: Option<usize>) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return vec![String::new()];
    }

    let width = match width {
        Some(width) if columns(initial) + columns(text) > width => width,
        _ => return vec![format!("{}{}", initial, text)],
    };

    let mut lines = Vec::new();
    let mut current = initial.to_string();
    let mut has_word = false;

    for word in text.split_whitespace() {
        if has_word && columns(&current) + 1 + columns(word) > width {
            lines.push(std::mem::replace(&mut current, subsequent.to_string()));
            has_word = false;
        }
        if has_word {
            current.push(' ');
        }
        current.push_str(word);
        has_word = true;
    }
    lines.push(current);
    lines
}

/// Wrap every line of a prose block, keeping each line's own indentation
/// for its continuation lines
pub fn wrap_block(text: &str, prefix: &str, width: Option<usize>) -> Vec<String> {
    let mut out = Vec::new();
    for line in text_lines(text) {
        if line.is_empty() {
            out.push(String::new());
            continue;
        }
        let leading = &line[..line.len() - line.trim_start().len()];
        let indent = format!("{}{}", prefix, leading);
        out.extend(fill(line, &indent, &indent, width));
    }
    out
}
