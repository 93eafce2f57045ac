//! Substring scanning within a single line.

/// Byte offsets of every occurrence of `needle` in `line`.
///
/// Each scan restarts one character after the previous match start rather
/// than after the match end, so `"aaa"` yields two hits for `"aa"`.
pub fn scan_line<'a>(line: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    let mut from = 0usize;
    let mut done = needle.is_empty();
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        match line[from..].find(needle) {
            Some(rel) => {
                let at = from + rel;
                let step = line[at..].chars().next().map_or(1, char::len_utf8);
                from = at + step;
                Some(at)
            }
            None => {
                done = true;
                None
            }
        }
    })
}
