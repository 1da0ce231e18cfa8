//! MDX escaping of prose regions.
//!
//! MDX treats `{`/`}` as JSX expressions and `<`/`>` as JSX tags. Markdown
//! written for plain renderers uses them freely in prose, so they are escaped
//! everywhere except fenced code blocks and inline code spans.

use crate::fence::FenceTracker;

/// Escape MDX-significant characters outside code regions.
///
/// Rules, applied only to prose:
/// - `{` becomes `\{` and `}` becomes `\}`
/// - `<` is kept when followed by an ASCII letter, `/` or `!` (a tag or
///   comment opener), otherwise it becomes `&lt;`
/// - `>` is kept at the start of a line (blockquote) or after an ASCII
///   letter, digit, `"`, `'`, `/` or `-` (a tag closer or arrow), otherwise
///   it becomes `&gt;`
///
/// Fence lines and fenced content are copied verbatim. Inline code state is
/// toggled by every backtick and resets on each line. Line breaks are
/// preserved exactly.
///
/// # Example
///
/// ```
/// use swarmdoc_pages::escape_mdx;
///
/// assert_eq!(escape_mdx("a {b} `{c}` < d"), "a \\{b\\} `{c}` &lt; d");
/// ```
#[must_use]
pub fn escape_mdx(content: &str) -> String {
    let mut fence = FenceTracker::new();
    let mut result = String::with_capacity(content.len());

    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            result.push('\n');
        }
        if fence.update(line) || fence.in_fence() {
            result.push_str(line);
            continue;
        }
        escape_line(line, &mut result);
    }

    result
}

fn escape_line(line: &str, out: &mut String) {
    let mut in_inline_code = false;
    let mut prev: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '`' => {
                in_inline_code = !in_inline_code;
                out.push(ch);
            }
            _ if in_inline_code => out.push(ch),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '<' => {
                if chars.peek().is_some_and(|&next| opens_tag(next)) {
                    out.push(ch);
                } else {
                    out.push_str("&lt;");
                }
            }
            '>' => match prev {
                Some(p) if !closes_tag(p) => out.push_str("&gt;"),
                _ => out.push(ch),
            },
            _ => out.push(ch),
        }
        prev = Some(ch);
    }
}

fn opens_tag(next: char) -> bool {
    next.is_ascii_alphabetic() || next == '/' || next == '!'
}

fn closes_tag(prev: char) -> bool {
    prev.is_ascii_alphanumeric() || matches!(prev, '"' | '\'' | '/' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escapes_braces_in_prose() {
        assert_eq!(escape_mdx("use {name} here"), "use \\{name\\} here");
    }

    #[test]
    fn test_inline_code_untouched() {
        assert_eq!(
            escape_mdx("call `fn() { x < y }` now"),
            "call `fn() { x < y }` now"
        );
    }

    #[test]
    fn test_inline_code_resets_per_line() {
        assert_eq!(escape_mdx("open ` {a}\n{b}"), "open ` {a}\n\\{b\\}");
    }

    #[test]
    fn test_fenced_block_byte_identical() {
        let input = "before {x}\n```json\n{\"a\": 1}\n<tag> -> x > y\n```\nafter {y}";
        let expected = "before \\{x\\}\n```json\n{\"a\": 1}\n<tag> -> x > y\n```\nafter \\{y\\}";
        assert_eq!(escape_mdx(input), expected);
    }

    #[test]
    fn test_unclosed_fence_keeps_remainder_verbatim() {
        let input = "a {1}\n  ```\n{2}\n<3";
        assert_eq!(escape_mdx(input), "a \\{1\\}\n  ```\n{2}\n<3");
    }

    #[test]
    fn test_less_than() {
        assert_eq!(escape_mdx("<div>"), "<div>");
        assert_eq!(escape_mdx("</div>"), "</div>");
        assert_eq!(escape_mdx("<!-- x -->"), "<!-- x -->");
        assert_eq!(escape_mdx("a < b"), "a &lt; b");
        assert_eq!(escape_mdx("<5 items"), "&lt;5 items");
        assert_eq!(escape_mdx("trailing <"), "trailing &lt;");
    }

    #[test]
    fn test_greater_than() {
        assert_eq!(escape_mdx("> quote"), "> quote");
        assert_eq!(escape_mdx("a -> b"), "a -> b");
        assert_eq!(escape_mdx("<br/>"), "<br/>");
        assert_eq!(escape_mdx("<a href=\"x\">"), "<a href=\"x\">");
        assert_eq!(escape_mdx("x > y"), "x &gt; y");
        assert_eq!(escape_mdx("  > nested"), "  &gt; nested");
        assert_eq!(escape_mdx("5>3"), "5>3");
    }

    #[test]
    fn test_line_structure_preserved() {
        let input = "\n\na\n\n{b}\n";
        let output = escape_mdx(input);
        assert_eq!(output.matches('\n').count(), input.matches('\n').count());
        assert_eq!(output, "\n\na\n\n\\{b\\}\n");
    }

    #[test]
    fn test_non_ascii_prose() {
        assert_eq!(escape_mdx("café {x} → ok"), "café \\{x\\} → ok");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(escape_mdx(""), "");
    }
}
