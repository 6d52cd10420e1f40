// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Text escaping as defined in RFC 5545 Section 3.3.11.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::prelude::*;

use crate::value::miscellaneous::parse_complete;

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// text       = *(TSAFE-CHAR / ":" / DQUOTE / ESCAPED-CHAR)
/// ; Folded according to description above
///
/// ESCAPED-CHAR = ("\\" / "\;" / "\," / "\N" / "\n")
/// ; \\ encodes \, \N or \n encodes newline
/// ; \; encodes ;, \, encodes ,
/// ```
///
/// Unfolding is done before the value reaches this grammar. A backslash
/// followed by anything else is rejected.
pub fn value_text<'src, I, E>() -> impl Parser<'src, I, String, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    let plain = select! { c if c != '\\' => c };

    let escape = just('\\').ignore_then(select! {
        ';' => ';',
        ',' => ',',
        'N' | 'n' => '\n',
        '\\' => '\\',
    });

    choice((plain, escape)).repeated().collect::<String>()
}

/// Resolve escapes in a raw text value.
#[must_use]
pub fn unescape_text(src: &str) -> Option<String> {
    parse_complete(value_text(), src)
}

/// Escape a string for the text format.
#[must_use]
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            ';' => out.push_str(r"\;"),
            ',' => out.push_str(r"\,"),
            '\n' => out.push_str(r"\n"),
            '\r' => {} // CRLF collapses to the escaped LF
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_text() {
        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.11
            (r"Project XYZ Final Review\nConference Room - 3B\nCome Prepared.",
              "Project XYZ Final Review\nConference Room - 3B\nCome Prepared."),
            // extra tests
            (r"Hello\, World\; \N", "Hello, World; \n"),
            (r#""Quoted Text" and more text"#, r#""Quoted Text" and more text"#),
            ("Unicode 字符串 🎉", "Unicode 字符串 🎉"),
            (r"C:\\Path", r"C:\Path"),
            ("", ""),
        ];
        for (src, expected) in success_cases {
            assert_eq!(unescape_text(src).as_deref(), Some(expected), "Failed: {src}");
        }

        for src in [r"bad \x escape", "trailing \\"] {
            assert!(unescape_text(src).is_none(), "Unescape {src} should fail");
        }
    }

    #[test]
    fn escapes_text() {
        let raw = "a, b; c\\d\r\ne";
        let escaped = escape_text(raw);
        assert_eq!(escaped, r"a\, b\; c\\d\ne");
        assert_eq!(unescape_text(&escaped).as_deref(), Some("a, b; c\\d\ne"));
    }
}
