//! Escaping of the characters LaTeX reserves inside table cells.
//!
//! Only `%` (comment) and `&` (column separator) are escaped. Every user-supplied string that
//! reaches the document goes through here: item fields, group headings and report titles.

use std::borrow::Cow;

const SPECIALS: [(char, &str); 2] = [('%', r"\%"), ('&', r"\&")];

/// Escapes one value. Borrows when there is nothing to replace.
pub fn escape_specials(value: &str) -> Cow<'_, str> {
    if !value.contains(|c: char| SPECIALS.iter().any(|(special, _)| *special == c)) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match SPECIALS.iter().find(|(special, _)| *special == c) {
            Some((_, replacement)) => escaped.push_str(replacement),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Escapes several values with the same rule as [`escape_specials`].
pub fn escape_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|v| escape_specials(v.as_ref()).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_is_borrowed() {
        assert!(matches!(escape_specials("paper towels"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_ampersand_and_percent_escaped() {
        assert_eq!(escape_specials("dairy & eggs"), r"dairy \& eggs");
        assert_eq!(escape_specials("2% milk"), r"2\% milk");
        assert_eq!(escape_specials("%&%"), r"\%\&\%");
    }

    #[test]
    fn test_other_specials_untouched() {
        assert_eq!(escape_specials("$5 #1 _x_"), "$5 #1 _x_");
    }

    #[test]
    fn test_escape_all_matches_single() {
        let values = ["fruits & vegetables", "1%", "rice"];
        let escaped = escape_all(&values);
        assert_eq!(escaped.len(), 3);
        for (value, out) in values.iter().zip(&escaped) {
            assert_eq!(out, &escape_specials(value));
        }
    }

    #[test]
    fn test_no_raw_specials_survive() {
        for value in ["a&b", "100%", "&&", "%", "a & b % c"] {
            let out = escape_specials(value);
            let bytes = out.as_bytes();
            for (i, b) in bytes.iter().enumerate() {
                if *b == b'%' || *b == b'&' {
                    assert!(i > 0 && bytes[i - 1] == b'\\', "raw special in {out}");
                }
            }
        }
    }
}
