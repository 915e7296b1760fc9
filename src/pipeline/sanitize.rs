/// Turns an arbitrary name fragment into something usable inside a C identifier.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, and a leading digit gets an
/// `_` prepended.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_replaces_invalid_characters() {
        assert_eq!(sanitize_identifier("Main-BG"), "Main_BG");
        assert_eq!(sanitize_identifier("a b.c"), "a_b_c");
        assert_eq!(sanitize_identifier("Agumon"), "Agumon");
        assert_eq!(sanitize_identifier("Ümlaut"), "_mlaut");
    }

    #[test]
    fn test_leading_digit() {
        assert_eq!(sanitize_identifier("1up"), "_1up");
        assert_eq!(sanitize_identifier("_1up"), "_1up");
        assert_eq!(sanitize_identifier("-1"), "_1");
    }

    #[test]
    fn test_empty() {
        assert_eq!(sanitize_identifier(""), "");
    }

    quickcheck! {
        fn sanitize_is_idempotent(name: String) -> bool {
            let once = sanitize_identifier(&name);
            sanitize_identifier(&once) == once
        }

        fn sanitize_output_is_identifier_safe(name: String) -> bool {
            let out = sanitize_identifier(&name);
            out.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !out.starts_with(|c: char| c.is_ascii_digit())
        }

        fn leading_digit_gets_underscore(digit: u8, rest: String) -> bool {
            let name = format!("{}{}", digit % 10, rest);
            sanitize_identifier(&name).starts_with('_')
        }
    }
}
