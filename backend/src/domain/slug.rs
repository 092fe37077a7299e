//! Slug derivation shared by projects and templates.
//!
//! A slug is the lower-cased input with every maximal run of characters
//! outside `[a-z0-9]` collapsed to a single hyphen, with no leading or
//! trailing hyphen.

/// Sanitise free text into a slug.
///
/// Returns an empty string when the input holds no ASCII alphanumerics.
///
/// # Examples
/// ```
/// use showcase::domain::slugify;
///
/// assert_eq!(slugify("My Token!!"), "my-token");
/// assert_eq!(slugify("  --Hello,   World--  "), "hello-world");
/// ```
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Slug with a creation-time uniqueness suffix, as used for projects.
///
/// # Examples
/// ```
/// use showcase::domain::suffixed_slug;
///
/// assert_eq!(suffixed_slug("My Token!!", 1_700_000_000_000), "my-token-1700000000000");
/// ```
pub fn suffixed_slug(input: &str, epoch_millis: i64) -> String {
    let base = slugify(input);
    if base.is_empty() {
        epoch_millis.to_string()
    } else {
        format!("{base}-{epoch_millis}")
    }
}

/// Return `true` when `value` is a well-formed slug.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("My Token!!", "my-token")]
    #[case("ERC-20 Vault", "erc-20-vault")]
    #[case("a   b", "a-b")]
    #[case("!!!", "")]
    #[case("Crème brûlée", "cr-me-br-l-e")]
    #[case("already-a-slug", "already-a-slug")]
    fn slugify_collapses_runs(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[rstest]
    fn slugify_output_is_always_valid_or_empty() {
        for input in ["My Token!!", "--x--", " 1 2 3 ", "Hello, World"] {
            let slug = slugify(input);
            assert!(slug.is_empty() || is_valid_slug(&slug), "{input} -> {slug}");
        }
    }

    #[rstest]
    fn suffixed_slug_appends_millis() {
        assert_eq!(
            suffixed_slug("My Token!!", 1_700_000_000_000),
            "my-token-1700000000000"
        );
    }

    #[rstest]
    fn suffixed_slug_of_symbols_is_just_the_suffix() {
        assert_eq!(suffixed_slug("???", 42), "42");
    }

    #[rstest]
    #[case("abc", true)]
    #[case("a-b", true)]
    #[case("-ab", false)]
    #[case("ab-", false)]
    #[case("a--b", false)]
    #[case("A", false)]
    #[case("", false)]
    fn validates_slugs(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }
}
