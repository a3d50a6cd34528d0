//! Attribute-name normalisation for snake_case submissions.
//!
//! Clients may submit `user_name` for a property declared as `userName`. The
//! normalised form capitalises each underscore-separated word, joins the
//! words, then lower-cases the result so it can be compared against a
//! lower-cased canonical property name.

/// Normalises a submitted attribute key for case-insensitive matching.
///
/// Each underscore-separated word has its first ASCII character
/// upper-cased, the words are concatenated without separators, and the
/// whole result is lower-cased (ASCII only).
///
/// # Examples
///
/// ```
/// use jsonapi_assertion::normalise_attribute_name;
///
/// assert_eq!(normalise_attribute_name("user_name"), "username");
/// assert_eq!(normalise_attribute_name("userName"), "username");
/// assert_eq!(normalise_attribute_name("__created_at_"), "createdat");
/// ```
#[must_use]
pub fn normalise_attribute_name(key: &str) -> String {
    let pascal: String = key.split('_').map(capitalise_first).collect();
    pascal.to_ascii_lowercase()
}

/// Upper-cases the first character of `word` if it is ASCII.
fn capitalise_first(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        let mut capitalised = String::with_capacity(word.len());
        capitalised.push(first.to_ascii_uppercase());
        capitalised.push_str(chars.as_str());
        capitalised
    })
}
