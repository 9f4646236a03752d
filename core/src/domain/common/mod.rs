/// Turns a field name such as `order_by` or `first-name` into a display label
/// (`Order By`, `First Name`).
/// A letter is uppercased when it follows a non-letter (`field2name` gives
/// `Field2Name`) and lowercased otherwise.
pub fn humanize(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut after_letter = false;
    for c in name.chars() {
        let c = if matches!(c, '-' | '_') { ' ' } else { c };
        if c.is_alphabetic() {
            if after_letter {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            label.push(c);
            after_letter = false;
        }
    }
    label
}

/// Escapes text for use in HTML element content and double-quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_replaces_separators() {
        assert_eq!(humanize("order_by"), "Order By");
        assert_eq!(humanize("first-name"), "First Name");
        assert_eq!(humanize("name"), "Name");
    }

    #[test]
    fn test_humanize_title_cases_every_word() {
        assert_eq!(humanize("USER_email"), "User Email");
        assert_eq!(humanize("a__b"), "A  B");
    }

    #[test]
    fn test_humanize_starts_words_after_any_non_letter() {
        assert_eq!(humanize("field2name"), "Field2Name");
        assert_eq!(humanize("e.mail"), "E.Mail");
        assert_eq!(humanize("2fa_code"), "2Fa Code");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
