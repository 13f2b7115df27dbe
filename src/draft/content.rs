/// Serializations the editor surface produces for a document with no content.
///
/// Matching is exact: a paragraph holding only whitespace is still content.
/// `<p></p>` is the editor's own canonical form; the `<br>` variants are what
/// `contenteditable` leaves behind after the user deletes everything.
pub(crate) const EMPTY_DOCUMENT_FORMS: &[&str] = &["", "<p></p>", "<br>", "<p><br></p>", "<p><br/></p>"];

/// True when `body` is absent or is one of the structurally empty documents.
///
/// Guards every AI call and submission.
pub(crate) fn is_empty_body(body: Option<&str>) -> bool {
    match body {
        None => true,
        Some(b) => EMPTY_DOCUMENT_FORMS.contains(&b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_body_is_empty() {
        assert!(is_empty_body(None));
    }

    #[test]
    fn test_canonical_marker_is_empty() {
        assert!(is_empty_body(Some("<p></p>")));
        assert!(is_empty_body(Some("")));
        assert!(is_empty_body(Some("<p><br></p>")));
    }

    #[test]
    fn test_text_is_content() {
        assert!(!is_empty_body(Some("<p>hello</p>")));
    }

    #[test]
    fn test_whitespace_inside_markup_is_content() {
        // Only exact structural emptiness counts; markup is not stripped.
        assert!(!is_empty_body(Some("<p> </p>")));
        assert!(!is_empty_body(Some("<p></p><p></p>")));
        assert!(!is_empty_body(Some(" <p></p>")));
    }
}
