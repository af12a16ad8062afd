use crate::asset::ContentType;
use scraper::{Html, Selector};

/// Element categories scanned for references, in the order they are reported.
const REFERENCE_SOURCES: [(&str, &str, ContentType); 4] = [
    ("a[href]", "href", ContentType::Page),
    ("img[src]", "src", ContentType::Image),
    ("script[src]", "src", ContentType::Script),
    ("link[href]", "href", ContentType::Stylesheet),
];

/// A raw reference found in markup, tagged with the context it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub url: String,
    pub content_type: ContentType,
}

/// Extract every anchor, image, script and stylesheet-link reference.
///
/// All anchors come first in document order, then images, scripts and
/// links. Elements without the attribute are skipped.
pub fn extract_references(html: &str) -> Vec<Reference> {
    let document = Html::parse_document(html);
    let mut references = Vec::new();

    for (css, attribute, content_type) in REFERENCE_SOURCES {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };

        references.extend(
            document
                .select(&selector)
                .filter_map(|element| element.value().attr(attribute))
                .map(|url| Reference {
                    url: url.to_string(),
                    content_type,
                }),
        );
    }

    references
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls_of(references: &[Reference], content_type: ContentType) -> Vec<&str> {
        references
            .iter()
            .filter(|r| r.content_type == content_type)
            .map(|r| r.url.as_str())
            .collect()
    }

    #[test]
    fn test_extracts_images() {
        let references = extract_references(
            r#"<html><body>
                <img src="/some/image.jpg" />
                <img src="/some/image2.jpg" />
            </body></html>"#,
        );

        assert_eq!(
            urls_of(&references, ContentType::Image),
            vec!["/some/image.jpg", "/some/image2.jpg"]
        );
        assert_eq!(references.len(), 2);
    }

    #[test]
    fn test_extracts_links() {
        let references = extract_references(
            r#"<html><body>
                <a href="/some/page"></a>
                <a href="/some/page2"></a>
            </body></html>"#,
        );

        assert_eq!(
            urls_of(&references, ContentType::Page),
            vec!["/some/page", "/some/page2"]
        );
    }

    #[test]
    fn test_extracts_scripts() {
        let references = extract_references(
            r#"<html>
                <head><script type="text/javascript" src="/main.js"></script></head>
                <body><script type="text/javascript" src="/src.js"></script></body>
            </html>"#,
        );

        assert_eq!(
            urls_of(&references, ContentType::Script),
            vec!["/main.js", "/src.js"]
        );
    }

    #[test]
    fn test_extracts_stylesheets() {
        let references = extract_references(
            r#"<html><head>
                <link href="/src.css" rel="stylesheet" type="text/css">
                <link href="/src2.css" rel="stylesheet" type="text/css">
            </head></html>"#,
        );

        assert_eq!(
            urls_of(&references, ContentType::Stylesheet),
            vec!["/src.css", "/src2.css"]
        );
    }

    #[test]
    fn test_elements_without_attribute_are_skipped() {
        let references = extract_references(
            r#"<a>no href</a>
            <img alt="no src">
            <script>inline()</script>
            <link rel="preconnect">
            <h1>You spelled it wrong.</h1>"#,
        );

        assert!(references.is_empty());
    }

    #[test]
    fn test_categories_are_reported_in_fixed_order() {
        let references = extract_references(
            r#"<html><head>
                <link href="/style.css" rel="stylesheet">
                <script src="/app.js"></script>
            </head><body>
                <img src="/logo.png">
                <a href="/about">About</a>
            </body></html>"#,
        );

        let order: Vec<ContentType> = references.iter().map(|r| r.content_type).collect();
        assert_eq!(
            order,
            vec![
                ContentType::Page,
                ContentType::Image,
                ContentType::Script,
                ContentType::Stylesheet,
            ]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let references = extract_references(
            r#"<img src="/same.png"><img src="/same.png">"#,
        );
        assert_eq!(references.len(), 2);
    }
}
