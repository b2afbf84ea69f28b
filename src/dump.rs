//! Reads pages from a MediaWiki XML export.
use log::{info, warn};
use roxmltree::{Document, Node};
use std::path::Path;

use crate::{types::Page, Error};

/// The namespace of articles.
const MAIN_NAMESPACE: &str = "0";
const ROOT: &str = "mediawiki";

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|x| x.has_tag_name(name))
}

fn to_page(node: Node) -> Option<Page> {
    if child(node, "ns").and_then(|x| x.text()) != Some(MAIN_NAMESPACE)
        || child(node, "redirect").is_some()
    {
        return None;
    }

    let title = match child(node, "title").and_then(|x| x.text()) {
        Some(title) => title,
        None => {
            warn!("skipping page without title");
            return None;
        }
    };
    // history dumps contain many revisions, the last one is the current text
    let text = node
        .children()
        .filter(|x| x.has_tag_name("revision"))
        .last()
        .and_then(|revision| child(revision, "text"))
        .and_then(|x| x.text())
        .unwrap_or("");

    Some(Page::new(title, text))
}

/// Returns the articles in an XML export, skipping redirects and pages in other namespaces.
///
/// # Errors
/// - If the XML is malformed.
/// - If the root element is not `<mediawiki>` or is never closed, i.e. the export is truncated.
pub fn pages(xml: &str) -> Result<Vec<Page>, Error> {
    let document = Document::parse(xml)?;

    let root = document.root_element();
    if !root.has_tag_name(ROOT) {
        return Err(Error::InvalidDump(format!(
            "expected <{}> root element, found <{}>",
            ROOT,
            root.tag_name().name()
        )));
    }
    // unclosed elements at the end of the input are accepted by the parser
    if !xml.trim_end().ends_with(&format!("</{}>", ROOT)) {
        return Err(Error::InvalidDump(format!("<{}> is not closed", ROOT)));
    }

    Ok(document
        .descendants()
        .filter(|x| x.has_tag_name("page"))
        .filter_map(to_page)
        .collect())
}

/// Reads an XML export from a file. See [pages].
pub fn pages_from_path<P: AsRef<Path>>(p: P) -> Result<Vec<Page>, Error> {
    let xml = fs_err::read_to_string(p.as_ref())?;
    let pages = pages(&xml)?;
    info!("read {} pages from {}", pages.len(), p.as_ref().display());

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"<mediawiki xmlns="http://www.mediawiki.org/xml/export-0.10/" xml:lang="he">
  <siteinfo>
    <sitename>ויקיפדיה</sitename>
  </siteinfo>
  <page>
    <title>תפוח</title>
    <ns>0</ns>
    <id>1</id>
    <revision>
      <id>10</id>
      <text xml:space="preserve">גרסה ישנה</text>
    </revision>
    <revision>
      <id>11</id>
      <text xml:space="preserve">היו שני תפוחות &amp; עוד.</text>
    </revision>
  </page>
  <page>
    <title>תפוחים</title>
    <ns>0</ns>
    <redirect title="תפוח" />
    <revision>
      <text xml:space="preserve">#הפניה [[תפוח]]</text>
    </revision>
  </page>
  <page>
    <title>שיחה:תפוח</title>
    <ns>1</ns>
    <revision>
      <text xml:space="preserve">שלוש ילדים</text>
    </revision>
  </page>
  <page>
    <title>ריק</title>
    <ns>0</ns>
    <revision>
      <text xml:space="preserve" />
    </revision>
  </page>
</mediawiki>"#;

    #[test]
    fn reads_articles() {
        let pages = pages(DUMP).unwrap();

        assert_eq!(
            pages,
            vec![
                Page::new("תפוח", "היו שני תפוחות & עוד."),
                Page::new("ריק", ""),
            ]
        );
    }

    #[test]
    fn invalid_xml_is_an_error() {
        assert!(matches!(pages("<a></b>"), Err(Error::Xml(_))));
    }

    #[test]
    fn truncated_export_is_an_error() {
        assert!(matches!(pages("<mediawiki><page>"), Err(Error::InvalidDump(_))));

        let truncated = &DUMP[..DUMP.find("<title>ריק").unwrap()];
        assert!(pages(truncated).is_err());
    }

    #[test]
    fn other_root_is_an_error() {
        assert!(matches!(
            pages("<pages><page /></pages>"),
            Err(Error::InvalidDump(_))
        ));
        assert!(pages("<mediawiki></mediawiki>\n").unwrap().is_empty());
    }
}
