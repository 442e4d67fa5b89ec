use super::{DomError, DomNode};
use scraper::{ElementRef, Html, Node, Selector};

/// Elements a browser lays out on their own line.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Never rendered as text.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// A parsed page snapshot. Not `Send`; parse and harvest it without crossing an `.await`.
pub struct HtmlDocument {
    document: Html,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode(self.document.root_element())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a>(ElementRef<'a>);

impl<'a> HtmlNode<'a> {
    fn compile(selector: &str) -> Result<Selector, DomError> {
        Selector::parse(selector).map_err(|e| DomError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    }

    fn push_rendered(element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => {
                    let name = el.name();
                    if name == "br" {
                        out.push('\n');
                        continue;
                    }
                    if HIDDEN_ELEMENTS.contains(&name) {
                        continue;
                    }
                    let Some(child_element) = ElementRef::wrap(child) else {
                        continue;
                    };
                    let block = BLOCK_ELEMENTS.contains(&name);
                    if block {
                        out.push('\n');
                    }
                    Self::push_rendered(child_element, out);
                    if block {
                        out.push('\n');
                    }
                }
                _ => {}
            }
        }
    }
}

impl<'a> DomNode for HtmlNode<'a> {
    fn find_all(&self, selector: &str) -> Result<Vec<Self>, DomError> {
        let compiled = Self::compile(selector)?;
        Ok(self.0.select(&compiled).map(HtmlNode).collect())
    }

    fn find_first(&self, selector: &str) -> Result<Option<Self>, DomError> {
        let compiled = Self::compile(selector)?;
        Ok(self.0.select(&compiled).next().map(HtmlNode))
    }

    fn text(&self) -> Result<String, DomError> {
        let mut rendered = String::new();
        Self::push_rendered(self.0, &mut rendered);
        Ok(rendered)
    }

    fn attr(&self, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.0.value().attr(name).map(str::to_string))
    }
}
