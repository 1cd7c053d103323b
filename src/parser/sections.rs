use serde::Serialize;

use super::dom::Node;
use super::text::{clean_contents, fragment_link};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub document: String,
    pub chapter: String,
    pub section: String,
    pub link: String,
    pub contents: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Descend,
    SkipChildren,
}

/// Traversal state for one page: the last `h1`/`h2` seen, the section being
/// filled and the sections already closed.
pub struct Walker<'a> {
    url: &'a str,
    document_name: String,
    chapter_name: String,
    current: Section,
    sections: Vec<Section>,
}

impl<'a> Walker<'a> {
    pub fn new(url: &'a str) -> Self {
        Walker {
            url,
            document_name: String::new(),
            chapter_name: String::new(),
            current: Section {
                link: fragment_link(url, None),
                ..Section::default()
            },
            sections: Vec::new(),
        }
    }

    pub fn visit(&mut self, node: &Node) -> Visit {
        match node {
            Node::Text(text) => {
                // Nothing counts as content until the first chapter heading.
                if !self.chapter_name.is_empty() {
                    self.current.contents.push_str(text);
                }
                Visit::Descend
            }
            _ => match node.heading_level() {
                Some(1) => {
                    self.document_name = node.direct_text();
                    Visit::SkipChildren
                }
                Some(level) => {
                    let heading = node.direct_text();
                    let section = if level == 2 {
                        self.chapter_name = heading;
                        String::new()
                    } else {
                        heading
                    };
                    self.start_section(section, node.attr("id"));
                    Visit::SkipChildren
                }
                None => Visit::Descend,
            },
        }
    }

    fn start_section(&mut self, section: String, id: Option<&str>) {
        let next = Section {
            document: self.document_name.clone(),
            chapter: self.chapter_name.clone(),
            section,
            link: fragment_link(self.url, id),
            contents: String::new(),
        };
        let previous = std::mem::replace(&mut self.current, next);
        if !previous.contents.is_empty() {
            self.sections.push(previous);
        }
    }

    /// Close the walk. The in-progress section is kept even when it has no
    /// contents, so a page with no text still yields one record.
    pub fn finish(mut self) -> Vec<Section> {
        self.sections.push(self.current);
        for section in &mut self.sections {
            section.contents = clean_contents(&section.contents);
        }
        self.sections
    }
}

/// Pre-order, left-to-right walk driven by an explicit stack.
pub fn walk(url: &str, root: &Node) -> Vec<Section> {
    let mut walker = Walker::new(url);
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if walker.visit(node) == Visit::Descend {
            stack.extend(node.children().iter().rev());
        }
    }

    walker.finish()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dom::parse;

    const URL: &str = "https://example.com/style.html";

    fn sections(html: &str) -> Vec<Section> {
        walk(URL, &parse(html).unwrap())
    }

    #[test]
    fn minimal_document() {
        let s = sections(r#"<h1>Doc</h1><h2 id="c1">Ch1</h2>Hello"#);
        assert_eq!(
            s,
            vec![Section {
                document: "Doc".into(),
                chapter: "Ch1".into(),
                section: String::new(),
                link: format!("{URL}#c1"),
                contents: "Hello".into(),
            }]
        );
    }

    #[test]
    fn empty_chapter_before_subsection_is_dropped() {
        let s = sections(
            r#"<h1>Doc</h1><h2 id="c">Chapter</h2><h3 id="s">Sub</h3><p>body</p>"#,
        );
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].chapter, "Chapter");
        assert_eq!(s[0].section, "Sub");
        assert_eq!(s[0].link, format!("{URL}#s"));
        assert_eq!(s[0].contents, "body");
    }

    #[test]
    fn text_before_first_chapter_is_discarded() {
        let s = sections(
            "<p>preamble</p><h1>Doc</h1><p>intro</p><h2>One</h2><p>kept</p>",
        );
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].contents, "kept");
        assert!(s.iter().all(|x| !x.contents.contains("preamble")));
        assert!(s.iter().all(|x| !x.contents.contains("intro")));
    }

    #[test]
    fn only_title_yields_single_empty_section() {
        let s = sections("<h1>Only</h1>");
        assert_eq!(
            s,
            vec![Section {
                link: format!("{URL}#"),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn trailing_empty_section_is_kept() {
        let s = sections("<h1>Doc</h1><h2>One</h2><p>text</p><h2>Two</h2>");
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].chapter, "One");
        assert_eq!(s[1].chapter, "Two");
        assert_eq!(s[1].contents, "");
    }

    #[test]
    fn subsection_without_chapter_has_empty_chapter() {
        let s = sections("<h1>Doc</h1><h3 id=\"x\">Loose</h3><p>ignored</p>");
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].chapter, "");
        assert_eq!(s[0].section, "Loose");
        // no chapter seen yet, so the text is not accumulated
        assert_eq!(s[0].contents, "");
    }

    #[test]
    fn chapter_carries_into_subsections() {
        let s = sections(
            "<h1>Doc</h1><h2>A</h2><p>a</p><h3>A.1</h3><p>a1</p><h3>A.2</h3><p>a2</p><h2>B</h2><p>b</p>",
        );
        let got: Vec<_> = s
            .iter()
            .map(|x| (x.chapter.as_str(), x.section.as_str(), x.contents.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![("A", "", "a"), ("A", "A.1", "a1"), ("A", "A.2", "a2"), ("B", "", "b")]
        );
    }

    #[test]
    fn heading_text_never_enters_contents() {
        let s = sections(
            "<h1>Doc <em>x</em></h1><h2>Ch <code>inner</code></h2><p>body</p><h3>Sub <b>bold</b></h3><p>more</p>",
        );
        assert_eq!(s[0].document, "Doc ");
        assert_eq!(s[0].chapter, "Ch ");
        assert_eq!(s[1].section, "Sub ");
        assert!(s.iter().all(|x| !x.contents.contains("inner")));
        assert!(s.iter().all(|x| !x.contents.contains("bold")));
    }

    #[test]
    fn whitespace_between_headings_counts_as_content() {
        let s = sections("<h1>Doc</h1><h2>Ch</h2>\n<h3>Sub</h3><p>x</p>");
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].section, "");
        assert_eq!(s[0].contents, "");
        assert_eq!(s[1].contents, "x");
    }

    #[test]
    fn nested_text_accumulates_in_document_order() {
        let s = sections(
            "<h1>Doc</h1><h2>Ch</h2><div><p>one <b>two</b></p><ul><li>three</li></ul></div>",
        );
        assert_eq!(s[0].contents, "one twothree");
    }

    #[test]
    fn h4_and_deeper_are_plain_content() {
        let s = sections("<h1>Doc</h1><h2>Ch</h2><h4>Minor</h4><p>text</p>");
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].contents, "Minortext");
    }

    #[test]
    fn document_title_applies_from_its_position() {
        let s = sections("<h2>Early</h2><p>x</p><h1>Doc</h1><h2>Late</h2><p>y</p>");
        assert_eq!(s[0].document, "");
        assert_eq!(s[1].document, "Doc");
    }

    #[test]
    fn newlines_are_normalised() {
        let s = sections("<h1>Doc</h1><h2>Ch</h2>\n<p>line one\nline two</p>\n");
        for x in &s {
            assert!(!x.contents.starts_with('\n'));
            assert!(!x.contents.ends_with('\n'));
            assert!(!x.contents.contains('\n'));
        }
        assert!(s[0].contents.contains("line one line two"));
    }

    #[test]
    fn deeply_nested_text() {
        let html = format!("<h1>Doc</h1><h2>Ch</h2>{}x", "<div>".repeat(10_000));
        let s = sections(&html);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].chapter, "Ch");
        assert_eq!(s[0].contents, "x");
    }

    #[test]
    fn template_headings_open_sections() {
        let s = sections("<h1>D</h1><h2>C</h2><p>a</p><template><h3 id=\"t\">T</h3><p>in</p></template>");
        let got: Vec<_> = s
            .iter()
            .map(|x| (x.chapter.as_str(), x.section.as_str(), x.contents.as_str()))
            .collect();
        assert_eq!(got, vec![("C", "", "a"), ("C", "T", "in")]);
        assert_eq!(s[1].link, format!("{URL}#t"));
    }

    #[test]
    fn deterministic() {
        let html = std::fs::read_to_string("tests/fixtures/style_guide.html").unwrap();
        assert_eq!(sections(&html), sections(&html));
    }

    #[test]
    fn style_guide_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/style_guide.html").unwrap();
        let s = sections(&html);
        assert!(s.iter().all(|x| x.document == "C++ Style Guide"));
        let names: Vec<_> = s.iter().map(|x| x.section.as_str()).collect();
        assert!(names.contains(&"General Naming Rules"));
        assert!(names.contains(&"File Names"));
        let general = s.iter().find(|x| x.section == "General Naming Rules").unwrap();
        assert_eq!(general.chapter, "Naming");
        assert_eq!(general.link, format!("{URL}#General_Naming_Rules"));
        assert!(general.contents.contains("Optimize for readability"));
        // the Naming chapter has no text before its first subsection
        assert!(!s.iter().any(|x| x.chapter == "Naming" && x.section.is_empty()));
        // nav text sits before the first chapter heading
        assert!(s.iter().all(|x| !x.contents.contains("Table of Contents")));
    }
}
