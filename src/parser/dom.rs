use std::collections::HashMap;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::ExtractError;

/// Owned markup tree. Comments, doctypes and processing instructions are
/// dropped while converting from the parser's DOM since they never carry text.
#[derive(Debug)]
pub enum Node {
    Document {
        children: Vec<Node>,
    },
    Element {
        tag: String,
        attrs: HashMap<String, String>,
        children: Vec<Node>,
    },
    Text(String),
}

/// Parse markup with the HTML5 tree builder and convert it to a [`Node`] tree.
pub fn parse(markup: &str) -> Result<Node, ExtractError> {
    let dom = parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut markup.as_bytes())?;

    Ok(convert(&dom.document).unwrap_or(Node::Document {
        children: Vec::new(),
    }))
}

/// Copy the parser's DOM into owned nodes with an explicit stack, so nesting
/// depth is bounded by heap rather than call stack.
fn convert(root: &Handle) -> Option<Node> {
    let mut stack = vec![(shallow(root)?, child_handles(root).into_iter())];

    loop {
        let next = stack.last_mut().and_then(|(_, pending)| pending.next());
        if let Some(child) = next {
            if let Some(node) = shallow(&child) {
                stack.push((node, child_handles(&child).into_iter()));
            }
            continue;
        }

        let (node, _) = stack.pop()?;
        match stack.last_mut() {
            Some((parent, _)) => parent.push_child(node),
            None => return Some(node),
        }
    }
}

/// The node itself, without children.
fn shallow(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Document => Some(Node::Document {
            children: Vec::new(),
        }),
        NodeData::Element { name, attrs, .. } => {
            let mut map = HashMap::new();
            for attr in attrs.borrow().iter() {
                map.entry(attr.name.local.to_string())
                    .or_insert_with(|| attr.value.to_string());
            }
            Some(Node::Element {
                tag: name.local.to_string(),
                attrs: map,
                children: Vec::new(),
            })
        }
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => None,
    }
}

/// Children in document order. A `<template>` keeps its content in a separate
/// fragment; it is spliced in as ordinary children.
fn child_handles(handle: &Handle) -> Vec<Handle> {
    let mut children = handle.children.borrow().clone();
    if let NodeData::Element {
        template_contents, ..
    } = &handle.data
    {
        if let Some(fragment) = template_contents.borrow().as_ref() {
            children.extend(fragment.children.borrow().iter().cloned());
        }
    }
    children
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = match self {
            Node::Document { children } | Node::Element { children, .. } => {
                std::mem::take(children)
            }
            Node::Text(_) => return,
        };
        while let Some(mut node) = pending.pop() {
            if let Node::Document { children } | Node::Element { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

impl Node {
    fn push_child(&mut self, child: Node) {
        if let Node::Document { children } | Node::Element { children, .. } = self {
            children.push(child);
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children } | Node::Element { children, .. } => children,
            Node::Text(_) => &[],
        }
    }

    /// 1, 2 or 3 for `h1`..`h3`; deeper headings are ordinary elements here.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Node::Element { tag, .. } => match tag.as_str() {
                "h1" => Some(1),
                "h2" => Some(2),
                "h3" => Some(3),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Concatenation of immediate text children only; text nested in
    /// child elements (`<h2>Intro <code>x</code></h2>`) is ignored.
    pub fn direct_text(&self) -> String {
        self.children()
            .iter()
            .filter_map(|c| match c {
                Node::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }
}
