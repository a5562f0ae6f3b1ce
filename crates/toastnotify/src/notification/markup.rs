use super::{ToastContent, ToastError, ToastTemplate};
use derive_new::new;
use std::fmt;

/// In-memory toast markup, built to match what the WinRT template store hands out.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupDocument {
    root: Element,
}

#[derive(new, Debug, Clone, PartialEq)]
struct Element {
    name: String,
    #[new(default)]
    attributes: Vec<(String, String)>,
    #[new(default)]
    children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Element(Element),
    Text(String),
}

impl MarkupDocument {
    pub fn from_template(template: ToastTemplate) -> Self {
        let mut binding =
            Element::new("binding".to_owned()).with_attribute("template", template.name());
        if template == ToastTemplate::ImageAndText02 {
            binding = binding.with_child(
                Element::new("image".to_owned())
                    .with_attribute("id", "1")
                    .with_attribute("src", ""),
            );
        }
        binding = binding
            .with_child(Element::new("text".to_owned()).with_attribute("id", "1"))
            .with_child(Element::new("text".to_owned()).with_attribute("id", "2"));

        Self {
            root: Element::new("toast".to_owned())
                .with_child(Element::new("visual".to_owned()).with_child(binding)),
        }
    }

    /// Concatenated text content of the element, if it exists.
    pub fn text(&self, tag: &str, index: usize) -> Option<String> {
        let mut remaining = index;
        let element = find(&self.root, tag, &mut remaining)?;
        Some(
            element
                .children
                .iter()
                .filter_map(|child| match child {
                    Node::Text(text) => Some(text.as_str()),
                    Node::Element(_) => None,
                })
                .collect(),
        )
    }

    pub fn attribute(&self, tag: &str, index: usize, name: &str) -> Option<&str> {
        let mut remaining = index;
        find(&self.root, tag, &mut remaining)?.attribute(name)
    }

    fn element_mut(&mut self, tag: &str, index: usize) -> Result<&mut Element, ToastError> {
        let mut remaining = index;
        find_mut(&mut self.root, tag, &mut remaining)
            .ok_or_else(|| ToastError::missing_element(tag, index))
    }
}

impl ToastContent for MarkupDocument {
    fn append_text(&mut self, tag: &str, index: usize, text: &str) -> Result<(), ToastError> {
        self.element_mut(tag, index)?
            .children
            .push(Node::Text(text.to_owned()));
        Ok(())
    }

    fn set_attribute(
        &mut self,
        tag: &str,
        index: usize,
        name: &str,
        value: &str,
    ) -> Result<(), ToastError> {
        self.element_mut(tag, index)?.set_attribute(name, value);
        Ok(())
    }

    fn to_xml(&self) -> Result<String, ToastError> {
        Ok(self.root.to_string())
    }
}

impl Element {
    fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing_value)) => *existing_value = value.to_owned(),
            None => self.attributes.push((name.to_owned(), value.to_owned())),
        }
    }
}

fn find<'a>(element: &'a Element, tag: &str, remaining: &mut usize) -> Option<&'a Element> {
    if element.name == tag {
        if *remaining == 0 {
            return Some(element);
        }
        *remaining -= 1;
    }
    element.children.iter().find_map(|child| match child {
        Node::Element(child) => find(child, tag, remaining),
        Node::Text(_) => None,
    })
}

fn find_mut<'a>(
    element: &'a mut Element,
    tag: &str,
    remaining: &mut usize,
) -> Option<&'a mut Element> {
    if element.name == tag {
        if *remaining == 0 {
            return Some(element);
        }
        *remaining -= 1;
    }
    element.children.iter_mut().find_map(|child| match child {
        Node::Element(child) => find_mut(child, tag, remaining),
        Node::Text(_) => None,
    })
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, Escaped(value))?;
        }
        if self.children.is_empty() {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        for child in &self.children {
            match child {
                Node::Element(element) => write!(f, "{}", element)?,
                Node::Text(text) => write!(f, "{}", Escaped(text))?,
            }
        }
        write!(f, "</{}>", self.name)
    }
}

struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                _ => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}
