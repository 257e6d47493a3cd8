//! XML to generic JSON conversion.
//!
//! Produces the tree shape the flattener expects:
//!
//! - the root is an object with a single key, the root element's name
//! - every child element is collected into an array under its name
//! - attributes live under `"$"`
//! - text lives under `"_"` when the element also has attributes or children,
//!   otherwise the element converts to its text directly
//! - empty elements convert to `""`

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::clients::ebay::EbayError;
use crate::parse::shape::{ATTRIBUTES_KEY, TEXT_KEY};
use crate::parse::MAX_RECURSION_DEPTH;

/// Maximum element nesting accepted from a response document.
pub const MAX_ELEMENT_DEPTH: usize = 2 * MAX_RECURSION_DEPTH as usize;

/// Element being assembled while its end tag has not been seen yet.
#[derive(Debug)]
struct OpenElement {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl OpenElement {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, String> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| e.to_string())?
            .to_string();

        let mut attributes = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| e.to_string())?;
            let key = std::str::from_utf8(attribute.key.as_ref())
                .map_err(|e| e.to_string())?
                .to_string();
            let value = attribute.unescape_value().map_err(|e| e.to_string())?;
            attributes.insert(key, Value::String(value.into_owned()));
        }

        Ok(Self {
            name,
            attributes,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn add_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            _ => {
                self.children.insert(name, Value::Array(vec![value]));
            }
        }
    }

    fn finish(self) -> (String, Value) {
        let has_text = !self.text.trim().is_empty();

        if self.attributes.is_empty() && self.children.is_empty() {
            let value = if has_text { self.text } else { String::new() };
            return (self.name, Value::String(value));
        }

        let mut node = Map::new();
        if !self.attributes.is_empty() {
            node.insert(ATTRIBUTES_KEY.to_string(), Value::Object(self.attributes));
        }
        if has_text {
            node.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        node.extend(self.children);
        (self.name, Value::Object(node))
    }
}

/// Converts an XML document into a generic JSON tree.
///
/// # Errors
///
/// Returns [`EbayError::Client`] with an `Error parsing XML` message if the
/// document is not well-formed, has no root element, or nests elements
/// deeper than [`MAX_ELEMENT_DEPTH`].
///
/// # Example
///
/// ```rust
/// use ebay_api::parse::xml_to_json;
/// use serde_json::json;
///
/// let xml = r#"<GetOrdersResponse><Ack>Success</Ack><Total currencyID="USD">5.00</Total></GetOrdersResponse>"#;
/// assert_eq!(
///     xml_to_json(xml).unwrap(),
///     json!({"GetOrdersResponse": {
///         "Ack": ["Success"],
///         "Total": [{"$": {"currencyID": "USD"}, "_": "5.00"}]
///     }})
/// );
/// ```
pub fn xml_to_json(xml: &str) -> Result<Value, EbayError> {
    convert(xml).map_err(|e| EbayError::client(format!("Error parsing XML: {e}")))
}

fn convert(xml: &str) -> Result<Value, String> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => {
                if stack.len() >= MAX_ELEMENT_DEPTH {
                    return Err(format!(
                        "Element nesting exceeds {MAX_ELEMENT_DEPTH} levels"
                    ));
                }
                stack.push(OpenElement::from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = OpenElement::from_start(&start)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| "Unexpected closing tag".to_string())?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&text.unescape().map_err(|e| e.to_string())?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    let raw = data.into_inner();
                    current
                        .text
                        .push_str(std::str::from_utf8(&raw).map_err(|e| e.to_string())?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(format!("Unclosed tag: {}", open.name));
    }
    root.ok_or_else(|| "Document has no root element".to_string())
}

fn close_element(
    element: OpenElement,
    stack: &mut [OpenElement],
    root: &mut Option<Value>,
) -> Result<(), String> {
    let (name, value) = element.finish();

    if let Some(parent) = stack.last_mut() {
        parent.add_child(name, value);
        return Ok(());
    }
    if root.is_some() {
        return Err(format!("Unexpected second root element: {name}"));
    }

    let mut document = Map::new();
    document.insert(name, value);
    *root = Some(Value::Object(document));
    Ok(())
}
