//! XML request bodies.
//!
//! Parameters are written as nested elements under `<{opType}Request>`:
//!
//! - objects become nested elements
//! - arrays become repeated sibling elements
//! - scalars become text
//! - inside an object, `"$"` holds attributes and `"_"` holds text, the
//!   same convention the response converter uses

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{Map, Value};
use tracing::debug;

use crate::clients::ebay::EbayError;
use crate::config::{AuthToken, ServiceName};
use crate::parse::shape::{ATTRIBUTES_KEY, TEXT_KEY};

type XmlWriter = Writer<Vec<u8>>;

/// Builds the XML body for an XML call.
///
/// # Errors
///
/// Returns [`EbayError::Client`] if `params` is neither an object nor null.
///
/// # Example
///
/// ```rust
/// use ebay_api::{build_xml_body, ServiceName};
/// use serde_json::json;
///
/// let body = build_xml_body(
///     &ServiceName::Trading,
///     "GetOrders",
///     None,
///     &json!({"NumberOfDays": 30}),
/// )
/// .unwrap();
///
/// assert_eq!(
///     body,
///     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
///      <GetOrdersRequest xmlns=\"urn:ebay:apis:eBLBaseComponents\">\n    \
///      <NumberOfDays>30</NumberOfDays>\n\
///      </GetOrdersRequest>"
/// );
/// ```
pub fn build_xml_body(
    service: &ServiceName,
    op_type: &str,
    auth_token: Option<&AuthToken>,
    params: &Value,
) -> Result<String, EbayError> {
    let params = match params {
        Value::Object(map) => Some(map),
        Value::Null => None,
        _ => return Err(EbayError::client("Request params must be an object")),
    };

    let root_name = format!("{op_type}Request");
    debug!(service = %service, op_type, "Building XML request body");

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(root_name.as_str());
    root.push_attribute(("xmlns", service.xml_namespace()));
    write(&mut writer, Event::Start(root))?;

    if let Some(token) = auth_token {
        write(&mut writer, Event::Start(BytesStart::new("RequesterCredentials")))?;
        write_text_element(&mut writer, "eBayAuthToken", token.as_ref())?;
        write(&mut writer, Event::End(BytesEnd::new("RequesterCredentials")))?;
    }

    if let Some(params) = params {
        write_fields(&mut writer, params)?;
    }

    write(&mut writer, Event::End(BytesEnd::new(root_name.as_str())))?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| EbayError::client(format!("Error building XML: {e}")))
}

fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), EbayError> {
    writer
        .write_event(event)
        .map_err(|e| EbayError::client(format!("Error building XML: {e}")))
}

fn write_fields(writer: &mut XmlWriter, fields: &Map<String, Value>) -> Result<(), EbayError> {
    for (name, value) in fields {
        if name == ATTRIBUTES_KEY || name == TEXT_KEY {
            continue;
        }
        write_element(writer, name, value)?;
    }
    Ok(())
}

fn write_element(writer: &mut XmlWriter, name: &str, value: &Value) -> Result<(), EbayError> {
    match value {
        Value::Null => Ok(()),
        Value::Array(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
            Ok(())
        }
        Value::String(text) => write_text_element(writer, name, text),
        Value::Bool(_) | Value::Number(_) => write_text_element(writer, name, &value.to_string()),
        Value::Object(map) => {
            let mut start = BytesStart::new(name);
            if let Some(Value::Object(attributes)) = map.get(ATTRIBUTES_KEY) {
                for (key, attr) in attributes {
                    let attr = match attr {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    };
                    start.push_attribute((key.as_str(), attr.as_str()));
                }
            }
            write(writer, Event::Start(start))?;

            match map.get(TEXT_KEY) {
                Some(Value::String(text)) => write(writer, Event::Text(BytesText::new(text)))?,
                Some(Value::Null) | None => {}
                Some(other) => write(writer, Event::Text(BytesText::new(&other.to_string())))?,
            }
            write_fields(writer, map)?;

            write(writer, Event::End(BytesEnd::new(name)))
        }
    }
}

fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<(), EbayError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}
