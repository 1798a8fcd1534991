//! CycloneDX XML.
//!
//! quick-xml reads the document into a small element tree, which is then
//! mapped onto the JSON data model (see [`rules`]) and deserialized into
//! [`Bom`] with serde. Encoding runs the same mapping backwards. Sharing
//! the JSON model keeps the two formats from drifting apart.

mod rules;

use super::CodecError;
use crate::model::{Bom, BOM_FORMAT, DEFAULT_SPEC_VERSION};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use rules::Shape;
use serde_json::{Map, Value};

const NAMESPACE_PREFIX: &str = "http://cyclonedx.org/schema/bom/";

#[derive(Debug, Default, Clone, PartialEq)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(name)
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes that carry data (namespace declarations excluded).
    fn data_attributes(&self) -> impl Iterator<Item = &(String, String)> {
        self.attributes
            .iter()
            .filter(|(k, _)| !k.starts_with("xmlns") && !k.contains(':'))
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.data_attributes().next().is_none()
    }
}

fn xml_err(err: impl std::fmt::Display) -> CodecError {
    CodecError::Xml(err.to_string())
}

fn local_name(raw: &[u8]) -> Result<String, CodecError> {
    let name = std::str::from_utf8(raw).map_err(xml_err)?;
    Ok(name.rsplit(':').next().unwrap_or(name).to_string())
}

fn start_element(start: &BytesStart<'_>) -> Result<Element, CodecError> {
    let mut element = Element::new(local_name(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(xml_err)?
            .to_string();
        let value = attr.unescape_value().map_err(xml_err)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn parse_tree(content: &str) -> Result<Element, CodecError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(start) => stack.push(start_element(&start)?),
            Event::Empty(start) => {
                let element = start_element(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| CodecError::Xml("unbalanced closing tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => root = Some(element),
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape().map_err(xml_err)?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(std::str::from_utf8(&data).map_err(xml_err)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(CodecError::Xml("unexpected end of document".to_string()));
    }
    root.ok_or_else(|| CodecError::Xml("document has no root element".to_string()))
}

// ---------------------------------------------------------------------------
// XML -> JSON model
// ---------------------------------------------------------------------------

fn text_value(context: &str, key: &str, text: &str) -> Value {
    rules::typed_value(context, key, text).unwrap_or_else(|| Value::String(text.to_string()))
}

/// Value of child `element`, stored under `key` of object `context`.
fn to_value(context: &str, key: &str, element: &Element) -> Value {
    if element.is_leaf() {
        text_value(context, key, &element.text)
    } else {
        Value::Object(to_object(element))
    }
}

fn push_to_array(map: &mut Map<String, Value>, key: &str, value: Value) {
    match map.get_mut(key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key.to_string(), Value::Array(vec![value]));
        }
    }
}

fn to_object(element: &Element) -> Map<String, Value> {
    let context = element.name.as_str();
    let mut map = Map::new();

    for (name, value) in element.data_attributes() {
        let key = rules::attribute_key(name);
        map.insert(key.to_string(), text_value(context, key, value));
    }
    if !element.text.is_empty() {
        map.insert(
            rules::text_field(context).to_string(),
            Value::String(element.text.clone()),
        );
    }

    for child in &element.children {
        let (rule_key, shape) = rules::for_element(context, &child.name);
        let key = if rule_key.is_empty() {
            child.name.as_str()
        } else {
            rule_key
        };

        match shape {
            Shape::Plain => {
                let value = to_value(context, key, child);
                if map.contains_key(key) {
                    push_to_array(&mut map, key, value);
                } else {
                    map.insert(key.to_string(), value);
                }
            }
            Shape::Repeated => push_to_array(&mut map, key, to_value(context, key, child)),
            Shape::RepeatedRefs => {
                let target = child.attribute("ref").unwrap_or(&child.text);
                push_to_array(&mut map, key, Value::String(target.to_string()));
            }
            Shape::Wrapped(item) => {
                let items = child
                    .children
                    .iter()
                    .filter(|c| c.name == item)
                    .map(|c| to_value(item, key, c))
                    .collect();
                map.insert(key.to_string(), Value::Array(items));
            }
            Shape::WrappedRefs(item) => {
                let refs = child
                    .children
                    .iter()
                    .filter(|c| c.name == item)
                    .map(|c| Value::String(c.attribute("ref").unwrap_or(&c.text).to_string()))
                    .collect();
                map.insert(key.to_string(), Value::Array(refs));
            }
            Shape::WrappedText { item, field } => {
                let entries = child
                    .children
                    .iter()
                    .filter(|c| c.name == item)
                    .map(|c| {
                        let mut entry = Map::new();
                        entry.insert(field.to_string(), Value::String(c.text.clone()));
                        Value::Object(entry)
                    })
                    .collect();
                map.insert(key.to_string(), Value::Array(entries));
            }
            Shape::Choice => {
                let choices = child
                    .children
                    .iter()
                    .map(|c| {
                        let mut entry = Map::new();
                        entry.insert(c.name.clone(), to_value(&child.name, &c.name, c));
                        Value::Object(entry)
                    })
                    .collect();
                map.insert(key.to_string(), Value::Array(choices));
            }
            Shape::Tools => {
                let value = if child.children.iter().any(|c| c.name == "tool") {
                    Value::Array(
                        child
                            .children
                            .iter()
                            .filter(|c| c.name == "tool")
                            .map(|c| Value::Object(to_object(c)))
                            .collect(),
                    )
                } else {
                    Value::Object(to_object(child))
                };
                map.insert(key.to_string(), value);
            }
            Shape::Attached => {
                let mut text = Map::new();
                for (name, value) in child.data_attributes() {
                    text.insert(
                        rules::attribute_key(name).to_string(),
                        Value::String(value.clone()),
                    );
                }
                text.insert("content".to_string(), Value::String(child.text.clone()));
                map.insert(key.to_string(), Value::Object(text));
            }
        }
    }

    map
}

fn spec_version_from_namespace(root: &Element) -> Option<String> {
    root.attribute("xmlns")
        .and_then(|ns| ns.strip_prefix(NAMESPACE_PREFIX))
        .map(|v| v.trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

pub(super) fn decode(content: &str) -> Result<Bom, CodecError> {
    let root = parse_tree(content.trim_start_matches('\u{feff}'))?;
    if root.name != "bom" {
        return Err(CodecError::UnknownFormat(format!(
            "root element is <{}>, expected <bom>",
            root.name
        )));
    }

    let mut map = to_object(&root);
    map.insert("bomFormat".to_string(), Value::String(BOM_FORMAT.to_string()));
    if let Some(version) = spec_version_from_namespace(&root) {
        map.insert("specVersion".to_string(), Value::String(version));
    }

    Ok(serde_json::from_value(Value::Object(map))?)
}

// ---------------------------------------------------------------------------
// JSON model -> XML
// ---------------------------------------------------------------------------

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn from_value(name: &str, value: &Value) -> Element {
    match value {
        Value::Object(map) => from_object(name, map),
        other => Element::with_text(name, scalar_text(other)),
    }
}

fn ref_element(name: &str, target: &Value) -> Element {
    let mut element = Element::new(name);
    element
        .attributes
        .push(("ref".to_string(), scalar_text(target)));
    element
}

fn array_items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or_default()
}

fn from_object(name: &str, map: &Map<String, Value>) -> Element {
    let mut element = Element::new(name);

    for (key, value) in map {
        if value.is_null() {
            continue;
        }
        if rules::is_attribute(name, key) {
            element.attributes.push((
                rules::attribute_name(key).to_string(),
                scalar_text(value),
            ));
            continue;
        }
        if rules::is_text_field(name, key) {
            element.text = scalar_text(value);
            continue;
        }

        let (rule_element, shape) = rules::for_key(name, key);
        let child_name = if rule_element.is_empty() {
            key.as_str()
        } else {
            rule_element
        };

        match shape {
            Shape::Plain => match value {
                Value::Array(items) => element
                    .children
                    .extend(items.iter().map(|v| from_value(child_name, v))),
                other => element.children.push(from_value(child_name, other)),
            },
            Shape::Repeated => element
                .children
                .extend(array_items(value).iter().map(|v| from_value(child_name, v))),
            Shape::RepeatedRefs => element
                .children
                .extend(array_items(value).iter().map(|v| ref_element(child_name, v))),
            Shape::Wrapped(item) => {
                let mut wrapper = Element::new(key.as_str());
                wrapper.children = array_items(value)
                    .iter()
                    .map(|v| from_value(item, v))
                    .collect();
                element.children.push(wrapper);
            }
            Shape::WrappedRefs(item) => {
                let mut wrapper = Element::new(key.as_str());
                wrapper.children = array_items(value)
                    .iter()
                    .map(|v| ref_element(item, v))
                    .collect();
                element.children.push(wrapper);
            }
            Shape::WrappedText { item, field } => {
                let mut wrapper = Element::new(key.as_str());
                wrapper.children = array_items(value)
                    .iter()
                    .map(|v| Element::with_text(item, v.get(field).map(scalar_text).unwrap_or_default()))
                    .collect();
                element.children.push(wrapper);
            }
            Shape::Choice => {
                let mut wrapper = Element::new(key.as_str());
                for choice in array_items(value) {
                    if let Value::Object(entry) = choice {
                        for (kind, inner) in entry {
                            wrapper.children.push(from_value(kind, inner));
                        }
                    }
                }
                element.children.push(wrapper);
            }
            Shape::Tools => {
                let wrapper = match value {
                    Value::Array(tools) => {
                        let mut wrapper = Element::new(key.as_str());
                        wrapper.children = tools.iter().map(|t| from_value("tool", t)).collect();
                        wrapper
                    }
                    other => from_value(key, other),
                };
                element.children.push(wrapper);
            }
            Shape::Attached => {
                let mut text = Element::new(key.as_str());
                if let Value::Object(fields) = value {
                    for (field, inner) in fields {
                        if field == "content" {
                            text.text = scalar_text(inner);
                        } else {
                            text.attributes.push((
                                rules::attribute_name(field).to_string(),
                                scalar_text(inner),
                            ));
                        }
                    }
                }
                element.children.push(text);
            }
        }
    }

    element
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), CodecError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(xml_err);
    }

    writer.write_event(Event::Start(start)).map_err(xml_err)?;
    if !element.text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&element.text)))
            .map_err(xml_err)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(xml_err)
}

pub(super) fn encode(bom: &Bom, pretty: bool) -> Result<String, CodecError> {
    let Value::Object(map) = serde_json::to_value(bom)? else {
        return Err(CodecError::Xml("document did not serialize to an object".to_string()));
    };

    // Header members live in attributes; the rest must keep schema order.
    let body: Map<String, Value> = map
        .into_iter()
        .filter(|(key, _)| !matches!(key.as_str(), "$schema" | "bomFormat" | "specVersion"))
        .collect();

    let spec_version = bom.spec_version.as_deref().unwrap_or(DEFAULT_SPEC_VERSION);
    let mut root = from_object("bom", &body);
    root.attributes.insert(
        0,
        ("xmlns".to_string(), format!("{NAMESPACE_PREFIX}{spec_version}")),
    );

    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    };
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;
    write_element(&mut writer, &root)?;

    let mut out = String::from_utf8(writer.into_inner()).map_err(xml_err)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, Dependency, Hash, LicenseChoice, Property};

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.5" serialNumber="urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79" version="2">
  <metadata>
    <timestamp>2024-01-01T00:00:00Z</timestamp>
    <tools>
      <tool><vendor>acme</vendor><name>scanner</name></tool>
    </tools>
    <component type="application" bom-ref="app">
      <name>app</name>
      <version>1.0</version>
    </component>
  </metadata>
  <components>
    <component type="library" bom-ref="lib">
      <name>lib</name>
      <version>2.1</version>
      <hashes><hash alg="SHA-256">abc123</hash></hashes>
      <licenses>
        <license><id>MIT</id></license>
        <expression>Apache-2.0 OR MIT</expression>
      </licenses>
      <purl>pkg:cargo/lib@2.1</purl>
      <modified>false</modified>
      <properties><property name="env">prod</property></properties>
    </component>
  </components>
  <dependencies>
    <dependency ref="app"><dependency ref="lib"/></dependency>
    <dependency ref="lib"/>
  </dependencies>
</bom>"#;

    #[test]
    fn test_decode_sample() {
        let bom = decode(SAMPLE).expect("decode");
        assert_eq!(bom.spec_version.as_deref(), Some("1.5"));
        assert_eq!(bom.bom_format.as_deref(), Some("CycloneDX"));
        assert_eq!(bom.version, 2);
        assert_eq!(bom.root_ref(), Some("app"));

        let lib = &bom.components.as_ref().expect("components")[0];
        assert_eq!(lib.bom_ref(), Some("lib"));
        assert_eq!(lib.modified, Some(false));
        assert_eq!(
            lib.hashes,
            Some(vec![Hash {
                alg: "SHA-256".to_string(),
                content: "abc123".to_string()
            }])
        );
        assert_eq!(
            lib.licenses,
            Some(vec![
                LicenseChoice::spdx("MIT"),
                LicenseChoice::expression("Apache-2.0 OR MIT")
            ])
        );
        assert_eq!(lib.properties, Some(vec![Property::new("env", "prod")]));

        assert_eq!(
            bom.dependency("app").map(Dependency::edges),
            Some(&["lib".to_string()][..])
        );
        let tools = bom.metadata.and_then(|m| m.tools).expect("tools");
        assert_eq!(tools.tools.map(|t| t.len()), Some(1));
    }

    #[test]
    fn test_encode_then_decode_preserves_document() {
        let bom = decode(SAMPLE).expect("decode");
        let xml = encode(&bom, true).expect("encode");
        assert!(xml.contains(r#"xmlns="http://cyclonedx.org/schema/bom/1.5""#));
        assert!(xml.contains(r#"<hash alg="SHA-256">abc123</hash>"#));
        assert!(xml.contains(r#"<dependency ref="lib"/>"#));
        assert_eq!(decode(&xml).expect("decode again"), bom);
    }

    #[test]
    fn test_tool_components_use_object_form() {
        let mut bom = Bom::new("1.6");
        bom.metadata = Some(crate::model::Metadata {
            tools: Some(crate::model::Tools {
                components: Some(vec![Component::new("application", "syft")]),
                ..crate::model::Tools::default()
            }),
            ..crate::model::Metadata::default()
        });
        let xml = encode(&bom, false).expect("encode");
        assert!(xml.contains("<tools><components><component type=\"application\">"));
        let back = decode(&xml).expect("decode");
        assert_eq!(back.metadata, bom.metadata);
    }

    #[test]
    fn test_rejects_non_bom_root() {
        assert!(matches!(
            decode("<spdx/>"),
            Err(CodecError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(decode("<bom><components></bom>").is_err());
    }
}
