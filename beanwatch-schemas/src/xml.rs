//! XML binding for JMX bean assignments.
//!
//! Reads and writes documents of the form:
//!
//! ```xml
//! <jmx-bean-assignment domain="java.lang">
//!   <object-name-parameters>
//!     <entry><key>type</key><value>Memory</value></entry>
//!   </object-name-parameters>
//!   <attributes>
//!     <item>HeapMemoryUsage</item>
//!   </attributes>
//! </jmx-bean-assignment>
//! ```
//!
//! `domain` and both wrapper elements are required; the wrappers may be empty
//! but may not repeat. Entries keep document order. Whitespace between
//! elements is ignored, whitespace inside `key`, `value` and `item` is kept.
//! The cached object name is never written.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Write};
use std::path::Path;

use beanwatch_core::{JmxBeanAssignment, ObjectNameParameters};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::errors::{Result, XmlError};

const ROOT: &str = "jmx-bean-assignment";
const DOMAIN: &str = "domain";
const PARAMETERS: &str = "object-name-parameters";
const ENTRY: &str = "entry";
const KEY: &str = "key";
const VALUE: &str = "value";
const ATTRIBUTES: &str = "attributes";
const ITEM: &str = "item";

/// Parse an assignment from an XML string.
///
/// # Errors
///
/// Returns an error if the XML is malformed or a required element or
/// attribute is missing.
pub fn from_xml_str(xml: &str) -> Result<JmxBeanAssignment> {
    let mut reader = Reader::from_str(xml);
    parse_document(&mut reader)
}

/// Parse an assignment from a buffered reader.
///
/// # Errors
///
/// Same as [`from_xml_str`].
pub fn from_reader<R: BufRead>(input: R) -> Result<JmxBeanAssignment> {
    let mut reader = Reader::from_reader(input);
    parse_document(&mut reader)
}

/// Load an assignment from a file.
///
/// # Errors
///
/// Returns [`XmlError::Io`] if the file cannot be opened, otherwise the same
/// errors as [`from_xml_str`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<JmxBeanAssignment> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let assignment = from_reader(BufReader::new(file))?;
    log::debug!(
        "Loaded JMX bean assignment for domain {:?} from {}",
        assignment.domain(),
        path.display()
    );
    Ok(assignment)
}

/// Serialize an assignment to an indented XML string.
///
/// # Errors
///
/// Returns [`XmlError::MissingAttribute`] if the assignment has no domain.
pub fn to_xml_string(assignment: &JmxBeanAssignment) -> Result<String> {
    let mut buffer = Vec::new();
    write_xml(assignment, Cursor::new(&mut buffer))?;
    String::from_utf8(buffer).map_err(|e| XmlError::XmlParse(format!("invalid UTF-8 output: {e}")))
}

/// Write an assignment as XML.
///
/// Absent collections are written as empty wrappers.
///
/// # Errors
///
/// Returns [`XmlError::MissingAttribute`] if the assignment has no domain, or
/// [`XmlError::XmlParse`] if the underlying writer fails.
pub fn write_xml<W: Write>(assignment: &JmxBeanAssignment, out: W) -> Result<()> {
    let domain = assignment
        .domain()
        .ok_or_else(|| XmlError::missing_attribute(DOMAIN, ROOT))?;

    let mut writer = Writer::new_with_indent(out, b' ', 2);

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut root = BytesStart::new(ROOT);
    root.push_attribute((DOMAIN, domain));
    write_event(&mut writer, Event::Start(root))?;

    match assignment.object_name_parameters().filter(|p| !p.is_empty()) {
        Some(parameters) => {
            write_event(&mut writer, Event::Start(BytesStart::new(PARAMETERS)))?;
            for (key, value) in parameters {
                write_event(&mut writer, Event::Start(BytesStart::new(ENTRY)))?;
                write_text_element(&mut writer, KEY, key)?;
                write_text_element(&mut writer, VALUE, value)?;
                write_event(&mut writer, Event::End(BytesEnd::new(ENTRY)))?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new(PARAMETERS)))?;
        }
        None => write_event(&mut writer, Event::Empty(BytesStart::new(PARAMETERS)))?,
    }

    match assignment.attributes().filter(|a| !a.is_empty()) {
        Some(attributes) => {
            write_event(&mut writer, Event::Start(BytesStart::new(ATTRIBUTES)))?;
            for attribute in attributes {
                write_text_element(&mut writer, ITEM, attribute)?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new(ATTRIBUTES)))?;
        }
        None => write_event(&mut writer, Event::Empty(BytesStart::new(ATTRIBUTES)))?,
    }

    write_event(&mut writer, Event::End(BytesEnd::new(ROOT)))
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| XmlError::XmlParse(format!("write error: {e}")))
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        return write_event(writer, Event::Empty(BytesStart::new(name)));
    }
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}

/// Find the root element and parse it.
fn parse_document<R: BufRead>(reader: &mut Reader<R>) -> Result<JmxBeanAssignment> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == ROOT.as_bytes() => {
                return parse_assignment(reader, e);
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == ROOT.as_bytes() => {
                // A missing domain is reported before the missing wrappers
                get_attribute(e, DOMAIN)?;
                return Err(XmlError::missing_element(PARAMETERS, ROOT));
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                return Err(XmlError::unexpected_element(element_name(e), "document"));
            }
            Ok(Event::Eof) => return Err(XmlError::missing_element(ROOT, "document")),
            Ok(_) => {}
            Err(e) => return Err(XmlError::XmlParse(e.to_string())),
        }
        buf.clear();
    }
}

/// Parse the root element and its children.
fn parse_assignment<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<JmxBeanAssignment> {
    let domain = get_attribute(start, DOMAIN)?;
    let mut parameters: Option<ObjectNameParameters> = None;
    let mut attributes: Option<BTreeSet<String>> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"object-name-parameters" => {
                        ensure_first(parameters.is_none(), PARAMETERS)?;
                        parameters = Some(parse_parameters(reader)?);
                    }
                    b"attributes" => {
                        ensure_first(attributes.is_none(), ATTRIBUTES)?;
                        attributes = Some(parse_attributes(reader)?);
                    }
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"object-name-parameters" => {
                    ensure_first(parameters.is_none(), PARAMETERS)?;
                    parameters = Some(ObjectNameParameters::new());
                }
                b"attributes" => {
                    ensure_first(attributes.is_none(), ATTRIBUTES)?;
                    attributes = Some(BTreeSet::new());
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == ROOT.as_bytes() => break,
            Ok(Event::Eof) => return Err(XmlError::XmlParse(format!("unexpected EOF in {ROOT}"))),
            Ok(_) => {}
            Err(e) => return Err(XmlError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let parameters = parameters.ok_or_else(|| XmlError::missing_element(PARAMETERS, ROOT))?;
    let attributes = attributes.ok_or_else(|| XmlError::missing_element(ATTRIBUTES, ROOT))?;

    let mut assignment = JmxBeanAssignment::default();
    assignment.set_domain(domain);
    assignment.set_object_name_parameters(parameters);
    assignment.set_attributes(attributes);
    Ok(assignment)
}

/// Wrappers may appear once per document.
fn ensure_first(first: bool, element: &str) -> Result<()> {
    if first {
        Ok(())
    } else {
        Err(XmlError::unexpected_element(element, ROOT))
    }
}

/// Parse `<entry>` children of the parameters wrapper.
fn parse_parameters<R: BufRead>(reader: &mut Reader<R>) -> Result<ObjectNameParameters> {
    let mut parameters = ObjectNameParameters::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                if elem_name == ENTRY.as_bytes() {
                    let (key, value) = parse_entry(reader)?;
                    parameters.insert(key, value);
                } else {
                    skip_element(reader, &elem_name)?;
                }
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == ENTRY.as_bytes() => {
                return Err(XmlError::missing_element(KEY, ENTRY));
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == PARAMETERS.as_bytes() => break,
            Ok(Event::Eof) => {
                return Err(XmlError::XmlParse(format!("unexpected EOF in {PARAMETERS}")))
            }
            Ok(_) => {}
            Err(e) => return Err(XmlError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(parameters)
}

/// Parse one `<entry>` into a key/value pair.
fn parse_entry<R: BufRead>(reader: &mut Reader<R>) -> Result<(String, String)> {
    let mut key = None;
    let mut value = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"key" => key = Some(read_text(reader, KEY)?),
                    b"value" => value = Some(read_text(reader, VALUE)?),
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"key" => key = Some(String::new()),
                b"value" => value = Some(String::new()),
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == ENTRY.as_bytes() => break,
            Ok(Event::Eof) => return Err(XmlError::XmlParse(format!("unexpected EOF in {ENTRY}"))),
            Ok(_) => {}
            Err(e) => return Err(XmlError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let key = key.ok_or_else(|| XmlError::missing_element(KEY, ENTRY))?;
    let value = value.ok_or_else(|| XmlError::missing_element(VALUE, ENTRY))?;
    Ok((key, value))
}

/// Parse `<item>` children of the attributes wrapper.
fn parse_attributes<R: BufRead>(reader: &mut Reader<R>) -> Result<BTreeSet<String>> {
    let mut attributes = BTreeSet::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                if elem_name == ITEM.as_bytes() {
                    attributes.insert(read_text(reader, ITEM)?);
                } else {
                    skip_element(reader, &elem_name)?;
                }
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == ITEM.as_bytes() => {
                attributes.insert(String::new());
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == ATTRIBUTES.as_bytes() => break,
            Ok(Event::Eof) => {
                return Err(XmlError::XmlParse(format!("unexpected EOF in {ATTRIBUTES}")))
            }
            Ok(_) => {}
            Err(e) => return Err(XmlError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(attributes)
}

/// Read the text content of a leaf element up to its end tag.
fn read_text<R: BufRead>(reader: &mut Reader<R>, name: &'static str) -> Result<String> {
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Text(ref t)) => {
                let unescaped = t.unescape().map_err(|e| XmlError::XmlParse(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::CData(t)) => {
                let raw = String::from_utf8(t.into_inner().into_owned())
                    .map_err(|_| XmlError::XmlParse(format!("invalid UTF-8 in <{name}>")))?;
                text.push_str(&raw);
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                return Err(XmlError::unexpected_element(element_name(e), name));
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == name.as_bytes() => break,
            Ok(Event::Eof) => return Err(XmlError::XmlParse(format!("unexpected EOF in {name}"))),
            Ok(_) => {}
            Err(e) => return Err(XmlError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(text)
}

/// Get a required attribute value, unescaped.
fn get_attribute(e: &BytesStart, name: &'static str) -> Result<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return attr
                .unescape_value()
                .map(|v| v.into_owned())
                .map_err(|err| XmlError::XmlParse(err.to_string()));
        }
    }
    Err(XmlError::missing_attribute(name, element_name(e)))
}

fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Skip an element and all its children.
fn skip_element<R: BufRead>(reader: &mut Reader<R>, name: &[u8]) -> Result<()> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == name => {
                depth += 1;
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == name => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(XmlError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMORY_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<jmx-bean-assignment domain="java.lang">
  <object-name-parameters>
    <entry><key>type</key><value>Memory</value></entry>
  </object-name-parameters>
  <attributes>
    <item>HeapMemoryUsage</item>
  </attributes>
</jmx-bean-assignment>"#;

    #[test]
    fn parse_memory_assignment() {
        let assignment = from_xml_str(MEMORY_XML).unwrap();
        assert_eq!(assignment.domain(), Some("java.lang"));
        assert_eq!(
            assignment.object_name().map(|n| n.to_string()).as_deref(),
            Some("java.lang:type=Memory")
        );
        assert!(assignment
            .attributes()
            .is_some_and(|a| a.contains("HeapMemoryUsage")));
    }

    #[test]
    fn missing_domain() {
        let xml = "<jmx-bean-assignment><object-name-parameters/><attributes/></jmx-bean-assignment>";
        assert!(matches!(
            from_xml_str(xml),
            Err(XmlError::MissingAttribute { attribute: "domain", .. })
        ));
    }

    #[test]
    fn missing_wrappers() {
        let xml = r#"<jmx-bean-assignment domain="d"><attributes/></jmx-bean-assignment>"#;
        assert!(matches!(
            from_xml_str(xml),
            Err(XmlError::MissingElement { element: "object-name-parameters", .. })
        ));

        let xml = r#"<jmx-bean-assignment domain="d"><object-name-parameters/></jmx-bean-assignment>"#;
        assert!(matches!(
            from_xml_str(xml),
            Err(XmlError::MissingElement { element: "attributes", .. })
        ));

        let xml = r#"<jmx-bean-assignment domain="d"/>"#;
        assert!(matches!(
            from_xml_str(xml),
            Err(XmlError::MissingElement { element: "object-name-parameters", .. })
        ));
    }

    #[test]
    fn empty_wrappers_are_allowed() {
        let xml = r#"<jmx-bean-assignment domain="x">
            <object-name-parameters></object-name-parameters>
            <attributes/>
        </jmx-bean-assignment>"#;
        let assignment = from_xml_str(xml).unwrap();
        assert!(assignment.object_name_parameters().is_some_and(|p| p.is_empty()));
        assert!(assignment.attributes().is_some_and(|a| a.is_empty()));
        assert!(assignment.object_name().is_none());
    }

    #[test]
    fn entry_requires_key_and_value() {
        let xml = r#"<jmx-bean-assignment domain="d">
            <object-name-parameters><entry><key>type</key></entry></object-name-parameters>
            <attributes/>
        </jmx-bean-assignment>"#;
        assert!(matches!(
            from_xml_str(xml),
            Err(XmlError::MissingElement { element: "value", .. })
        ));
    }

    #[test]
    fn wrong_root() {
        assert!(matches!(
            from_xml_str("<method-sensor-assignment/>"),
            Err(XmlError::UnexpectedElement { .. })
        ));
        assert!(matches!(
            from_xml_str(""),
            Err(XmlError::MissingElement { element: "jmx-bean-assignment", .. })
        ));
    }

    #[test]
    fn repeated_wrappers_are_rejected() {
        let xml = r#"<jmx-bean-assignment domain="d">
            <object-name-parameters><entry><key>a</key><value>1</value></entry></object-name-parameters>
            <object-name-parameters><entry><key>b</key><value>2</value></entry></object-name-parameters>
            <attributes/>
        </jmx-bean-assignment>"#;
        assert!(matches!(
            from_xml_str(xml),
            Err(XmlError::UnexpectedElement { ref element, context: "jmx-bean-assignment" })
                if element == "object-name-parameters"
        ));

        let xml = r#"<jmx-bean-assignment domain="d">
            <object-name-parameters/>
            <attributes><item>A</item></attributes>
            <attributes/>
        </jmx-bean-assignment>"#;
        assert!(matches!(
            from_xml_str(xml),
            Err(XmlError::UnexpectedElement { ref element, .. }) if element == "attributes"
        ));
    }

    #[test]
    fn leaf_text_keeps_whitespace() {
        let xml = r#"<jmx-bean-assignment domain="app">
            <object-name-parameters>
                <entry>
                    <key>name</key>
                    <value> Cache A </value>
                </entry>
            </object-name-parameters>
            <attributes><item> Hits</item></attributes>
        </jmx-bean-assignment>"#;
        let assignment = from_xml_str(xml).unwrap();
        assert_eq!(assignment.object_name_string().as_deref(), Some("app:name= Cache A "));
        assert!(assignment.attributes().is_some_and(|a| a.contains(" Hits")));
    }

    #[test]
    fn write_requires_domain() {
        assert!(matches!(
            to_xml_string(&JmxBeanAssignment::default()),
            Err(XmlError::MissingAttribute { attribute: "domain", .. })
        ));
    }

    #[test]
    fn written_document_has_expected_shape() {
        let assignment = JmxBeanAssignment::new("java.lang")
            .with_parameter("type", "Memory")
            .with_attribute("HeapMemoryUsage");
        assignment.object_name();

        let xml = to_xml_string(&assignment).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<jmx-bean-assignment domain=\"java.lang\">"));
        assert!(xml.contains("<key>type</key>"));
        assert!(xml.contains("<value>Memory</value>"));
        assert!(xml.contains("<item>HeapMemoryUsage</item>"));
        assert!(!xml.contains("object-name>"));
    }
}
