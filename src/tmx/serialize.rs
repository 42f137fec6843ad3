/*!
 * TMX 1.4 wire encoding and decoding.
 *
 * The wire format is the TMX XML structure: a `tmx` root carrying the
 * version, a `header` with fixed attributes plus `prop` children for custom
 * properties, and a `body` of `tu` elements, each holding unit-level `prop`
 * children and one `tuv` per variant with the text in a `seg` child.
 *
 * Decoding is best-effort: apart from the exact version check, malformed
 * pieces are logged and skipped rather than failing the whole parse.
 */

use anyhow::Result;
use log::{error, trace, warn};
use xmltree::{Element, EmitterConfig, XMLNode};

use crate::errors::TmxError;
use crate::tmx::document::{Document, CREATION_TOOL, HEADER_ATTRIBUTES};
use crate::tmx::model::{TranslationUnit, Variant};

/// The only version accepted on decode
const TMX_VERSION: &str = "1.4";

impl Document {
    /// Encode the document as TMX 1.4 wire text.
    ///
    /// Units with fewer than two variants are dropped from the output: an
    /// entry without at least a source/target pair carries no reuse value.
    pub fn serialize(&self) -> Result<String> {
        let root = encode(self);
        let mut out = Vec::new();
        root.write_with_config(&mut out, EmitterConfig::new().perform_indent(true))?;
        Ok(String::from_utf8(out)?)
    }

    /// Decode TMX wire text into this document.
    ///
    /// Any version other than the literal "1.4" is rejected with an error
    /// and the document's current state is left completely unchanged. On
    /// acceptance all prior units are discarded before repopulating.
    pub fn deserialize(&mut self, text: &str) -> Result<()> {
        decode(self, text)
    }
}

fn encode(doc: &Document) -> Element {
    let mut tmx = Element::new("tmx");
    tmx.attributes.insert("version".to_string(), doc.version_string());

    let mut header = Element::new("header");
    header.attributes.insert(
        "segtype".to_string(),
        doc.segmentation_type().as_str().to_string(),
    );
    header.attributes.insert(
        "creationtool".to_string(),
        doc.get_property("creationtool").unwrap_or(CREATION_TOOL).to_string(),
    );
    header.attributes.insert(
        "creationtoolversion".to_string(),
        doc.get_property("creationtoolversion")
            .unwrap_or(env!("CARGO_PKG_VERSION"))
            .to_string(),
    );
    header.attributes.insert("adminlang".to_string(), doc.admin_locale().to_string());
    header.attributes.insert("srclang".to_string(), doc.source_locale().to_string());
    header.attributes.insert("datatype".to_string(), doc.datatype().to_string());
    if let Some(tmf) = doc.get_property("o-tmf") {
        header.attributes.insert("o-tmf".to_string(), tmf.to_string());
    }

    for (key, value) in doc.properties() {
        if HEADER_ATTRIBUTES.contains(&key.as_str()) {
            continue;
        }
        header.children.push(XMLNode::Element(prop_element(key, value)));
    }
    tmx.children.push(XMLNode::Element(header));

    let mut body = Element::new("body");
    for unit in doc.get_translation_units() {
        if unit.variants.len() < 2 {
            trace!("dropping unit with {} variant(s) from output", unit.variants.len());
            continue;
        }
        body.children.push(XMLNode::Element(encode_unit(unit)));
    }
    tmx.children.push(XMLNode::Element(body));

    tmx
}

fn encode_unit(unit: &TranslationUnit) -> Element {
    let mut tu = Element::new("tu");
    tu.attributes.insert("srclang".to_string(), unit.source_locale.clone());

    for (key, value) in &unit.properties {
        tu.children.push(XMLNode::Element(prop_element(key, value)));
    }

    for variant in &unit.variants {
        let mut seg = Element::new("seg");
        seg.children.push(XMLNode::Text(variant.string.clone()));

        let mut tuv = Element::new("tuv");
        tuv.attributes.insert("xml:lang".to_string(), variant.locale.clone());
        tuv.children.push(XMLNode::Element(seg));
        tu.children.push(XMLNode::Element(tuv));
    }

    tu
}

fn prop_element(key: &str, value: &str) -> Element {
    let mut prop = Element::new("prop");
    prop.attributes.insert("type".to_string(), key.to_string());
    prop.children.push(XMLNode::Text(value.to_string()));
    prop
}

fn decode(doc: &mut Document, text: &str) -> Result<()> {
    let root = Element::parse(text.as_bytes())
        .map_err(|e| TmxError::Malformed(e.to_string()))?;

    if root.name != "tmx" {
        return Err(TmxError::NotTmx(root.name).into());
    }

    let version = root.attributes.get("version").cloned().unwrap_or_default();
    if version != TMX_VERSION {
        error!("rejecting TMX document with version \"{}\"", version);
        return Err(TmxError::UnsupportedVersion { found: version }.into());
    }

    // The version check passed; prior state may now be discarded
    doc.clear_units();
    doc.version = 1.4;

    if let Some(header) = root.get_child("header") {
        for (key, value) in &header.attributes {
            doc.properties.insert(key.clone(), value.clone());
        }
        if let Some(srclang) = header.attributes.get("srclang") {
            doc.source_locale = srclang.clone();
        }
        if let Some(adminlang) = header.attributes.get("adminlang") {
            doc.admin_locale = adminlang.clone();
        }

        for prop in child_elements(header, "prop") {
            match prop.attributes.get("type") {
                Some(key) => {
                    let value = prop.get_text().unwrap_or_default().to_string();
                    doc.properties.insert(key.clone(), value);
                }
                None => warn!("header prop element without a type attribute; skipping"),
            }
        }
    }

    if let Some(body) = root.get_child("body") {
        for tu in child_elements(body, "tu") {
            let unit = decode_unit(doc, tu);
            doc.add_translation_unit(unit);
        }
    }

    Ok(())
}

fn decode_unit(doc: &Document, tu: &Element) -> TranslationUnit {
    let source_locale = tu
        .attributes
        .get("srclang")
        .cloned()
        .or_else(|| non_empty(doc.source_locale()))
        .or_else(|| non_empty(doc.admin_locale()))
        .unwrap_or_else(|| "en".to_string());

    let mut unit = TranslationUnit::new(&source_locale, "", doc.datatype());

    for prop in child_elements(tu, "prop") {
        match prop.attributes.get("type") {
            Some(key) => {
                let value = prop.get_text().unwrap_or_default().to_string();
                unit.set_property(key, &value);
            }
            None => warn!("tu prop element without a type attribute; skipping"),
        }
    }

    if let Some(note) = tu.get_child("note") {
        unit.comment = Some(note.get_text().unwrap_or_default().to_string());
    }

    for tuv in child_elements(tu, "tuv") {
        if tuv.attributes.is_empty() {
            warn!("tuv element with no attributes; dropping variant");
            continue;
        }

        // xml:lang parses under its local name, so this covers both plain
        // lang and the reserved-namespace form
        let Some(locale) = tuv
            .attributes
            .get("lang")
            .or_else(|| tuv.attributes.get("xml:lang"))
        else {
            continue;
        };

        let string = tuv
            .get_child("seg")
            .and_then(|seg| seg.get_text())
            .unwrap_or_default()
            .to_string();

        // Pre/post context props may carry nested markup; only their
        // extracted text survives, stored on the unit, last one wins
        for prop in child_elements(tuv, "prop") {
            match prop.attributes.get("type").map(String::as_str) {
                Some("x-context-pre") => {
                    unit.pre = Some(collect_text(prop).trim_start().to_string());
                }
                Some("x-context-post") => {
                    unit.post = Some(collect_text(prop).trim_start().to_string());
                }
                _ => {}
            }
        }

        let variant = Variant::new(locale, &string);

        // The embedded source-language tuv is authoritative over whatever
        // the tu attribute said the source string was
        if variant.locale == unit.source_locale {
            unit.source = variant.string.clone();
            unit.source_locale = variant.locale.clone();
        }

        unit.add_variant(variant);
    }

    unit
}

fn child_elements<'a>(parent: &'a Element, name: &'a str) -> impl Iterator<Item = &'a Element> {
    parent.children.iter().filter_map(move |node| match node {
        XMLNode::Element(el) if el.name == name => Some(el),
        _ => None,
    })
}

fn collect_text(element: &Element) -> String {
    let mut out = String::new();
    for node in &element.children {
        match node {
            XMLNode::Text(text) | XMLNode::CData(text) => out.push_str(text),
            XMLNode::Element(child) => out.push_str(&collect_text(child)),
            _ => {}
        }
    }
    out
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}
