//! Helpers for reading produced packages back

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

pub type Attrs = BTreeMap<String, String>;

/// Names of every entry in the archive, sorted
pub fn part_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    names
}

/// Contents of one entry, or `None` when the archive lacks it
pub fn try_read_part(bytes: &[u8], path: &str) -> Option<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entry = archive.by_name(path).ok()?;
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    Some(content)
}

pub fn read_part(bytes: &[u8], path: &str) -> String {
    try_read_part(bytes, path).unwrap_or_else(|| panic!("missing part {}", path))
}

/// Attributes of every `name` element, in document order
pub fn elements(xml: &str, name: &str) -> Vec<Attrs> {
    let mut reader = Reader::from_str(xml);
    let mut found = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == name.as_bytes() => {
                let mut attrs = Attrs::new();
                for attr in e.attributes() {
                    let attr = attr.unwrap();
                    let key = String::from_utf8(attr.key.as_ref().to_vec()).unwrap();
                    attrs.insert(key, attr.unescape_value().unwrap().into_owned());
                }
                found.push(attrs);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    found
}

/// `r` attribute of every `<row>`
pub fn row_indices(sheet_xml: &str) -> Vec<u32> {
    elements(sheet_xml, "row")
        .iter()
        .map(|row| row["r"].parse().unwrap())
        .collect()
}

/// Cell address to stored text (`<t>` for inline strings, `<v>` otherwise)
pub fn cell_values(sheet_xml: &str) -> BTreeMap<String, String> {
    let mut reader = Reader::from_str(sheet_xml);
    let mut values = BTreeMap::new();
    let mut current: Option<String> = None;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"c" => {
                let reference = e.try_get_attribute("r").unwrap().unwrap();
                let reference = reference.unescape_value().unwrap().into_owned();
                values.insert(reference.clone(), String::new());
                current = Some(reference);
            }
            Event::Text(text) => {
                if let Some(reference) = &current {
                    let text = text.unescape().unwrap();
                    if let Some(value) = values.get_mut(reference) {
                        value.push_str(&text);
                    }
                }
            }
            Event::End(e) if e.name().as_ref() == b"c" => current = None,
            Event::Eof => break,
            _ => {}
        }
    }
    values
}
