// File: src/model/property.rs
//! Recognized calendar properties and the per-block set the importer
//! fills while scanning VEVENT lines.

use std::collections::HashMap;
use strum::{EnumIter, IntoEnumIterator};

/// Property names the importer interprets. Lines carrying any other
/// name are ignored.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, EnumIter)]
pub enum PropertyName {
    Summary,
    DtStart,
    DtEnd,
    Description,
    Categories,
    Rrule,
}

impl PropertyName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "SUMMARY",
            Self::DtStart => "DTSTART",
            Self::DtEnd => "DTEND",
            Self::Description => "DESCRIPTION",
            Self::Categories => "CATEGORIES",
            Self::Rrule => "RRULE",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let upper = key.trim().to_ascii_uppercase();
        Self::iter().find(|name| name.as_str() == upper)
    }
}

/// One parsed property line: the raw value, its parameters, and whether
/// a VALUE=DATE parameter marked it date-only.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ParsedProperty {
    pub value: String,
    pub is_date_only: bool,
    pub params: Vec<(String, String)>,
}

impl ParsedProperty {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Splits one content line into a recognized property. The name part is
/// everything before the first colon; `;`-separated parameters inside it
/// are captured separately. Returns `None` for unrecognized names and
/// for lines without a colon.
pub fn parse_property_line(line: &str) -> Option<(PropertyName, ParsedProperty)> {
    let (head, value) = line.split_once(':')?;

    let mut parts = head.split(';');
    let name = PropertyName::from_key(parts.next()?)?;

    let mut prop = ParsedProperty {
        value: value.to_string(),
        ..Default::default()
    };
    for param in parts {
        let (key, param_value) = match param.split_once('=') {
            Some((key, param_value)) => (key.trim(), param_value.trim()),
            None => (param.trim(), ""),
        };
        if key.eq_ignore_ascii_case("VALUE") && param_value.eq_ignore_ascii_case("DATE") {
            prop.is_date_only = true;
        }
        prop.params.push((key.to_string(), param_value.to_string()));
    }
    Some((name, prop))
}

/// The recognized properties of one VEVENT block. When a name repeats
/// inside a block, the later line wins.
#[derive(Debug, Default)]
pub struct PropertySet {
    entries: HashMap<PropertyName, ParsedProperty>,
}

impl PropertySet {
    pub fn insert(&mut self, name: PropertyName, prop: ParsedProperty) {
        self.entries.insert(name, prop);
    }

    pub fn contains(&self, name: PropertyName) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn get(&self, name: PropertyName) -> Option<&ParsedProperty> {
        self.entries.get(&name)
    }

    pub fn value(&self, name: PropertyName) -> Option<&str> {
        self.entries.get(&name).map(|p| p.value.as_str())
    }

    /// Appends folded-continuation text to a stored property, verbatim.
    pub fn append_value(&mut self, name: PropertyName, extra: &str) {
        if let Some(prop) = self.entries.get_mut(&name) {
            prop.value.push_str(extra);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for name in PropertyName::iter() {
            assert_eq!(PropertyName::from_key(name.as_str()), Some(name));
        }
        assert_eq!(PropertyName::from_key("dtstart"), Some(PropertyName::DtStart));
        assert_eq!(PropertyName::from_key("UID"), None);
    }

    #[test]
    fn test_plain_line() {
        let (name, prop) = parse_property_line("SUMMARY:Team Sync").unwrap();
        assert_eq!(name, PropertyName::Summary);
        assert_eq!(prop.value, "Team Sync");
        assert!(!prop.is_date_only);
        assert!(prop.params.is_empty());
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let (_, prop) = parse_property_line("DESCRIPTION:Agenda: 1) sync 2) plan").unwrap();
        assert_eq!(prop.value, "Agenda: 1) sync 2) plan");
    }

    #[test]
    fn test_date_only_parameter() {
        let (name, prop) = parse_property_line("DTSTART;VALUE=DATE:19800315").unwrap();
        assert_eq!(name, PropertyName::DtStart);
        assert!(prop.is_date_only);
        assert_eq!(prop.value, "19800315");
        assert_eq!(prop.param("VALUE"), Some("DATE"));
    }

    #[test]
    fn test_other_parameters_kept() {
        let (_, prop) = parse_property_line("DTSTART;TZID=Europe/Brussels:20240610T140000").unwrap();
        assert!(!prop.is_date_only);
        assert_eq!(prop.param("TZID"), Some("Europe/Brussels"));
    }

    #[test]
    fn test_unrecognized_or_bare_lines() {
        assert!(parse_property_line("UID:abc-123").is_none());
        assert!(parse_property_line("no colon here").is_none());
    }

    #[test]
    fn test_later_line_wins() {
        let mut set = PropertySet::default();
        for line in ["SUMMARY:First", "SUMMARY:Second"] {
            let (name, prop) = parse_property_line(line).unwrap();
            set.insert(name, prop);
        }
        assert_eq!(set.value(PropertyName::Summary), Some("Second"));
    }
}
