use ecam_core::ProductDetail;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::query::{encode_query, QueryParams};

/// The chosen value for each choice option, in option-declaration order.
///
/// Order matters: it is the order the values are written back to the query
/// string, so a shared link always lists options the way the product does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedOptions {
    entries: Vec<(String, String)>,
}

impl SelectedOptions {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets the value for `name`, leaving every other entry untouched.
    ///
    /// A name with no entry yet is appended.
    pub fn select(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => value.clone_into(&mut entry.1),
            None => self.entries.push((name.to_owned(), value.to_owned())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Form-encoded query string for these selections, without a leading `?`.
    #[must_use]
    pub fn to_query(&self) -> String {
        encode_query(self.iter())
    }
}

impl Serialize for SelectedOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Picks the starting selection for a freshly loaded product.
///
/// For each choice option with at least one allowed value, the query value is
/// used when it is one of the allowed values; otherwise the first declared
/// value is. Options without values get no entry. Bad or missing query values
/// fall back silently.
#[must_use]
pub fn initialize(product: &ProductDetail, query: &QueryParams) -> SelectedOptions {
    let mut selected = SelectedOptions::default();
    for option in &product.choice_options {
        let Some(default) = option.allowed_values.first() else {
            continue;
        };
        let value = query
            .get(&option.name)
            .filter(|v| option.allowed_values.iter().any(|allowed| allowed == v))
            .unwrap_or(default.as_str());
        selected.select(&option.name, value);
    }
    selected
}
