use bo_derive::api_model;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One guided walkthrough as read from a tour file.
///
/// Only `alias` is interpreted; the whole JSON object (steps, culture, group, ...) is kept
/// and written back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct BackOfficeTour {
    alias: String,
    data: Map<String, Value>,
}

impl BackOfficeTour {
    /// Builds a tour from its alias and extra fields. `alias` always wins over a key in `data`.
    pub fn new(alias: impl Into<String>, mut data: Map<String, Value>) -> Self {
        let alias = alias.into();
        data.insert("alias".to_owned(), Value::String(alias.clone()));
        Self { alias, data }
    }

    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The complete JSON object, `alias` included.
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl Serialize for BackOfficeTour {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BackOfficeTour {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = Map::<String, Value>::deserialize(deserializer)?;
        let alias = match data.get("alias") {
            Some(Value::String(alias)) => alias.clone(),
            Some(_) => return Err(D::Error::custom("tour alias must be a string")),
            None => return Err(D::Error::missing_field("alias")),
        };
        Ok(Self { alias, data })
    }
}

/// The tours that survived filtering for one file.
///
/// Never constructed with an empty `tours` list by the catalog.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct BackOfficeTourFile {
    /// File name without the `.json` extension
    pub file_name: String,
    /// Owning plugin, `null` for core tours
    pub plugin_name: Option<String>,
    /// Tour definitions in file order
    #[cfg_attr(feature = "server", schema(value_type = Vec<Object>))]
    pub tours: Vec<BackOfficeTour>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tour_keeps_unknown_fields_verbatim() {
        let raw = json!({
            "alias": "intro",
            "name": "Introduction",
            "steps": [{ "title": "Welcome", "element": "#main" }]
        });

        let tour: BackOfficeTour = serde_json::from_value(raw.clone()).expect("valid tour");

        assert_eq!(tour.alias(), "intro");
        assert_eq!(serde_json::to_value(&tour).expect("serialize"), raw);
    }

    #[test]
    fn tour_requires_a_string_alias() {
        let missing = serde_json::from_value::<BackOfficeTour>(json!({ "name": "x" }));
        assert!(missing.is_err());

        let numeric = serde_json::from_value::<BackOfficeTour>(json!({ "alias": 3 }));
        assert!(numeric.is_err());
    }

    #[test]
    fn tour_file_serializes_in_camel_case_with_null_plugin() {
        let file = BackOfficeTourFile {
            file_name: "welcome".to_owned(),
            plugin_name: None,
            tours: vec![BackOfficeTour::new("intro", Map::new())],
        };

        let value = serde_json::to_value(&file).expect("serialize");
        assert_eq!(
            value,
            json!({ "fileName": "welcome", "pluginName": null, "tours": [{ "alias": "intro" }] })
        );
    }
}
