use std::collections::BTreeMap;

/// A geometry with string properties, ready to be written to a geofile. Properties are kept
/// sorted so output files are stable between runs.
#[derive(Debug)]
pub struct Feature {
    pub geometry: geo::Geometry,
    pub properties: BTreeMap<String, String>,
}

impl Feature {
    pub fn new(geometry: impl Into<geo::Geometry>) -> Self {
        Self {
            geometry: geometry.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl ToString) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }
}
