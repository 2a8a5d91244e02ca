use std::{fs, path::Path};

use anyhow::Context;

use super::feature::Feature;

/// Write `features` to `output_filepath` as a GeoJSON FeatureCollection with string properties.
pub fn write_features_to_geojson(features: &[Feature], output_filepath: &Path) -> anyhow::Result<()> {
    let feature_collection: geojson::FeatureCollection = features
        .iter()
        .map(|feature| {
            let mut geojson_feature = geojson::Feature::from(geojson::Geometry::new(
                geojson::Value::from(&feature.geometry),
            ));
            for (key, value) in &feature.properties {
                geojson_feature.set_property(key.as_str(), value.as_str());
            }
            geojson_feature
        })
        .collect();
    let geojson_contents = geojson::GeoJson::from(feature_collection);
    log::info!(
        "Writing {} features to {:?}",
        features.len(),
        output_filepath
    );
    fs::write(output_filepath, geojson_contents.to_string())
        .with_context(|| format!("Writing GeoJSON to {:?}", output_filepath))
}
