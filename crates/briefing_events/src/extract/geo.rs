use serde_json::Value;

use super::{EventPayload, Extracted};
use crate::briefing::{finite_or_zero, GeoFeature, Geometry};

fn axis(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).map(finite_or_zero).unwrap_or(0.0)
}

// Keeps the nesting of a GeoJSON coordinate array; any leaf that is not a
// number becomes 0.
fn sanitize_coordinates(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(sanitize_coordinates).collect()),
        Value::Number(n) => Value::from(n.as_f64().map(finite_or_zero).unwrap_or(0.0)),
        _ => Value::from(0.0),
    }
}

fn from_geometry(geometry: &serde_json::Map<String, Value>) -> GeoFeature {
    let kind = geometry
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("Point")
        .to_string();
    let coordinates = match geometry.get("coordinates") {
        Some(coords @ Value::Array(_)) => sanitize_coordinates(coords),
        _ => Value::from(vec![0.0, 0.0]),
    };
    GeoFeature::new(Geometry { kind, coordinates })
}

/// `geometry` objects pass through; `coordinates.{longitude, latitude}`
/// becomes a Point. Missing or non-numeric axes read as 0.
pub fn geo_reference(payload: &EventPayload<'_>) -> Extracted<Option<GeoFeature>> {
    if let Some(Value::Object(geometry)) = payload.field("geometry") {
        return Extracted::Found(Some(from_geometry(geometry)));
    }
    if let Some(Value::Object(coords)) = payload.field("coordinates") {
        let feature = GeoFeature::point(axis(coords.get("longitude")), axis(coords.get("latitude")));
        return Extracted::Found(Some(feature));
    }
    Extracted::Fallback(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawAgentEvent;

    fn run(text: &str) -> Extracted<Option<GeoFeature>> {
        let raw = RawAgentEvent::default().with_author("burn-analyst").with_text(text);
        geo_reference(&EventPayload::new(&raw))
    }

    #[test]
    fn missing_latitude_defaults_to_zero() {
        let feature = run(r#"{"coordinates":{"longitude":-119.5}}"#)
            .into_value()
            .unwrap();
        assert_eq!(feature.geometry.kind, "Point");
        assert_eq!(feature.coordinate_values(), vec![-119.5, 0.0]);
    }

    #[test]
    fn string_axes_coerce_to_zero() {
        let feature = run(r#"{"coordinates":{"longitude":"west","latitude":37.2}}"#)
            .into_value()
            .unwrap();
        assert_eq!(feature.coordinate_values(), vec![0.0, 37.2]);
    }

    #[test]
    fn geometry_passes_through_with_sanitized_leaves() {
        let feature = run(
            r#"{"geometry":{"type":"Polygon","coordinates":[[[-120,38],[-119.5,"x"],[-120,38]]]}}"#,
        )
        .into_value()
        .unwrap();
        assert_eq!(feature.geometry.kind, "Polygon");
        assert_eq!(
            feature.coordinate_values(),
            vec![-120.0, 38.0, -119.5, 0.0, -120.0, 38.0]
        );
        assert!(feature.geometry.coordinates[0][0].is_array());
    }

    #[test]
    fn no_shape_means_no_reference() {
        assert_eq!(run("Fire near Sequoia"), Extracted::Fallback(None));
        assert_eq!(run(r#"{"coordinates":[1,2]}"#), Extracted::Fallback(None));
    }
}
