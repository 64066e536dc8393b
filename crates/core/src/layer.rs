//! Layer descriptors for an external polygon renderer.
//!
//! The descriptors serialize (camelCase) to the solid-polygon layer props a
//! web visualization host expects, in either data-supply mode:
//!
//! ```text
//! objects: { "id": "solid-polygon-layer", "data": [{ "contour": [[0,0],...], "color": [..], "elevation": 7 }, ...], ... }
//! binary:  { "id": "solid-polygon-layer-binary", "_normalize": false,
//!            "data": { "length": 4, "startIndices": [0,5,10,15],
//!                      "attributes": { "getPolygon":   { "value": [...], "size": 2 },
//!                                      "getFillColor": { "value": [...], "size": 4 },
//!                                      "getElevation": { "value": [...], "size": 1 } } }, ... }
//! ```
//!
//! Descriptors borrow the frame data, so building one per displayed frame is
//! cheap.

use serde::Serialize;

use crate::grid::Frame;
use crate::pack::PackedFrame;
use crate::types::{COLOR_SIZE, ELEVATION_SCALE, ELEVATION_SIZE, POSITION_SIZE};

/// Default basemap style (Carto Positron).
pub const POSITRON_STYLE: &str = "https://basemaps.cartocdn.com/gl/positron-gl-style/style.json";

const OBJECTS_LAYER_ID: &str = "solid-polygon-layer";
const BINARY_LAYER_ID: &str = "solid-polygon-layer-binary";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSystem {
    /// Plain x/y units, no geographic projection.
    Cartesian,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor<'a> {
    pub id: &'static str,
    pub coordinate_system: CoordinateSystem,
    pub data: LayerData<'a>,
    pub filled: bool,
    pub extruded: bool,
    pub elevation_scale: u32,
    #[serde(rename = "_normalize", skip_serializing_if = "Option::is_none")]
    pub normalize: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LayerData<'a> {
    Objects(&'a Frame),
    Binary(BinaryData<'a>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryData<'a> {
    pub length: usize,
    pub start_indices: &'a [u32],
    pub attributes: BinaryAttributes<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryAttributes<'a> {
    pub get_polygon: Attribute<'a, f32>,
    pub get_fill_color: Attribute<'a, u8>,
    pub get_elevation: Attribute<'a, u8>,
}

/// One flat attribute buffer and its per-vertex component count.
#[derive(Debug, Clone, Serialize)]
pub struct Attribute<'a, T> {
    pub value: &'a [T],
    pub size: usize,
}

impl<'a> LayerDescriptor<'a> {
    /// Layer fed with per-cell records.
    pub fn objects(frame: &'a Frame) -> Self {
        Self {
            id: OBJECTS_LAYER_ID,
            coordinate_system: CoordinateSystem::Cartesian,
            data: LayerData::Objects(frame),
            filled: true,
            extruded: true,
            elevation_scale: ELEVATION_SCALE,
            normalize: None,
        }
    }

    /// Layer fed with flat attribute buffers.
    ///
    /// The buffers are already split per polygon by `start_indices`, so the
    /// renderer is told not to normalize them.
    pub fn binary(packed: &'a PackedFrame) -> Self {
        Self {
            id: BINARY_LAYER_ID,
            coordinate_system: CoordinateSystem::Cartesian,
            data: LayerData::Binary(BinaryData {
                length: packed.polygon_count(),
                start_indices: packed.start_indices(),
                attributes: BinaryAttributes {
                    get_polygon: Attribute {
                        value: packed.polygons(),
                        size: POSITION_SIZE,
                    },
                    get_fill_color: Attribute {
                        value: packed.colors(),
                        size: COLOR_SIZE,
                    },
                    get_elevation: Attribute {
                        value: packed.elevations(),
                        size: ELEVATION_SIZE,
                    },
                },
            }),
            filled: true,
            extruded: true,
            elevation_scale: ELEVATION_SCALE,
            normalize: Some(false),
        }
    }

    /// Number of polygons the layer draws.
    pub fn length(&self) -> usize {
        match &self.data {
            LayerData::Objects(frame) => frame.len(),
            LayerData::Binary(data) => data.length,
        }
    }
}

/// Camera position the host starts from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InitialViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Default for InitialViewState {
    fn default() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            zoom: 2.0,
            pitch: 0.0,
            bearing: 0.0,
        }
    }
}

/// Basemap settings handed to the map display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    #[serde(rename = "mapStyle")]
    pub style: String,
    #[serde(rename = "mapboxAccessToken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl MapConfig {
    pub fn has_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style: POSITRON_STYLE.to_string(),
            access_token: None,
        }
    }
}

/// Everything an external host needs to draw one frame over the basemap.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDescriptor<'a> {
    pub initial_view_state: InitialViewState,
    pub map: &'a MapConfig,
    pub layers: Vec<LayerDescriptor<'a>>,
}

impl<'a> DeckDescriptor<'a> {
    pub fn new(map: &'a MapConfig, layer: LayerDescriptor<'a>) -> Self {
        Self {
            initial_view_state: InitialViewState::default(),
            map,
            layers: vec![layer],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::pack::pack;
    use serde_json::{json, Value};

    fn frame() -> Frame {
        Frame::from_cells(vec![Cell::square(0, 0, 2, [1, 2, 3, 150], 9)])
    }

    #[test]
    fn test_objects_layer_json() {
        let frame = frame();
        let v: Value = serde_json::to_value(LayerDescriptor::objects(&frame)).unwrap();

        assert_eq!(v["id"], "solid-polygon-layer");
        assert_eq!(v["coordinateSystem"], "cartesian");
        assert_eq!(v["extruded"], true);
        assert_eq!(v["filled"], true);
        assert_eq!(v["elevationScale"], 1000);
        assert!(v.get("_normalize").is_none());
        assert_eq!(
            v["data"],
            json!([{
                "contour": [[0, 0], [0, 2], [2, 2], [2, 0], [0, 0]],
                "color": [1, 2, 3, 150],
                "elevation": 9
            }])
        );
    }

    #[test]
    fn test_binary_layer_json() {
        let packed = pack(&frame());
        let layer = LayerDescriptor::binary(&packed);
        assert_eq!(layer.length(), 1);

        let v: Value = serde_json::to_value(&layer).unwrap();
        assert_eq!(v["id"], "solid-polygon-layer-binary");
        assert_eq!(v["_normalize"], false);
        assert_eq!(v["data"]["length"], 1);
        assert_eq!(v["data"]["startIndices"], json!([0]));

        let attrs = &v["data"]["attributes"];
        assert_eq!(attrs["getPolygon"]["size"], 2);
        assert_eq!(attrs["getPolygon"]["value"].as_array().unwrap().len(), 10);
        assert_eq!(attrs["getFillColor"]["size"], 4);
        assert_eq!(attrs["getFillColor"]["value"].as_array().unwrap().len(), 20);
        assert_eq!(attrs["getElevation"]["size"], 1);
        assert_eq!(attrs["getElevation"]["value"], json!([9, 9, 9, 9, 9]));
    }

    #[test]
    fn test_deck_descriptor_json() {
        let frame = frame();
        let map = MapConfig {
            style: POSITRON_STYLE.to_string(),
            access_token: Some("pk.test".to_string()),
        };
        let deck = DeckDescriptor::new(&map, LayerDescriptor::objects(&frame));
        let v: Value = serde_json::to_value(&deck).unwrap();

        assert_eq!(v["initialViewState"]["zoom"], 2.0);
        assert_eq!(v["map"]["mapStyle"], POSITRON_STYLE);
        assert_eq!(v["map"]["mapboxAccessToken"], "pk.test");
        assert_eq!(v["layers"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_map_token_presence() {
        let mut map = MapConfig::default();
        assert!(!map.has_token());
        map.access_token = Some(String::new());
        assert!(!map.has_token());
        map.access_token = Some("pk.x".to_string());
        assert!(map.has_token());
    }
}
