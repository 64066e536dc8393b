use serde_json::{json, Value};

use tui_polygrid::core::{pack, Cell, DeckDescriptor, Frame, LayerDescriptor, MapConfig};

fn frame() -> Frame {
    Frame::from_cells(vec![
        Cell::square(0, 0, 2, [1, 2, 3, 150], 4),
        Cell::square(0, 2, 2, [5, 6, 7, 150], 8),
    ])
}

#[test]
fn objects_layer_lists_every_cell() {
    let frame = frame();
    let value = serde_json::to_value(LayerDescriptor::objects(&frame)).unwrap();

    assert_eq!(value["id"], "solid-polygon-layer");
    assert_eq!(value["coordinateSystem"], "cartesian");
    assert_eq!(value["filled"], true);
    assert_eq!(value["extruded"], true);
    assert_eq!(value["elevationScale"], 1000);
    assert!(value.get("_normalize").is_none());

    let data = value["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(
        data[0],
        json!({
            "contour": [[0, 0], [0, 2], [2, 2], [2, 0], [0, 0]],
            "color": [1, 2, 3, 150],
            "elevation": 4
        })
    );
}

#[test]
fn binary_layer_carries_attribute_buffers() {
    let frame = frame();
    let packed = pack(&frame);
    let value = serde_json::to_value(LayerDescriptor::binary(&packed)).unwrap();

    assert_eq!(value["id"], "solid-polygon-layer-binary");
    assert_eq!(value["_normalize"], false);

    let data = &value["data"];
    assert_eq!(data["length"], 2);
    assert_eq!(data["startIndices"], json!([0, 5]));

    let attributes = &data["attributes"];
    assert_eq!(attributes["getPolygon"]["size"], 2);
    assert_eq!(attributes["getFillColor"]["size"], 4);
    assert_eq!(attributes["getElevation"]["size"], 1);
    assert_eq!(attributes["getPolygon"]["value"].as_array().unwrap().len(), 20);
    assert_eq!(attributes["getFillColor"]["value"].as_array().unwrap().len(), 40);
    assert_eq!(attributes["getElevation"]["value"].as_array().unwrap().len(), 10);
}

#[test]
fn deck_descriptor_includes_map_and_view() {
    let frame = frame();
    let map = MapConfig {
        access_token: Some("pk.test".to_string()),
        ..Default::default()
    };
    let deck = DeckDescriptor::new(&map, LayerDescriptor::objects(&frame));
    let value: Value = serde_json::to_value(&deck).unwrap();

    assert_eq!(
        value["initialViewState"],
        json!({ "longitude": 0.0, "latitude": 0.0, "zoom": 2.0, "pitch": 0.0, "bearing": 0.0 })
    );
    assert_eq!(
        value["map"]["mapStyle"],
        "https://basemaps.cartocdn.com/gl/positron-gl-style/style.json"
    );
    assert_eq!(value["map"]["mapboxAccessToken"], "pk.test");
    assert_eq!(value["layers"].as_array().unwrap().len(), 1);
}

#[test]
fn missing_token_is_omitted() {
    let map = MapConfig::default();
    let value = serde_json::to_value(&map).unwrap();
    assert!(value.get("mapboxAccessToken").is_none());
    assert!(!map.has_token());
}
