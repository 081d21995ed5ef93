use freight_scene::core::seeded_or_not::SeededOrNot;
use freight_scene::management::config_loading::{load_scene_config, DEFAULT_CONFIG_PATH};
use freight_scene::serialization::scene_config::{IconKind, SceneConfig};

fn shipped_config() -> SceneConfig {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
    load_scene_config(path).unwrap()
}

#[test]
fn shipped_config_parses() {
    let config = shipped_config();
    assert_eq!(config.seed, SeededOrNot::Seeded(132));
    assert_eq!(config.truck.road.len(), 7);
    assert_eq!(config.routes.pairs.len(), 3);
    assert_eq!(config.globe.ports.len(), 5);
    let kinds: Vec<IconKind> = config.convoy.icons.iter().map(|icon| icon.kind).collect();
    assert_eq!(kinds, vec![IconKind::Truck, IconKind::Ship, IconKind::Plane]);
}

#[test]
fn omitted_fields_fall_back_to_defaults() {
    let config = shipped_config();
    let defaults = SceneConfig::default();
    assert_eq!(config.truck.wheel_offsets, defaults.truck.wheel_offsets);
    assert_eq!(config.particles.extent, defaults.particles.extent);
    assert_eq!(config.crates.spread, defaults.crates.spread);
    assert_eq!(config.globe.ring_count, defaults.globe.ring_count);
}
