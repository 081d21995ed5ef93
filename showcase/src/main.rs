use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;
use freight_scene::core::scene_plugin::FreightScenePlugin;
use freight_scene::management::config_loading::{load_or_default, DEFAULT_CONFIG_PATH};
use freight_scene::spawning::scene_spawning::{SceneDisabled, FALLBACK_MESSAGE};

mod input_manager;
mod camera;
mod generation;

fn main() {
    let mut app = App::new();

    // Setup default plugins
    app.add_plugins(
        DefaultPlugins
            .set(bevy::log::LogPlugin {
                filter: "warn,freight_scene=info".to_string(),
                level: bevy::log::Level::INFO,
                ..default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Freight Network".into(),
                    resolution: (1280.0, 720.0).into(),
                    ..default()
                }),
                ..default()
            })
            .build(),
    );

    // Config must be in place before the scene plugin picks its seed
    app.insert_resource(load_or_default(DEFAULT_CONFIG_PATH));
    app.insert_resource(ClearColor(Color::srgb_u8(0x03, 0x08, 0x14)));

    // Setup inspector plugins
    app.add_plugins(
        WorldInspectorPlugin::default().run_if(bevy::input::common_conditions::input_toggle_active(false, KeyCode::Escape)),
    );

    app.add_plugins(FreightScenePlugin);
    app.add_systems(Update, generation::reseed_on_space);
    app.add_systems(Update, show_fallback_banner.run_if(resource_added::<SceneDisabled>));

    // Setup input system
    app.add_plugins(crate::input_manager::InputPlugin);

    // Setup camera
    app.add_plugins(crate::camera::CameraPlugin);

    app.run();
}

// Narrow viewports get a flat title card instead of the 3D scene.
fn show_fallback_banner(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .insert(Name::new("FallbackBanner"))
        .with_children(|parent| {
            parent.spawn((
                Text::new(FALLBACK_MESSAGE),
                TextFont { font_size: 28.0, ..default() },
                TextColor(Color::srgb_u8(0xff, 0xb7, 0x03)),
            ));
        });
}
