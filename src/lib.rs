pub mod core {
    pub mod components;
    pub mod composer;
    pub mod driver;
    pub mod entity_state;
    pub mod geo;
    pub mod path;
    pub mod path_error;
    pub mod scene;
    pub mod scene_plugin;
    pub mod seeded_or_not;
    pub mod transform;
}

pub mod management {
    pub mod config_loading;
}

pub mod serialization {
    pub mod scene_config;
}

pub mod spawning;

pub mod systems {
    pub mod animation;
}
