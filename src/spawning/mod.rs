pub mod light_spawning;
pub mod scene_spawning;
pub mod helpers;
pub mod tube_mesh;
