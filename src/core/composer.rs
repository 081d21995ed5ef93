use std::sync::Arc;
use bevy::log::debug;
use bevy::math::Vec3;
use rand::Rng;
use crate::core::entity_state::{Axis, Bob, Conveyor, MovingEntity, ParticleField, Spinner, Sway};
use crate::core::geo::route_arc;
use crate::core::path::Path;
use crate::core::path_error::InvalidPathError;
use crate::core::scene::Scene;
use crate::core::transform::SlotId;
use crate::serialization::scene_config::{IconKind, SceneConfig};

#[derive(Debug, Clone)]
pub struct RouteLayout {
    /// In globe-group local space.
    pub path: Arc<Path>,
    pub shipment: SlotId,
}

#[derive(Debug, Clone)]
pub struct CrateLayout {
    pub slot: SlotId,
    pub position: Vec3,
}

/// Which slots of a composed [`Scene`] belong to which scene object.
#[derive(Debug, Clone)]
pub struct SceneLayout {
    pub globe_group: SlotId,
    pub globe: SlotId,
    pub routes: Vec<RouteLayout>,
    pub road: Arc<Path>,
    pub truck: SlotId,
    pub wheels: Vec<SlotId>,
    pub particles: SlotId,
    pub crates: Vec<CrateLayout>,
    pub convoy: Vec<(IconKind, SlotId)>,
}

pub fn compose_scene<R: Rng + ?Sized>(
    config: &SceneConfig,
    rng: &mut R,
) -> Result<(Scene, SceneLayout), InvalidPathError> {
    let mut scene = Scene::new(config.clock_step);
    let globe_config = &config.globe;

    let globe_group = scene.add(Bob {
        base: globe_config.center,
        axis: Axis::Y,
        oscillation: globe_config.bob,
    });
    let globe = scene.add(Spinner {
        angles: Vec3::ZERO,
        rate: Vec3::new(0.0, globe_config.spin_rate, 0.0),
        rate_wobble: Some(globe_config.spin_wobble),
        sway: Some(Sway { axis: Axis::X, oscillation: globe_config.tilt }),
    });

    let routes = config
        .routes
        .pairs
        .iter()
        .map(|pair| {
            let points = route_arc(pair.from, pair.to, globe_config.surface_radius, config.routes.lift);
            let path = Arc::new(Path::new(points)?);
            let shipment = scene.add(
                MovingEntity::new(path.clone(), config.routes.shipment_speed)
                    .with_jitter(config.routes.shipment_jitter)
                    .with_progress(rng.gen::<f32>()),
            );
            Ok(RouteLayout { path, shipment })
        })
        .collect::<Result<Vec<_>, InvalidPathError>>()?;

    let truck_config = &config.truck;
    let road = Arc::new(Path::new(truck_config.road.clone())?);
    let truck = scene.add(MovingEntity::new(road.clone(), truck_config.speed).with_throttle(truck_config.throttle));
    let wheels = truck_config
        .wheel_offsets
        .iter()
        .map(|_| scene.add(Spinner::new(Vec3::new(truck_config.wheel_spin, 0.0, 0.0))))
        .collect();

    let dust = &config.particles;
    let positions = (0..dust.count)
        .map(|_| {
            Vec3::new(
                (rng.gen::<f32>() - 0.5) * dust.extent.x,
                rng.gen::<f32>() * dust.extent.y + dust.floor,
                (rng.gen::<f32>() - 0.5) * dust.extent.z,
            )
        })
        .collect();
    let particles = scene.add(ParticleField {
        positions,
        axis: Axis::X,
        step: dust.step,
        bound: dust.bound,
    });

    let crate_config = &config.crates;
    let crates = (0..crate_config.count)
        .map(|_| {
            let offset = Vec3::new(
                (rng.gen::<f32>() - 0.5) * crate_config.spread.x,
                rng.gen::<f32>() * crate_config.spread.y,
                (rng.gen::<f32>() - 0.5) * crate_config.spread.z,
            );
            CrateLayout {
                slot: scene.add(Spinner::new(crate_config.spin)),
                position: crate_config.center + offset,
            }
        })
        .collect();

    let convoy_config = &config.convoy;
    let scale = convoy_config.scale;
    let convoy = convoy_config
        .icons
        .iter()
        .map(|icon| {
            let lane = scene.add(Conveyor {
                base: convoy_config.origin + Vec3::Y * icon.lane * scale,
                axis: Axis::X,
                speed: icon.speed * scale,
                span: icon.span * scale,
                lead_in: icon.lead_in * scale,
            });
            (icon.kind, lane)
        })
        .collect();

    debug!("composed freight scene with {} slots", scene.len());

    Ok((
        scene,
        SceneLayout {
            globe_group,
            globe,
            routes,
            road,
            truck,
            wheels,
            particles,
            crates,
            convoy,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_prng::WyRand;
    use rand::SeedableRng;
    use crate::core::scene::Animator;

    #[test]
    fn default_config_composes_every_object() {
        let mut rng = WyRand::seed_from_u64(132);
        let (scene, layout) = compose_scene(&SceneConfig::default(), &mut rng).unwrap();

        assert_eq!(layout.routes.len(), 3);
        assert_eq!(layout.wheels.len(), 4);
        assert_eq!(layout.crates.len(), 20);
        assert_eq!(layout.convoy.len(), 3);
        // group, globe, 3 shipments, truck, 4 wheels, particles, 20 crates, 3 icons
        assert_eq!(scene.len(), 2 + 3 + 1 + 4 + 1 + 20 + 3);

        match scene.animator(layout.particles) {
            Some(Animator::Particles(field)) => {
                assert_eq!(field.positions.len(), 220);
                assert!(field.positions.iter().all(|p| p.x.abs() <= 40.0 && p.y >= 0.5 && p.y <= 6.5));
            }
            other => panic!("particles slot holds {other:?}"),
        }
    }

    #[test]
    fn shipments_start_spread_along_their_routes() {
        let mut rng = WyRand::seed_from_u64(9);
        let (scene, layout) = compose_scene(&SceneConfig::default(), &mut rng).unwrap();
        for route in &layout.routes {
            let shipment = scene.mover(route.shipment).unwrap();
            assert!((0.0..1.0).contains(&shipment.progress));
            assert!(Arc::ptr_eq(&shipment.path, &route.path));
        }
        assert!(Arc::ptr_eq(&scene.mover(layout.truck).unwrap().path, &layout.road));
    }

    #[test]
    fn degenerate_road_is_rejected() {
        let mut config = SceneConfig::default();
        config.truck.road = vec![Vec3::ZERO];
        let mut rng = WyRand::seed_from_u64(1);
        let error = compose_scene(&config, &mut rng).unwrap_err();
        assert_eq!(error.control_points, 1);
    }

    #[test]
    fn composition_is_reproducible() {
        let build = || {
            let mut rng = WyRand::seed_from_u64(77);
            let (_, layout) = compose_scene(&SceneConfig::default(), &mut rng).unwrap();
            layout.crates.iter().map(|c| c.position).collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }
}
