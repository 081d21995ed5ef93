use bevy::prelude::*;
use bevy_prng::WyRand;
use rand_core::SeedableRng;
use crate::core::seeded_or_not::SeededOrNot;

/// Seeded generator behind every random draw the scene makes (jitter, spawn scatter).
#[derive(Resource)]
pub struct GenRng(WyRand);

impl GenRng {
    pub fn new(seed: u64) -> Self {
        GenRng(WyRand::seed_from_u64(seed))
    }

    pub fn from_choice(choice: &SeededOrNot) -> Self {
        GenRng::new(choice.resolve())
    }

    pub fn rng_mut(&mut self) -> &mut WyRand {
        &mut self.0
    }
}

/// Hex colour as used in the palette constants, opaque.
pub fn hex(rgb: u32) -> Color {
    Color::srgb_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub fn euler_rotation(angles: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = GenRng::new(132);
        let mut b = GenRng::from_choice(&SeededOrNot::Seeded(132));
        let xs: Vec<f32> = (0..8).map(|_| a.rng_mut().gen()).collect();
        let ys: Vec<f32> = (0..8).map(|_| b.rng_mut().gen()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn hex_splits_channels() {
        assert_eq!(hex(0xffb703), Color::srgb_u8(0xff, 0xb7, 0x03));
    }

    #[test]
    fn euler_matches_single_axis_rotation() {
        let q = euler_rotation(Vec3::new(0.0, 1.0, 0.0));
        assert!(q.abs_diff_eq(Quat::from_rotation_y(1.0), 1e-5));
    }
}
