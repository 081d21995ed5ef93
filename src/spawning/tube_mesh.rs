use std::f32::consts::TAU;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use crate::core::path::Path;

/// Sweeps a circle of `radius` along `path`.
///
/// Ring orientation is carried from one sample to the next by parallel transport, so the tube
/// does not twist where the curve bends. Produces `(tubular + 1) * (radial + 1)` vertices; the
/// seam column is duplicated so UVs wrap cleanly.
pub fn tube_mesh(path: &Path, tubular_segments: usize, radius: f32, radial_segments: usize) -> Mesh {
    let tubular = tubular_segments.max(1);
    let radial = radial_segments.max(3);

    let tangents: Vec<Vec3> = (0..=tubular)
        .map(|i| path.tangent_at(i as f32 / tubular as f32))
        .collect();
    let normals = transport_normals(&tangents);

    let ring = radial + 1;
    let mut positions = Vec::with_capacity((tubular + 1) * ring);
    let mut vertex_normals = Vec::with_capacity((tubular + 1) * ring);
    let mut uvs = Vec::with_capacity((tubular + 1) * ring);

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32;
        let center = path.point_at(u);
        let normal = normals[i];
        let binormal = tangents[i].cross(normal);

        for j in 0..=radial {
            let v = j as f32 / radial as f32;
            let (sin, cos) = (v * TAU).sin_cos();
            let outward = (normal * cos + binormal * sin).normalize_or_zero();
            positions.push((center + outward * radius).to_array());
            vertex_normals.push(outward.to_array());
            uvs.push([u, v]);
        }
    }

    let mut indices = Vec::with_capacity(tubular * radial * 6);
    for i in 1..=tubular {
        for j in 1..=radial {
            let a = (ring * (i - 1) + (j - 1)) as u32;
            let b = (ring * i + (j - 1)) as u32;
            let c = (ring * i + j) as u32;
            let d = (ring * (i - 1) + j) as u32;
            indices.extend_from_slice(&[a, d, b, b, d, c]);
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vertex_normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

fn transport_normals(tangents: &[Vec3]) -> Vec<Vec3> {
    let mut normals = Vec::with_capacity(tangents.len());
    let first = tangents.first().copied().unwrap_or(Vec3::Z);
    let first = if first == Vec3::ZERO { Vec3::Z } else { first };
    normals.push(first.any_orthonormal_vector());

    for window in tangents.windows(2) {
        let previous = normals[normals.len() - 1];
        let axis = window[0].cross(window[1]);
        let next = if axis.length_squared() > 1e-12 {
            let angle = window[0].dot(window[1]).clamp(-1.0, 1.0).acos();
            Quat::from_axis_angle(axis.normalize(), angle) * previous
        } else {
            previous
        };
        normals.push(next);
    }
    normals
}
