//! CPU side of stencil-then-cover: display list items to vertex ranges.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::ops::Range;

use crate::canvas::{CompositeOp, DisplayList, Rgba, StencilMode};

/// Canvas vertex (NDC position + premultiplied color)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// One display-list item: stencil geometry, then a cover quad
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub composite: CompositeOp,
    pub stencil: StencilMode,
    pub stencil_range: Range<u32>,
    pub cover_range: Range<u32>,
}

/// Canvas pixel to normalized device coordinates on a square canvas of
/// side `side`
pub fn to_ndc(p: Vec2, side: f32) -> [f32; 2] {
    [p.x / side * 2.0 - 1.0, 1.0 - p.y / side * 2.0]
}

pub fn premultiply(color: Rgba) -> [f32; 4] {
    [color.r * color.a, color.g * color.a, color.b * color.a, color.a]
}

/// Fixed-function blend for a composite mode on premultiplied colors.
///
/// Source-over, screen and exclusion are exact. Soft-light is approximated
/// by a multiply-over and color-dodge by additive blending.
pub fn blend_state(op: CompositeOp) -> wgpu::BlendState {
    use wgpu::BlendFactor::*;

    let (src_factor, dst_factor) = match op {
        CompositeOp::SourceOver => (One, OneMinusSrcAlpha),
        CompositeOp::Screen => (One, OneMinusSrc),
        CompositeOp::SoftLight => (Dst, OneMinusSrcAlpha),
        CompositeOp::ColorDodge => (One, One),
        CompositeOp::Exclusion => (OneMinusDst, OneMinusSrc),
    };
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor,
            dst_factor,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: One,
            dst_factor: OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// Flatten a display list into one vertex stream plus per-item ranges
pub fn build_batches(list: &DisplayList, side: f32) -> (Vec<Vertex>, Vec<Batch>) {
    let mut vertices = Vec::new();
    let mut batches = Vec::with_capacity(list.items().len());

    for item in list.items() {
        let Some((lo, hi)) = item.bounds() else {
            continue;
        };

        let stencil_start = vertices.len() as u32;
        vertices.extend(item.triangles.iter().map(|p| Vertex {
            position: to_ndc(*p, side),
            color: [0.0; 4],
        }));
        let cover_start = vertices.len() as u32;

        let color = premultiply(item.color);
        let corners = [
            Vec2::new(lo.x, lo.y),
            Vec2::new(hi.x, lo.y),
            Vec2::new(hi.x, hi.y),
            Vec2::new(lo.x, hi.y),
        ];
        vertices.extend([0, 1, 2, 0, 2, 3].iter().map(|&i| Vertex {
            position: to_ndc(corners[i], side),
            color,
        }));

        batches.push(Batch {
            composite: item.composite,
            stencil: item.stencil,
            stencil_range: stencil_start..cover_start,
            cover_range: cover_start..vertices.len() as u32,
        });
    }

    (vertices, batches)
}
