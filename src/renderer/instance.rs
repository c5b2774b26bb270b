//! Per-object instance data for rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::{GameObject, Rgb};

/// One object, laid out for a GPU instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectInstance {
    /// Center in play-area pixels
    pub center: [f32; 2],
    /// Drawn radius (half size times breathing scale)
    pub radius: f32,
    pub rotation: f32,
    pub color: [f32; 4],
    /// `ShapeKind::index()`
    pub shape: u32,
    /// 1 for targets (drawn with a white outline)
    pub target: u32,
    pub _pad: [u32; 2],
}

impl ObjectInstance {
    pub fn from_object(obj: &GameObject) -> Self {
        let c = obj.center();
        Self {
            center: [c.x, c.y],
            radius: obj.hit_radius(),
            rotation: obj.rotation,
            color: rgb_to_rgba(obj.color),
            shape: obj.shape.index(),
            target: obj.is_target as u32,
            _pad: [0; 2],
        }
    }
}

/// Normalize an 8-bit color to opaque RGBA
pub fn rgb_to_rgba(c: Rgb) -> [f32; 4] {
    [
        c[0] as f32 / 255.0,
        c[1] as f32 / 255.0,
        c[2] as f32 / 255.0,
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::ShapeKind;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_instance_from_object() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut obj = GameObject::spawn(4, ShapeKind::Heart, Vec2::new(10.0, 20.0), true, 0.0, 1000.0, &mut rng);
        obj.size = 50.0;
        obj.scale = 1.2;
        obj.color = [255, 0, 51];
        let inst = ObjectInstance::from_object(&obj);
        assert_eq!(inst.center, [35.0, 45.0]);
        assert!((inst.radius - 30.0).abs() < 1e-5);
        assert_eq!(inst.color, [1.0, 0.0, 0.2, 1.0]);
        assert_eq!(inst.shape, ShapeKind::Heart.index());
        assert_eq!(inst.target, 1);
    }

    #[test]
    fn test_instances_cast_to_bytes() {
        let instances = [ObjectInstance::zeroed(); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 3 * std::mem::size_of::<ObjectInstance>());
        assert_eq!(std::mem::size_of::<ObjectInstance>() % 16, 0);
    }
}
