use bevy::prelude::*;

use crate::render::{InstanceRenderer, InstanceSpec};
use crate::scene::ResourceInstance;

#[derive(Clone, Debug)]
pub struct OrbSettings {
    /// Sphere radius at scale 1. Keep in step with the picking radius.
    pub radius: f32,
    pub sectors: u32,
    pub stacks: u32,
    pub roughness: f32,
}

#[derive(Clone, Debug)]
pub struct GlowSettings {
    /// Emissive strength as a multiple of the base color.
    pub strength: f32,
    /// Scores at or above this glow.
    pub min_score: f32,
}

#[derive(Clone, Debug)]
pub struct OrbRenderSettings {
    pub orb: OrbSettings,
    pub glow: GlowSettings,
}

impl Default for OrbRenderSettings {
    fn default() -> Self {
        Self {
            orb: OrbSettings {
                radius: 0.6,
                sectors: 24,
                stacks: 16,
                roughness: 0.45,
            },
            glow: GlowSettings {
                strength: 0.6,
                min_score: 8.0,
            },
        }
    }
}

/// Default renderer: one shared UV sphere mesh, one alpha-blended material
/// per instance tinted by the category color.
#[derive(Default)]
pub struct OrbRenderer {
    pub settings: OrbRenderSettings,
}

impl OrbRenderer {
    fn material(&self, spec: &InstanceSpec<'_>) -> StandardMaterial {
        let glow = &self.settings.glow;
        let emissive = if spec.resource.clamped_score() >= glow.min_score {
            let lin = spec.color.to_linear();
            LinearRgba::rgb(
                lin.red * glow.strength,
                lin.green * glow.strength,
                lin.blue * glow.strength,
            )
        } else {
            LinearRgba::BLACK
        };

        StandardMaterial {
            base_color: spec.color.with_alpha(spec.opacity),
            base_color_texture: spec.texture.clone(),
            emissive,
            perceptual_roughness: self.settings.orb.roughness,
            alpha_mode: AlphaMode::Blend,
            ..default()
        }
    }
}

impl InstanceRenderer for OrbRenderer {
    fn spawn_instances(
        &self,
        commands: &mut Commands,
        meshes: &mut ResMut<Assets<Mesh>>,
        materials: &mut ResMut<Assets<StandardMaterial>>,
        root: Entity,
        instances: &[InstanceSpec<'_>],
    ) -> Vec<Entity> {
        if instances.is_empty() {
            return Vec::new();
        }
        let orb = &self.settings.orb;
        let mesh = meshes.add(Sphere::new(orb.radius).mesh().uv(orb.sectors, orb.stacks));

        let entities: Vec<Entity> = instances
            .iter()
            .map(|spec| {
                commands
                    .spawn((
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(materials.add(self.material(spec))),
                        Transform::from_translation(spec.position)
                            .with_scale(Vec3::splat(spec.scale)),
                        Visibility::Visible,
                        ResourceInstance {
                            index: spec.index,
                            id: spec.resource.id,
                        },
                    ))
                    .id()
            })
            .collect();

        commands.entity(root).add_children(&entities);
        entities
    }
}
