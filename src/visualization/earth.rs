//! The layered Earth spheres carried by the tilted Earth body.
//!
//! Materials are rebuilt from [`EarthTextures`] whenever the selection or a
//! texture load changes.

use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;
use bevy::render::render_resource::Face;

use crate::camera::FocusToggleRequested;
use crate::core::DataType;
use crate::ui::VizState;
use crate::visualization::motion::Spin;
use crate::visualization::scene::SceneAnchors;
use crate::visualization::textures::{EarthTextures, TextureLayer};

pub const EARTH_RADIUS: f32 = 2.0;

/// One of the concentric Earth spheres.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EarthLayer {
    Surface,
    Clouds,
    Atmosphere,
}

impl EarthLayer {
    pub const ALL: [EarthLayer; 3] = [EarthLayer::Surface, EarthLayer::Clouds, EarthLayer::Atmosphere];

    pub fn radius(self) -> f32 {
        match self {
            EarthLayer::Surface => EARTH_RADIUS,
            EarthLayer::Clouds => 2.03,
            EarthLayer::Atmosphere => 2.05,
        }
    }

    /// Self-rotation in rad/s; independent of year and data type.
    pub fn spin_rate(self) -> f32 {
        match self {
            EarthLayer::Surface => 1.2,
            EarthLayer::Clouds => 0.15,
            EarthLayer::Atmosphere => 0.0,
        }
    }

    pub fn is_visible(self, data_type: DataType) -> bool {
        match self {
            EarthLayer::Surface => true,
            EarthLayer::Clouds => data_type == DataType::Earth,
            EarthLayer::Atmosphere => true,
        }
    }
}

/// Paint `layer`'s texture onto `material`, or its solid fallback color when it is missing.
fn paint(material: &mut StandardMaterial, textures: &EarthTextures, layer: TextureLayer, alpha: f32) {
    match textures.ready(layer) {
        Some(handle) => {
            material.base_color = Color::WHITE.with_alpha(alpha);
            material.base_color_texture = Some(handle.clone());
        }
        None => {
            material.base_color = layer.fallback_color().with_alpha(alpha);
            material.base_color_texture = None;
        }
    }
}

/// Material for one Earth layer under the given data type.
pub fn layer_material(
    data_type: DataType,
    layer: EarthLayer,
    textures: &EarthTextures,
) -> StandardMaterial {
    let mut material = StandardMaterial {
        perceptual_roughness: 0.9,
        metallic: 0.0,
        ..default()
    };

    match (layer, data_type) {
        (EarthLayer::Surface, DataType::Earth | DataType::Land) => {
            paint(&mut material, textures, TextureLayer::LandCover, 1.0);
            // Relief from the inverted bump texture; without it the sphere stays flat.
            if let Some(depth) = textures.relief() {
                material.depth_map = Some(depth.clone());
                material.parallax_depth_scale = if data_type == DataType::Land { 0.1 } else { 0.05 };
            }
        }
        (EarthLayer::Surface, DataType::Bump) => {
            paint(&mut material, textures, TextureLayer::SurfaceBump, 1.0);
        }
        (EarthLayer::Surface, DataType::Atmosphere) => {
            paint(&mut material, textures, TextureLayer::Atmosphere, 0.8);
            material.alpha_mode = AlphaMode::Blend;
        }
        (EarthLayer::Clouds, _) => {
            paint(&mut material, textures, TextureLayer::Clouds, 0.9);
            material.alpha_mode = AlphaMode::Add;
        }
        (EarthLayer::Atmosphere, _) => {
            let alpha = if data_type == DataType::Atmosphere { 0.3 } else { 0.65 };
            paint(&mut material, textures, TextureLayer::Atmosphere, alpha);
            material.alpha_mode = AlphaMode::Add;
            // Glow shell: draw only the inside faces.
            material.cull_mode = Some(Face::Front);
        }
    }

    material
}

pub fn spawn_earth(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    anchors: Res<SceneAnchors>,
    state: Res<VizState>,
    textures: Res<EarthTextures>,
) {
    for layer in EarthLayer::ALL {
        let mut mesh = Sphere::new(layer.radius()).mesh().uv(64, 64);
        if layer == EarthLayer::Surface
            && let Err(err) = mesh.generate_tangents()
        {
            warn!("Earth surface tangents unavailable, relief disabled: {}", err);
        }

        let visibility = if layer.is_visible(state.data_type) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        commands
            .spawn((
                Mesh3d(meshes.add(mesh)),
                MeshMaterial3d(materials.add(layer_material(state.data_type, layer, &textures))),
                Transform::default(),
                visibility,
                layer,
                Spin(layer.spin_rate()),
                Name::new(format!("Earth {:?}", layer)),
                ChildOf(anchors.earth_body),
            ))
            .observe(request_focus_on_click);
    }
}

fn request_focus_on_click(
    mut click: On<Pointer<Click>>,
    mut requests: MessageWriter<FocusToggleRequested>,
) {
    if click.button != PointerButton::Primary {
        return;
    }
    requests.write(FocusToggleRequested);
    click.propagate(false);
}

/// Rebuild layer materials and visibility after the selection or textures change.
pub fn apply_earth_materials(
    state: Res<VizState>,
    textures: Res<EarthTextures>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut layers: Query<(
        &EarthLayer,
        &MeshMaterial3d<StandardMaterial>,
        &mut Visibility,
    )>,
) {
    if !state.is_changed() && !textures.is_changed() {
        return;
    }

    for (layer, material_handle, mut visibility) in &mut layers {
        visibility.set_if_neq(if layer.is_visible(state.data_type) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });

        if let Some(mut material) = materials.get_mut(&material_handle.0) {
            *material = layer_material(state.data_type, *layer, &textures);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Year;
    use crate::visualization::textures::{LoadOutcome, TextureKey};

    fn textures_with(outcomes: &[(TextureLayer, LoadOutcome)]) -> EarthTextures {
        let mut textures = EarthTextures::default();
        let generation = textures
            .select(Year::new(2012), DataType::Earth)
            .expect("fresh selection");
        for (layer, outcome) in outcomes {
            let key = TextureKey {
                layer: *layer,
                year: Year::new(2012),
            };
            textures.push_request(key, generation, Handle::default());
        }
        let pending = textures.pending().to_vec();
        for (request, (_, outcome)) in pending.into_iter().zip(outcomes) {
            textures.settle(request, *outcome);
        }
        textures
    }

    #[test]
    fn test_failed_texture_falls_back_to_solid_color() {
        let textures = textures_with(&[(TextureLayer::LandCover, LoadOutcome::Failed)]);
        let material = layer_material(DataType::Land, EarthLayer::Surface, &textures);

        assert!(material.base_color_texture.is_none());
        assert_eq!(material.base_color, TextureLayer::LandCover.fallback_color());
    }

    #[test]
    fn test_loaded_texture_is_applied() {
        let mut textures = textures_with(&[
            (TextureLayer::LandCover, LoadOutcome::Loaded),
            (TextureLayer::SurfaceBump, LoadOutcome::Loaded),
        ]);
        let depth = Handle::default();
        textures.set_relief(depth.clone());
        let material = layer_material(DataType::Land, EarthLayer::Surface, &textures);

        assert!(material.base_color_texture.is_some());
        // Parallax reads the inverted relief, never the raw height map.
        assert_eq!(material.depth_map, Some(depth));
        assert_eq!(material.base_color, Color::WHITE);
    }

    #[test]
    fn test_missing_bump_keeps_flat_surface() {
        let textures = textures_with(&[
            (TextureLayer::LandCover, LoadOutcome::Loaded),
            (TextureLayer::SurfaceBump, LoadOutcome::Failed),
        ]);
        let material = layer_material(DataType::Earth, EarthLayer::Surface, &textures);

        assert!(material.base_color_texture.is_some());
        assert!(material.depth_map.is_none());
    }

    #[test]
    fn test_atmosphere_surface_is_translucent() {
        let textures = textures_with(&[(TextureLayer::Atmosphere, LoadOutcome::Failed)]);
        let material = layer_material(DataType::Atmosphere, EarthLayer::Surface, &textures);

        assert!(matches!(material.alpha_mode, AlphaMode::Blend));
        assert!((material.base_color.alpha() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_layer_counts_per_data_type() {
        let visible = |data_type| {
            EarthLayer::ALL
                .iter()
                .filter(|layer| layer.is_visible(data_type))
                .count()
        };
        assert_eq!(visible(DataType::Earth), 3);
        assert_eq!(visible(DataType::Land), 2);
        assert_eq!(visible(DataType::Bump), 2);
        assert_eq!(visible(DataType::Atmosphere), 2);
    }

    #[test]
    fn test_atmosphere_shell_glows_over_land() {
        let textures = textures_with(&[(TextureLayer::Atmosphere, LoadOutcome::Loaded)]);
        let material = layer_material(DataType::Land, EarthLayer::Atmosphere, &textures);

        assert!(EarthLayer::Atmosphere.is_visible(DataType::Land));
        assert!(matches!(material.alpha_mode, AlphaMode::Add));
        assert_eq!(material.cull_mode, Some(Face::Front));
        assert!((material.base_color.alpha() - 0.65).abs() < 1e-6);
    }
}
