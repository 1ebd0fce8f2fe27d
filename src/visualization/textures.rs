//! Per-year texture requests
//!
//! Every change of year or data type starts a new request generation. Loads are
//! keyed by (layer, year) and stamped with the generation that asked for them;
//! a load that resolves after a newer selection was made is dropped, so it can
//! never overwrite the current textures. While a request is in flight the layer
//! keeps showing whatever it showed before.
//!
//! Surface bump textures are height maps: white is high ground. They are
//! loaded as linear data, and the parallax relief uses an inverted copy since
//! `StandardMaterial::depth_map` treats white as the deepest point.

use std::collections::HashMap;

use bevy::asset::LoadState;
use bevy::image::ImageLoaderSettings;
use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;

use crate::core::config::YEAR_PLACEHOLDER;
use crate::core::{AssetPaths, DataType, Year};
use crate::ui::VizState;

/// Texture sources used by the Earth layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureLayer {
    LandCover,
    SurfaceBump,
    Atmosphere,
    /// Fixed cloud texture, the same for every year.
    Clouds,
}

impl TextureLayer {
    fn template(self, paths: &AssetPaths) -> &str {
        match self {
            TextureLayer::LandCover => &paths.land_cover,
            TextureLayer::SurfaceBump => &paths.surface_bump,
            TextureLayer::Atmosphere => &paths.atmosphere,
            TextureLayer::Clouds => &paths.clouds,
        }
    }

    /// Height data rather than color; must not be sRGB-decoded.
    pub fn is_linear(self) -> bool {
        self == TextureLayer::SurfaceBump
    }

    /// Solid color shown when the texture is missing.
    pub fn fallback_color(self) -> Color {
        match self {
            TextureLayer::LandCover => Color::srgb(0.16, 0.36, 0.55),
            TextureLayer::SurfaceBump => Color::srgb(0.5, 0.5, 0.5),
            TextureLayer::Atmosphere => Color::srgb(0.45, 0.65, 0.95),
            TextureLayer::Clouds => Color::srgb(0.9, 0.9, 0.95),
        }
    }
}

/// Asset path of `layer` for `year`.
pub fn texture_path(paths: &AssetPaths, layer: TextureLayer, year: Year) -> String {
    layer
        .template(paths)
        .replace(YEAR_PLACEHOLDER, &year.to_string())
}

/// Texture layers a data type needs.
pub fn layers_for(data_type: DataType) -> &'static [TextureLayer] {
    match data_type {
        DataType::Earth => &[
            TextureLayer::LandCover,
            TextureLayer::SurfaceBump,
            TextureLayer::Clouds,
            TextureLayer::Atmosphere,
        ],
        DataType::Land => &[
            TextureLayer::LandCover,
            TextureLayer::SurfaceBump,
            TextureLayer::Atmosphere,
        ],
        DataType::Bump => &[TextureLayer::SurfaceBump, TextureLayer::Atmosphere],
        DataType::Atmosphere => &[TextureLayer::Atmosphere],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureKey {
    pub layer: TextureLayer,
    pub year: Year,
}

/// How an asset load ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// What to do with a finished load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Apply,
    Fallback,
    Stale,
}

/// Generation counter for texture requests.
#[derive(Debug, Default, Clone)]
pub struct RequestLedger {
    generation: u64,
}

impl RequestLedger {
    /// Start a new selection; every older generation becomes stale.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn resolve(&self, generation: u64, outcome: LoadOutcome) -> Resolution {
        if generation != self.generation {
            return Resolution::Stale;
        }
        match outcome {
            LoadOutcome::Loaded => Resolution::Apply,
            LoadOutcome::Failed => Resolution::Fallback,
        }
    }
}

/// Map an asset load state to a finished outcome, or `None` while still loading.
pub fn load_outcome(state: &LoadState) -> Option<LoadOutcome> {
    match state {
        LoadState::Loaded => Some(LoadOutcome::Loaded),
        LoadState::Failed(_) => Some(LoadOutcome::Failed),
        _ => None,
    }
}

/// Parallax depth map from a height map: every color channel becomes `1 - v`,
/// alpha is left alone. Returns `None` for formats that are not plain unorm.
pub fn height_to_depth(height: &Image) -> Option<Image> {
    let data = height.data.as_ref()?;
    let (channel_bytes, channels, has_alpha) = match height.texture_descriptor.format {
        TextureFormat::R8Unorm => (1, 1, false),
        TextureFormat::Rg8Unorm => (1, 2, true),
        TextureFormat::Rgba8Unorm => (1, 4, true),
        TextureFormat::R16Unorm => (2, 1, false),
        TextureFormat::Rg16Unorm => (2, 2, true),
        TextureFormat::Rgba16Unorm => (2, 4, true),
        _ => return None,
    };

    let texel_bytes = channel_bytes * channels;
    let color_bytes = if has_alpha {
        texel_bytes - channel_bytes
    } else {
        texel_bytes
    };

    // For unorm data, flipping every bit of a channel is exactly `max - v`.
    let mut inverted = data.clone();
    for texel in inverted.chunks_exact_mut(texel_bytes) {
        for byte in &mut texel[..color_bytes] {
            *byte = !*byte;
        }
    }

    let mut depth = height.clone();
    depth.data = Some(inverted);
    Some(depth)
}

/// Settled state of one layer.
#[derive(Clone, Debug)]
pub enum TextureSlot {
    Ready(Handle<Image>),
    Failed,
}

#[derive(Clone, Debug)]
pub struct PendingTexture {
    pub key: TextureKey,
    pub generation: u64,
    pub handle: Handle<Image>,
}

/// Texture state for the Earth layers.
#[derive(Resource, Debug, Default)]
pub struct EarthTextures {
    ledger: RequestLedger,
    selection: Option<(Year, DataType)>,
    pending: Vec<PendingTexture>,
    slots: HashMap<TextureLayer, (Year, TextureSlot)>,
    /// Inverted copy of the settled bump texture, for parallax.
    relief: Option<Handle<Image>>,
}

impl EarthTextures {
    /// Loaded texture for `layer`, if its latest settled load succeeded.
    pub fn ready(&self, layer: TextureLayer) -> Option<&Handle<Image>> {
        match self.slot(layer) {
            Some(TextureSlot::Ready(handle)) => Some(handle),
            _ => None,
        }
    }

    pub fn slot(&self, layer: TextureLayer) -> Option<&TextureSlot> {
        self.slots.get(&layer).map(|(_, slot)| slot)
    }

    /// Depth map derived from the current bump texture.
    pub fn relief(&self) -> Option<&Handle<Image>> {
        self.relief.as_ref()
    }

    pub fn set_relief(&mut self, depth: Handle<Image>) {
        self.relief = Some(depth);
    }

    pub fn pending(&self) -> &[PendingTexture] {
        &self.pending
    }

    /// Record a new selection. Returns the generation for its requests, or
    /// `None` when the selection did not change.
    pub fn select(&mut self, year: Year, data_type: DataType) -> Option<u64> {
        if self.selection == Some((year, data_type)) {
            return None;
        }
        self.selection = Some((year, data_type));
        Some(self.ledger.begin())
    }

    /// True when `layer` already settled for `year`.
    pub fn is_settled(&self, layer: TextureLayer, year: Year) -> bool {
        matches!(self.slots.get(&layer), Some((settled_year, _)) if *settled_year == year)
    }

    pub fn push_request(&mut self, key: TextureKey, generation: u64, handle: Handle<Image>) {
        self.pending.push(PendingTexture {
            key,
            generation,
            handle,
        });
    }

    /// Settle a finished load. Returns true if the visible state changed.
    pub fn settle(&mut self, request: PendingTexture, outcome: LoadOutcome) -> bool {
        let PendingTexture {
            key,
            generation,
            handle,
        } = request;

        match self.ledger.resolve(generation, outcome) {
            Resolution::Stale => {
                debug!(
                    "Dropping stale {:?} texture for {} (generation {} < {})",
                    key.layer,
                    key.year,
                    generation,
                    self.ledger.generation()
                );
                false
            }
            Resolution::Apply => {
                if key.layer == TextureLayer::SurfaceBump {
                    self.relief = None;
                }
                self.slots
                    .insert(key.layer, (key.year, TextureSlot::Ready(handle)));
                true
            }
            Resolution::Fallback => {
                if key.layer == TextureLayer::SurfaceBump {
                    self.relief = None;
                }
                self.slots.insert(key.layer, (key.year, TextureSlot::Failed));
                true
            }
        }
    }
}

/// Start loads for the layers the current selection needs.
pub fn request_earth_textures(
    state: Res<VizState>,
    paths: Res<AssetPaths>,
    asset_server: Res<AssetServer>,
    mut textures: ResMut<EarthTextures>,
) {
    if !state.is_changed() {
        return;
    }
    let Some(generation) = textures.select(state.year, state.data_type) else {
        return;
    };

    for &layer in layers_for(state.data_type) {
        if textures.is_settled(layer, state.year) {
            continue;
        }
        let path = texture_path(&paths, layer, state.year);
        debug!("Requesting {:?} texture {} (generation {})", layer, path, generation);
        let handle: Handle<Image> = if layer.is_linear() {
            asset_server.load_with_settings(path, |settings: &mut ImageLoaderSettings| {
                settings.is_srgb = false;
            })
        } else {
            asset_server.load(path)
        };
        textures.push_request(
            TextureKey {
                layer,
                year: state.year,
            },
            generation,
            handle,
        );
    }
}

/// Check in-flight loads and settle the ones that finished.
pub fn poll_earth_textures(
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
    mut textures: ResMut<EarthTextures>,
) {
    if textures.pending().is_empty() {
        return;
    }

    // Shuffling the pending list is not a visible change.
    let pending = std::mem::take(&mut textures.bypass_change_detection().pending);
    let mut waiting = Vec::with_capacity(pending.len());
    let mut changed = false;

    for request in pending {
        let state = asset_server.get_load_state(request.handle.id());
        let Some(outcome) = state.as_ref().and_then(load_outcome) else {
            waiting.push(request);
            continue;
        };
        if let Some(LoadState::Failed(err)) = &state {
            warn!(
                "{:?} texture for {} failed to load, using solid color: {}",
                request.key.layer, request.key.year, err
            );
        }

        let key = request.key;
        let handle = request.handle.clone();
        if !textures.bypass_change_detection().settle(request, outcome) {
            continue;
        }
        changed = true;

        if key.layer == TextureLayer::SurfaceBump && outcome == LoadOutcome::Loaded {
            match images.get(&handle).and_then(height_to_depth) {
                Some(depth) => textures
                    .bypass_change_detection()
                    .set_relief(images.add(depth)),
                None => warn!(
                    "Bump texture for {} has no usable height data, relief disabled",
                    key.year
                ),
            }
        }
    }

    textures.bypass_change_detection().pending = waiting;
    if changed {
        textures.set_changed();
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use bevy::asset::AssetLoadError;
    use bevy::asset::RenderAssetUsages;
    use bevy::asset::io::AssetReaderError;
    use bevy::render::render_resource::{Extent3d, TextureDimension};

    use super::*;

    fn image(texel: &[u8], format: TextureFormat) -> Image {
        Image::new_fill(
            Extent3d {
                width: 2,
                height: 1,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            texel,
            format,
            RenderAssetUsages::default(),
        )
    }

    fn request(textures: &mut EarthTextures, layer: TextureLayer, year: Year) -> PendingTexture {
        let generation = textures.ledger.generation();
        textures.push_request(TextureKey { layer, year }, generation, Handle::default());
        textures
            .pending
            .pop()
            .expect("request should be pending")
    }

    #[test]
    fn test_land_cover_path_for_every_year() {
        let paths = AssetPaths::default();
        for year in Year::all() {
            let path = texture_path(&paths, TextureLayer::LandCover, year);
            assert!(
                path.contains(&format!("land_cover_{}.png", year.get())),
                "{path}"
            );
        }
    }

    #[test]
    fn test_year_keyed_paths() {
        let paths = AssetPaths::default();
        let year = Year::new(2013);
        assert_eq!(
            texture_path(&paths, TextureLayer::SurfaceBump, year),
            "SurfaceBumpData_HTML/globe_bump_2013.png"
        );
        assert_eq!(
            texture_path(&paths, TextureLayer::Atmosphere, year),
            "NASA_Atmosphere_Output/year_average_2013.png"
        );
        assert_eq!(
            texture_path(&paths, TextureLayer::Clouds, year),
            texture_path(&paths, TextureLayer::Clouds, Year::LAST)
        );
    }

    #[test]
    fn test_land_selection_requests_land_cover() {
        assert!(layers_for(DataType::Land).contains(&TextureLayer::LandCover));
        assert!(!layers_for(DataType::Bump).contains(&TextureLayer::LandCover));
        for data_type in DataType::ALL {
            // The atmosphere shell is drawn over every view.
            assert!(layers_for(data_type).contains(&TextureLayer::Atmosphere));
        }
    }

    #[test]
    fn test_ledger_rejects_older_generations() {
        let mut ledger = RequestLedger::default();
        let first = ledger.begin();
        let second = ledger.begin();
        assert_eq!(ledger.resolve(first, LoadOutcome::Loaded), Resolution::Stale);
        assert_eq!(ledger.resolve(second, LoadOutcome::Loaded), Resolution::Apply);
        assert_eq!(
            ledger.resolve(second, LoadOutcome::Failed),
            Resolution::Fallback
        );
    }

    #[test]
    fn test_stale_load_does_not_overwrite_newer_selection() {
        let mut textures = EarthTextures::default();
        textures.select(Year::new(2001), DataType::Land);
        let old = request(&mut textures, TextureLayer::LandCover, Year::new(2001));

        textures.select(Year::new(2002), DataType::Land);
        let new = request(&mut textures, TextureLayer::LandCover, Year::new(2002));

        assert!(textures.settle(new, LoadOutcome::Loaded));
        assert!(!textures.settle(old, LoadOutcome::Loaded));
        assert!(textures.is_settled(TextureLayer::LandCover, Year::new(2002)));
        assert!(!textures.is_settled(TextureLayer::LandCover, Year::new(2001)));
    }

    #[test]
    fn test_failed_load_marks_layer_failed() {
        let mut textures = EarthTextures::default();
        textures.select(Year::new(2010), DataType::Atmosphere);
        let pending = request(&mut textures, TextureLayer::Atmosphere, Year::new(2010));

        assert!(textures.settle(pending, LoadOutcome::Failed));
        assert!(matches!(
            textures.slot(TextureLayer::Atmosphere),
            Some(TextureSlot::Failed)
        ));
        assert!(textures.ready(TextureLayer::Atmosphere).is_none());
    }

    #[test]
    fn test_reselecting_same_selection_is_noop() {
        let mut textures = EarthTextures::default();
        assert_eq!(textures.select(Year::new(2004), DataType::Bump), Some(1));
        assert_eq!(textures.select(Year::new(2004), DataType::Bump), None);
        assert_eq!(textures.select(Year::new(2004), DataType::Land), Some(2));
    }

    #[test]
    fn test_white_height_is_shallowest_depth() {
        let mut height = image(&[255], TextureFormat::R8Unorm);
        if let Some(data) = height.data.as_mut() {
            data[1] = 0;
        }

        let depth = height_to_depth(&height).expect("R8 heights are supported");
        // Depth maps treat black as the top surface.
        assert_eq!(depth.data.as_deref(), Some(&[0u8, 255][..]));
    }

    #[test]
    fn test_depth_keeps_alpha() {
        let height = image(&[255, 128, 0, 200], TextureFormat::Rgba8Unorm);
        let depth = height_to_depth(&height).expect("RGBA8 heights are supported");
        assert_eq!(
            depth.data.as_deref(),
            Some(&[0u8, 127, 255, 200, 0, 127, 255, 200][..])
        );
    }

    #[test]
    fn test_sixteen_bit_heights_invert_per_channel() {
        let height = image(&0xFFF0u16.to_le_bytes(), TextureFormat::R16Unorm);
        let depth = height_to_depth(&height).expect("R16 heights are supported");
        let data = depth.data.expect("depth data");
        assert_eq!(u16::from_le_bytes([data[0], data[1]]), 0x000F);
    }

    #[test]
    fn test_srgb_heights_are_rejected() {
        let height = image(&[10, 20, 30, 255], TextureFormat::Rgba8UnormSrgb);
        assert!(height_to_depth(&height).is_none());
    }

    #[test]
    fn test_only_bump_loads_linear() {
        assert!(TextureLayer::SurfaceBump.is_linear());
        assert!(!TextureLayer::LandCover.is_linear());
        assert!(!TextureLayer::Atmosphere.is_linear());
    }

    #[test]
    fn test_load_states_map_to_outcomes() {
        let missing = AssetLoadError::AssetReaderError(AssetReaderError::NotFound(
            PathBuf::from("NASA_Atmosphere_Output/year_average_2003.png"),
        ));
        assert_eq!(
            load_outcome(&LoadState::Failed(Arc::new(missing))),
            Some(LoadOutcome::Failed)
        );
        assert_eq!(load_outcome(&LoadState::Loaded), Some(LoadOutcome::Loaded));
        assert_eq!(load_outcome(&LoadState::Loading), None);
        assert_eq!(load_outcome(&LoadState::NotLoaded), None);
    }

    #[test]
    fn test_new_bump_clears_old_relief() {
        let mut textures = EarthTextures::default();
        textures.select(Year::new(2005), DataType::Land);
        textures.set_relief(Handle::default());

        let pending = request(&mut textures, TextureLayer::SurfaceBump, Year::new(2005));
        assert!(textures.settle(pending, LoadOutcome::Failed));
        assert!(textures.relief().is_none());
    }
}
