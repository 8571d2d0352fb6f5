use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use nodemesh_geom::{Aabb, BS};

use super::config::{ContentConfig, LeavesStyle, NodeBoxDef, NodeDef, TextureSettings, TileDef};
use super::features::{ContentFeatures, DrawType, LiquidType, NodeBox, ParamType};
use super::node::{CONTENT_AIR, CONTENT_IGNORE, ContentId, LIGHT_MAX};
use super::texture::TextureSource;
use super::tile::{MaterialFlags, MaterialType, TileSpec};

const UNKNOWN_TEXTURE: &str = "unknown_node.png";

/// Content features indexed by id, plus the built-in air and ignore entries
/// and a solid fallback for ids nobody registered.
#[derive(Clone, Debug)]
pub struct ContentRegistry {
    features: Vec<Option<ContentFeatures>>,
    by_name: HashMap<String, ContentId>,
    unknown: ContentFeatures,
    pub settings: TextureSettings,
}

impl ContentRegistry {
    /// Registry holding only the built-in entries.
    pub fn builtin(tsrc: &dyn TextureSource) -> Self {
        let mut reg = ContentRegistry {
            features: Vec::new(),
            by_name: HashMap::new(),
            unknown: unknown_features(tsrc),
            settings: TextureSettings::default(),
        };
        let mut air = ContentFeatures::new("air");
        air.drawtype = DrawType::AirLike;
        air.param_type = ParamType::Light;
        air.solidness = 0;
        air.light_propagates = true;
        reg.insert(CONTENT_AIR, air);
        let mut ignore = ContentFeatures::new("ignore");
        ignore.drawtype = DrawType::AirLike;
        ignore.solidness = 0;
        reg.insert(CONTENT_IGNORE, ignore);
        reg
    }

    #[inline]
    pub fn get(&self, id: ContentId) -> &ContentFeatures {
        match self.features.get(id as usize) {
            Some(Some(f)) => f,
            _ => &self.unknown,
        }
    }

    pub fn is_registered(&self, id: ContentId) -> bool {
        matches!(self.features.get(id as usize), Some(Some(_)))
    }

    pub fn id_by_name(&self, name: &str) -> Option<ContentId> {
        self.by_name.get(name).copied()
    }

    /// Number of registered contents, built-ins included.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn insert(&mut self, id: ContentId, f: ContentFeatures) {
        let idx = id as usize;
        if self.features.len() <= idx {
            self.features.resize(idx + 1, None);
        }
        self.by_name.insert(f.name.clone(), id);
        self.features[idx] = Some(f);
    }

    pub fn load_from_path(
        path: impl AsRef<Path>,
        tsrc: &dyn TextureSource,
    ) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s, tsrc)
    }

    pub fn from_toml_str(toml_str: &str, tsrc: &dyn TextureSource) -> Result<Self, Box<dyn Error>> {
        let cfg: ContentConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg, tsrc)
    }

    pub fn from_config(cfg: ContentConfig, tsrc: &dyn TextureSource) -> Result<Self, Box<dyn Error>> {
        let mut reg = ContentRegistry::builtin(tsrc);
        reg.settings = cfg.textures;

        // Assign ids first so liquid alternatives can refer forward.
        let mut ids: Vec<ContentId> = Vec::with_capacity(cfg.nodes.len());
        let mut next: ContentId = 0;
        let mut taken: HashMap<ContentId, &str> = HashMap::new();
        for def in &cfg.nodes {
            if def.name.is_empty() {
                return Err("node definition without a name".into());
            }
            if reg.by_name.contains_key(&def.name) || ids_named(&cfg.nodes, &def.name) > 1 {
                return Err(format!("duplicate node name '{}'", def.name).into());
            }
            let id = match def.id {
                Some(id) => id,
                None => {
                    while next == CONTENT_AIR
                        || next == CONTENT_IGNORE
                        || taken.contains_key(&next)
                        || cfg.nodes.iter().any(|d| d.id == Some(next))
                    {
                        next = next.checked_add(1).ok_or("content id space exhausted")?;
                    }
                    next
                }
            };
            if id == CONTENT_AIR || id == CONTENT_IGNORE {
                return Err(format!("node '{}' uses reserved id {id}", def.name).into());
            }
            if let Some(other) = taken.insert(id, &def.name) {
                return Err(format!("nodes '{other}' and '{}' share id {id}", def.name).into());
            }
            ids.push(id);
        }
        let mut names: HashMap<&str, ContentId> = HashMap::new();
        for (def, &id) in cfg.nodes.iter().zip(&ids) {
            names.insert(def.name.as_str(), id);
        }

        for (def, &id) in cfg.nodes.iter().zip(&ids) {
            let f = compile_node(def, &reg.settings, &names, tsrc)?;
            reg.insert(id, f);
        }
        log::info!(
            "content registry: {} nodes ({} defined)",
            reg.len(),
            cfg.nodes.len()
        );
        Ok(reg)
    }
}

fn ids_named(nodes: &[NodeDef], name: &str) -> usize {
    nodes.iter().filter(|d| d.name == name).count()
}

fn unknown_features(tsrc: &dyn TextureSource) -> ContentFeatures {
    let mut f = ContentFeatures::new("unknown");
    let tile = TileSpec {
        texture: tsrc.texture(UNKNOWN_TEXTURE),
        ..TileSpec::default()
    };
    f.tiles = [tile; 6];
    f
}

/// Per-tile texture name and flags before resolution.
struct PendingTile {
    name: String,
    backface_culling: bool,
    animation: Option<(u16, u32)>,
}

impl PendingTile {
    fn from_def(def: &TileDef) -> Self {
        Self {
            name: def.name().to_string(),
            backface_culling: def.backface_culling(),
            animation: def
                .animation()
                .map(|a| (a.frames, a.frame_length_ms())),
        }
    }

    fn empty() -> Self {
        Self {
            name: String::new(),
            backface_culling: true,
            animation: None,
        }
    }
}

/// Expands a tile list to six entries by repeating the last one.
fn six_tiles(defs: &[TileDef]) -> [PendingTile; 6] {
    core::array::from_fn(|i| match defs.get(i).or(defs.last()) {
        Some(d) => {
            let mut t = PendingTile::from_def(d);
            if t.name.is_empty() {
                t.name = UNKNOWN_TEXTURE.to_string();
            }
            t
        }
        None => PendingTile {
            name: UNKNOWN_TEXTURE.to_string(),
            ..PendingTile::empty()
        },
    })
}

fn compile_node(
    def: &NodeDef,
    settings: &TextureSettings,
    names: &HashMap<&str, ContentId>,
    tsrc: &dyn TextureSource,
) -> Result<ContentFeatures, Box<dyn Error>> {
    let mut f = ContentFeatures::new(def.name.clone());
    f.drawtype = def.drawtype;
    f.param_type = def.param_type;
    f.param_type_2 = def.param_type_2;
    f.liquid_type = def.liquid_type;
    f.light_source = def.light_source.min(LIGHT_MAX);
    f.light_propagates = def
        .light_propagates
        .unwrap_or(def.param_type == ParamType::Light);
    f.visual_scale = def.visual_scale.unwrap_or(1.0);
    f.alpha = def.alpha.unwrap_or(255);
    f.connect_group = def.connect_group.clone();
    f.liquid_range = def.liquid_range.unwrap_or(8).clamp(1, 8);
    f.node_box = compile_node_box(def.node_box.as_ref());

    let resolve = |name: &Option<String>| -> Result<ContentId, Box<dyn Error>> {
        match name {
            None => Ok(CONTENT_IGNORE),
            Some(n) => names
                .get(n.as_str())
                .copied()
                .ok_or_else(|| format!("node '{}': unknown liquid alternative '{n}'", def.name).into()),
        }
    };
    f.liquid_alternative_flowing = resolve(&def.liquid_alternative_flowing)?;
    f.liquid_alternative_source = resolve(&def.liquid_alternative_source)?;

    let mut tiles = six_tiles(&def.tiles);
    let special: [PendingTile; 2] = core::array::from_fn(|i| match def.special_tiles.get(i) {
        Some(d) => PendingTile::from_def(d),
        None => PendingTile::empty(),
    });

    let mut is_liquid = false;
    let mut material_type = if f.alpha == 255 {
        MaterialType::Basic
    } else {
        MaterialType::Alpha
    };
    match def.drawtype {
        DrawType::Normal => {
            material_type = if f.alpha == 255 {
                MaterialType::Opaque
            } else {
                MaterialType::Alpha
            };
            f.solidness = 2;
        }
        DrawType::AirLike => f.solidness = 0,
        DrawType::Liquid => {
            if def.liquid_type != LiquidType::Source {
                return Err(format!("node '{}': liquid drawtype needs a source", def.name).into());
            }
            if settings.opaque_water {
                f.alpha = 255;
            }
            f.solidness = 1;
            is_liquid = true;
        }
        DrawType::FlowingLiquid => {
            if def.liquid_type != LiquidType::Flowing {
                return Err(format!("node '{}': flowingliquid drawtype needs flowing", def.name).into());
            }
            if settings.opaque_water {
                f.alpha = 255;
            }
            f.solidness = 0;
            is_liquid = true;
        }
        DrawType::GlassLike | DrawType::GlassLikeFramed | DrawType::AllFaces => {
            f.solidness = 0;
            f.visual_solidness = 1;
        }
        DrawType::AllFacesOptional => match settings.leaves_style {
            LeavesStyle::Fancy => {
                f.drawtype = DrawType::AllFaces;
                f.solidness = 0;
                f.visual_solidness = 1;
            }
            LeavesStyle::Simple => {
                if !special[0].name.is_empty() {
                    for t in tiles.iter_mut() {
                        t.name = special[0].name.clone();
                    }
                }
                f.drawtype = DrawType::GlassLike;
                f.solidness = 0;
                f.visual_solidness = 1;
            }
            LeavesStyle::Opaque => {
                f.drawtype = DrawType::Normal;
                f.solidness = 2;
                for t in tiles.iter_mut() {
                    t.name.push_str("^[noalpha");
                }
            }
        },
        DrawType::NodeBox => {
            f.solidness = 0;
            if f.alpha == 255 {
                material_type = MaterialType::Opaque;
            }
        }
        DrawType::PlantLike
        | DrawType::TorchLike
        | DrawType::SignLike
        | DrawType::FenceLike
        | DrawType::RailLike => f.solidness = 0,
    }
    if is_liquid {
        material_type = if f.alpha == 255 {
            MaterialType::LiquidOpaque
        } else {
            MaterialType::LiquidTransparent
        };
    }
    if let Some(s) = def.solidness {
        f.solidness = s.min(2);
    }
    if let Some(v) = def.visual_solidness {
        f.visual_solidness = v.min(2);
    }

    let build = |t: &PendingTile| -> TileSpec {
        let mut flags = MaterialFlags::empty();
        if t.backface_culling {
            flags |= MaterialFlags::BACKFACE_CULLING;
        }
        let (frame_count, frame_length_ms) = match t.animation {
            Some((n, ms)) if n > 1 => {
                flags |= MaterialFlags::ANIMATION_VERTICAL_FRAMES;
                (n, ms)
            }
            _ => (1, 0),
        };
        TileSpec {
            texture: tsrc.texture(&t.name),
            alpha: f.alpha,
            material_type,
            material_flags: flags,
            animation_frame_count: frame_count,
            animation_frame_length_ms: frame_length_ms,
        }
    };
    f.tiles = core::array::from_fn(|i| build(&tiles[i]));
    f.special_tiles = core::array::from_fn(|i| build(&special[i]));
    Ok(f)
}

fn box_from(c: &[f32; 6]) -> Aabb {
    Aabb::from_coords(c[0], c[1], c[2], c[3], c[4], c[5])
        .scaled(BS)
        .repaired()
}

fn compile_node_box(def: Option<&NodeBoxDef>) -> NodeBox {
    match def {
        None | Some(NodeBoxDef::Regular) => NodeBox::Regular,
        Some(NodeBoxDef::Fixed { fixed }) => NodeBox::Fixed(fixed.iter().map(box_from).collect()),
        Some(NodeBoxDef::WallMounted {
            wall_top,
            wall_bottom,
            wall_side,
        }) => NodeBox::WallMounted {
            top: box_from(wall_top),
            bottom: box_from(wall_bottom),
            side: box_from(wall_side),
        },
    }
}
