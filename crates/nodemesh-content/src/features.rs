use nodemesh_geom::{Aabb, BS};
use serde::Deserialize;

use crate::node::{CONTENT_IGNORE, ContentId};
use crate::tile::TileSpec;

/// Selects the geometry generator for a content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum DrawType {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "airlike")]
    AirLike,
    #[serde(rename = "liquid")]
    Liquid,
    #[serde(rename = "flowingliquid")]
    FlowingLiquid,
    #[serde(rename = "glasslike")]
    GlassLike,
    #[serde(rename = "glasslike_framed")]
    GlassLikeFramed,
    #[serde(rename = "allfaces")]
    AllFaces,
    #[serde(rename = "allfaces_optional")]
    AllFacesOptional,
    #[serde(rename = "torchlike")]
    TorchLike,
    #[serde(rename = "signlike")]
    SignLike,
    #[serde(rename = "plantlike")]
    PlantLike,
    #[serde(rename = "fencelike")]
    FenceLike,
    #[serde(rename = "raillike")]
    RailLike,
    #[serde(rename = "nodebox")]
    NodeBox,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    #[default]
    None,
    Light,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType2 {
    #[default]
    None,
    Full,
    FlowingLiquid,
    FaceDir,
    WallMounted,
    GlassLikeLiquidLevel,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidType {
    #[default]
    None,
    Source,
    Flowing,
}

/// Node box in world units (multiples of `BS`), centred on the node.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum NodeBox {
    #[default]
    Regular,
    Fixed(Vec<Aabb>),
    WallMounted {
        top: Aabb,
        bottom: Aabb,
        side: Aabb,
    },
}

impl NodeBox {
    pub fn unit() -> Aabb {
        Aabb::from_coords(-BS / 2.0, -BS / 2.0, -BS / 2.0, BS / 2.0, BS / 2.0, BS / 2.0)
    }
}

/// Static per-content descriptor, compiled from a node definition.
#[derive(Clone, Debug)]
pub struct ContentFeatures {
    pub name: String,
    pub drawtype: DrawType,
    pub param_type: ParamType,
    pub param_type_2: ParamType2,
    /// 0 = see-through, 1 = semi-solid (liquid surface), 2 = solid.
    pub solidness: u8,
    /// Solidness used instead of `solidness` when that is 0, for faces
    /// between see-through nodes.
    pub visual_solidness: u8,
    /// Top, bottom, right, left, back, front.
    pub tiles: [TileSpec; 6],
    pub special_tiles: [TileSpec; 2],
    pub liquid_type: LiquidType,
    pub liquid_alternative_flowing: ContentId,
    pub liquid_alternative_source: ContentId,
    /// Number of flowing levels, 1..=8.
    pub liquid_range: u8,
    pub light_source: u8,
    pub light_propagates: bool,
    pub node_box: NodeBox,
    pub visual_scale: f32,
    pub alpha: u8,
    /// Rails with the same group connect to each other.
    pub connect_group: Option<String>,
}

impl ContentFeatures {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            drawtype: DrawType::Normal,
            param_type: ParamType::None,
            param_type_2: ParamType2::None,
            solidness: 2,
            visual_solidness: 0,
            tiles: [TileSpec::default(); 6],
            special_tiles: [TileSpec::default(); 2],
            liquid_type: LiquidType::None,
            liquid_alternative_flowing: CONTENT_IGNORE,
            liquid_alternative_source: CONTENT_IGNORE,
            liquid_range: 8,
            light_source: 0,
            light_propagates: false,
            node_box: NodeBox::Regular,
            visual_scale: 1.0,
            alpha: 255,
            connect_group: None,
        }
    }

    #[inline]
    pub fn is_liquid(&self) -> bool {
        self.liquid_type != LiquidType::None
    }

    /// Source and flowing forms of one liquid share their flowing alternative.
    #[inline]
    pub fn same_liquid(&self, other: &ContentFeatures) -> bool {
        self.is_liquid()
            && other.is_liquid()
            && self.liquid_alternative_flowing == other.liquid_alternative_flowing
    }

    /// Light passes through for smooth-lighting purposes.
    #[inline]
    pub fn is_light_transparent(&self) -> bool {
        self.param_type == ParamType::Light && self.solidness != 2
    }
}
