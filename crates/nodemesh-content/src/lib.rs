//! Node values, content features, tiles and the content registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod features;
pub mod node;
pub mod registry;
pub mod texture;
pub mod tile;

pub use features::{ContentFeatures, DrawType, LiquidType, NodeBox, ParamType, ParamType2};
pub use node::{CONTENT_AIR, CONTENT_IGNORE, ContentId, LIGHT_MAX, LIGHT_SUN, LightBank, Node};
pub use registry::ContentRegistry;
pub use texture::{AtlasRegion, NameTextureSource, TextureSource};
pub use tile::{MaterialFlags, MaterialType, TextureRef, TileSpec};
