//! MapBlock meshing: face tiling, special drawtypes, buffer packing and animation.
#![forbid(unsafe_code)]

pub mod collector;
pub mod cuboid;
pub mod fastface;
pub mod mapblock_mesh;
pub mod options;
mod special;
pub mod tile;
pub mod vertex;
pub mod visibility;

pub use collector::{MeshBuffer, MeshCollector};
pub use cuboid::{CuboidLight, FULL_UV, make_cuboid};
pub use fastface::{FastFace, collect_fast_faces, make_fast_face};
pub use mapblock_mesh::{MapBlockMesh, MeshMakeData};
pub use options::{IndexOverflow, MeshOptions};
pub use special::generate_special;
pub use tile::TileResolver;
pub use vertex::{Color, Vertex};
pub use visibility::{FaceContents, FaceOwner, face_contents};
