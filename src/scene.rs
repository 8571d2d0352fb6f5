use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use nodemesh_content::{ContentRegistry, Node};
use nodemesh_geom::IVec3;
use nodemesh_mesh::MeshOptions;
use nodemesh_runtime::RuntimeConfig;
use nodemesh_voxel::NodeMap;

/// One placement: a content name plus its raw params.
#[derive(Clone, Debug, Deserialize)]
pub struct Placement {
    pub node: String,
    #[serde(default)]
    pub param1: u8,
    #[serde(default)]
    pub param2: u8,
    /// `[day, night]`, packed into `param1` when present.
    pub light: Option<[u8; 2]>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FillDef {
    pub min: [i32; 3],
    pub max: [i32; 3],
    #[serde(flatten)]
    pub place: Placement,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NodeDef {
    pub pos: [i32; 3],
    #[serde(flatten)]
    pub place: Placement,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BoundsDef {
    pub min: [i32; 3],
    pub max: [i32; 3],
}

/// A scene file: options plus node placements applied in order, fills first.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub mesh: MeshOptions,
    pub runtime: RuntimeConfig,
    pub bounds: Option<BoundsDef>,
    pub fill: Vec<FillDef>,
    pub node: Vec<NodeDef>,
}

fn ivec(a: [i32; 3]) -> IVec3 {
    IVec3::new(a[0], a[1], a[2])
}

impl Placement {
    fn resolve(&self, reg: &ContentRegistry) -> Result<Node, Box<dyn Error>> {
        let id = reg
            .id_by_name(&self.node)
            .ok_or_else(|| format!("scene names unknown node '{}'", self.node))?;
        Ok(match self.light {
            Some([day, night]) => Node::with_params(id, (day & 0x0f) | ((night & 0x0f) << 4), self.param2),
            None => Node::with_params(id, self.param1, self.param2),
        })
    }
}

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Builds the world. Unset positions are air lit by full daylight.
    pub fn build_map(&self, reg: &ContentRegistry) -> Result<NodeMap, Box<dyn Error>> {
        let mut map = NodeMap::default();
        if let Some(b) = &self.bounds {
            map = map.with_bounds(ivec(b.min), ivec(b.max));
        }
        for f in &self.fill {
            map.fill(ivec(f.min), ivec(f.max), f.place.resolve(reg)?);
        }
        for n in &self.node {
            map.set(ivec(n.pos), n.place.resolve(reg)?);
        }
        log::info!(
            "scene: {} fills, {} nodes, {} positions set",
            self.fill.len(),
            self.node.len(),
            map.len()
        );
        Ok(map)
    }
}
