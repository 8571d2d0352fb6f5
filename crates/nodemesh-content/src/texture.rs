use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::tile::TextureRef;

/// Texture lookup shared by registry compilation and mesh builds.
///
/// Implementations synchronise internally; builds on several threads may
/// resolve names concurrently.
pub trait TextureSource: Send + Sync {
    /// Interns `name`, returning a stable id. The empty name is id 0.
    fn texture_id(&self, name: &str) -> u32;

    /// Name previously interned under `id`; empty for unknown ids.
    fn texture_name(&self, id: u32) -> String;

    /// Region to sample for `name`, inside an atlas when one holds it.
    fn texture(&self, name: &str) -> TextureRef;

    /// Standalone copy of `tex`, sampled outside any atlas.
    fn texture_raw(&self, tex: &TextureRef) -> TextureRef {
        TextureRef::standalone(tex.id)
    }
}

/// Placement of a named texture inside an atlas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtlasRegion {
    pub atlas: u32,
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub tiled: u16,
}

#[derive(Default)]
struct Interner {
    names: Vec<String>,
    by_name: HashMap<String, u32>,
    atlas: HashMap<String, AtlasRegion>,
}

impl Interner {
    fn with_empty() -> Self {
        let mut s = Interner::default();
        s.names.push(String::new());
        s.by_name.insert(String::new(), 0);
        s
    }
}

/// In-memory texture source that only deals in names; no image data.
pub struct NameTextureSource {
    inner: RwLock<Interner>,
}

impl Default for NameTextureSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NameTextureSource {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Interner::with_empty()),
        }
    }

    // A poisoned lock still holds a consistent interner: every write is a
    // single insert.
    fn read(&self) -> RwLockReadGuard<'_, Interner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Interner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Places `name` inside an atlas. Later lookups of exactly that name
    /// return the region; derived names (`name^[crack...`) stay standalone.
    pub fn register_atlas_region(&self, name: &str, region: AtlasRegion) {
        self.write().atlas.insert(name.to_string(), region);
    }

    /// Number of interned names, including the empty name.
    pub fn len(&self) -> usize {
        self.read().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl TextureSource for NameTextureSource {
    fn texture_id(&self, name: &str) -> u32 {
        if let Some(&id) = self.read().by_name.get(name) {
            return id;
        }
        let mut w = self.write();
        // Another thread may have interned it between the two locks.
        if let Some(&id) = w.by_name.get(name) {
            return id;
        }
        let id = w.names.len() as u32;
        w.names.push(name.to_string());
        w.by_name.insert(name.to_string(), id);
        log::trace!("interned texture {id}: {name}");
        id
    }

    fn texture_name(&self, id: u32) -> String {
        self.read()
            .names
            .get(id as usize)
            .cloned()
            .unwrap_or_default()
    }

    fn texture(&self, name: &str) -> TextureRef {
        let id = self.texture_id(name);
        match self.read().atlas.get(name) {
            Some(r) => TextureRef {
                id,
                atlas: r.atlas,
                pos: r.pos,
                size: r.size,
                tiled: r.tiled,
            },
            None => TextureRef::standalone(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable() {
        let ts = NameTextureSource::new();
        assert!(ts.is_empty());
        assert_eq!(ts.texture_id(""), 0);
        let a = ts.texture_id("default_stone.png");
        let b = ts.texture_id("default_dirt.png");
        assert_ne!(a, b);
        assert_eq!(ts.texture_id("default_stone.png"), a);
        assert_eq!(ts.texture_name(a), "default_stone.png");
        assert_eq!(ts.texture_name(9999), "");
        assert_eq!(ts.len(), 3);
    }

    #[test]
    fn atlas_regions_and_raw_copies() {
        let ts = NameTextureSource::new();
        ts.register_atlas_region(
            "default_water.png",
            AtlasRegion {
                atlas: 1,
                pos: [0.5, 0.0],
                size: [0.25, 0.25],
                tiled: 2,
            },
        );
        let t = ts.texture("default_water.png");
        assert_eq!(t.atlas, 1);
        assert_eq!(t.tiled, 2);
        let raw = ts.texture_raw(&t);
        assert_eq!(raw.id, t.id);
        assert_eq!(raw.atlas, 0);
        assert_eq!(raw.size, [1.0, 1.0]);
        assert_eq!(raw.tiled, 0);
        let plain = ts.texture("default_water.png^[crack:1:0");
        assert_eq!(plain.atlas, 0);
    }
}
