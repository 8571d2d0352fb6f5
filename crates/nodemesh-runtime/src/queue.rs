use std::collections::VecDeque;

use nodemesh_geom::IVec3;
use nodemesh_mesh::MeshMakeData;

/// One pending block rebuild.
#[derive(Clone, Debug)]
pub struct MeshRequest {
    pub block_pos: IVec3,
    pub rev: u64,
    pub data: MeshMakeData,
    pub urgent: bool,
}

/// Pending rebuilds, at most one per block.
///
/// A request for a queued block replaces its data in place unless it carries
/// an older revision; urgency sticks once set. `pop` hands out the oldest urgent request first, then
/// the oldest request.
#[derive(Default)]
pub struct UpdateQueue {
    items: VecDeque<MeshRequest>,
}

impl UpdateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `req`. Returns false when it merged into a request that was
    /// already waiting for the same block.
    pub fn push(&mut self, req: MeshRequest) -> bool {
        if let Some(old) = self.items.iter_mut().find(|r| r.block_pos == req.block_pos) {
            let urgent = old.urgent || req.urgent;
            if req.rev >= old.rev {
                *old = req;
            }
            old.urgent = urgent;
            return false;
        }
        self.items.push_back(req);
        true
    }

    pub fn pop(&mut self) -> Option<MeshRequest> {
        let i = self.items.iter().position(|r| r.urgent).unwrap_or(0);
        self.items.remove(i)
    }

    /// Drops the queued request for `block_pos`, if any.
    pub fn remove(&mut self, block_pos: IVec3) -> Option<MeshRequest> {
        let i = self.items.iter().position(|r| r.block_pos == block_pos)?;
        self.items.remove(i)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
