//! Background mesh building: a de-duplicating update queue drained by a worker pool.
#![forbid(unsafe_code)]

mod queue;

pub use queue::{MeshRequest, UpdateQueue};

use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use hashbrown::HashMap;
use nodemesh_content::{ContentRegistry, TextureSource};
use nodemesh_geom::IVec3;
use nodemesh_mesh::MapBlockMesh;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Deserialize;

/// Worker pool settings, usually read from a `[runtime]` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Build threads; 0 picks one per available core.
    pub workers: usize,
}

impl RuntimeConfig {
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

pub struct MeshResult {
    pub block_pos: IVec3,
    pub rev: u64,
    pub mesh: MapBlockMesh,
    pub t_build_ms: u32,
}

struct Shared {
    queue: Mutex<UpdateQueue>,
    // Newest revision submitted per block.
    latest: Mutex<HashMap<IVec3, u64>>,
    inflight: AtomicUsize,
}

impl Shared {
    // Poisoning only means a worker panicked mid-build; the queue itself is
    // always left consistent.
    fn queue(&self) -> MutexGuard<'_, UpdateQueue> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn latest(&self) -> MutexGuard<'_, HashMap<IVec3, u64>> {
        self.latest.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn process_request(
    req: MeshRequest,
    reg: &ContentRegistry,
    tsrc: &Arc<dyn TextureSource>,
) -> MeshResult {
    let t0 = Instant::now();
    let mesh = MapBlockMesh::build(&req.data, reg, Arc::clone(tsrc));
    let t_build_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::debug!(
        "built block {:?} rev {} in {} ms ({} buffers)",
        req.block_pos,
        req.rev,
        t_build_ms,
        mesh.buffers().len()
    );
    MeshResult {
        block_pos: req.block_pos,
        rev: req.rev,
        mesh,
        t_build_ms,
    }
}

pub struct Runtime {
    shared: Arc<Shared>,
    wake_tx: Sender<()>,
    res_rx: Receiver<MeshResult>,
    _pool: ThreadPool,
    pub workers: usize,
}

impl Runtime {
    pub fn new(
        config: &RuntimeConfig,
        reg: Arc<ContentRegistry>,
        tsrc: Arc<dyn TextureSource>,
    ) -> Result<Self, Box<dyn Error>> {
        let workers = config.worker_count();
        let (wake_tx, wake_rx) = unbounded::<()>();
        let (res_tx, res_rx) = unbounded::<MeshResult>();
        let shared = Arc::new(Shared {
            queue: Mutex::new(UpdateQueue::new()),
            latest: Mutex::new(HashMap::new()),
            inflight: AtomicUsize::new(0),
        });

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("nodemesh-mesh-{i}"))
            .build()?;
        for _ in 0..workers {
            let wake_rx = wake_rx.clone();
            let tx = res_tx.clone();
            let shared = Arc::clone(&shared);
            let reg = Arc::clone(&reg);
            let tsrc = Arc::clone(&tsrc);
            pool.spawn(move || {
                // One wake token per submit; merged requests leave spare
                // tokens that find the queue empty.
                while wake_rx.recv().is_ok() {
                    let Some(req) = shared.queue().pop() else {
                        continue;
                    };
                    shared.inflight.fetch_add(1, Ordering::Relaxed);
                    let res = process_request(req, reg.as_ref(), &tsrc);
                    // Not in flight once the result is visible to the receiver
                    shared.inflight.fetch_sub(1, Ordering::Relaxed);
                    if tx.send(res).is_err() {
                        log::trace!("result receiver gone, stopping mesh worker");
                        break;
                    }
                }
            });
        }
        log::info!("mesh runtime started with {workers} workers");

        Ok(Self {
            shared,
            wake_tx,
            res_rx,
            _pool: pool,
            workers,
        })
    }

    /// Queues a rebuild. A request still waiting for the same block takes
    /// the newer of the two revisions.
    pub fn submit(&self, req: MeshRequest) {
        {
            let mut latest = self.shared.latest();
            let rev = latest.entry(req.block_pos).or_insert(req.rev);
            *rev = (*rev).max(req.rev);
        }
        let fresh = self.shared.queue().push(req);
        if !fresh {
            log::trace!("merged mesh request into a queued one");
        }
        if self.wake_tx.send(()).is_err() {
            log::warn!("no mesh workers left; request stays queued");
        }
    }

    /// Forgets everything known about `block_pos`: its newest revision and
    /// any request still waiting. Call when a block unloads or its mesh has
    /// been taken for good.
    pub fn forget(&self, block_pos: IVec3) {
        self.shared.latest().remove(&block_pos);
        if self.shared.queue().remove(block_pos).is_some() {
            log::trace!("dropped queued request for forgotten block {block_pos:?}");
        }
    }

    /// Blocks with a tracked revision.
    pub fn tracked_blocks(&self) -> usize {
        self.shared.latest().len()
    }

    pub fn drain_results(&self) -> Vec<MeshResult> {
        self.res_rx.try_iter().collect()
    }

    /// Waits up to `timeout` for the next finished build.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<MeshResult> {
        self.res_rx.recv_timeout(timeout).ok()
    }

    /// Whether `res` is from the newest revision submitted for its block.
    /// Results for forgotten blocks count as current.
    pub fn is_current(&self, res: &MeshResult) -> bool {
        self.shared
            .latest()
            .get(&res.block_pos)
            .is_none_or(|&rev| res.rev >= rev)
    }

    /// Queued and in-flight request counts.
    pub fn queue_counts(&self) -> (usize, usize) {
        (
            self.shared.queue().len(),
            self.shared.inflight.load(Ordering::Relaxed),
        )
    }
}
