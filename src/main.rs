//! Command-line mesher: builds MapBlock meshes for a TOML scene and reports buffer stats.
#![forbid(unsafe_code)]

mod scene;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;

use nodemesh_content::{ContentRegistry, NameTextureSource, TextureSource};
use nodemesh_geom::IVec3;
use nodemesh_mesh::{MapBlockMesh, MeshMakeData};
use nodemesh_runtime::{MeshRequest, Runtime};
use nodemesh_voxel::{NodeMap, VoxelWindow};

use scene::SceneConfig;

fn parse_ivec(s: &str) -> Result<IVec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got '{s}'"));
    };
    let n = |v: &str| v.parse::<i32>().map_err(|e| format!("'{v}': {e}"));
    Ok(IVec3::new(n(*x)?, n(*y)?, n(*z)?))
}

#[derive(Parser, Debug)]
#[command(name = "nodemesh", version, about = "Build MapBlock meshes from a TOML scene")]
struct Args {
    /// Content definitions
    #[arg(long, default_value = "assets/content.toml")]
    content: PathBuf,

    /// Scene with [[fill]] and [[node]] placements
    #[arg(long, default_value = "assets/scene.toml")]
    scene: PathBuf,

    /// Block to build as x,y,z; repeatable. Defaults to every touched block.
    #[arg(long = "block", value_parser = parse_ivec)]
    blocks: Vec<IVec3>,

    /// Force smooth lighting on
    #[arg(long)]
    smooth: bool,

    /// Build through the worker pool
    #[arg(long)]
    runtime: bool,

    /// Worker threads for --runtime; overrides the scene's [runtime] table
    #[arg(long)]
    workers: Option<usize>,

    /// Animation time in seconds passed to animate()
    #[arg(long, default_value_t = 0.0)]
    time: f32,

    /// Crack stage, -1 for none
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    crack: i32,

    /// World position of the cracked node as x,y,z
    #[arg(long, value_parser = parse_ivec, allow_hyphen_values = true)]
    crack_pos: Option<IVec3>,

    /// Day/night ratio 0..=1000 for animate()
    #[arg(long, default_value_t = 1000)]
    ratio: u32,

    /// Treat blocks as far from the camera
    #[arg(long)]
    faraway: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// List every buffer, not just block totals
    #[arg(long)]
    verbose: bool,
}

fn init_logging(level: &str) {
    let level = level.parse().unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(level)
        .parse_env("RUST_LOG")
        .init();
}

fn make_data(map: &NodeMap, block_pos: IVec3, scene: &SceneConfig, args: &Args) -> MeshMakeData {
    let mut options = scene.mesh.clone();
    options.smooth_lighting |= args.smooth;
    let mut data = MeshMakeData::new(VoxelWindow::capture(map, block_pos), options);
    if let Some(p) = args.crack_pos {
        data.set_crack(args.crack, p);
    }
    data
}

fn report(block_pos: IVec3, mesh: &MapBlockMesh, tsrc: &dyn TextureSource, t_ms: u32, verbose: bool) {
    println!(
        "block ({}, {}, {}): {} buffers, {} vertices, {} triangles, animated={}, {} ms",
        block_pos.x,
        block_pos.y,
        block_pos.z,
        mesh.buffers().len(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.has_animation(),
        t_ms
    );
    if !verbose {
        return;
    }
    for (i, buf) in mesh.buffers().iter().enumerate() {
        println!(
            "  [{i:3}] {:<48} {:6} verts {:6} idx",
            tsrc.texture_name(buf.texture.id),
            buf.vertices.len(),
            buf.indices.len()
        );
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let ts = Arc::new(NameTextureSource::new());
    let reg = ContentRegistry::load_from_path(&args.content, ts.as_ref())?;
    let tsrc: Arc<dyn TextureSource> = ts;
    let mut scene = SceneConfig::load(&args.scene)?;
    if let Some(w) = args.workers {
        scene.runtime.workers = w;
    }
    let map = scene.build_map(&reg)?;
    let blocks = if args.blocks.is_empty() {
        map.touched_blocks()
    } else {
        args.blocks.clone()
    };
    if blocks.is_empty() {
        log::warn!("scene places no nodes; nothing to build");
        return Ok(());
    }

    let t0 = Instant::now();
    let mut meshes: Vec<(IVec3, MapBlockMesh, u32)> = Vec::with_capacity(blocks.len());
    if args.runtime {
        let rt = Runtime::new(&scene.runtime, Arc::new(reg), Arc::clone(&tsrc))?;
        for (rev, &b) in blocks.iter().enumerate() {
            rt.submit(MeshRequest {
                block_pos: b,
                rev: rev as u64,
                data: make_data(&map, b, &scene, &args),
                urgent: args.crack_pos.is_some_and(|p| nodemesh_voxel::block_of(p) == b),
            });
        }
        while meshes.len() < blocks.len() {
            let res = rt
                .recv_timeout(Duration::from_secs(30))
                .ok_or("timed out waiting for mesh workers")?;
            rt.forget(res.block_pos);
            meshes.push((res.block_pos, res.mesh, res.t_build_ms));
        }
        meshes.sort_by_key(|(b, _, _)| *b);
    } else {
        for &b in &blocks {
            let t = Instant::now();
            let mesh = MapBlockMesh::build(&make_data(&map, b, &scene, &args), &reg, Arc::clone(&tsrc));
            let ms = t.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
            meshes.push((b, mesh, ms));
        }
    }
    log::info!(
        target: "perf",
        "ms total={} blocks={} runtime={}",
        t0.elapsed().as_millis(),
        meshes.len(),
        args.runtime
    );

    let (mut verts, mut tris) = (0usize, 0usize);
    for (b, mesh, ms) in &mut meshes {
        mesh.animate(args.faraway, args.time, args.crack, args.ratio);
        report(*b, mesh, tsrc.as_ref(), *ms, args.verbose);
        verts += mesh.vertex_count();
        tris += mesh.triangle_count();
    }
    println!("total: {} blocks, {verts} vertices, {tris} triangles", meshes.len());
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);
    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
