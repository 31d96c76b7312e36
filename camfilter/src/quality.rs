use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info, warn};
use rayon::prelude::*;
use structopt::StructOpt;

use crate::color::{vertex_quality_ramp, ColorRamp};
use crate::filter::{DataMask, FilterCommand};
use crate::progress::{log_progress, Progress};
use base::defs::{Error, ErrorKind::*, Result};
use base::mesh::Mesh;
use base::shot::Shot;
use base::util::cli;
use base::{Point3, Vector3};

pub const INVALID_CAMERA_MESSAGE: &str = "Mesh has not a valid camera";

const PROGRESS_LABEL: &str = "Computing vertex quality";
const PROGRESS_STEPS: usize = 100;

fn not(flag: bool) -> bool {
    !flag
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, StructOpt)]
pub struct QualityParams {
    #[structopt(
        help = "Do not use depth as a factor",
        long = "no-depth",
        parse(from_flag = not)
    )]
    pub depth: bool,

    #[structopt(help = "Use cosine of viewing angle as a factor", long)]
    pub facing: bool,

    #[structopt(help = "Clip values outside the viewport to zero", long)]
    pub clip: bool,

    #[structopt(help = "Normalize all quality values in range [0..1]", long)]
    pub normalize: bool,

    #[structopt(help = "Map quality values into per-vertex color", long)]
    pub map: bool,
}

impl Default for QualityParams {
    fn default() -> Self {
        Self {
            depth: true,
            facing: false,
            clip: false,
            normalize: false,
            map: false,
        }
    }
}

#[derive(StructOpt)]
#[structopt(about = "Compute vertex quality using the mesh camera")]
pub struct QualityFromCameraCommand {
    #[structopt(flatten)]
    input: cli::DocumentInput,

    #[structopt(flatten)]
    output: cli::DocumentOutput,

    #[structopt(help = "Target mesh (current if omitted)", long)]
    mesh: Option<String>,

    #[structopt(flatten)]
    params: QualityParams,
}

impl QualityFromCameraCommand {
    pub fn run(&self) -> Result<()> {
        let mut doc = self.input.read()?;
        let command = FilterCommand::QualityFromCamera {
            mesh: self.mesh.clone(),
            params: self.params,
        };
        command.apply(&mut doc, &log_progress)?;
        self.output.write(&doc)
    }
}

/// Writes per-vertex quality derived from the mesh shot: the product of
/// the enabled factors, zeroed outside the viewport when clipping. The
/// mesh is left untouched if its shot is missing or invalid, or if its
/// channels are inconsistent.
pub fn quality_from_camera(
    mesh: &mut Mesh,
    params: &QualityParams,
    progress: Progress,
) -> Result<DataMask> {
    let shot = match mesh.shot {
        Some(shot) if shot.is_valid() => shot,
        _ => {
            return Err(Error::new(
                InvalidCamera,
                INVALID_CAMERA_MESSAGE.to_string(),
            ))
        }
    };
    mesh.validate()?;

    mesh.enable_quality();
    mesh.enable_color();

    info!("computing quality from camera for {} vertices", mesh.len());

    if let Some(bbox) = mesh.bbox() {
        let delta = bbox.diag() / 100.0;
        if params.facing && delta == 0.0 {
            warn!("degenerate bounding box, facing factor is zero");
        }
        compute_vertex_qualities(mesh, &shot, delta, params, progress);
    }

    let mut mask = DataMask::QUALITY;
    if params.normalize {
        normalize_vertex_quality(&mut mesh.qualities);
    }
    if params.map {
        vertex_quality_ramp(mesh, &ColorRamp::default());
        mask = mask | DataMask::COLOR;
    }

    Ok(mask)
}

fn vertex_quality(
    shot: &Shot,
    p: &Point3,
    n: &Vector3,
    delta: f64,
    params: &QualityParams,
) -> f64 {
    let pp = shot.project(p);
    let depth = shot.depth(p);
    let pc = shot.world_to_camera(p);
    let pn = shot.world_to_camera(&(p + n * delta));

    let mut q = 1.0;
    if params.depth {
        q *= depth;
    }
    if params.facing {
        q *= pn.z - pc.z;
    }
    if params.clip && !shot.is_inside_viewport(&pp) {
        q = 0.0;
    }
    q
}

fn compute_vertex_qualities(
    mesh: &mut Mesh,
    shot: &Shot,
    delta: f64,
    params: &QualityParams,
    progress: Progress,
) {
    let total = mesh.len();
    let chunk_size = (total + PROGRESS_STEPS - 1) / PROGRESS_STEPS;
    let done = AtomicUsize::new(0);
    let behind = AtomicUsize::new(0);

    let Mesh {
        vertices,
        normals,
        qualities,
        ..
    } = mesh;

    qualities
        .par_chunks_mut(chunk_size)
        .zip(vertices.par_chunks(chunk_size))
        .zip(normals.par_chunks(chunk_size))
        .for_each(|((qs, ps), ns)| {
            let mut num_behind = 0;
            for ((q, p), n) in qs.iter_mut().zip(ps).zip(ns) {
                *q = vertex_quality(shot, p, n, delta, params);
                if shot.depth(p) <= 0.0 {
                    num_behind += 1;
                }
            }
            behind.fetch_add(num_behind, Ordering::Relaxed);

            let num = done.fetch_add(qs.len(), Ordering::Relaxed);
            progress(((num + qs.len()) * 100 / total) as u8, PROGRESS_LABEL);
        });

    let behind = behind.into_inner();
    if behind > 0 {
        warn!("{} of {} vertices are behind the camera", behind, total);
    }
}

/// Range of the finite values.
pub fn quality_range(qualities: &[f64]) -> Option<(f64, f64)> {
    qualities
        .iter()
        .filter(|q| q.is_finite())
        .fold(None, |range, &q| match range {
            None => Some((q, q)),
            Some((min, max)) => Some((min.min(q), max.max(q))),
        })
}

/// Rescales into [0, 1]. Non-finite values and a degenerate range
/// become zero.
pub fn normalize_vertex_quality(qualities: &mut [f64]) {
    match quality_range(qualities) {
        Some((min, max)) if max > min => {
            for q in qualities.iter_mut() {
                *q = if q.is_finite() {
                    (*q - min) / (max - min)
                } else {
                    0.0
                };
            }
        }
        _ => {
            debug!("degenerate quality range, setting quality to zero");
            qualities.iter_mut().for_each(|q| *q = 0.0);
        }
    }
}
