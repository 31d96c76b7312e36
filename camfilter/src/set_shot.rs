use std::path::PathBuf;

use log::{info, warn};
use structopt::StructOpt;

use crate::filter::{DataMask, FilterCommand};
use crate::progress::no_progress;
use base::defs::{Error, ErrorKind::*, IntoResult, Result};
use base::document::Document;
use base::shot::{Intrinsics, Shot};
use base::util::cli::{self, Array as CliArray};
use base::util::fs;
use base::{Point3, Vector3};

#[derive(StructOpt)]
pub struct ShotParams {
    #[structopt(
        help = "Input shot .json file",
        long,
        conflicts_with = "viewpoint",
        required_unless = "viewpoint"
    )]
    shot_file: Option<PathBuf>,

    #[structopt(help = "Camera viewpoint in form 'x,y,z'", long)]
    viewpoint: Option<CliArray<f64, 3>>,

    #[structopt(
        help = "Point the camera looks at in form 'x,y,z'",
        long,
        default_value = "0,0,0"
    )]
    target: CliArray<f64, 3>,

    #[structopt(
        help = "Camera up direction in form 'x,y,z'",
        long,
        default_value = "0,0,1"
    )]
    up: CliArray<f64, 3>,

    #[structopt(
        help = "Focal length in millimeters",
        long,
        default_value = "35"
    )]
    focal: f64,

    #[structopt(
        help = "Pixel size in millimeters",
        long,
        default_value = "0.01"
    )]
    pixel_size: f64,

    #[structopt(
        help = "Viewport size in pixels in form 'width,height'",
        long,
        default_value = "1920,1080"
    )]
    viewport: CliArray<u32, 2>,
}

impl ShotParams {
    pub fn get(&self) -> Result<Shot> {
        let shot = if let Some(viewpoint) = &self.viewpoint {
            Shot::look_at(
                &Point3::from(viewpoint.0),
                &Point3::from(self.target.0),
                &Vector3::from(self.up.0),
                Intrinsics::new(self.focal, self.pixel_size, self.viewport.0),
            )?
        } else {
            let path = self.shot_file.as_ref().ok_or_else(|| {
                Error::new(
                    MalformedData,
                    "either shot file or viewpoint is required".to_string(),
                )
            })?;
            let json = fs::read_file_to_string(path)?;
            serde_json::from_str(&json)
                .res(|| format!("failed to parse shot '{}'", path.display()))?
        };

        if !shot.is_valid() {
            warn!("assigning invalid shot");
        }
        Ok(shot)
    }
}

#[derive(StructOpt)]
#[structopt(about = "Set a shot for a mesh")]
pub struct SetMeshShotCommand {
    #[structopt(flatten)]
    input: cli::DocumentInput,

    #[structopt(flatten)]
    output: cli::DocumentOutput,

    #[structopt(help = "Target mesh (current if omitted)", long)]
    mesh: Option<String>,

    #[structopt(flatten)]
    shot: ShotParams,
}

impl SetMeshShotCommand {
    pub fn run(&self) -> Result<()> {
        let mut doc = self.input.read()?;
        let command = FilterCommand::SetMeshShot {
            mesh: self.mesh.clone(),
            shot: self.shot.get()?,
        };
        command.apply(&mut doc, &no_progress)?;
        self.output.write(&doc)
    }
}

#[derive(StructOpt)]
#[structopt(about = "Set a shot for a raster")]
pub struct SetRasterShotCommand {
    #[structopt(flatten)]
    input: cli::DocumentInput,

    #[structopt(flatten)]
    output: cli::DocumentOutput,

    #[structopt(help = "Target raster (current if omitted)", long)]
    raster: Option<String>,

    #[structopt(flatten)]
    shot: ShotParams,
}

impl SetRasterShotCommand {
    pub fn run(&self) -> Result<()> {
        let mut doc = self.input.read()?;
        let command = FilterCommand::SetRasterShot {
            raster: self.raster.clone(),
            shot: self.shot.get()?,
        };
        command.apply(&mut doc, &no_progress)?;
        self.output.write(&doc)
    }
}

/// Overwrites the shot slot of a mesh.
pub fn set_mesh_shot(
    doc: &mut Document,
    mesh: Option<&str>,
    shot: Shot,
) -> Result<DataMask> {
    doc.mesh_mut(mesh)?.shot = Some(shot);
    info!("mesh shot set to viewpoint {}", shot.viewpoint());
    Ok(DataMask::NONE)
}

/// Overwrites the shot slot of a raster.
pub fn set_raster_shot(
    doc: &mut Document,
    raster: Option<&str>,
    shot: Shot,
) -> Result<DataMask> {
    doc.raster_mut(raster)?.shot = Some(shot);
    info!("raster shot set to viewpoint {}", shot.viewpoint());
    Ok(DataMask::NONE)
}
