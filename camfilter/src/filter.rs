use derive_more::BitOr;
use log::info;

use crate::progress::Progress;
use crate::quality::{quality_from_camera, QualityParams};
use crate::set_shot::{set_mesh_shot, set_raster_shot};
use base::defs::Result;
use base::document::Document;
use base::shot::Shot;

/// Per-vertex channels modified by a filter.
#[derive(BitOr, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DataMask(u8);

impl DataMask {
    pub const NONE: DataMask = DataMask(0);
    pub const QUALITY: DataMask = DataMask(1);
    pub const COLOR: DataMask = DataMask(2);

    pub fn contains(self, other: DataMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    SetMeshShot,
    SetRasterShot,
    QualityFromCamera,
}

impl Filter {
    pub const ALL: [Filter; 3] = [
        Filter::SetMeshShot,
        Filter::SetRasterShot,
        Filter::QualityFromCamera,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Filter::SetMeshShot => "Set Mesh Camera",
            Filter::SetRasterShot => "Set Raster Camera",
            Filter::QualityFromCamera => "Vertex Quality from Camera",
        }
    }

    pub fn info(self) -> &'static str {
        match self {
            Filter::SetMeshShot => "Set a shot for the current mesh",
            Filter::SetRasterShot => "Set a shot for the current raster",
            Filter::QualityFromCamera => concat!(
                "Compute vertex quality using the camera definition, ",
                "according to viewing angle or distance"
            ),
        }
    }

    /// Channels a successful run always leaves dirty.
    pub fn post_condition(self) -> DataMask {
        match self {
            Filter::QualityFromCamera => DataMask::QUALITY,
            _ => DataMask::NONE,
        }
    }
}

/// A filter together with its parameters. Targets left as `None` resolve
/// to the current mesh or raster of the document.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterCommand {
    SetMeshShot {
        mesh: Option<String>,
        shot: Shot,
    },
    SetRasterShot {
        raster: Option<String>,
        shot: Shot,
    },
    QualityFromCamera {
        mesh: Option<String>,
        params: QualityParams,
    },
}

impl FilterCommand {
    pub fn filter(&self) -> Filter {
        match self {
            FilterCommand::SetMeshShot { .. } => Filter::SetMeshShot,
            FilterCommand::SetRasterShot { .. } => Filter::SetRasterShot,
            FilterCommand::QualityFromCamera { .. } => {
                Filter::QualityFromCamera
            }
        }
    }

    pub fn apply(
        &self,
        doc: &mut Document,
        progress: Progress,
    ) -> Result<DataMask> {
        info!("applying filter '{}'", self.filter().name());

        match self {
            FilterCommand::SetMeshShot { mesh, shot } => {
                set_mesh_shot(doc, mesh.as_deref(), *shot)
            }
            FilterCommand::SetRasterShot { raster, shot } => {
                set_raster_shot(doc, raster.as_deref(), *shot)
            }
            FilterCommand::QualityFromCamera { mesh, params } => {
                let mesh = doc.mesh_mut(mesh.as_deref())?;
                quality_from_camera(mesh, params, progress)
            }
        }
    }
}
