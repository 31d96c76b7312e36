use std::io::{Read, Write};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::defs::{Error, ErrorKind::*, IntoResult, Result};
use crate::mesh::Mesh;
use crate::raster::Raster;

/// Meshes and rasters addressable by filters. An unnamed target resolves
/// to the current item, or to the first one when nothing is current.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub meshes: IndexMap<String, Mesh>,
    #[serde(default)]
    pub rasters: IndexMap<String, Raster>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_mesh: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_raster: Option<String>,
}

fn resolve<'a, T>(
    items: &'a mut IndexMap<String, T>,
    name: Option<&str>,
    current: Option<&str>,
    what: &str,
) -> Result<&'a mut T> {
    let res = match name.or(current) {
        Some(name) => items.get_mut(name),
        None => items.get_index_mut(0).map(|(_, item)| item),
    };
    res.ok_or_else(|| {
        let desc = match name.or(current) {
            Some(name) => format!("no {} '{}' in document", what, name),
            None => format!("no {} in document", what),
        };
        Error::new(NoTarget, desc)
    })
}

impl Document {
    pub fn read<R: Read>(reader: R) -> Result<Document> {
        let doc: Document = serde_json::from_reader(reader)
            .res(|| "failed to parse document".to_string())?;
        for (name, mesh) in doc.meshes.iter() {
            mesh.validate().map_err(|err| {
                Error::new(
                    MalformedData,
                    format!("mesh '{}': {}", name, err.description),
                )
            })?;
        }
        Ok(doc)
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)
            .res(|| "failed to write document".to_string())
    }

    pub fn add_mesh(&mut self, name: &str, mesh: Mesh) {
        self.meshes.insert(name.to_string(), mesh);
        if self.current_mesh.is_none() {
            self.current_mesh = Some(name.to_string());
        }
    }

    pub fn add_raster(&mut self, name: &str, raster: Raster) {
        self.rasters.insert(name.to_string(), raster);
        if self.current_raster.is_none() {
            self.current_raster = Some(name.to_string());
        }
    }

    pub fn mesh_mut(&mut self, name: Option<&str>) -> Result<&mut Mesh> {
        let current = self.current_mesh.as_deref();
        resolve(&mut self.meshes, name, current, "mesh")
    }

    pub fn raster_mut(&mut self, name: Option<&str>) -> Result<&mut Raster> {
        let current = self.current_raster.as_deref();
        resolve(&mut self.rasters, name, current, "raster")
    }
}
