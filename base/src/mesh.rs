use serde::{Deserialize, Serialize};

use crate::defs::{Error, ErrorKind::*, Result};
use crate::shot::Shot;
use crate::{Point3, Vector3};

pub type Color = [u8; 3];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    pub fn from_points<'a, I>(points: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(
            BoundingBox {
                min: first,
                max: first,
            },
            |bbox, p| BoundingBox {
                min: bbox.min.inf(p),
                max: bbox.max.sup(p),
            },
        ))
    }

    pub fn diag(&self) -> f64 {
        (self.max - self.min).norm()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3>,
    pub normals: Vec<Vector3>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faces: Vec<[usize; 3]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualities: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot: Option<Shot>,
}

impl Mesh {
    /// # Panics
    ///
    /// Panics if `vertices` and `normals` differ in length. Meshes built
    /// field by field are checked with [`Mesh::validate`] instead.
    pub fn new(
        vertices: Vec<Point3>,
        normals: Vec<Vector3>,
        faces: Vec<[usize; 3]>,
    ) -> Mesh {
        assert_eq!(vertices.len(), normals.len());
        Mesh {
            vertices,
            normals,
            faces,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// `None` for a mesh without vertices.
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }

    pub fn has_quality(&self) -> bool {
        self.qualities.len() == self.vertices.len()
    }

    pub fn has_color(&self) -> bool {
        self.colors.len() == self.vertices.len()
    }

    pub fn enable_quality(&mut self) {
        self.qualities.resize(self.vertices.len(), 0.0);
    }

    pub fn enable_color(&mut self) {
        self.colors.resize(self.vertices.len(), [255; 3]);
    }

    pub fn validate(&self) -> Result<()> {
        let num = self.vertices.len();
        let malformed = |desc: String| Err(Error::new(MalformedData, desc));

        if self.normals.len() != num {
            return malformed(format!(
                "{} normals for {} vertices",
                self.normals.len(),
                num
            ));
        }
        if !self.qualities.is_empty() && self.qualities.len() != num {
            return malformed(format!(
                "{} qualities for {} vertices",
                self.qualities.len(),
                num
            ));
        }
        if !self.colors.is_empty() && self.colors.len() != num {
            return malformed(format!(
                "{} colors for {} vertices",
                self.colors.len(),
                num
            ));
        }
        if let Some(face) =
            self.faces.iter().find(|f| f.iter().any(|&i| i >= num))
        {
            return malformed(format!("face {:?} is out of vertex range", face));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::assert_eq_f64;

    fn new_triangle() -> Mesh {
        Mesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(0.0, 4.0, 12.0),
            ],
            vec![Vector3::z(); 3],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_bbox() {
        let mesh = new_triangle();
        let bbox = mesh.bbox().unwrap();
        assert_eq!(bbox.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bbox.max, Point3::new(3.0, 4.0, 12.0));
        assert_eq_f64!(bbox.diag(), 13.0);

        assert!(Mesh::default().bbox().is_none());
    }

    #[test]
    fn test_enable_channels_is_idempotent() {
        let mut mesh = new_triangle();
        assert!(!mesh.has_quality());
        assert!(!mesh.has_color());

        mesh.enable_quality();
        mesh.qualities[1] = 7.0;
        mesh.enable_quality();
        mesh.enable_color();
        mesh.colors[2] = [1, 2, 3];
        mesh.enable_color();

        assert_eq!(mesh.qualities, vec![0.0, 7.0, 0.0]);
        assert_eq!(mesh.colors[2], [1, 2, 3]);
        assert!(mesh.has_quality() && mesh.has_color());
    }

    #[test]
    fn test_validate() {
        let mut mesh = new_triangle();
        assert!(mesh.validate().is_ok());

        mesh.faces.push([0, 1, 3]);
        assert_eq!(mesh.validate().unwrap_err().kind, MalformedData);

        let mut mesh = new_triangle();
        mesh.normals.pop();
        assert_eq!(mesh.validate().unwrap_err().kind, MalformedData);

        let mut mesh = new_triangle();
        mesh.qualities = vec![1.0];
        assert_eq!(mesh.validate().unwrap_err().kind, MalformedData);
    }

    #[test]
    #[should_panic]
    fn test_new_with_missing_normals() {
        Mesh::new(vec![Point3::origin(); 2], vec![Vector3::z()], vec![]);
    }
}
