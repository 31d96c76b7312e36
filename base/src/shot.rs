use serde::{Deserialize, Serialize};

use crate::defs::{Error, ErrorKind::*, Result};
use crate::{Point2, Point3, Quaternion, Vector2, Vector3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    Perspective,
    Orthographic,
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective
    }
}

// Image plane measures are in millimeters, the viewport is in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    #[serde(default)]
    pub projection: Projection,
    pub focal_mm: f64,
    pub pixel_size_mm: Vector2,
    pub center_px: Point2,
    #[serde(default)]
    pub distortion: [f64; 2], // Radial k1 and k2.
    pub viewport_px: [u32; 2],
}

impl Intrinsics {
    pub fn new(
        focal_mm: f64,
        pixel_size_mm: f64,
        viewport_px: [u32; 2],
    ) -> Intrinsics {
        Intrinsics {
            projection: Projection::Perspective,
            focal_mm,
            pixel_size_mm: Vector2::new(pixel_size_mm, pixel_size_mm),
            center_px: Point2::new(
                viewport_px[0] as f64 / 2.0,
                viewport_px[1] as f64 / 2.0,
            ),
            distortion: [0.0; 2],
            viewport_px,
        }
    }

    fn is_valid(&self) -> bool {
        let focal_ok = match self.projection {
            Projection::Perspective => {
                self.focal_mm.is_finite() && self.focal_mm > 0.0
            }
            Projection::Orthographic => true,
        };
        focal_ok
            && self.pixel_size_mm.iter().all(|s| s.is_finite() && *s > 0.0)
            && self.center_px.iter().all(|c| c.is_finite())
            && self.distortion.iter().all(|k| k.is_finite())
            && self.viewport_px[0] > 0
            && self.viewport_px[1] > 0
    }

    fn camera_to_image_plane(&self, p: &Point3) -> Point2 {
        match self.projection {
            Projection::Perspective => Point2::new(
                p.x / p.z * self.focal_mm,
                p.y / p.z * self.focal_mm,
            ),
            Projection::Orthographic => Point2::new(p.x, p.y),
        }
    }

    fn distort(&self, p: Point2) -> Point2 {
        let [k1, k2] = self.distortion;
        if k1 == 0.0 && k2 == 0.0 {
            return p;
        }
        let r2 = p.coords.norm_squared();
        p * (1.0 + k1 * r2 + k2 * r2 * r2)
    }

    fn image_plane_to_viewport(&self, p: Point2) -> Point2 {
        Point2::new(
            p.x / self.pixel_size_mm.x + self.center_px.x,
            p.y / self.pixel_size_mm.y + self.center_px.y,
        )
    }
}

impl Default for Intrinsics {
    fn default() -> Self {
        Intrinsics {
            projection: Projection::Perspective,
            focal_mm: 0.0,
            pixel_size_mm: Vector2::zeros(),
            center_px: Point2::origin(),
            distortion: [0.0; 2],
            viewport_px: [0, 0],
        }
    }
}

/// Rigid world-to-camera transform. The camera frame looks along `+z` with
/// `+x` to the right and `+y` down the image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extrinsics {
    pub rotation: Quaternion,
    pub viewpoint: Point3,
}

impl Default for Extrinsics {
    fn default() -> Self {
        Extrinsics {
            rotation: Quaternion::identity(),
            viewpoint: Point3::origin(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub intrinsics: Intrinsics,
    pub extrinsics: Extrinsics,
}

impl Shot {
    pub fn new(intrinsics: Intrinsics, extrinsics: Extrinsics) -> Shot {
        Shot {
            intrinsics,
            extrinsics,
        }
    }

    /// Places the camera at `eye` looking at `target`. The projection of
    /// `up` onto the image plane points to the top of the image.
    pub fn look_at(
        eye: &Point3,
        target: &Point3,
        up: &Vector3,
        intrinsics: Intrinsics,
    ) -> Result<Shot> {
        let forward = (target - eye)
            .try_normalize(f64::EPSILON)
            .ok_or_else(|| {
                Error::new(
                    MalformedData,
                    "camera target coincides with viewpoint".to_string(),
                )
            })?;
        let down = -(up - forward * up.dot(&forward))
            .try_normalize(f64::EPSILON)
            .ok_or_else(|| {
                Error::new(
                    MalformedData,
                    "camera up vector is parallel to view direction"
                        .to_string(),
                )
            })?;
        let right = down.cross(&forward);

        let basis = nalgebra::Matrix3::from_rows(&[
            right.transpose(),
            down.transpose(),
            forward.transpose(),
        ]);
        let rotation = nalgebra::Rotation3::from_matrix_unchecked(basis);

        Ok(Shot::new(
            intrinsics,
            Extrinsics {
                rotation: Quaternion::from_rotation_matrix(&rotation),
                viewpoint: *eye,
            },
        ))
    }

    pub fn is_valid(&self) -> bool {
        let e = &self.extrinsics;
        self.intrinsics.is_valid()
            && e.rotation.coords.iter().all(|c| c.is_finite())
            && e.viewpoint.iter().all(|c| c.is_finite())
    }

    pub fn viewpoint(&self) -> Point3 {
        self.extrinsics.viewpoint
    }

    /// Optical axis in world coordinates.
    pub fn axis(&self) -> Vector3 {
        self.extrinsics.rotation.inverse() * Vector3::z()
    }

    pub fn viewport(&self) -> Vector2 {
        let [w, h] = self.intrinsics.viewport_px;
        Vector2::new(w as f64, h as f64)
    }

    pub fn world_to_camera(&self, p: &Point3) -> Point3 {
        Point3::from(self.extrinsics.rotation * (p - self.extrinsics.viewpoint))
    }

    pub fn depth(&self, p: &Point3) -> f64 {
        self.world_to_camera(p).z
    }

    pub fn project(&self, p: &Point3) -> Point2 {
        let i = &self.intrinsics;
        let plane = i.camera_to_image_plane(&self.world_to_camera(p));
        i.image_plane_to_viewport(i.distort(plane))
    }

    // Edges belong to the viewport.
    pub fn is_inside_viewport(&self, pp: &Point2) -> bool {
        let viewport = self.viewport();
        !(pp.x < 0.0 || pp.y < 0.0 || pp.x > viewport.x || pp.y > viewport.y)
    }
}
