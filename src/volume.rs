use nalgebra::Matrix3;
use nalgebra::Matrix4;
use nalgebra::Point3;
use nalgebra::Vector3;
use ndarray::Array3;

use crate::matrix;

/// Geometry of an image volume as seen by the slice frame.
///
/// Indices follow the (i, j, k) convention: `dimensions()[0]` is the number
/// of voxels along i, the column index of the image.
pub trait VolumeGeometry {
    /// Number of voxels along i, j and k
    fn dimensions(&self) -> [usize; 3];

    /// Voxel spacing along i, j and k in mm
    fn spacing(&self) -> [f64; 3];

    /// Mapping from voxel indices to world coordinates
    fn ijk_to_world(&self) -> Matrix4<f64>;

    /// Axis along which the volume is a single slice thick, if any
    fn single_slice_axis(&self) -> Option<usize> {
        self.dimensions().iter().position(|&count| count == 1)
    }
}

/// Voxel block with its placement in world space.
pub struct Volume {
    pub data: Array3<u16>,
    pub spacing: (f64, f64, f64),
    pub origin: Point3<f64>,
    /// Unit direction of the i, j and k axes, one per column
    pub directions: Matrix3<f64>,
}

impl Volume {
    /// Axis-aligned volume with its first voxel at the world origin.
    ///
    /// `data` is indexed (depth, height, width), i.e. (k, j, i).
    pub fn new(data: Array3<u16>, spacing: (f64, f64, f64)) -> Self {
        Self {
            data,
            spacing,
            origin: Point3::origin(),
            directions: Matrix3::identity(),
        }
    }

    pub fn with_placement(mut self, origin: Point3<f64>, directions: Matrix3<f64>) -> Self {
        self.origin = origin;
        self.directions = directions;
        self
    }

    /// Get the dimensions of the volume (depth, height, width)
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Get a reference to the underlying data
    pub fn data(&self) -> &Array3<u16> {
        &self.data
    }

    /// Get a mutable reference to the underlying data
    pub fn data_mut(&mut self) -> &mut Array3<u16> {
        &mut self.data
    }
}

impl VolumeGeometry for Volume {
    fn dimensions(&self) -> [usize; 3] {
        let (depth, height, width) = self.dim();
        [width, height, depth]
    }

    fn spacing(&self) -> [f64; 3] {
        let (x_spacing, y_spacing, z_spacing) = self.spacing;
        [x_spacing, y_spacing, z_spacing]
    }

    fn ijk_to_world(&self) -> Matrix4<f64> {
        let scale = Matrix3::from_diagonal(&Vector3::from(VolumeGeometry::spacing(self)));
        let ijk_to_world = matrix::with_rotation(&Matrix4::identity(), &(self.directions * scale));
        matrix::with_translation(&ijk_to_world, &self.origin.coords)
    }
}

/// Sampling of one or more volumes expressed along the axes of a slice plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeSampling {
    /// Spacing of the volume axis closest to each slice axis
    pub spacing: [f64; 3],
    /// Size of the volume's bounding box along each slice axis
    pub extents: [f64; 3],
}

impl VolumeSampling {
    /// Sampling of `volume` along the axes of `slice_to_world`
    ///
    /// Returns `None` if the slice axes are degenerate.
    pub fn from_volume(volume: &dyn VolumeGeometry, slice_to_world: &Matrix4<f64>) -> Option<Self> {
        let world_to_slice = matrix::rotation_block(slice_to_world).try_inverse()?;
        let ijk_to_slice = world_to_slice * matrix::rotation_block(&volume.ijk_to_world());
        let volume_spacing = volume.spacing();

        let mut spacing = [0.0; 3];
        for (axis, value) in spacing.iter_mut().enumerate() {
            // Volume axis contributing most to this slice axis
            let closest = (0..3)
                .map(|ijk| {
                    let spacing = volume_spacing[ijk].max(f64::MIN_POSITIVE);
                    let alignment = ijk_to_slice[(axis, ijk)].abs() / spacing;
                    (ijk, alignment)
                })
                .fold((0, f64::MIN), |best, candidate| {
                    if candidate.1 > best.1 {
                        candidate
                    } else {
                        best
                    }
                })
                .0;
            *value = volume_spacing[closest];
        }

        // Voxel corners sit half a voxel outside the centers
        let dims = volume.dimensions();
        let mut min = Vector3::repeat(f64::MAX);
        let mut max = Vector3::repeat(f64::MIN);
        for corner in 0..8 {
            let ijk = Vector3::from_fn(|axis, _| {
                if corner & (1 << axis) == 0 { -0.5 } else { dims[axis] as f64 - 0.5 }
            });
            let position = ijk_to_slice * ijk;
            min = min.inf(&position);
            max = max.sup(&position);
        }
        let size = max - min;

        Some(Self {
            spacing,
            extents: [size.x, size.y, size.z],
        })
    }

    /// Combined sampling of several volumes
    ///
    /// Takes the finest spacing and the largest extent along each slice axis.
    pub fn from_volumes<'a>(
        volumes: impl IntoIterator<Item = &'a dyn VolumeGeometry>,
        slice_to_world: &Matrix4<f64>,
    ) -> Option<Self> {
        volumes
            .into_iter()
            .filter_map(|volume| Self::from_volume(volume, slice_to_world))
            .reduce(|combined, sampling| Self {
                spacing: std::array::from_fn(|axis| {
                    combined.spacing[axis].min(sampling.spacing[axis])
                }),
                extents: std::array::from_fn(|axis| {
                    combined.extents[axis].max(sampling.extents[axis])
                }),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(depth: usize, height: usize, width: usize, spacing: (f64, f64, f64)) -> Volume {
        Volume::new(Array3::zeros((depth, height, width)), spacing)
    }

    #[test]
    fn dimensions_are_ijk_ordered() {
        let volume = volume(10, 20, 30, (1.0, 1.0, 2.0));
        assert_eq!(volume.dimensions(), [30, 20, 10]);
        assert_eq!(volume.dim(), (10, 20, 30));
        assert_eq!(volume.single_slice_axis(), None);
    }

    #[test]
    fn data_is_indexed_kji() {
        let mut volume = volume(2, 3, 4, (1.0, 1.0, 1.0));
        volume.data_mut()[[1, 2, 3]] = 7;
        assert_eq!(volume.data()[[1, 2, 3]], 7);
        assert_eq!(volume.data().iter().map(|&value| u32::from(value)).sum::<u32>(), 7);
    }

    #[test]
    fn single_slice_detection() {
        assert_eq!(volume(1, 64, 64, (1.0, 1.0, 1.0)).single_slice_axis(), Some(2));
        assert_eq!(volume(64, 64, 1, (1.0, 1.0, 1.0)).single_slice_axis(), Some(0));
    }

    #[test]
    fn ijk_to_world_places_voxels() {
        let volume = volume(4, 4, 4, (0.5, 0.5, 2.0))
            .with_placement(Point3::new(10.0, 20.0, 30.0), Matrix3::identity());
        let ijk_to_world = volume.ijk_to_world();
        let world = ijk_to_world.transform_point(&Point3::new(2.0, 2.0, 2.0));
        assert_eq!(world, Point3::new(11.0, 21.0, 34.0));
    }

    #[test]
    fn sampling_along_axial_slice() {
        let volume = volume(10, 20, 30, (0.5, 0.8, 3.0));
        let sampling = VolumeSampling::from_volume(&volume, &Matrix4::identity()).unwrap();
        assert_eq!(sampling.spacing, [0.5, 0.8, 3.0]);
        assert!((sampling.extents[0] - 15.0).abs() < 1e-9);
        assert!((sampling.extents[1] - 16.0).abs() < 1e-9);
        assert!((sampling.extents[2] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn sampling_follows_slice_axes() {
        let volume = volume(10, 20, 30, (0.5, 0.8, 3.0));
        let sagittal = matrix::with_rotation(&Matrix4::identity(), &matrix::sagittal_matrix());
        let sampling = VolumeSampling::from_volume(&volume, &sagittal).unwrap();
        // Sagittal slice x runs along world y, slice y along world z
        assert_eq!(sampling.spacing, [0.8, 3.0, 0.5]);
        assert!((sampling.extents[1] - 30.0).abs() < 1e-9);
    }

    #[test]
    fn combined_sampling_takes_finest_spacing() {
        let coarse = volume(10, 10, 10, (2.0, 2.0, 2.0));
        let fine = volume(4, 4, 4, (0.5, 0.5, 0.5));
        let volumes: [&dyn VolumeGeometry; 2] = [&coarse, &fine];
        let sampling = VolumeSampling::from_volumes(volumes, &Matrix4::identity()).unwrap();
        assert_eq!(sampling.spacing, [0.5, 0.5, 0.5]);
        assert!((sampling.extents[0] - 20.0).abs() < 1e-9);
        let none: Vec<&dyn VolumeGeometry> = Vec::new();
        assert!(VolumeSampling::from_volumes(none, &Matrix4::identity()).is_none());
    }
}
