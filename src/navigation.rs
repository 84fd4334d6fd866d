//! Moving and rotating a slice frame.
//!
//! Jumps reposition the slice plane so that it contains a world point.
//! Rotations snap the slice axes onto the axes of a reference frame, usually
//! the voxel grid of a volume, so the displayed slice needs no oblique
//! resampling.

use nalgebra::Matrix3;
use nalgebra::Matrix4;
use nalgebra::Point3;
use nalgebra::Vector3;
use thiserror::Error;

use crate::enums::JumpMode;
use crate::enums::LocatorOrientation;
use crate::matrix;
use crate::slice_frame::SliceFrame;
use crate::volume::VolumeGeometry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Slice index {index} is outside of the {count} slices of the frame")]
    SliceIndexOutOfRange { index: u32, count: u32 },

    #[error("Reference axis {0} has zero length")]
    DegenerateAxis(usize),

    #[error("Axis index {0} is not one of 0, 1 or 2")]
    InvalidAxisIndex(usize),

    #[error("Locator directions are zero or parallel")]
    DegenerateLocator,

    #[error("Slice-to-world rotation is not invertible")]
    SingularSliceToWorld,
}

impl SliceFrame {
    /// Move the slice onto `point` using the configured [`JumpMode`]
    pub fn jump_slice(&mut self, point: Point3<f64>) {
        self.jump_slice_with(point, None);
    }

    /// Move the slice onto `point`, overriding the configured jump mode if
    /// `mode` is set
    pub fn jump_slice_with(&mut self, point: Point3<f64>, mode: Option<JumpMode>) {
        match mode.unwrap_or(self.jump_mode()) {
            JumpMode::Centered => self.jump_slice_by_centering(point),
            JumpMode::Offset => self.jump_slice_by_offsetting(point),
        }
    }

    /// Put `point` at the center of the slice, keeping the rotation
    pub fn jump_slice_by_centering(&mut self, point: Point3<f64>) {
        tracing::debug!(layout_name = %self.layout_name(), ?point, "jump slice by centering");
        let slice_to_world = matrix::with_translation(self.slice_to_world(), &point.coords);
        self.set_slice_to_world(slice_to_world);
    }

    /// Shift the slice along its normal until it contains `point`
    ///
    /// The in-plane position of the slice does not change.
    pub fn jump_slice_by_offsetting(&mut self, point: Point3<f64>) {
        tracing::debug!(layout_name = %self.layout_name(), ?point, "jump slice by offsetting");
        self.offset_to(point, 0.0);
    }

    /// Shift the slice along its normal so that lightbox slice `slice_index`
    /// contains `point`, and make that slice the active one
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::SliceIndexOutOfRange`] if the frame has no
    /// slice `slice_index`.
    pub fn jump_slice_by_offsetting_at(
        &mut self,
        slice_index: u32,
        point: Point3<f64>,
    ) -> Result<(), NavigationError> {
        let count = self.dimensions()[2];
        if slice_index >= count {
            return Err(NavigationError::SliceIndexOutOfRange {
                index: slice_index,
                count,
            });
        }
        tracing::debug!(
            layout_name = %self.layout_name(),
            slice_index,
            ?point,
            "jump lightbox slice by offsetting"
        );

        // Distance between neighbouring slices in world space
        let slice_step = self.pixel_to_world().fixed_view::<3, 1>(0, 2).norm();
        self.offset_to(point, slice_index as f64 * slice_step);
        self.set_active_slice(slice_index);
        Ok(())
    }

    /// Move along the normal so the plane `distance` above the slice contains `point`
    fn offset_to(&mut self, point: Point3<f64>, distance: f64) {
        let slice_to_world = *self.slice_to_world();
        let normal: Vector3<f64> = slice_to_world.fixed_view::<3, 1>(0, 2).into_owned();
        let Some(normal) = normal.try_normalize(f64::EPSILON) else {
            tracing::warn!(
                layout_name = %self.layout_name(),
                "slice normal has zero length, jump ignored"
            );
            return;
        };
        let position = matrix::translation(&slice_to_world);
        let offset = (point.coords - position).dot(&normal) - distance;
        let position = position + normal * offset;
        self.set_slice_to_world(matrix::with_translation(&slice_to_world, &position));
    }

    /// Distance of the slice plane from the world origin along its normal
    pub fn slice_offset(&self) -> f64 {
        let slice_to_world = self.slice_to_world();
        matrix::rotation_block(slice_to_world)
            .try_inverse()
            .map(|world_to_slice| (world_to_slice * matrix::translation(slice_to_world)).z)
            .unwrap_or(0.0)
    }

    /// Move the slice along its normal to `offset`, keeping the in-plane position
    pub fn set_slice_offset(&mut self, offset: f64) -> Result<(), NavigationError> {
        let slice_to_world = *self.slice_to_world();
        let rotation = matrix::rotation_block(&slice_to_world);
        let world_to_slice = rotation
            .try_inverse()
            .ok_or(NavigationError::SingularSliceToWorld)?;
        let mut position = world_to_slice * matrix::translation(&slice_to_world);
        position.z = offset;
        self.set_slice_to_world(matrix::with_translation(&slice_to_world, &(rotation * position)));
        Ok(())
    }

    /// Align the slice axes with the voxel axes of `volume`
    ///
    /// For a volume that is a single slice thick, the slice normal is aligned
    /// with that thin axis.
    pub fn rotate_to_volume_plane(
        &mut self,
        volume: &dyn VolumeGeometry,
    ) -> Result<(), NavigationError> {
        self.rotate_to_axes(&volume.ijk_to_world(), volume.single_slice_axis())
    }

    /// Align the slice axes with the axes of `reference_to_world`
    ///
    /// The slice normal is matched first, then the slice x axis, and the slice
    /// y axis takes the remaining reference axis. Each slice axis picks the
    /// reference axis with the largest absolute dot product, lowest index on
    /// ties, and keeps its current direction sign. With `normal_axis` set the
    /// slice normal is forced onto that reference axis. The slice position
    /// does not change.
    ///
    /// # Errors
    ///
    /// Fails without changing the slice if a reference axis has zero length
    /// or `normal_axis` is not 0, 1 or 2.
    pub fn rotate_to_axes(
        &mut self,
        reference_to_world: &Matrix4<f64>,
        normal_axis: Option<usize>,
    ) -> Result<(), NavigationError> {
        if let Some(index) = normal_axis.filter(|&index| index > 2) {
            return Err(NavigationError::InvalidAxisIndex(index));
        }

        let mut reference_axes = [Vector3::zeros(); 3];
        for (index, axis) in reference_axes.iter_mut().enumerate() {
            let column: Vector3<f64> = reference_to_world.fixed_view::<3, 1>(0, index).into_owned();
            *axis = column.try_normalize(0.0).ok_or_else(|| {
                tracing::warn!(axis = index, "reference axis has zero length");
                NavigationError::DegenerateAxis(index)
            })?;
        }

        let current = matrix::rotation_block(self.slice_to_world());
        let mut available = vec![0, 1, 2];
        let mut aligned = Matrix3::zeros();
        for slice_axis in [2, 0, 1] {
            let direction: Vector3<f64> = current.column(slice_axis).into_owned();
            let chosen = match normal_axis {
                Some(index) if slice_axis == 2 => index,
                _ => closest_axis(&direction, &reference_axes, &available),
            };
            available.retain(|&index| index != chosen);

            let sign = if direction.dot(&reference_axes[chosen]) < 0.0 { -1.0 } else { 1.0 };
            aligned.set_column(slice_axis, &(reference_axes[chosen] * sign));
        }

        tracing::debug!(
            layout_name = %self.layout_name(),
            ?normal_axis,
            "rotate slice to reference axes"
        );
        self.set_slice_to_world(matrix::with_rotation(self.slice_to_world(), &aligned));
        Ok(())
    }

    /// Place the slice relative to a tracked locator
    ///
    /// `normal` is the locator direction, `transverse` a second direction
    /// fixing the rotation about it (made orthogonal to `normal`) and
    /// `position` the locator tip, which becomes the slice center.
    pub fn set_slice_to_world_by_ntp(
        &mut self,
        normal: Vector3<f64>,
        transverse: Vector3<f64>,
        position: Point3<f64>,
        orientation: LocatorOrientation,
    ) -> Result<(), NavigationError> {
        let n = normal
            .try_normalize(f64::EPSILON)
            .ok_or(NavigationError::DegenerateLocator)?;
        let t = (transverse - n * transverse.dot(&n))
            .try_normalize(f64::EPSILON)
            .ok_or(NavigationError::DegenerateLocator)?;
        let c = n.cross(&t);

        let axes = match orientation {
            LocatorOrientation::Perpendicular => [t, c, n],
            LocatorOrientation::InPlane => [n, t, c],
            LocatorOrientation::InPlane90 => [t, n, -c],
        };
        let rotation = Matrix3::from_columns(&axes);
        let slice_to_world = matrix::with_rotation(&Matrix4::identity(), &rotation);
        self.set_slice_to_world(matrix::with_translation(&slice_to_world, &position.coords));
        Ok(())
    }
}

fn closest_axis(direction: &Vector3<f64>, axes: &[Vector3<f64>; 3], candidates: &[usize]) -> usize {
    let mut best = candidates[0];
    let mut best_alignment = f64::MIN;
    for &candidate in candidates {
        let alignment = direction.dot(&axes[candidate]).abs();
        if alignment > best_alignment {
            best = candidate;
            best_alignment = alignment;
        }
    }
    best
}
