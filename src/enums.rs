use nalgebra::Matrix3;
use serde::Deserialize;
use serde::Serialize;

use crate::matrix;

/// Built-in radiological orientations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Axial,
    Sagittal,
    Coronal,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [
        Orientation::Axial,
        Orientation::Sagittal,
        Orientation::Coronal,
    ];

    /// Preset name under which the orientation is registered by default
    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Axial => "Axial",
            Orientation::Sagittal => "Sagittal",
            Orientation::Coronal => "Coronal",
        }
    }

    pub fn matrix(&self) -> Matrix3<f64> {
        match self {
            Orientation::Axial => matrix::axial_matrix(),
            Orientation::Sagittal => matrix::sagittal_matrix(),
            Orientation::Coronal => matrix::coronal_matrix(),
        }
    }
}

/// How a jump moves the slice plane onto the target point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpMode {
    /// The target point becomes the center of the slice.
    Centered,
    /// The slice only moves along its normal until it contains the point.
    #[default]
    Offset,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliceSpacingMode {
    #[default]
    Automatic,
    Prescribed,
}

/// Method for deriving the UVW (reslice) geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliceResolutionMode {
    MatchVolumes,
    #[default]
    Match2DView,
    FOVMatch2DViewSpacingMatchVolumes,
    FOVMatchVolumesSpacingMatch2DView,
    Custom,
}

impl SliceResolutionMode {
    /// True when the UVW extents follow the 2D view's field of view.
    pub(crate) fn extents_follow_view(&self) -> bool {
        matches!(
            self,
            SliceResolutionMode::Match2DView
                | SliceResolutionMode::FOVMatch2DViewSpacingMatchVolumes
        )
    }

    /// True when the UVW grid needs the sampling of the displayed volumes.
    pub(crate) fn needs_volume_sampling(&self) -> bool {
        matches!(
            self,
            SliceResolutionMode::MatchVolumes
                | SliceResolutionMode::FOVMatch2DViewSpacingMatchVolumes
                | SliceResolutionMode::FOVMatchVolumesSpacingMatch2DView
        )
    }
}

/// Placement of the slice plane relative to a tracked locator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LocatorOrientation {
    /// Plane normal along the locator direction.
    #[default]
    Perpendicular,
    /// Plane contains the locator, spanned by locator and transverse direction.
    InPlane,
    /// Same plane as `InPlane`, rotated by 90 degrees in-plane.
    InPlane90,
}
