//! Flat snapshot of a slice frame for storage in scene files.
//!
//! The snapshot holds every parameter of a [`SliceFrame`] except the derived
//! matrices, which are recomputed when the frame is rebuilt. The text format
//! is left to the caller through `serde`.

use nalgebra::Matrix3;
use nalgebra::Matrix4;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::enums::JumpMode;
use crate::enums::SliceResolutionMode;
use crate::enums::SliceSpacingMode;
use crate::interaction::InteractionFlags;
use crate::presets::OrientationPresets;
use crate::presets::PresetError;
use crate::slice_frame::SliceFrame;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttributeError {
    #[error("Layout grid must have at least one row and column, got {rows}x{columns}")]
    InvalidLayoutGrid { rows: u32, columns: u32 },

    #[error("Invalid orientation presets: {0}")]
    Preset(#[from] PresetError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetAttributes {
    pub name: String,
    /// Row-major 3x3 matrix
    pub matrix: [f64; 9],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceFrameAttributes {
    pub layout_name: String,
    pub view_group: i32,
    /// Name of the matching preset or "Reformat"; informational, the matrix
    /// is authoritative when restoring
    pub orientation: String,
    /// Row-major 4x4 matrix
    pub slice_to_world: [f64; 16],
    pub field_of_view: [f64; 3],
    pub xyz_origin: [f64; 3],
    pub dimensions: [u32; 3],
    pub slice_resolution_mode: SliceResolutionMode,
    pub uvw_origin: [f64; 3],
    pub uvw_extents: [f64; 3],
    pub uvw_dimensions: [u32; 3],
    pub uvw_maximum_dimensions: [u32; 3],
    pub slice_spacing_mode: SliceSpacingMode,
    pub prescribed_spacing: [f64; 3],
    pub jump_mode: JumpMode,
    pub active_slice: u32,
    pub layout_grid_rows: u32,
    pub layout_grid_columns: u32,
    pub slice_visible: bool,
    pub widget_visible: bool,
    pub use_label_outline: bool,
    pub widget_normal_locked_to_camera: bool,
    pub interacting: bool,
    pub interaction_flags: u32,
    pub interaction_flags_modifier: u32,
    pub restricted_view_ids: Vec<String>,
    pub orientation_presets: Vec<PresetAttributes>,
}

impl SliceFrame {
    /// Snapshot of all parameters
    pub fn attributes(&self) -> SliceFrameAttributes {
        let slice_to_world = self.slice_to_world();
        SliceFrameAttributes {
            layout_name: self.layout_name().to_owned(),
            view_group: self.view_group(),
            orientation: self.current_orientation_name(),
            slice_to_world: std::array::from_fn(|index| slice_to_world[(index / 4, index % 4)]),
            field_of_view: self.field_of_view(),
            xyz_origin: self.xyz_origin(),
            dimensions: self.dimensions(),
            slice_resolution_mode: self.resolution_mode(),
            uvw_origin: self.uvw_origin(),
            uvw_extents: self.uvw_extents(),
            uvw_dimensions: self.uvw_dimensions(),
            uvw_maximum_dimensions: self.uvw_maximum_dimensions(),
            slice_spacing_mode: self.spacing_mode(),
            prescribed_spacing: self.prescribed_spacing(),
            jump_mode: self.jump_mode(),
            active_slice: self.active_slice(),
            layout_grid_rows: self.layout_grid_rows(),
            layout_grid_columns: self.layout_grid_columns(),
            slice_visible: self.slice_visible(),
            widget_visible: self.widget_visible(),
            use_label_outline: self.use_label_outline(),
            widget_normal_locked_to_camera: self.widget_normal_locked_to_camera(),
            interacting: self.interacting(),
            interaction_flags: self.interaction_flags().bits(),
            interaction_flags_modifier: self.interaction_flags_modifier().bits(),
            restricted_view_ids: self.restricted_view_ids().to_vec(),
            orientation_presets: self
                .presets()
                .iter()
                .map(|(name, orientation)| PresetAttributes {
                    name: name.to_owned(),
                    matrix: std::array::from_fn(|index| orientation[(index / 3, index % 3)]),
                })
                .collect(),
        }
    }

    /// Rebuild a frame from a snapshot
    ///
    /// # Errors
    ///
    /// Fails on an empty layout grid or duplicate preset names. Unknown
    /// interaction flag bits are dropped.
    pub fn from_attributes(attributes: &SliceFrameAttributes) -> Result<Self, AttributeError> {
        if attributes.layout_grid_rows == 0 || attributes.layout_grid_columns == 0 {
            return Err(AttributeError::InvalidLayoutGrid {
                rows: attributes.layout_grid_rows,
                columns: attributes.layout_grid_columns,
            });
        }

        let mut presets = OrientationPresets::new();
        for preset in &attributes.orientation_presets {
            presets.add(preset.name.clone(), Matrix3::from_row_slice(&preset.matrix))?;
        }

        let mut frame = SliceFrame::with_presets(attributes.layout_name.clone(), presets);
        frame.set_view_group(attributes.view_group);
        frame.set_resolution_mode(attributes.slice_resolution_mode);
        frame.set_spacing_mode(attributes.slice_spacing_mode);
        frame.set_prescribed_spacing(attributes.prescribed_spacing);
        frame.set_uvw_maximum_dimensions(attributes.uvw_maximum_dimensions);
        // The layout grid sets the slice count, so it goes before the dimensions
        frame.set_layout_grid(attributes.layout_grid_rows, attributes.layout_grid_columns);
        frame.set_field_of_view(attributes.field_of_view);
        frame.set_dimensions(attributes.dimensions);
        frame.set_xyz_origin(attributes.xyz_origin);
        frame.set_uvw_extents_and_dimensions(attributes.uvw_extents, attributes.uvw_dimensions);
        frame.set_uvw_origin(attributes.uvw_origin);
        frame.set_slice_to_world(Matrix4::from_row_slice(&attributes.slice_to_world));
        frame.set_jump_mode(attributes.jump_mode);
        frame.set_active_slice(attributes.active_slice);
        frame.set_slice_visible(attributes.slice_visible);
        frame.set_widget_visible(attributes.widget_visible);
        frame.set_use_label_outline(attributes.use_label_outline);
        frame.set_widget_normal_locked_to_camera(attributes.widget_normal_locked_to_camera);
        frame.set_interacting(attributes.interacting);
        frame.set_interaction_flags(InteractionFlags::from_bits_truncate(
            attributes.interaction_flags,
        ));
        frame.set_interaction_flags_modifier(InteractionFlags::from_bits_truncate(
            attributes.interaction_flags_modifier,
        ));
        for view_id in &attributes.restricted_view_ids {
            frame.add_restricted_view_id(view_id.clone());
        }
        Ok(frame)
    }
}
