use nalgebra::Matrix3;
use nalgebra::Matrix4;

use crate::enums::JumpMode;
use crate::enums::Orientation;
use crate::enums::SliceResolutionMode;
use crate::enums::SliceSpacingMode;
use crate::interaction::InteractionFlags;
use crate::interaction::InteractionState;
use crate::matrix;
use crate::presets::OrientationPresets;
use crate::presets::PresetError;
use crate::volume::VolumeSampling;

/// Orientation name reported when the slice matches no preset.
pub const REFORMAT_ORIENTATION: &str = "Reformat";

const DEFAULT_FIELD_OF_VIEW: [f64; 3] = [250.0, 250.0, 1.0];
const DEFAULT_DIMENSIONS: [u32; 3] = [256, 256, 1];
const DEFAULT_UVW_MAXIMUM_DIMENSIONS: [u32; 3] = [1024, 1024, 1024];

/// A slice plane through world space and the pixel grids that sample it.
///
/// The frame owns five independent inputs (slice-to-world matrix, field of
/// view, dimensions, origins and resolution mode) and keeps four derived
/// matrices in sync with them:
///
/// | matrix | maps |
/// |---|---|
/// | [`pixel_to_slice`](Self::pixel_to_slice) | display pixels to slice mm |
/// | [`pixel_to_world`](Self::pixel_to_world) | display pixels to world mm |
/// | [`texel_to_slice`](Self::texel_to_slice) | reslice (UVW) texels to slice mm |
/// | [`texel_to_world`](Self::texel_to_world) | reslice (UVW) texels to world mm |
///
/// Every setter recomputes the derived matrices before it returns.
#[derive(Clone, Debug)]
pub struct SliceFrame {
    layout_name: String,
    view_group: i32,

    slice_to_world: Matrix4<f64>,
    field_of_view: [f64; 3],
    xyz_origin: [f64; 3],
    dimensions: [u32; 3],

    resolution_mode: SliceResolutionMode,
    uvw_origin: [f64; 3],
    uvw_extents: [f64; 3],
    uvw_dimensions: [u32; 3],
    uvw_maximum_dimensions: [u32; 3],
    volume_sampling: Option<VolumeSampling>,

    spacing_mode: SliceSpacingMode,
    prescribed_spacing: [f64; 3],
    jump_mode: JumpMode,

    active_slice: u32,
    layout_grid_rows: u32,
    layout_grid_columns: u32,

    slice_visible: bool,
    widget_visible: bool,
    use_label_outline: bool,
    widget_normal_locked_to_camera: bool,

    interaction: InteractionState,
    restricted_view_ids: Vec<String>,
    presets: OrientationPresets,

    xy_to_slice: Matrix4<f64>,
    xy_to_world: Matrix4<f64>,
    uvw_to_slice: Matrix4<f64>,
    uvw_to_world: Matrix4<f64>,

    updating_matrices: bool,
    modified_count: u64,
}

impl SliceFrame {
    /// Create a frame seeded with the Axial, Sagittal and Coronal presets
    pub fn new(layout_name: impl Into<String>) -> Self {
        Self::with_presets(layout_name, OrientationPresets::with_defaults())
    }

    /// Create a frame using the given preset registry
    pub fn with_presets(layout_name: impl Into<String>, presets: OrientationPresets) -> Self {
        let mut frame = Self {
            layout_name: layout_name.into(),
            view_group: 0,
            slice_to_world: Matrix4::identity(),
            field_of_view: DEFAULT_FIELD_OF_VIEW,
            xyz_origin: [0.0; 3],
            dimensions: DEFAULT_DIMENSIONS,
            resolution_mode: SliceResolutionMode::default(),
            uvw_origin: [0.0; 3],
            uvw_extents: DEFAULT_FIELD_OF_VIEW,
            uvw_dimensions: DEFAULT_DIMENSIONS,
            uvw_maximum_dimensions: DEFAULT_UVW_MAXIMUM_DIMENSIONS,
            volume_sampling: None,
            spacing_mode: SliceSpacingMode::default(),
            prescribed_spacing: [1.0; 3],
            jump_mode: JumpMode::default(),
            active_slice: 0,
            layout_grid_rows: 1,
            layout_grid_columns: 1,
            slice_visible: false,
            widget_visible: false,
            use_label_outline: false,
            widget_normal_locked_to_camera: false,
            interaction: InteractionState::default(),
            restricted_view_ids: Vec::new(),
            presets,
            xy_to_slice: Matrix4::identity(),
            xy_to_world: Matrix4::identity(),
            uvw_to_slice: Matrix4::identity(),
            uvw_to_world: Matrix4::identity(),
            updating_matrices: false,
            modified_count: 0,
        };
        frame.update_matrices();
        frame.modified_count = 0;
        frame
    }

    /// Restore default parameters
    ///
    /// The layout name, view group, presets and the current orientation
    /// survive the reset; the slice is moved back to the world origin.
    pub fn reset(&mut self) {
        let rotation = matrix::rotation_block(&self.slice_to_world);
        let view_group = self.view_group;
        let modified_count = self.modified_count;
        let defaults = Self::with_presets(self.layout_name.clone(), self.presets.clone());
        *self = Self {
            view_group,
            slice_to_world: matrix::with_rotation(&Matrix4::identity(), &rotation),
            modified_count,
            ..defaults
        };
        self.modified();
        self.update_matrices();
    }

    pub fn layout_name(&self) -> &str {
        &self.layout_name
    }

    pub fn view_group(&self) -> i32 {
        self.view_group
    }

    pub fn set_view_group(&mut self, view_group: i32) {
        if self.view_group != view_group {
            self.view_group = view_group;
            self.modified();
        }
    }

    /// Generation counter bumped by every observable change
    pub fn modified_count(&self) -> u64 {
        self.modified_count
    }

    fn modified(&mut self) {
        self.modified_count = self.modified_count.wrapping_add(1);
        tracing::trace!(
            layout_name = %self.layout_name,
            modified_count = self.modified_count,
            "slice frame modified"
        );
    }

    // Slice plane

    pub fn slice_to_world(&self) -> &Matrix4<f64> {
        &self.slice_to_world
    }

    /// Set the slice-to-world matrix
    ///
    /// Matrices equal to the current one within [`matrix::MATRIX_TOLERANCE`]
    /// are ignored.
    pub fn set_slice_to_world(&mut self, slice_to_world: Matrix4<f64>) {
        if matrix::matrices_equal(&self.slice_to_world, &slice_to_world, matrix::MATRIX_TOLERANCE) {
            return;
        }
        self.slice_to_world = slice_to_world;
        self.modified();
        self.update_matrices();
    }

    pub fn field_of_view(&self) -> [f64; 3] {
        self.field_of_view
    }

    /// Size of the slice plane in mm
    pub fn set_field_of_view(&mut self, field_of_view: [f64; 3]) {
        if self.field_of_view == field_of_view {
            return;
        }
        self.field_of_view = field_of_view;
        self.modified();
        self.update_matrices();
    }

    pub fn xyz_origin(&self) -> [f64; 3] {
        self.xyz_origin
    }

    /// Offset of the display grid relative to the slice center
    pub fn set_xyz_origin(&mut self, origin: [f64; 3]) {
        if self.xyz_origin == origin {
            return;
        }
        self.xyz_origin = origin;
        self.modified();
        self.update_matrices();
    }

    pub fn dimensions(&self) -> [u32; 3] {
        self.dimensions
    }

    /// Number of display pixels along x and y, and number of slices
    ///
    /// The number of slices is shared with the UVW grid.
    pub fn set_dimensions(&mut self, dimensions: [u32; 3]) {
        if self.dimensions == dimensions {
            return;
        }
        self.dimensions = dimensions;
        self.uvw_dimensions[2] = dimensions[2];
        self.clamp_active_slice();
        self.modified();
        self.update_matrices();
    }

    // Reslice (UVW) grid

    pub fn resolution_mode(&self) -> SliceResolutionMode {
        self.resolution_mode
    }

    pub fn set_resolution_mode(&mut self, mode: SliceResolutionMode) {
        if self.resolution_mode == mode {
            return;
        }
        tracing::debug!(layout_name = %self.layout_name, ?mode, "set slice resolution mode");
        self.resolution_mode = mode;
        self.modified();
        self.update_matrices();
    }

    pub fn uvw_origin(&self) -> [f64; 3] {
        self.uvw_origin
    }

    pub fn set_uvw_origin(&mut self, origin: [f64; 3]) {
        if self.uvw_origin == origin {
            return;
        }
        self.uvw_origin = origin;
        self.modified();
        self.update_matrices();
    }

    /// Set the origin of whichever grid the resolution mode lets the view pan
    ///
    /// While the UVW extents follow the view, the display origin is set and
    /// the UVW origin follows it. Otherwise the UVW origin is set directly.
    pub fn set_slice_origin(&mut self, origin: [f64; 3]) {
        if self.resolution_mode.extents_follow_view() {
            self.set_xyz_origin(origin);
        } else {
            self.set_uvw_origin(origin);
        }
    }

    pub fn uvw_extents(&self) -> [f64; 3] {
        self.uvw_extents
    }

    pub fn set_uvw_extents(&mut self, extents: [f64; 3]) {
        if self.uvw_extents == extents {
            return;
        }
        self.uvw_extents = extents;
        self.modified();
        self.update_matrices();
    }

    pub fn uvw_dimensions(&self) -> [u32; 3] {
        self.uvw_dimensions
    }

    /// Number of reslice texels along u and v, and number of slices
    ///
    /// The number of slices is shared with the display grid.
    pub fn set_uvw_dimensions(&mut self, dimensions: [u32; 3]) {
        if self.uvw_dimensions == dimensions {
            return;
        }
        self.uvw_dimensions = dimensions;
        self.dimensions[2] = dimensions[2];
        self.clamp_active_slice();
        self.modified();
        self.update_matrices();
    }

    /// Set UVW extents and dimensions with a single recomposition
    pub fn set_uvw_extents_and_dimensions(&mut self, extents: [f64; 3], dimensions: [u32; 3]) {
        if self.uvw_extents == extents && self.uvw_dimensions == dimensions {
            return;
        }
        self.uvw_extents = extents;
        self.uvw_dimensions = dimensions;
        self.dimensions[2] = dimensions[2];
        self.clamp_active_slice();
        self.modified();
        self.update_matrices();
    }

    pub fn uvw_maximum_dimensions(&self) -> [u32; 3] {
        self.uvw_maximum_dimensions
    }

    /// Upper bound for UVW dimensions computed by the resolution mode
    pub fn set_uvw_maximum_dimensions(&mut self, maximum: [u32; 3]) {
        if self.uvw_maximum_dimensions == maximum {
            return;
        }
        self.uvw_maximum_dimensions = maximum;
        self.modified();
        self.update_matrices();
    }

    pub fn volume_sampling(&self) -> Option<&VolumeSampling> {
        self.volume_sampling.as_ref()
    }

    /// Sampling of the displayed volumes along the current slice axes
    ///
    /// Used by automatic slice spacing and the volume-dependent resolution
    /// modes. The caller refreshes it when the slice orientation or the set
    /// of displayed volumes changes.
    pub fn set_volume_sampling(&mut self, sampling: Option<VolumeSampling>) {
        if self.volume_sampling == sampling {
            return;
        }
        self.volume_sampling = sampling;
        self.modified();
        self.update_matrices();
    }

    // Slice spacing

    pub fn spacing_mode(&self) -> SliceSpacingMode {
        self.spacing_mode
    }

    pub fn set_spacing_mode(&mut self, mode: SliceSpacingMode) {
        if self.spacing_mode == mode {
            return;
        }
        self.spacing_mode = mode;
        self.modified();
        self.update_matrices();
    }

    pub fn prescribed_spacing(&self) -> [f64; 3] {
        self.prescribed_spacing
    }

    pub fn set_prescribed_spacing(&mut self, spacing: [f64; 3]) {
        if self.prescribed_spacing == spacing {
            return;
        }
        self.prescribed_spacing = spacing;
        self.modified();
        self.update_matrices();
    }

    /// Effective spacing along the slice axes
    ///
    /// Prescribed mode returns the prescribed spacing. Automatic mode uses the
    /// volume sampling, or the display pixel size when no volume is known.
    pub fn slice_spacing(&self) -> [f64; 3] {
        match (self.spacing_mode, &self.volume_sampling) {
            (SliceSpacingMode::Prescribed, _) => self.prescribed_spacing,
            (SliceSpacingMode::Automatic, Some(sampling)) => sampling.spacing,
            (SliceSpacingMode::Automatic, None) => std::array::from_fn(|axis| {
                grid_spacing(self.field_of_view[axis], self.dimensions[axis]).unwrap_or(1.0)
            }),
        }
    }

    pub fn jump_mode(&self) -> JumpMode {
        self.jump_mode
    }

    pub fn set_jump_mode(&mut self, mode: JumpMode) {
        if self.jump_mode != mode {
            self.jump_mode = mode;
            self.modified();
        }
    }

    // Derived matrices

    /// Display pixel to slice plane (mm)
    pub fn pixel_to_slice(&self) -> &Matrix4<f64> {
        &self.xy_to_slice
    }

    /// Display pixel to world (mm)
    pub fn pixel_to_world(&self) -> &Matrix4<f64> {
        &self.xy_to_world
    }

    /// Reslice texel to slice plane (mm)
    pub fn texel_to_slice(&self) -> &Matrix4<f64> {
        &self.uvw_to_slice
    }

    /// Reslice texel to world (mm)
    pub fn texel_to_world(&self) -> &Matrix4<f64> {
        &self.uvw_to_world
    }

    /// Recompute the derived matrices from the current parameters
    ///
    /// Calls made while a recomposition is already running return
    /// immediately; the running one picks up the new values.
    pub fn update_matrices(&mut self) {
        if self.updating_matrices {
            return;
        }
        self.updating_matrices = true;

        self.sync_uvw_geometry();

        let slice_spacing = self.slice_spacing()[2];
        let xy_to_slice = grid_to_slice(
            self.field_of_view,
            self.dimensions,
            self.xyz_origin,
            slice_spacing,
        );
        let uvw_to_slice = grid_to_slice(
            self.uvw_extents,
            self.uvw_dimensions,
            self.uvw_origin,
            slice_spacing,
        );
        let xy_to_world = self.slice_to_world * xy_to_slice;
        let uvw_to_world = self.slice_to_world * uvw_to_slice;

        let tolerance = matrix::MATRIX_TOLERANCE;
        let changed = !matrix::matrices_equal(&xy_to_world, &self.xy_to_world, tolerance)
            || !matrix::matrices_equal(&uvw_to_world, &self.uvw_to_world, tolerance);

        self.xy_to_slice = xy_to_slice;
        self.xy_to_world = xy_to_world;
        self.uvw_to_slice = uvw_to_slice;
        self.uvw_to_world = uvw_to_world;

        tracing::trace!(layout_name = %self.layout_name, changed, "updated slice matrices");
        if changed {
            self.modified();
        }
        self.updating_matrices = false;
    }

    /// Apply the resolution mode to the UVW grid
    fn sync_uvw_geometry(&mut self) {
        if self.resolution_mode.extents_follow_view() {
            self.set_uvw_origin(self.xyz_origin);
        }
        let Some((extents, dimensions)) = self.derived_uvw_geometry() else {
            return;
        };
        self.set_uvw_extents_and_dimensions(extents, dimensions);
    }

    /// UVW extents and dimensions the resolution mode asks for
    ///
    /// `None` leaves the stored UVW grid alone: in `Custom` mode, and in the
    /// volume modes until a volume sampling is known.
    fn derived_uvw_geometry(&self) -> Option<([f64; 3], [u32; 3])> {
        let view_extents = self.field_of_view;
        let view_spacing: [f64; 3] = std::array::from_fn(|axis| {
            grid_spacing(self.field_of_view[axis], self.dimensions[axis]).unwrap_or(0.0)
        });
        let (volume_extents, volume_spacing) = match &self.volume_sampling {
            Some(sampling) => (sampling.extents, sampling.spacing),
            None if self.resolution_mode.needs_volume_sampling() => return None,
            None => (view_extents, view_spacing),
        };

        let (extents, spacing) = match self.resolution_mode {
            SliceResolutionMode::Custom => return None,
            SliceResolutionMode::Match2DView => (view_extents, view_spacing),
            SliceResolutionMode::MatchVolumes => (volume_extents, volume_spacing),
            SliceResolutionMode::FOVMatch2DViewSpacingMatchVolumes => {
                (view_extents, volume_spacing)
            }
            SliceResolutionMode::FOVMatchVolumesSpacingMatch2DView => {
                (volume_extents, view_spacing)
            }
        };

        let mut dimensions = self.dimensions;
        for axis in 0..2 {
            if self.resolution_mode != SliceResolutionMode::Match2DView && spacing[axis] > 0.0 {
                dimensions[axis] = (extents[axis] / spacing[axis]).round().max(1.0) as u32;
            }
            dimensions[axis] = dimensions[axis].min(self.uvw_maximum_dimensions[axis]);
        }
        Some((extents, dimensions))
    }

    // Orientation

    pub fn presets(&self) -> &OrientationPresets {
        &self.presets
    }

    pub fn add_orientation_preset(
        &mut self,
        name: impl Into<String>,
        orientation: Matrix3<f64>,
    ) -> Result<(), PresetError> {
        self.presets.add(name, orientation)?;
        self.modified();
        Ok(())
    }

    pub fn remove_orientation_preset(&mut self, name: &str) -> Result<Matrix3<f64>, PresetError> {
        let orientation = self.presets.remove(name)?;
        self.modified();
        Ok(orientation)
    }

    pub fn rename_orientation_preset(
        &mut self,
        name: &str,
        new_name: impl Into<String>,
    ) -> Result<(), PresetError> {
        self.presets.rename(name, new_name)?;
        self.modified();
        Ok(())
    }

    /// Rotate the slice to a registered preset, keeping its position
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::NotFound`] if no preset is named `name`.
    pub fn set_orientation(&mut self, name: &str) -> Result<(), PresetError> {
        let orientation = *self
            .presets
            .get(name)
            .ok_or_else(|| PresetError::NotFound(name.to_owned()))?;
        tracing::debug!(
            layout_name = %self.layout_name,
            orientation = name,
            "set slice orientation"
        );
        self.set_slice_to_world(matrix::with_rotation(&self.slice_to_world, &orientation));
        Ok(())
    }

    /// Rotate to a built-in orientation by its preset name
    ///
    /// Fails like [`set_orientation`](Self::set_orientation) when the preset
    /// has been renamed or removed.
    pub fn set_orientation_to(&mut self, orientation: Orientation) -> Result<(), PresetError> {
        self.set_orientation(orientation.name())
    }

    /// Name of the preset matching the current orientation, or
    /// [`REFORMAT_ORIENTATION`]
    pub fn current_orientation_name(&self) -> String {
        self.orientation_name_for(&self.slice_to_world)
    }

    pub fn orientation_name_for(&self, slice_to_world: &Matrix4<f64>) -> String {
        self.presets
            .name_for(slice_to_world)
            .unwrap_or(REFORMAT_ORIENTATION)
            .to_owned()
    }

    // Lightbox layout

    pub fn layout_grid_rows(&self) -> u32 {
        self.layout_grid_rows
    }

    pub fn layout_grid_columns(&self) -> u32 {
        self.layout_grid_columns
    }

    /// Set the lightbox grid; the number of slices becomes `rows * columns`
    ///
    /// Zero is raised to one and the slice count saturates at `u32::MAX`.
    pub fn set_layout_grid(&mut self, rows: u32, columns: u32) {
        let (rows, columns) = (rows.max(1), columns.max(1));
        if self.layout_grid_rows == rows && self.layout_grid_columns == columns {
            return;
        }
        self.layout_grid_rows = rows;
        self.layout_grid_columns = columns;
        self.modified();
        self.set_dimensions([
            self.dimensions[0],
            self.dimensions[1],
            rows.saturating_mul(columns),
        ]);
    }

    pub fn set_layout_grid_rows(&mut self, rows: u32) {
        self.set_layout_grid(rows, self.layout_grid_columns);
    }

    pub fn set_layout_grid_columns(&mut self, columns: u32) {
        self.set_layout_grid(self.layout_grid_rows, columns);
    }

    pub fn active_slice(&self) -> u32 {
        self.active_slice
    }

    /// Slice of the lightbox shown in 3D views, clamped to the slice count
    pub fn set_active_slice(&mut self, index: u32) {
        let index = index.min(self.dimensions[2].saturating_sub(1));
        if self.active_slice != index {
            self.active_slice = index;
            self.modified();
        }
    }

    fn clamp_active_slice(&mut self) {
        self.active_slice = self.active_slice.min(self.dimensions[2].saturating_sub(1));
    }

    // Display flags

    pub fn slice_visible(&self) -> bool {
        self.slice_visible
    }

    pub fn set_slice_visible(&mut self, visible: bool) {
        if self.slice_visible != visible {
            self.slice_visible = visible;
            self.modified();
        }
    }

    pub fn widget_visible(&self) -> bool {
        self.widget_visible
    }

    pub fn set_widget_visible(&mut self, visible: bool) {
        if self.widget_visible != visible {
            self.widget_visible = visible;
            self.modified();
        }
    }

    pub fn use_label_outline(&self) -> bool {
        self.use_label_outline
    }

    pub fn set_use_label_outline(&mut self, enabled: bool) {
        if self.use_label_outline != enabled {
            self.use_label_outline = enabled;
            self.modified();
        }
    }

    pub fn widget_normal_locked_to_camera(&self) -> bool {
        self.widget_normal_locked_to_camera
    }

    pub fn set_widget_normal_locked_to_camera(&mut self, locked: bool) {
        if self.widget_normal_locked_to_camera != locked {
            self.widget_normal_locked_to_camera = locked;
            self.modified();
        }
    }

    // Views

    /// Views the slice is restricted to; empty means all views
    pub fn restricted_view_ids(&self) -> &[String] {
        &self.restricted_view_ids
    }

    pub fn add_restricted_view_id(&mut self, view_id: impl Into<String>) {
        let view_id = view_id.into();
        if self.is_view_id_present(&view_id) {
            return;
        }
        self.restricted_view_ids.push(view_id);
        self.modified();
    }

    pub fn remove_restricted_view_id(&mut self, view_id: &str) {
        let count = self.restricted_view_ids.len();
        self.restricted_view_ids.retain(|id| id != view_id);
        if self.restricted_view_ids.len() != count {
            self.modified();
        }
    }

    pub fn clear_restricted_view_ids(&mut self) {
        if !self.restricted_view_ids.is_empty() {
            self.restricted_view_ids.clear();
            self.modified();
        }
    }

    pub fn is_view_id_present(&self, view_id: &str) -> bool {
        self.restricted_view_ids.iter().any(|id| id == view_id)
    }

    pub fn is_displayable_in_view(&self, view_id: &str) -> bool {
        self.restricted_view_ids.is_empty() || self.is_view_id_present(view_id)
    }

    // Interaction

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn interacting(&self) -> bool {
        self.interaction.interacting()
    }

    /// Does not bump [`modified_count`](Self::modified_count).
    pub fn set_interacting(&mut self, interacting: bool) {
        self.interaction.set_interacting(interacting);
    }

    pub fn interaction_flags(&self) -> InteractionFlags {
        self.interaction.flags()
    }

    /// Does not bump [`modified_count`](Self::modified_count).
    pub fn set_interaction_flags(&mut self, flags: InteractionFlags) {
        self.interaction.set_flags(flags);
    }

    pub fn interaction_flags_modifier(&self) -> InteractionFlags {
        self.interaction.modifier()
    }

    pub fn set_interaction_flags_modifier(&mut self, modifier: InteractionFlags) {
        if self.interaction.modifier() != modifier {
            self.interaction.set_modifier(modifier);
            self.modified();
        }
    }

    pub fn reset_interaction_flags_modifier(&mut self) {
        self.set_interaction_flags_modifier(InteractionFlags::all());
    }

    /// True if `category` may be propagated to linked frames
    pub fn should_broadcast(&self, category: InteractionFlags) -> bool {
        self.interaction.should_broadcast(category)
    }
}

/// Size of one grid cell, `None` for an empty or degenerate axis
fn grid_spacing(extent: f64, count: u32) -> Option<f64> {
    (count > 0 && extent != 0.0).then(|| extent / count as f64)
}

/// Grid index to slice plane mapping, centered on `origin`
///
/// Degenerate axes keep an identity row so that a frame without a view or
/// volume still has usable matrices.
fn grid_to_slice(
    extents: [f64; 3],
    dimensions: [u32; 3],
    origin: [f64; 3],
    slice_spacing: f64,
) -> Matrix4<f64> {
    let mut grid_to_slice = Matrix4::identity();
    for axis in 0..2 {
        if let Some(spacing) = grid_spacing(extents[axis], dimensions[axis]) {
            grid_to_slice[(axis, axis)] = spacing;
            grid_to_slice[(axis, 3)] = origin[axis] - extents[axis] / 2.0;
        }
    }
    if dimensions[2] > 0 && slice_spacing != 0.0 {
        grid_to_slice[(2, 2)] = slice_spacing;
    }
    grid_to_slice
}
