use nalgebra::Point3;
use thiserror::Error;

use crate::enums::JumpMode;
use crate::enums::Orientation;
use crate::slice_frame::SliceFrame;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("A slice frame named \"{0}\" already exists")]
    DuplicateLayoutName(String),

    #[error("No slice frame named \"{0}\"")]
    UnknownLayoutName(String),
}

/// Jump every frame in `frames` onto `point`
///
/// # Arguments
///
/// * `mode` - Jump mode applied to every frame, `None` uses each frame's own
/// * `view_group` - Only frames of this view group are moved, `None` moves all
/// * `exclude` - Layout name of a frame that is left untouched
///
/// Returns the number of frames that were jumped.
pub fn jump_all_slices<'a>(
    frames: impl IntoIterator<Item = &'a mut SliceFrame>,
    point: Point3<f64>,
    mode: Option<JumpMode>,
    view_group: Option<i32>,
    exclude: Option<&str>,
) -> usize {
    let mut jumped = 0;
    for frame in frames {
        if exclude.is_some_and(|name| name == frame.layout_name()) {
            continue;
        }
        if view_group.is_some_and(|group| group != frame.view_group()) {
            continue;
        }
        frame.jump_slice_with(point, mode);
        jumped += 1;
    }
    tracing::debug!(?point, ?mode, ?view_group, ?exclude, jumped, "jumped all slices");
    jumped
}

/// Set of slice frames identified by their layout name.
#[derive(Debug, Default)]
pub struct SliceScene {
    frames: Vec<SliceFrame>,
}

impl SliceScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene with the conventional Red (axial), Yellow (sagittal) and Green
    /// (coronal) frames in view group 0
    pub fn with_default_frames() -> Self {
        let frames = [
            ("Red", Orientation::Axial),
            ("Yellow", Orientation::Sagittal),
            ("Green", Orientation::Coronal),
        ]
        .into_iter()
        .map(|(name, orientation)| {
            let mut frame = SliceFrame::new(name);
            frame.set_slice_to_world(crate::matrix::with_rotation(
                frame.slice_to_world(),
                &orientation.matrix(),
            ));
            frame
        })
        .collect();
        Self { frames }
    }

    /// Add a frame
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::DuplicateLayoutName`] if a frame with the same
    /// layout name is already part of the scene.
    pub fn add_frame(&mut self, frame: SliceFrame) -> Result<(), SceneError> {
        if self.frame(frame.layout_name()).is_some() {
            return Err(SceneError::DuplicateLayoutName(frame.layout_name().to_owned()));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn remove_frame(&mut self, layout_name: &str) -> Result<SliceFrame, SceneError> {
        let index = self
            .frames
            .iter()
            .position(|frame| frame.layout_name() == layout_name)
            .ok_or_else(|| SceneError::UnknownLayoutName(layout_name.to_owned()))?;
        Ok(self.frames.remove(index))
    }

    pub fn frame(&self, layout_name: &str) -> Option<&SliceFrame> {
        self.frames.iter().find(|frame| frame.layout_name() == layout_name)
    }

    pub fn frame_mut(&mut self, layout_name: &str) -> Option<&mut SliceFrame> {
        self.frames
            .iter_mut()
            .find(|frame| frame.layout_name() == layout_name)
    }

    pub fn frames(&self) -> impl Iterator<Item = &SliceFrame> {
        self.frames.iter()
    }

    pub fn frames_mut(&mut self) -> impl Iterator<Item = &mut SliceFrame> {
        self.frames.iter_mut()
    }

    pub fn frames_in_view_group(&self, view_group: i32) -> impl Iterator<Item = &SliceFrame> {
        self.frames
            .iter()
            .filter(move |frame| frame.view_group() == view_group)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// See [`jump_all_slices`]
    pub fn jump_all_slices(
        &mut self,
        point: Point3<f64>,
        mode: Option<JumpMode>,
        view_group: Option<i32>,
        exclude: Option<&str>,
    ) -> usize {
        jump_all_slices(self.frames.iter_mut(), point, mode, view_group, exclude)
    }

    /// Jump the frames linked to `source` onto `point`
    ///
    /// Linked frames share the view group of `source`; each uses its own jump
    /// mode. `source` itself is not moved.
    pub fn jump_linked_slices(
        &mut self,
        source: &str,
        point: Point3<f64>,
    ) -> Result<usize, SceneError> {
        let view_group = self
            .frame(source)
            .ok_or_else(|| SceneError::UnknownLayoutName(source.to_owned()))?
            .view_group();
        Ok(self.jump_all_slices(point, None, Some(view_group), Some(source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix;
    use nalgebra::Vector3;

    fn position(scene: &SliceScene, name: &str) -> Vector3<f64> {
        matrix::translation(scene.frame(name).unwrap().slice_to_world())
    }

    #[test]
    fn default_frames() {
        let scene = SliceScene::with_default_frames();
        let names: Vec<_> = scene
            .frames()
            .map(|frame| frame.current_orientation_name())
            .collect();
        assert_eq!(names, vec!["Axial", "Sagittal", "Coronal"]);
        assert_eq!(scene.frames_in_view_group(0).count(), 3);
    }

    #[test]
    fn duplicate_layout_name_is_rejected() {
        let mut scene = SliceScene::with_default_frames();
        assert_eq!(
            scene.add_frame(SliceFrame::new("Red")),
            Err(SceneError::DuplicateLayoutName("Red".into()))
        );
        assert_eq!(scene.len(), 3);
        assert!(scene.remove_frame("Red").is_ok());
        assert!(matches!(
            scene.remove_frame("Red"),
            Err(SceneError::UnknownLayoutName(_))
        ));
    }

    #[test]
    fn jump_all_uses_each_frames_mode() {
        let mut scene = SliceScene::with_default_frames();
        scene
            .frame_mut("Green")
            .unwrap()
            .set_jump_mode(JumpMode::Centered);

        let target = Point3::new(10.0, 20.0, 30.0);
        assert_eq!(scene.jump_all_slices(target, None, None, None), 3);

        // Offset mode only moves along each normal
        assert_eq!(position(&scene, "Red"), Vector3::new(0.0, 0.0, 30.0));
        assert_eq!(position(&scene, "Yellow"), Vector3::new(10.0, 0.0, 0.0));
        assert_eq!(position(&scene, "Green"), Vector3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn jump_all_with_explicit_mode() {
        let mut scene = SliceScene::with_default_frames();
        let target = Point3::new(1.0, 2.0, 3.0);
        scene.jump_all_slices(target, Some(JumpMode::Centered), None, Some("Red"));
        assert_eq!(position(&scene, "Red"), Vector3::zeros());
        assert_eq!(position(&scene, "Yellow"), target.coords);
        assert_eq!(position(&scene, "Green"), target.coords);
    }

    #[test]
    fn view_group_filter() {
        let mut scene = SliceScene::with_default_frames();
        scene.frame_mut("Green").unwrap().set_view_group(1);
        let jumped = scene.jump_all_slices(
            Point3::new(5.0, 5.0, 5.0),
            Some(JumpMode::Centered),
            Some(1),
            None,
        );
        assert_eq!(jumped, 1);
        assert_eq!(position(&scene, "Red"), Vector3::zeros());
        assert_eq!(position(&scene, "Green"), Vector3::new(5.0, 5.0, 5.0));

        assert_eq!(scene.jump_all_slices(Point3::origin(), None, Some(7), None), 0);
    }

    #[test]
    fn linked_jump_skips_source() {
        let mut scene = SliceScene::with_default_frames();
        scene.frame_mut("Green").unwrap().set_view_group(1);
        let jumped = scene
            .jump_linked_slices("Red", Point3::new(7.0, 8.0, 9.0))
            .unwrap();
        assert_eq!(jumped, 1);
        assert_eq!(position(&scene, "Red"), Vector3::zeros());
        assert_eq!(position(&scene, "Yellow"), Vector3::new(7.0, 0.0, 0.0));
        assert_eq!(position(&scene, "Green"), Vector3::zeros());

        assert_eq!(
            scene.jump_linked_slices("Blue", Point3::origin()),
            Err(SceneError::UnknownLayoutName("Blue".into()))
        );
    }

    #[test]
    fn free_function_accepts_any_frames() {
        let mut frames = vec![SliceFrame::new("A"), SliceFrame::new("B")];
        let jumped = jump_all_slices(
            frames.iter_mut(),
            Point3::new(0.0, 0.0, 2.0),
            None,
            None,
            Some("B"),
        );
        assert_eq!(jumped, 1);
        assert_eq!(frames[0].slice_to_world()[(2, 3)], 2.0);
        assert_eq!(frames[1].slice_to_world()[(2, 3)], 0.0);
    }
}
