use nalgebra::Matrix3;
use nalgebra::Matrix4;
use thiserror::Error;

use crate::enums::Orientation;
use crate::matrix;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresetError {
    #[error("Orientation preset \"{0}\" already exists")]
    DuplicateName(String),

    #[error("Orientation preset \"{0}\" not found")]
    NotFound(String),
}

/// Ordered collection of named slice orientations.
///
/// Names are unique. Insertion order is kept and renaming keeps the position
/// of the entry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrientationPresets {
    presets: Vec<(String, Matrix3<f64>)>,
}

impl OrientationPresets {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with Axial, Sagittal and Coronal
    pub fn with_defaults() -> Self {
        Self {
            presets: Orientation::ALL
                .iter()
                .map(|orientation| (orientation.name().to_owned(), orientation.matrix()))
                .collect(),
        }
    }

    /// Append a preset
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::DuplicateName`] if `name` is already registered.
    /// The registry is left untouched in that case.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        orientation: Matrix3<f64>,
    ) -> Result<(), PresetError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(PresetError::DuplicateName(name));
        }
        tracing::debug!(%name, "add orientation preset");
        self.presets.push((name, orientation));
        Ok(())
    }

    /// Remove a preset and return its matrix
    pub fn remove(&mut self, name: &str) -> Result<Matrix3<f64>, PresetError> {
        let index = self
            .position(name)
            .ok_or_else(|| PresetError::NotFound(name.to_owned()))?;
        tracing::debug!(name, "remove orientation preset");
        Ok(self.presets.remove(index).1)
    }

    /// Rename a preset in place
    ///
    /// Renaming a preset to its current name is a no-op that succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::NotFound`] if `name` is unknown and
    /// [`PresetError::DuplicateName`] if `new_name` is used by another preset.
    pub fn rename(&mut self, name: &str, new_name: impl Into<String>) -> Result<(), PresetError> {
        let new_name = new_name.into();
        let index = self
            .position(name)
            .ok_or_else(|| PresetError::NotFound(name.to_owned()))?;
        if self.position(&new_name).is_some_and(|other| other != index) {
            return Err(PresetError::DuplicateName(new_name));
        }
        tracing::debug!(name, %new_name, "rename orientation preset");
        self.presets[index].0 = new_name;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Matrix3<f64>> {
        self.presets
            .iter()
            .find(|(preset, _)| preset == name)
            .map(|(_, orientation)| orientation)
    }

    /// Name of the first preset matching the rotation block of `slice_to_world`
    pub fn name_for(&self, slice_to_world: &Matrix4<f64>) -> Option<&str> {
        self.presets
            .iter()
            .find(|(_, orientation)| {
                matrix::matches_orientation(slice_to_world, orientation, matrix::MATRIX_TOLERANCE)
            })
            .map(|(name, _)| name.as_str())
    }

    /// Name of the first preset equal to `orientation`
    pub fn name_for_orientation(&self, orientation: &Matrix3<f64>) -> Option<&str> {
        self.name_for(&matrix::with_rotation(&Matrix4::identity(), orientation))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Snapshot of the preset names in insertion order
    pub fn names(&self) -> Vec<String> {
        self.presets.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Matrix3<f64>)> {
        self.presets
            .iter()
            .map(|(name, orientation)| (name.as_str(), orientation))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.presets.iter().position(|(preset, _)| preset == name)
    }
}
