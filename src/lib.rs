//! # Slice-frame library
//!
//! This crate manages the geometry of a 2D slice through a 3D medical volume,
//! the part of multiplanar reformatting (MPR) that decides *where* to sample
//! before any voxel is touched.
//!
//! A [`SliceFrame`] relates four coordinate systems:
//!  - World: the fixed physical (patient) space all volumes share
//!  - Slice: the 2D plane placed in world space by the slice-to-world matrix
//!  - Pixel (XY): the on-screen grid of the view
//!  - Texel (UVW): the possibly coarser grid the volumes are resliced into
//!
//! Whenever one of the independent parameters changes (slice-to-world matrix,
//! field of view, dimensions, origins, resolution mode) the frame recomputes
//! the pixel-to-world and texel-to-world matrices a resampler consumes.
//!
//! On top of that the crate provides:
//!  - Named orientation presets (Axial, Sagittal and Coronal by default)
//!  - Jumping one slice or a whole group of linked slices onto a world point
//!  - Snapping a slice onto the voxel axes of a volume
//!  - Interaction flags telling linked views which parameters to follow
//!
//!   Contributions are highly welcome!
//!
//! # Roadmap
//!
//!  - Slab (thick slice) parameters
//!  - Sharing presets between frames of one scene
//!
//! # Examples
//!
//! ## Following a point through three linked views
//!
//! Create the conventional Red, Yellow and Green frames, jump all of them to
//! a point of interest and read the matrix a resampler needs for the axial
//! view.
//!
//! ```
//! # use slice_frame::{SliceScene, JumpMode};
//! # use nalgebra::Point3;
//! let mut scene = SliceScene::with_default_frames();
//! scene.jump_all_slices(Point3::new(12.0, -30.0, 55.0), None, None, None);
//!
//! let red = scene.frame("Red").expect("default scene has a Red frame");
//! assert_eq!(red.current_orientation_name(), "Axial");
//! assert_eq!(red.slice_offset(), 55.0);
//! let pixel_to_world = red.pixel_to_world();
//! # let _ = pixel_to_world;
//! ```
//!
//! ## Aligning a slice with an oblique acquisition
//!
//! ```
//! # use slice_frame::{SliceFrame, Volume};
//! # use nalgebra::{Matrix3, Point3};
//! # use ndarray::Array3;
//! let volume = Volume::new(Array3::zeros((40, 256, 256)), (0.9, 0.9, 3.0))
//!     .with_placement(Point3::new(-115.0, -115.0, -60.0), Matrix3::identity());
//! let mut frame = SliceFrame::new("Red");
//! frame
//!     .rotate_to_volume_plane(&volume)
//!     .expect("volume axes are not degenerate");
//! ```

pub mod attributes;
pub mod enums;
pub mod interaction;
pub mod matrix;
mod navigation;
pub mod presets;
pub mod scene;
pub mod slice_frame;
pub mod volume;

pub use attributes::AttributeError;
pub use attributes::SliceFrameAttributes;
pub use enums::JumpMode;
pub use enums::LocatorOrientation;
pub use enums::Orientation;
pub use enums::SliceResolutionMode;
pub use enums::SliceSpacingMode;
pub use interaction::InteractionFlags;
pub use interaction::InteractionState;
pub use navigation::NavigationError;
pub use presets::OrientationPresets;
pub use presets::PresetError;
pub use scene::SceneError;
pub use scene::SliceScene;
pub use scene::jump_all_slices;
pub use slice_frame::REFORMAT_ORIENTATION;
pub use slice_frame::SliceFrame;
pub use volume::Volume;
pub use volume::VolumeGeometry;
pub use volume::VolumeSampling;
