//! Property-based invariant tests for the slice frame.
//!
//! These tests verify structural invariants that must hold for any valid inputs:
//!
//! 1. Recomposition is idempotent.
//! 2. pixel_to_world == slice_to_world * pixel_to_slice after every setter.
//! 3. The slice count is shared between the display and reslice grids.
//! 4. Adding a duplicate preset name never changes the registry.
//! 5. Every built-in preset round-trips through its name.
//! 6. A centered jump moves the translation onto the point.
//! 7. An offset jump puts the point on the plane without moving in-plane.
//! 8. Restricted views gate display.
//! 9. Broadcast requires both the declared flag and the modifier bit.
//! 10. Resolution modes produce their documented grid shapes.

use nalgebra::Matrix3;
use nalgebra::Matrix4;
use nalgebra::Point3;
use nalgebra::Rotation3;
use nalgebra::Vector3;
use proptest::prelude::*;
use slice_frame::matrix;
use slice_frame::{
    InteractionFlags, JumpMode, Orientation, SliceFrame, SliceResolutionMode, VolumeSampling,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn rotation() -> impl Strategy<Value = Matrix3<f64>> {
    (-3.1f64..3.1, -1.5f64..1.5, -3.1f64..3.1)
        .prop_map(|(roll, pitch, yaw)| *Rotation3::from_euler_angles(roll, pitch, yaw).matrix())
}

fn slice_to_world() -> impl Strategy<Value = Matrix4<f64>> {
    (rotation(), prop::array::uniform3(-500.0f64..500.0)).prop_map(|(rotation, position)| {
        let slice_to_world = matrix::with_rotation(&Matrix4::identity(), &rotation);
        matrix::with_translation(&slice_to_world, &Vector3::from(position))
    })
}

fn field_of_view() -> impl Strategy<Value = [f64; 3]> {
    prop::array::uniform3(0.5f64..800.0)
}

fn dimensions() -> impl Strategy<Value = [u32; 3]> {
    (0u32..2048, 0u32..2048, 0u32..16).prop_map(|(x, y, z)| [x, y, z])
}

fn point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-1000.0f64..1000.0).prop_map(Point3::from)
}

fn flags() -> impl Strategy<Value = InteractionFlags> {
    (0u32..512).prop_map(InteractionFlags::from_bits_truncate)
}

fn close(a: &Matrix4<f64>, b: &Matrix4<f64>) -> bool {
    matrix::matrices_equal(a, b, 1e-6)
}

fn configured(
    slice_to_world: Matrix4<f64>,
    field_of_view: [f64; 3],
    dimensions: [u32; 3],
    origin: [f64; 3],
) -> SliceFrame {
    let mut frame = SliceFrame::new("Red");
    frame.set_slice_to_world(slice_to_world);
    frame.set_field_of_view(field_of_view);
    frame.set_dimensions(dimensions);
    frame.set_xyz_origin(origin);
    frame
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Recomposition is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn recomposition_is_idempotent(
        slice_to_world in slice_to_world(),
        field_of_view in field_of_view(),
        dimensions in dimensions(),
        origin in prop::array::uniform3(-50.0f64..50.0),
    ) {
        let mut frame = configured(slice_to_world, field_of_view, dimensions, origin);
        let first = *frame.pixel_to_world();
        let count = frame.modified_count();
        frame.update_matrices();
        frame.update_matrices();
        prop_assert_eq!(*frame.pixel_to_world(), first);
        prop_assert_eq!(frame.modified_count(), count);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Consistency of derived matrices
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn derived_matrices_are_consistent(
        slice_to_world in slice_to_world(),
        field_of_view in field_of_view(),
        dimensions in dimensions(),
        origin in prop::array::uniform3(-50.0f64..50.0),
        mode in prop::sample::select(vec![
            SliceResolutionMode::MatchVolumes,
            SliceResolutionMode::Match2DView,
            SliceResolutionMode::FOVMatch2DViewSpacingMatchVolumes,
            SliceResolutionMode::FOVMatchVolumesSpacingMatch2DView,
            SliceResolutionMode::Custom,
        ]),
    ) {
        let mut frame = configured(slice_to_world, field_of_view, dimensions, origin);
        frame.set_resolution_mode(mode);
        prop_assert!(close(
            frame.pixel_to_world(),
            &(frame.slice_to_world() * frame.pixel_to_slice()),
        ));
        prop_assert!(close(
            frame.texel_to_world(),
            &(frame.slice_to_world() * frame.texel_to_slice()),
        ));
        prop_assert_eq!(frame.dimensions()[2], frame.uvw_dimensions()[2]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Shared slice count
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn slice_count_follows_last_setter(
        display in dimensions(),
        reslice in dimensions(),
        display_last in any::<bool>(),
    ) {
        let mut frame = SliceFrame::new("Red");
        frame.set_resolution_mode(SliceResolutionMode::Custom);
        if display_last {
            frame.set_uvw_dimensions(reslice);
            frame.set_dimensions(display);
        } else {
            frame.set_dimensions(display);
            frame.set_uvw_dimensions(reslice);
        }
        let expected = if display_last { display[2] } else { reslice[2] };
        prop_assert_eq!(frame.dimensions()[2], expected);
        prop_assert_eq!(frame.uvw_dimensions()[2], expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Preset uniqueness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn duplicate_preset_is_rejected(
        builtin in prop::sample::select(Orientation::ALL.to_vec()),
        replacement in rotation(),
    ) {
        let mut frame = SliceFrame::new("Red");
        let names = frame.presets().names();
        prop_assert!(frame.add_orientation_preset(builtin.name(), replacement).is_err());
        prop_assert_eq!(frame.presets().get(builtin.name()), Some(&builtin.matrix()));
        prop_assert_eq!(frame.presets().names(), names);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Orientation round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn orientation_round_trip(
        start in slice_to_world(),
        builtin in prop::sample::select(Orientation::ALL.to_vec()),
    ) {
        let mut frame = SliceFrame::new("Red");
        frame.set_slice_to_world(start);
        frame.set_orientation(builtin.name()).unwrap();
        prop_assert_eq!(frame.current_orientation_name(), builtin.name());
        prop_assert_eq!(
            matrix::translation(frame.slice_to_world()),
            matrix::translation(&start)
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Centered jump
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn centered_jump_moves_onto_point(start in slice_to_world(), target in point()) {
        let mut frame = SliceFrame::new("Red");
        frame.set_slice_to_world(start);
        frame.set_jump_mode(JumpMode::Centered);
        frame.jump_slice(target);
        prop_assert!((matrix::translation(frame.slice_to_world()) - target.coords).norm() < 1e-5);
        prop_assert_eq!(
            matrix::rotation_block(frame.slice_to_world()),
            matrix::rotation_block(&start)
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Offset jump
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_jump_contains_point(start in slice_to_world(), target in point()) {
        let mut frame = SliceFrame::new("Red");
        frame.set_slice_to_world(start);
        frame.jump_slice(target);

        let normal: Vector3<f64> = frame.slice_to_world().fixed_view::<3, 1>(0, 2).into_owned();
        let position = matrix::translation(frame.slice_to_world());
        prop_assert!((target.coords - position).dot(&normal).abs() < 1e-6);

        let moved = position - matrix::translation(&start);
        prop_assert!(moved.cross(&normal).norm() < 1e-6);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. View restriction
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn restricted_views_gate_display(
        restricted in prop::collection::vec("[A-D]", 0..4),
        view in "[A-D]",
    ) {
        let mut frame = SliceFrame::new("Red");
        for id in &restricted {
            frame.add_restricted_view_id(id.clone());
        }
        let expected = restricted.is_empty() || restricted.contains(&view);
        prop_assert_eq!(frame.is_displayable_in_view(&view), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Broadcast gating
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn broadcast_requires_flag_and_modifier(declared in flags(), modifier in flags()) {
        let mut frame = SliceFrame::new("Red");
        frame.set_interaction_flags(declared);
        frame.set_interaction_flags_modifier(modifier);
        for category in InteractionFlags::all().iter() {
            prop_assert_eq!(
                frame.should_broadcast(category),
                declared.contains(category) && modifier.contains(category)
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 10. Resolution mode shapes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolution_modes_follow_their_sources(
        view_pixels in prop::array::uniform2(16u32..512),
        view_pixel_size in 0.25f64..4.0,
        volume_spacing in 0.25f64..4.0,
        volume_extent in 10.0f64..400.0,
    ) {
        let field_of_view = [
            view_pixels[0] as f64 * view_pixel_size,
            view_pixels[1] as f64 * view_pixel_size,
            1.0,
        ];
        let sampling = VolumeSampling {
            spacing: [volume_spacing; 3],
            extents: [volume_extent; 3],
        };
        let mut frame = SliceFrame::new("Red");
        frame.set_uvw_maximum_dimensions([u32::MAX; 3]);
        frame.set_field_of_view(field_of_view);
        frame.set_dimensions([view_pixels[0], view_pixels[1], 1]);
        frame.set_volume_sampling(Some(sampling));

        let count = |extent: f64, spacing: f64| (extent / spacing).round().max(1.0) as u32;

        frame.set_resolution_mode(SliceResolutionMode::Match2DView);
        prop_assert_eq!(frame.uvw_extents(), field_of_view);
        prop_assert_eq!(frame.uvw_dimensions(), frame.dimensions());

        frame.set_resolution_mode(SliceResolutionMode::MatchVolumes);
        prop_assert_eq!(frame.uvw_extents(), sampling.extents);
        prop_assert_eq!(frame.uvw_dimensions()[0], count(volume_extent, volume_spacing));

        frame.set_resolution_mode(SliceResolutionMode::FOVMatch2DViewSpacingMatchVolumes);
        prop_assert_eq!(frame.uvw_extents(), field_of_view);
        prop_assert_eq!(frame.uvw_dimensions()[1], count(field_of_view[1], volume_spacing));

        frame.set_resolution_mode(SliceResolutionMode::FOVMatchVolumesSpacingMatch2DView);
        prop_assert_eq!(frame.uvw_extents(), sampling.extents);
        let view_spacing = field_of_view[0] / view_pixels[0] as f64;
        prop_assert_eq!(frame.uvw_dimensions()[0], count(volume_extent, view_spacing));

        let before = (frame.uvw_extents(), frame.uvw_dimensions());
        frame.set_resolution_mode(SliceResolutionMode::Custom);
        frame.set_field_of_view([1.0, 1.0, 1.0]);
        prop_assert_eq!((frame.uvw_extents(), frame.uvw_dimensions()), before);
    }
}
