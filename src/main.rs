use nalgebra::Matrix3;
use nalgebra::Point3;
use ndarray::Array3;
use slice_frame::{SliceResolutionMode, SliceScene, Volume, VolumeGeometry, VolumeSampling};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    // Slightly tilted acquisition, 40 slices of 3 mm
    let tilt = nalgebra::Rotation3::from_euler_angles(0.1, 0.0, 0.05);
    let directions: Matrix3<f64> = *tilt.matrix();
    let mut volume = Volume::new(Array3::zeros((40, 256, 256)), (0.9, 0.9, 3.0))
        .with_placement(Point3::new(-115.0, -115.0, -60.0), directions);
    // Bright marker voxel at the jump target, indexed (k, j, i)
    volume.data_mut()[[20, 128, 128]] = 1000;

    let mut scene = SliceScene::with_default_frames();
    for frame in scene.frames_mut() {
        frame
            .rotate_to_volume_plane(&volume)
            .expect("should have aligned slice with volume axes");
        let volumes: [&dyn VolumeGeometry; 1] = [&volume];
        frame.set_volume_sampling(VolumeSampling::from_volumes(volumes, frame.slice_to_world()));
        frame.set_resolution_mode(SliceResolutionMode::MatchVolumes);
    }

    let center = volume.ijk_to_world().transform_point(&Point3::new(128.0, 128.0, 20.0));
    let jumped = scene.jump_all_slices(center, None, None, None);
    tracing::info!(?center, jumped, marker = volume.data()[[20, 128, 128]], "jumped to marker");

    for frame in scene.frames() {
        tracing::info!(
            layout_name = frame.layout_name(),
            orientation = %frame.current_orientation_name(),
            offset = frame.slice_offset(),
            uvw_dimensions = ?frame.uvw_dimensions(),
            "slice frame ready"
        );
        tracing::info!("pixel to world:{}", frame.pixel_to_world());
    }
}
