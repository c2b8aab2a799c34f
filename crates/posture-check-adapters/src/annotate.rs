//! Skeleton overlay rendering.
//!
//! Draws the detected landmarks and their connecting bones onto a copy of
//! the frame and saves it next to the analysis output, giving reviewers
//! the same visual the detector saw.

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use posture_check_core::{ImageInfo, LandmarkKind, LandmarkSet};
use std::path::{Path, PathBuf};

use LandmarkKind::{
    LeftAnkle, LeftEar, LeftElbow, LeftEye, LeftEyeInner, LeftEyeOuter, LeftFootIndex, LeftHeel,
    LeftHip, LeftIndex, LeftKnee, LeftPinky, LeftShoulder, LeftThumb, LeftWrist, MouthLeft,
    MouthRight, Nose, RightAnkle, RightEar, RightElbow, RightEye, RightEyeInner, RightEyeOuter,
    RightFootIndex, RightHeel, RightHip, RightIndex, RightKnee, RightPinky, RightShoulder,
    RightThumb, RightWrist,
};

/// Bone connections of the pose topology.
pub const POSE_EDGES: [(LandmarkKind, LandmarkKind); 35] = [
    (Nose, LeftEyeInner),
    (LeftEyeInner, LeftEye),
    (LeftEye, LeftEyeOuter),
    (LeftEyeOuter, LeftEar),
    (Nose, RightEyeInner),
    (RightEyeInner, RightEye),
    (RightEye, RightEyeOuter),
    (RightEyeOuter, RightEar),
    (MouthLeft, MouthRight),
    (LeftShoulder, RightShoulder),
    (LeftShoulder, LeftElbow),
    (LeftElbow, LeftWrist),
    (LeftWrist, LeftPinky),
    (LeftWrist, LeftIndex),
    (LeftWrist, LeftThumb),
    (LeftPinky, LeftIndex),
    (RightShoulder, RightElbow),
    (RightElbow, RightWrist),
    (RightWrist, RightPinky),
    (RightWrist, RightIndex),
    (RightWrist, RightThumb),
    (RightPinky, RightIndex),
    (LeftShoulder, LeftHip),
    (RightShoulder, RightHip),
    (LeftHip, RightHip),
    (LeftHip, LeftKnee),
    (RightHip, RightKnee),
    (LeftKnee, LeftAnkle),
    (RightKnee, RightAnkle),
    (LeftAnkle, LeftHeel),
    (RightAnkle, RightHeel),
    (LeftHeel, LeftFootIndex),
    (RightHeel, RightFootIndex),
    (LeftAnkle, LeftFootIndex),
    (RightAnkle, RightFootIndex),
];

const BONE_COLOR: Rgb<u8> = Rgb([224, 224, 224]);
const JOINT_COLOR: Rgb<u8> = Rgb([230, 50, 50]);
const JOINT_RADIUS: i64 = 2;

/// Draws the skeleton on a copy of the frame and saves it as
/// `<stem>.annotated.png` under `output_dir`.
///
/// Landmarks absent from the set are simply not drawn, as are bones with
/// an absent endpoint.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or the
/// annotated copy cannot be written.
pub fn annotate_frame(
    image: &ImageInfo,
    landmarks: &LandmarkSet,
    output_dir: &Path,
) -> Result<PathBuf> {
    let mut canvas = image.image.to_rgb8();
    draw_skeleton(&mut canvas, landmarks);

    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create annotation directory: {}",
            output_dir.display()
        )
    })?;

    let stem = Path::new(&image.path)
        .file_stem()
        .map_or_else(|| "frame".into(), |s| s.to_string_lossy().into_owned());
    let out_path = output_dir.join(format!("{stem}.annotated.png"));
    canvas
        .save(&out_path)
        .with_context(|| format!("Failed to write annotated frame: {}", out_path.display()))?;
    Ok(out_path)
}

/// Draws bones and joints for every present landmark.
pub fn draw_skeleton(canvas: &mut RgbImage, landmarks: &LandmarkSet) {
    for (from, to) in POSE_EDGES {
        if let (Some(a), Some(b)) = (landmarks.get(from), landmarks.get(to)) {
            let (ax, ay) = to_pixel(canvas, a.x, a.y);
            let (bx, by) = to_pixel(canvas, b.x, b.y);
            draw_line(canvas, ax, ay, bx, by, BONE_COLOR);
        }
    }

    for (_, landmark) in landmarks.iter() {
        let (x, y) = to_pixel(canvas, landmark.x, landmark.y);
        draw_joint(canvas, x, y);
    }
}

/// Maps normalized coordinates to pixel coordinates, clamped into bounds.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn to_pixel(canvas: &RgbImage, x: f32, y: f32) -> (i64, i64) {
    let px = (x * (canvas.width().saturating_sub(1)) as f32).round() as i64;
    let py = (y * (canvas.height().saturating_sub(1)) as f32).round() as i64;
    (px, py)
}

fn put_pixel_checked(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && x < i64::from(canvas.width()) && y < i64::from(canvas.height()) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_joint(canvas: &mut RgbImage, cx: i64, cy: i64) {
    for dy in -JOINT_RADIUS..=JOINT_RADIUS {
        for dx in -JOINT_RADIUS..=JOINT_RADIUS {
            if dx * dx + dy * dy <= JOINT_RADIUS * JOINT_RADIUS {
                put_pixel_checked(canvas, cx + dx, cy + dy, JOINT_COLOR);
            }
        }
    }
}

/// Bresenham line between two pixel positions.
fn draw_line(canvas: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let step_x = if x0 < x1 { 1 } else { -1 };
    let step_y = if y0 < y1 { 1 } else { -1 };
    let mut error = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        put_pixel_checked(canvas, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x += step_x;
        }
        if doubled <= dx {
            error += dx;
            y += step_y;
        }
    }
}
