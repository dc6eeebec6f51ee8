use glam::{Mat4, Quat, Vec3};
use super::*;

#[test]
fn test_empty_box() {
    let bbox = BoundingBox::default();
    assert!(bbox.is_empty());
    assert_eq!(bbox.center(), Vec3::ZERO);
    assert_eq!(bbox.size(), Vec3::ZERO);
}

#[test]
fn test_extend_from_empty() {
    let mut bbox = BoundingBox::EMPTY;
    bbox.extend(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(bbox.min, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(bbox.max, Vec3::new(1.0, 2.0, 3.0));

    bbox.extend(Vec3::new(-1.0, 4.0, 0.0));
    assert_eq!(bbox.min, Vec3::new(-1.0, 2.0, 0.0));
    assert_eq!(bbox.max, Vec3::new(1.0, 4.0, 3.0));
    assert_eq!(bbox.center(), Vec3::new(0.0, 3.0, 1.5));
}

#[test]
fn test_from_points_and_merge() {
    let points = [Vec3::ZERO, Vec3::ONE];
    let mut bbox = BoundingBox::from_points(&points);
    assert_eq!(bbox.size(), Vec3::ONE);

    bbox.merge(&BoundingBox::EMPTY);
    assert_eq!(bbox.size(), Vec3::ONE);

    bbox.merge(&BoundingBox::new(Vec3::splat(-1.0), Vec3::ZERO));
    assert_eq!(bbox.min, Vec3::splat(-1.0));
    assert_eq!(bbox.max, Vec3::ONE);
}

#[test]
fn test_transformed_translation() {
    let bbox = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let moved = bbox.transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
    assert_eq!(moved.min, Vec3::new(9.0, -1.0, -1.0));
    assert_eq!(moved.max, Vec3::new(11.0, 1.0, 1.0));
}

#[test]
fn test_transformed_rotation_encloses_corners() {
    let bbox = BoundingBox::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
    let matrix = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4));
    let rotated = bbox.transformed(&matrix);

    for x in [0.0, 2.0] {
        for y in [0.0, 1.0] {
            for z in [0.0, 1.0] {
                let corner = matrix.transform_point3(Vec3::new(x, y, z));
                let grown = BoundingBox::new(rotated.min - 1e-5, rotated.max + 1e-5);
                assert!(grown.contains_point(corner));
            }
        }
    }
}

#[test]
fn test_intersects() {
    let a = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    let touching = BoundingBox::new(Vec3::ONE, Vec3::splat(2.0));
    let apart = BoundingBox::new(Vec3::splat(1.5), Vec3::splat(2.0));
    assert!(a.intersects(&touching));
    assert!(!a.intersects(&apart));
}
