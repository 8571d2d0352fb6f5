use nodemesh_geom::{Aabb, Vec2, Vec3};
use proptest::prelude::*;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn small_f32() -> impl Strategy<Value = f32> {
    -100.0f32..100.0
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (small_f32(), small_f32(), small_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_angle() -> impl Strategy<Value = f32> {
    -360.0f32..360.0
}

proptest! {
    // Rotation keeps length and leaves the pivot axis untouched
    #[test]
    fn xz_rotation_preserves_length(v in arb_vec3(), deg in arb_angle()) {
        let r = v.rotate_xz_by(deg);
        prop_assert!(approx(r.length(), v.length(), 1e-3));
        prop_assert_eq!(r.y, v.y);
    }

    #[test]
    fn xy_rotation_preserves_length(v in arb_vec3(), deg in arb_angle()) {
        let r = v.rotate_xy_by(deg);
        prop_assert!(approx(r.length(), v.length(), 1e-3));
        prop_assert_eq!(r.z, v.z);
    }

    #[test]
    fn yz_rotation_preserves_length(v in arb_vec3(), deg in arb_angle()) {
        let r = v.rotate_yz_by(deg);
        prop_assert!(approx(r.length(), v.length(), 1e-3));
        prop_assert_eq!(r.x, v.x);
    }

    // Rotating forward then backward returns the input
    #[test]
    fn xz_rotation_inverse(v in arb_vec3(), deg in arb_angle()) {
        let r = v.rotate_xz_by(deg).rotate_xz_by(-deg);
        prop_assert!(vapprox(r, v, 1e-3));
    }

    // Four quarter turns are the identity
    #[test]
    fn four_quarter_turns_identity(v in arb_vec3()) {
        let mut r = v;
        for _ in 0..4 {
            r = r.rotate_yz_by(90.0);
        }
        prop_assert!(vapprox(r, v, 1e-3));
    }

    // A 2D rotation about its own center leaves the center fixed
    #[test]
    fn vec2_rotation_fixes_center(cx in small_f32(), cy in small_f32(), deg in arb_angle()) {
        let c = Vec2::new(cx, cy);
        let r = c.rotate_by(deg, c);
        prop_assert!(approx(r.x, cx, 1e-4) && approx(r.y, cy, 1e-4));
    }

    // Boxes rotated about Y by quarter turns keep their volume
    #[test]
    fn aabb_quarter_turn_keeps_volume(a in arb_vec3(), b in arb_vec3(), q in 0i32..4) {
        let bx = Aabb::from_points(a, b);
        let r = bx.rotate_xz_by(q as f32 * 90.0);
        let e0 = bx.extent();
        let e1 = r.extent();
        let v0 = e0.x * e0.y * e0.z;
        let v1 = e1.x * e1.y * e1.z;
        prop_assert!(approx(v0, v1, 1e-2 * v0.abs().max(1.0)));
    }
}
