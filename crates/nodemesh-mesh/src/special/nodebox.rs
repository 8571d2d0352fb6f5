use nodemesh_content::{ContentFeatures, Node, NodeBox, TileSpec};
use nodemesh_geom::{Aabb, Face};

use super::SpecialGenerator;

/// Boxes of `n` in node-local world units, turned by its facedir or wall
/// mount.
pub(crate) fn node_boxes(n: Node, f: &ContentFeatures) -> Vec<Aabb> {
    match &f.node_box {
        NodeBox::Regular => vec![NodeBox::unit()],
        NodeBox::Fixed(boxes) => {
            let angle = match n.facedir(f) {
                1 => -90.0,
                2 => 180.0,
                3 => 90.0,
                _ => 0.0,
            };
            boxes
                .iter()
                .map(|b| {
                    if angle == 0.0 {
                        *b
                    } else {
                        b.rotate_xz_by(angle)
                    }
                })
                .collect()
        }
        NodeBox::WallMounted { top, bottom, side } => {
            let b = match n.wallmounted(f) {
                0 => *top,
                1 => *bottom,
                2 => side.rotate_xz_by(180.0),
                3 => *side,
                4 => side.rotate_xz_by(-90.0),
                _ => side.rotate_xz_by(90.0),
            };
            vec![b]
        }
    }
}

impl SpecialGenerator<'_> {
    pub(super) fn draw_nodebox(&mut self) {
        let mut tiles = [TileSpec::default(); 6];
        for (t, face) in tiles.iter_mut().zip(Face::ALL) {
            *t = self.tiles.node_tile(self.n, self.p, face.dir());
        }
        for bx in node_boxes(self.n, self.f) {
            self.cuboid(bx, &tiles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodemesh_content::ParamType2;
    use nodemesh_geom::BS;

    fn approx(a: Aabb, b: Aabb) -> bool {
        let d = (a.min - b.min).length() + (a.max - b.max).length();
        d < 1e-4
    }

    #[test]
    fn facedir_turns_fixed_boxes() {
        let mut f = ContentFeatures::new("slab");
        f.param_type_2 = ParamType2::FaceDir;
        // A half-width box on the +X side.
        let half = Aabb::from_coords(0.0, -BS / 2.0, -BS / 2.0, BS / 2.0, BS / 2.0, BS / 2.0);
        f.node_box = NodeBox::Fixed(vec![half]);
        let boxes = node_boxes(Node::with_params(1, 0, 0), &f);
        assert!(approx(boxes[0], half));
        let boxes = node_boxes(Node::with_params(1, 0, 2), &f);
        let flipped = Aabb::from_coords(-BS / 2.0, -BS / 2.0, -BS / 2.0, 0.0, BS / 2.0, BS / 2.0);
        assert!(approx(boxes[0], flipped));
        // Quarter turns swing it onto the Z axis.
        let b = node_boxes(Node::with_params(1, 0, 1), &f)[0];
        assert!(b.extent().z < BS * 0.51 && b.extent().x > BS * 0.99);
    }

    #[test]
    fn wallmounted_picks_the_mount_box() {
        let mut f = ContentFeatures::new("button");
        f.param_type_2 = ParamType2::WallMounted;
        let top = Aabb::from_coords(-1.0, 4.0, -1.0, 1.0, 5.0, 1.0);
        let bottom = Aabb::from_coords(-1.0, -5.0, -1.0, 1.0, -4.0, 1.0);
        let side = Aabb::from_coords(-5.0, -1.0, -1.0, -4.0, 1.0, 1.0);
        f.node_box = NodeBox::WallMounted { top, bottom, side };
        assert_eq!(node_boxes(Node::with_params(1, 0, 0), &f), vec![top]);
        assert_eq!(node_boxes(Node::with_params(1, 0, 1), &f), vec![bottom]);
        assert_eq!(node_boxes(Node::with_params(1, 0, 3), &f), vec![side]);
        // Mounted on +X the side box moves across.
        let b = node_boxes(Node::with_params(1, 0, 2), &f)[0];
        assert!(approx(b, Aabb::from_coords(4.0, -1.0, -1.0, 5.0, 1.0, 1.0)));
    }

    #[test]
    fn regular_is_the_unit_box() {
        let f = ContentFeatures::new("block");
        assert_eq!(node_boxes(Node::new(1), &f), vec![NodeBox::unit()]);
    }
}
