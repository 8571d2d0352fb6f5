use nodemesh_content::{ContentRegistry, Node};

/// Which of the two nodes across a face draws it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaceOwner {
    None,
    A,
    B,
}

impl FaceOwner {
    #[inline]
    pub fn swapped(self) -> FaceOwner {
        match self {
            FaceOwner::None => FaceOwner::None,
            FaceOwner::A => FaceOwner::B,
            FaceOwner::B => FaceOwner::A,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceContents {
    pub owner: FaceOwner,
    /// Both sides look the same; the face is drawn culled from behind.
    pub equivalent: bool,
}

impl FaceContents {
    const NONE: FaceContents = FaceContents {
        owner: FaceOwner::None,
        equivalent: false,
    };

    #[inline]
    pub fn makes_face(&self) -> bool {
        self.owner != FaceOwner::None
    }
}

/// Decides whether the face between `a` and `b` is drawn and by whom.
/// Swapping the arguments swaps the owner and keeps `equivalent`.
pub fn face_contents(a: Node, b: Node, reg: &ContentRegistry) -> FaceContents {
    if a.content == b.content || a.is_ignore() || b.is_ignore() {
        return FaceContents::NONE;
    }
    let fa = reg.get(a.content);
    let fb = reg.get(b.content);
    if fa.same_liquid(fb) {
        return FaceContents::NONE;
    }
    if fa.solidness == fb.solidness {
        return FaceContents::NONE;
    }
    let va = if fa.solidness == 0 { fa.visual_solidness } else { fa.solidness };
    let vb = if fb.solidness == 0 { fb.visual_solidness } else { fb.solidness };
    if va == vb {
        let owner = match (fa.is_liquid(), fb.is_liquid()) {
            (true, false) => FaceOwner::A,
            (false, true) => FaceOwner::B,
            _ if fa.solidness > fb.solidness => FaceOwner::A,
            _ => FaceOwner::B,
        };
        return FaceContents {
            owner,
            equivalent: true,
        };
    }
    FaceContents {
        owner: if va > vb { FaceOwner::A } else { FaceOwner::B },
        equivalent: false,
    }
}
