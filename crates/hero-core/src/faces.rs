//! Cube face geometry and face image assignment.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
    Right,
    Left,
    Top,
    Bottom,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
    ];

    /// Class name used on the face element.
    pub fn class_name(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Right => "right",
            Face::Left => "left",
            Face::Top => "top",
            Face::Bottom => "bottom",
        }
    }

    /// Transform placing this face on a cube of edge `size_px`.
    pub fn transform_css(self, size_px: f32) -> String {
        let h = size_px / 2.0;
        match self {
            Face::Front => format!("translateZ({h}px)"),
            Face::Back => format!("translateZ(-{h}px) rotateY(180deg)"),
            Face::Right => format!("translateX({h}px) rotateY(90deg)"),
            Face::Left => format!("translateX(-{h}px) rotateY(-90deg)"),
            Face::Top => format!("translateY(-{h}px) rotateX(90deg)"),
            Face::Bottom => format!("translateY({h}px) rotateX(-90deg)"),
        }
    }
}

/// Width/height value for a cube or face of edge `size_px`.
pub fn edge_css(size_px: f32) -> String {
    format!("{}px", size_px)
}

/// Faces a cube still needs. Empty once the cube carries the enrichment
/// marker; otherwise every face `has_face` does not already find.
pub fn faces_to_attach(marked: bool, has_face: impl Fn(Face) -> bool) -> Vec<Face> {
    if marked {
        return Vec::new();
    }
    Face::ALL.into_iter().filter(|f| !has_face(*f)).collect()
}

/// Image for `face` of the cube at `cube_index`; the list is walked in a ring
/// starting at the cube index so neighbouring cubes show different fronts.
pub fn face_image<'a>(images: &[&'a str], cube_index: usize, face: Face) -> Option<&'a str> {
    if images.is_empty() {
        return None;
    }
    let slot = Face::ALL.iter().position(|f| *f == face).unwrap_or(0);
    Some(images[(cube_index + slot) % images.len()])
}
