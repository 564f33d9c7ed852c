use crate::constants::{FACES_MARKER_ATTR, FACE_ATTR, FACE_IMAGES};
use crate::dom;
use hero_core::{edge_css, face_image, faces_to_attach, Face};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Attach the image faces a cube element is missing. Runs once per element;
/// a second call finds the marker and returns `false` without touching the DOM.
pub fn attach_faces(
    document: &web::Document,
    cube: &web::HtmlElement,
    cube_index: usize,
    size_px: f32,
) -> anyhow::Result<bool> {
    let missing = faces_to_attach(cube.has_attribute(FACES_MARKER_ATTR), |face| {
        face_element(cube, face).is_some()
    });
    if missing.is_empty() {
        return Ok(false);
    }
    dom::set_style(cube, "transform-style", "preserve-3d");
    for face in missing {
        let el: web::HtmlElement = document
            .create_element("div")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        el.set_class_name(face.class_name());
        let _ = el.set_attribute(FACE_ATTR, face.class_name());
        dom::set_style(&el, "position", "absolute");
        dom::set_style(&el, "background-size", "cover");
        dom::set_style(&el, "backface-visibility", "hidden");
        if let Some(src) = face_image(FACE_IMAGES, cube_index, face) {
            dom::set_style(&el, "background-image", &format!("url(\"{}\")", src));
        }
        place_face(&el, face, size_px);
        cube.append_child(&el)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    let _ = cube.set_attribute(FACES_MARKER_ATTR, "1");
    Ok(true)
}

/// Re-apply edge length to a cube and its faces.
pub fn resize(cube: &web::HtmlElement, size_px: f32) {
    let size = edge_css(size_px);
    dom::set_style(cube, "width", &size);
    dom::set_style(cube, "height", &size);
    for face in Face::ALL {
        if let Some(el) = face_element(cube, face) {
            place_face(&el, face, size_px);
        }
    }
}

fn face_element(cube: &web::HtmlElement, face: Face) -> Option<web::HtmlElement> {
    let selector = format!("[{}=\"{}\"]", FACE_ATTR, face.class_name());
    match cube.query_selector(&selector) {
        Ok(Some(el)) => el.dyn_into::<web::HtmlElement>().ok(),
        _ => None,
    }
}

fn place_face(el: &web::HtmlElement, face: Face, size_px: f32) {
    let size = edge_css(size_px);
    dom::set_style(el, "width", &size);
    dom::set_style(el, "height", &size);
    dom::set_style(el, "transform", &face.transform_css(size_px));
}
