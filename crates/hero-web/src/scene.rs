//! Retained element handles and the style writes driven by progress.

use crate::constants::*;
use crate::cube;
use crate::dom;
use hero_core::{map_state, ConfigTable, ProgressSink, SizeClass, StyleSet, TextStyle};
use web_sys as web;

pub struct HeroScene {
    logo: web::HtmlElement,
    heading: web::HtmlElement,
    subheading: web::HtmlElement,
    cubes_container: web::HtmlElement,
    // indexed like the config table; `None` when the page has no element for an entry
    cubes: Vec<Option<web::HtmlElement>>,
    table: ConfigTable,
    size_class: SizeClass,
}

impl HeroScene {
    /// Collect the element handles. `None` until the required ones are attached.
    pub fn query(document: &web::Document, table: ConfigTable) -> Option<Self> {
        let logo = dom::html_by_id(document, LOGO_ID)?;
        let heading = dom::html_by_id(document, HEADING_ID)?;
        let subheading = dom::html_by_id(document, SUBHEADING_ID)?;
        let cubes_container = dom::html_by_id(document, CUBES_ID)?;
        let cubes = table
            .iter()
            .map(|cfg| {
                let selector = format!(".cube[{}=\"{}\"]", CUBE_ID_ATTR, cfg.id);
                let el = dom::html_by_selector(document, &selector);
                if el.is_none() {
                    log::warn!("[scene] no element for cube `{}`", cfg.id);
                }
                el
            })
            .collect();
        Some(Self {
            logo,
            heading,
            subheading,
            cubes_container,
            cubes,
            table,
            size_class: SizeClass::default(),
        })
    }

    /// One-shot face enrichment for every cube present.
    pub fn attach_faces(&self, document: &web::Document) {
        let size = self.size_class.cube_size();
        let mut attached = 0usize;
        for (i, el) in self.cubes.iter().enumerate() {
            let Some(el) = el else { continue };
            match cube::attach_faces(document, el, i, size) {
                Ok(true) => attached += 1,
                Ok(false) => {}
                Err(e) => log::error!("[scene] face attach failed for cube {}: {:?}", i, e),
            }
        }
        if attached > 0 {
            log::info!("[scene] attached faces to {} cubes", attached);
        }
    }

    fn write(&self, styles: &StyleSet) {
        dom::set_style(&self.logo, "opacity", &styles.branding.opacity.to_string());
        dom::set_style(&self.logo, "filter", &styles.branding.filter_css());
        write_text(&self.heading, &styles.primary);
        write_text(&self.subheading, &styles.secondary);
        dom::set_style(
            &self.cubes_container,
            "opacity",
            &styles.cubes_opacity.to_string(),
        );
        for c in &styles.cubes {
            let Some(Some(el)) = self.cubes.get(c.index) else {
                continue;
            };
            dom::set_style(el, "top", &c.top_css());
            dom::set_style(el, "left", &c.left_css());
            dom::set_style(el, "transform", &c.transform_css());
        }
    }
}

fn write_text(el: &web::HtmlElement, style: &TextStyle) {
    dom::set_style(el, "opacity", &style.opacity.to_string());
    dom::set_style(el, "filter", &style.filter_css());
    dom::set_style(el, "transform", &style.transform_css());
}

impl ProgressSink for HeroScene {
    fn apply(&mut self, progress: f64) {
        let styles = map_state(progress, self.size_class, &self.table);
        self.write(&styles);
    }

    fn set_size_class(&mut self, size_class: SizeClass) {
        self.size_class = size_class;
        let size = size_class.cube_size();
        for el in self.cubes.iter().flatten() {
            cube::resize(el, size);
        }
    }
}
