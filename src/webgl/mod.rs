//! WebGL backdrops: a drifting particle overlay and a procedural
//! neural-network background.
//!
//! Both render loops stop while the tab is hidden and restart when it
//! becomes visible again. A mutation observer on the body's `data-theme`
//! attribute swaps the active palette on both renderers without restarting
//! them. A canvas whose context or shaders fail to set up simply stays
//! blank; the failure is logged and nothing else degrades.

mod background;
mod particles;
mod shaders;

pub use background::NeuralBackground;
pub use particles::{Particle, ParticleOptions, ParticleSystem, seed_particles, step_particles};

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlCanvasElement, MutationObserver, MutationObserverInit, MutationRecord};

use crate::dom;
use crate::sched;

/// Two-color palette shared by both render paths.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    pub primary: [f32; 3],
    pub secondary: [f32; 3],
}

pub const LIGHT_GOLD: [f32; 3] = [0.83, 0.66, 0.33];
pub const LIGHT_MAROON: [f32; 3] = [0.45, 0.18, 0.22];
pub const DARK_GOLD: [f32; 3] = [0.94, 0.78, 0.43];
pub const DARK_MAROON: [f32; 3] = [0.55, 0.23, 0.27];

pub fn palette_for(dark: bool) -> Palette {
    if dark {
        Palette { primary: DARK_GOLD, secondary: DARK_MAROON }
    } else {
        Palette { primary: LIGHT_GOLD, secondary: LIGHT_MAROON }
    }
}

/// Match the canvas backing store to its CSS size. Returns whether it
/// changed.
pub(crate) fn resize_to_display(canvas: &HtmlCanvasElement) -> bool {
    let display_w = canvas.client_width().max(0) as u32;
    let display_h = canvas.client_height().max(0) as u32;
    if canvas.width() != display_w || canvas.height() != display_h {
        canvas.set_width(display_w);
        canvas.set_height(display_h);
        true
    } else {
        false
    }
}

struct SiteGl {
    particles: Option<ParticleSystem>,
    background: Option<NeuralBackground>,
}

thread_local! {
    static GL_STATE: RefCell<Option<SiteGl>> = RefCell::new(None);
}

fn is_dark(doc: &Document) -> bool {
    doc.body()
        .and_then(|b| b.get_attribute("data-theme"))
        .is_some_and(|t| t == "dark")
}

fn canvas_by_id(doc: &Document, id: &str) -> Option<HtmlCanvasElement> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
}

fn start_particles() {
    GL_STATE.with(|cell| {
        if let Some(gl) = cell.borrow_mut().as_mut() {
            if let Some(system) = gl.particles.as_mut() {
                if system.frame.is_some() {
                    return;
                }
                system.frame = Some(sched::run_frames(|_ts| {
                    GL_STATE.with(|cell| {
                        if let Some(gl) = cell.borrow_mut().as_mut() {
                            if let Some(system) = gl.particles.as_mut() {
                                system.tick();
                            }
                        }
                    });
                    true
                }));
            }
        }
    });
}

fn start_background() {
    GL_STATE.with(|cell| {
        if let Some(gl) = cell.borrow_mut().as_mut() {
            if let Some(bg) = gl.background.as_mut() {
                if bg.frame.is_some() {
                    return;
                }
                bg.frame = Some(sched::run_frames(|_ts| {
                    GL_STATE.with(|cell| {
                        if let Some(gl) = cell.borrow_mut().as_mut() {
                            if let Some(bg) = gl.background.as_mut() {
                                bg.tick();
                            }
                        }
                    });
                    true
                }));
            }
        }
    });
}

/// Stop both render loops. Idempotent; stopping a stopped loop is a no-op.
pub fn pause() {
    GL_STATE.with(|cell| {
        if let Some(gl) = cell.borrow_mut().as_mut() {
            if let Some(system) = gl.particles.as_mut() {
                if let Some(guard) = system.frame.take() {
                    guard.cancel();
                }
            }
            if let Some(bg) = gl.background.as_mut() {
                if let Some(guard) = bg.frame.take() {
                    guard.cancel();
                }
            }
        }
    });
}

/// Restart both render loops after a pause.
pub fn resume() {
    start_particles();
    start_background();
}

fn apply_theme() {
    let Some(doc) = dom::document() else { return };
    let dark = is_dark(&doc);
    let palette = palette_for(dark);
    GL_STATE.with(|cell| {
        if let Some(gl) = cell.borrow_mut().as_mut() {
            if let Some(bg) = gl.background.as_mut() {
                bg.set_dark_mode(dark);
                bg.set_palette(palette);
            }
            if let Some(system) = gl.particles.as_mut() {
                system.set_palette(palette);
            }
        }
    });
}

fn observe_theme(doc: &Document) {
    let Some(body) = doc.body() else { return };
    let cb = Closure::wrap(Box::new(move |records: js_sys::Array, _obs: MutationObserver| {
        for record in records.iter() {
            if let Ok(record) = record.dyn_into::<MutationRecord>() {
                if record.attribute_name().as_deref() == Some("data-theme") {
                    apply_theme();
                }
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);
    if let Ok(observer) = MutationObserver::new(cb.as_ref().unchecked_ref()) {
        let opts = MutationObserverInit::new();
        opts.set_attributes(true);
        if observer.observe_with_options(&body, &opts).is_ok() {
            cb.forget();
        }
    }
}

/// Set up both backdrops, the theme observer and the visibility hook.
pub fn init() {
    let Some(doc) = dom::document() else { return };
    let dark = is_dark(&doc);
    let palette = palette_for(dark);

    let background = canvas_by_id(&doc, "webgl-hero").and_then(|canvas| {
        match NeuralBackground::new(canvas, palette, dark) {
            Ok(bg) => Some(bg),
            Err(err) => {
                log::error!("neural background disabled: {err:?}");
                None
            }
        }
    });

    let particle_opts = ParticleOptions {
        count: 80,
        min_size: 1.0,
        max_size: 3.0,
        speed: 0.3,
    };
    let particles = canvas_by_id(&doc, "webgl-particles").and_then(|canvas| {
        match ParticleSystem::new(canvas, particle_opts, palette) {
            Ok(system) => Some(system),
            Err(err) => {
                log::error!("particle overlay disabled: {err:?}");
                None
            }
        }
    });

    GL_STATE.with(|cell| cell.replace(Some(SiteGl { particles, background })));
    resume();

    observe_theme(&doc);

    dom::listen(doc.as_ref(), "visibilitychange", || {
        let Some(doc) = dom::document() else { return };
        if doc.hidden() {
            pause();
        } else {
            resume();
        }
    });
}
