//! Point-sprite particle overlay.
//!
//! Particle state lives on the CPU and is re-uploaded every frame; the
//! count is fixed at construction and particles are only ever destroyed as
//! a batch when the system is dropped. Positions wrap at the canvas bounds.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGlBuffer, WebGlContextAttributes, WebGlProgram,
    WebGlRenderingContext as GL, WebGlUniformLocation,
};

use super::{Palette, resize_to_display, shaders};
use crate::rng::Lcg;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub color: [f32; 3],
    pub alpha: f32,
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticleOptions {
    pub count: usize,
    pub min_size: f32,
    pub max_size: f32,
    pub speed: f32,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            count: 100,
            min_size: 1.0,
            max_size: 4.0,
            speed: 0.5,
        }
    }
}

/// Advance every particle one Euler step, wrapping toroidally at the
/// canvas bounds.
pub fn step_particles(particles: &mut [Particle], width: f32, height: f32) {
    for p in particles.iter_mut() {
        p.x += p.vx;
        p.y += p.vy;

        if p.x < 0.0 {
            p.x = width;
        }
        if p.x > width {
            p.x = 0.0;
        }
        if p.y < 0.0 {
            p.y = height;
        }
        if p.y > height {
            p.y = 0.0;
        }
    }
}

/// Build the initial batch. Roughly two thirds take the primary color.
pub fn seed_particles(
    opts: &ParticleOptions,
    palette: Palette,
    width: f32,
    height: f32,
    rng: &mut Lcg,
) -> Vec<Particle> {
    (0..opts.count)
        .map(|_| {
            let color = if rng.next_f32() > 0.3 {
                palette.primary
            } else {
                palette.secondary
            };
            Particle {
                x: rng.next_f32() * width,
                y: rng.next_f32() * height,
                vx: (rng.next_f32() - 0.5) * opts.speed,
                vy: (rng.next_f32() - 0.5) * opts.speed,
                size: opts.min_size + rng.next_f32() * (opts.max_size - opts.min_size),
                color,
                alpha: 0.2 + rng.next_f32() * 0.5,
            }
        })
        .collect()
}

struct AttribLocations {
    position: i32,
    size: i32,
    color: i32,
    alpha: i32,
}

pub struct ParticleSystem {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    attribs: AttribLocations,
    loc_resolution: Option<WebGlUniformLocation>,
    loc_time: Option<WebGlUniformLocation>,
    buf_position: WebGlBuffer,
    buf_size: WebGlBuffer,
    buf_color: WebGlBuffer,
    buf_alpha: WebGlBuffer,
    particles: Vec<Particle>,
    time: f32,
    rng: Lcg,
    pub(super) frame: Option<crate::sched::FrameGuard>,
}

fn create_buffer(gl: &GL) -> Result<WebGlBuffer, JsValue> {
    gl.create_buffer()
        .ok_or_else(|| JsValue::from_str("create_buffer failed"))
}

impl ParticleSystem {
    pub fn new(
        canvas: HtmlCanvasElement,
        opts: ParticleOptions,
        palette: Palette,
    ) -> Result<Self, JsValue> {
        let attrs = WebGlContextAttributes::new();
        attrs.set_alpha(true);
        attrs.set_premultiplied_alpha(false);
        attrs.set_antialias(true);
        let gl: GL = canvas
            .get_context_with_context_options("webgl", attrs.as_ref())?
            .ok_or_else(|| JsValue::from_str("webgl context unavailable"))?
            .dyn_into()?;

        let program = shaders::link_program(&gl, shaders::PARTICLE_VERTEX, shaders::PARTICLE_FRAGMENT)?;
        let attribs = AttribLocations {
            position: gl.get_attrib_location(&program, "a_position"),
            size: gl.get_attrib_location(&program, "a_size"),
            color: gl.get_attrib_location(&program, "a_color"),
            alpha: gl.get_attrib_location(&program, "a_alpha"),
        };
        let loc_resolution = gl.get_uniform_location(&program, "u_resolution");
        let loc_time = gl.get_uniform_location(&program, "u_time");

        let buf_position = create_buffer(&gl)?;
        let buf_size = create_buffer(&gl)?;
        let buf_color = create_buffer(&gl)?;
        let buf_alpha = create_buffer(&gl)?;

        resize_to_display(&canvas);
        let width = canvas.width().max(1) as f32;
        let height = canvas.height().max(1) as f32;
        let mut rng = Lcg::from_clock();
        let particles = seed_particles(&opts, palette, width, height, &mut rng);

        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);

        Ok(Self {
            canvas,
            gl,
            program,
            attribs,
            loc_resolution,
            loc_time,
            buf_position,
            buf_size,
            buf_color,
            buf_alpha,
            particles,
            time: 0.0,
            rng,
            frame: None,
        })
    }

    fn upload(&self, buffer: &WebGlBuffer, data: &[f32], location: i32, components: i32) {
        if location < 0 {
            return;
        }
        let gl = &self.gl;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
        let view = js_sys::Float32Array::from(data);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::DYNAMIC_DRAW);
        gl.enable_vertex_attrib_array(location as u32);
        gl.vertex_attrib_pointer_with_i32(location as u32, components, GL::FLOAT, false, 0, 0);
    }

    fn render(&self) {
        let gl = &self.gl;
        let width = self.canvas.width();
        let height = self.canvas.height();
        gl.viewport(0, 0, width as i32, height as i32);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.uniform2f(self.loc_resolution.as_ref(), width as f32, height as f32);
        gl.uniform1f(self.loc_time.as_ref(), self.time);

        let n = self.particles.len();
        let mut positions = Vec::with_capacity(n * 2);
        let mut sizes = Vec::with_capacity(n);
        let mut colors = Vec::with_capacity(n * 3);
        let mut alphas = Vec::with_capacity(n);
        for p in &self.particles {
            positions.extend_from_slice(&[p.x, p.y]);
            sizes.push(p.size);
            colors.extend_from_slice(&p.color);
            alphas.push(p.alpha);
        }

        self.upload(&self.buf_position, &positions, self.attribs.position, 2);
        self.upload(&self.buf_size, &sizes, self.attribs.size, 1);
        self.upload(&self.buf_color, &colors, self.attribs.color, 3);
        self.upload(&self.buf_alpha, &alphas, self.attribs.alpha, 1);

        gl.draw_arrays(GL::POINTS, 0, n as i32);
    }

    pub(super) fn tick(&mut self) {
        self.time += 0.016;
        resize_to_display(&self.canvas);
        let width = self.canvas.width().max(1) as f32;
        let height = self.canvas.height().max(1) as f32;
        step_particles(&mut self.particles, width, height);
        self.render();
    }

    /// Recolor the batch in place; positions and motion are untouched.
    pub fn set_palette(&mut self, palette: Palette) {
        for p in &mut self.particles {
            p.color = if self.rng.next_f32() > 0.3 {
                palette.primary
            } else {
                palette.secondary
            };
        }
    }
}

impl Drop for ParticleSystem {
    fn drop(&mut self) {
        if let Some(guard) = self.frame.take() {
            guard.cancel();
        }
        let gl = &self.gl;
        gl.delete_program(Some(&self.program));
        gl.delete_buffer(Some(&self.buf_position));
        gl.delete_buffer(Some(&self.buf_size));
        gl.delete_buffer(Some(&self.buf_color));
        gl.delete_buffer(Some(&self.buf_alpha));
    }
}
