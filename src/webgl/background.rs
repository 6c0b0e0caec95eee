//! Procedural neural-network background on a fullscreen quad.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGlBuffer, WebGlContextAttributes, WebGlProgram,
    WebGlRenderingContext as GL, WebGlUniformLocation,
};

use super::{Palette, resize_to_display, shaders};

pub struct NeuralBackground {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    loc_position: i32,
    loc_time: Option<WebGlUniformLocation>,
    loc_resolution: Option<WebGlUniformLocation>,
    loc_primary: Option<WebGlUniformLocation>,
    loc_secondary: Option<WebGlUniformLocation>,
    loc_dark: Option<WebGlUniformLocation>,
    quad: WebGlBuffer,
    palette: Palette,
    dark: bool,
    time: f32,
    pub(super) frame: Option<crate::sched::FrameGuard>,
}

impl NeuralBackground {
    pub fn new(canvas: HtmlCanvasElement, palette: Palette, dark: bool) -> Result<Self, JsValue> {
        let attrs = WebGlContextAttributes::new();
        attrs.set_alpha(false);
        attrs.set_antialias(true);
        let gl: GL = canvas
            .get_context_with_context_options("webgl", attrs.as_ref())?
            .ok_or_else(|| JsValue::from_str("webgl context unavailable"))?
            .dyn_into()?;

        let program = shaders::link_program(&gl, shaders::NEURAL_VERTEX, shaders::NEURAL_FRAGMENT)?;
        let loc_position = gl.get_attrib_location(&program, "a_position");
        let loc_time = gl.get_uniform_location(&program, "u_time");
        let loc_resolution = gl.get_uniform_location(&program, "u_resolution");
        let loc_primary = gl.get_uniform_location(&program, "u_colorPrimary");
        let loc_secondary = gl.get_uniform_location(&program, "u_colorSecondary");
        let loc_dark = gl.get_uniform_location(&program, "u_isDarkMode");

        let quad = gl
            .create_buffer()
            .ok_or_else(|| JsValue::from_str("create_buffer failed"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&quad));
        let vertices: [f32; 12] = [
            -1.0, -1.0, 1.0, -1.0, -1.0, 1.0,
            -1.0, 1.0, 1.0, -1.0, 1.0, 1.0,
        ];
        let view = js_sys::Float32Array::from(vertices.as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);

        Ok(Self {
            canvas,
            gl,
            program,
            loc_position,
            loc_time,
            loc_resolution,
            loc_primary,
            loc_secondary,
            loc_dark,
            quad,
            palette,
            dark,
            time: 0.0,
            frame: None,
        })
    }

    fn render(&self) {
        let gl = &self.gl;
        let width = self.canvas.width();
        let height = self.canvas.height();
        gl.viewport(0, 0, width as i32, height as i32);

        gl.use_program(Some(&self.program));
        gl.uniform1f(self.loc_time.as_ref(), self.time);
        gl.uniform2f(self.loc_resolution.as_ref(), width as f32, height as f32);
        gl.uniform3fv_with_f32_array(self.loc_primary.as_ref(), &self.palette.primary);
        gl.uniform3fv_with_f32_array(self.loc_secondary.as_ref(), &self.palette.secondary);
        gl.uniform1f(self.loc_dark.as_ref(), if self.dark { 1.0 } else { 0.0 });

        if self.loc_position >= 0 {
            gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.quad));
            gl.enable_vertex_attrib_array(self.loc_position as u32);
            gl.vertex_attrib_pointer_with_i32(self.loc_position as u32, 2, GL::FLOAT, false, 0, 0);
            gl.draw_arrays(GL::TRIANGLES, 0, 6);
        }
    }

    pub(super) fn tick(&mut self) {
        self.time += 0.016;
        resize_to_display(&self.canvas);
        self.render();
    }

    /// Swap palette without restarting the loop.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.dark = dark;
    }
}

impl Drop for NeuralBackground {
    fn drop(&mut self) {
        if let Some(guard) = self.frame.take() {
            guard.cancel();
        }
        let gl = &self.gl;
        gl.delete_program(Some(&self.program));
        gl.delete_buffer(Some(&self.quad));
    }
}
