//! GLSL sources and program plumbing for the backdrop renderers.

use wasm_bindgen::JsValue;
use web_sys::{WebGlProgram, WebGlRenderingContext as GL, WebGlShader};

pub const PARTICLE_VERTEX: &str = r#"
    attribute vec2 a_position;
    attribute float a_size;
    attribute vec3 a_color;
    attribute float a_alpha;

    uniform vec2 u_resolution;
    uniform float u_time;

    varying vec3 v_color;
    varying float v_alpha;

    void main() {
        vec2 position = a_position;

        // Subtle wave motion on top of the integrated drift
        position.x += sin(u_time * 0.5 + a_position.y * 0.01) * 2.0;
        position.y += cos(u_time * 0.3 + a_position.x * 0.01) * 2.0;

        vec2 clipSpace = (position / u_resolution) * 2.0 - 1.0;
        gl_Position = vec4(clipSpace * vec2(1, -1), 0, 1);
        gl_PointSize = a_size;

        v_color = a_color;
        v_alpha = a_alpha;
    }
"#;

pub const PARTICLE_FRAGMENT: &str = r#"
    precision mediump float;

    varying vec3 v_color;
    varying float v_alpha;

    void main() {
        // Circular point sprites with soft edges
        vec2 coord = gl_PointCoord - vec2(0.5);
        float dist = length(coord);

        if (dist > 0.5) {
            discard;
        }

        float alpha = v_alpha * (1.0 - smoothstep(0.3, 0.5, dist));
        gl_FragColor = vec4(v_color, alpha);
    }
"#;

pub const NEURAL_VERTEX: &str = r#"
    attribute vec2 a_position;
    varying vec2 v_texCoord;

    void main() {
        gl_Position = vec4(a_position, 0, 1);
        v_texCoord = (a_position + 1.0) * 0.5;
    }
"#;

pub const NEURAL_FRAGMENT: &str = r#"
    precision highp float;

    uniform float u_time;
    uniform vec2 u_resolution;
    uniform vec3 u_colorPrimary;
    uniform vec3 u_colorSecondary;
    uniform float u_isDarkMode;

    varying vec2 v_texCoord;

    // 2D simplex noise
    vec3 mod289(vec3 x) { return x - floor(x * (1.0 / 289.0)) * 289.0; }
    vec2 mod289(vec2 x) { return x - floor(x * (1.0 / 289.0)) * 289.0; }
    vec3 permute(vec3 x) { return mod289(((x*34.0)+1.0)*x); }

    float snoise(vec2 v) {
        const vec4 C = vec4(0.211324865405187, 0.366025403784439,
                          -0.577350269189626, 0.024390243902439);
        vec2 i  = floor(v + dot(v, C.yy));
        vec2 x0 = v - i + dot(i, C.xx);
        vec2 i1;
        i1 = (x0.x > x0.y) ? vec2(1.0, 0.0) : vec2(0.0, 1.0);
        vec4 x12 = x0.xyxy + C.xxzz;
        x12.xy -= i1;
        i = mod289(i);
        vec3 p = permute(permute(i.y + vec3(0.0, i1.y, 1.0))
            + i.x + vec3(0.0, i1.x, 1.0));
        vec3 m = max(0.5 - vec3(dot(x0,x0), dot(x12.xy,x12.xy),
            dot(x12.zw,x12.zw)), 0.0);
        m = m*m;
        m = m*m;
        vec3 x = 2.0 * fract(p * C.www) - 1.0;
        vec3 h = abs(x) - 0.5;
        vec3 ox = floor(x + 0.5);
        vec3 a0 = x - ox;
        m *= 1.79284291400159 - 0.85373472095314 * (a0*a0 + h*h);
        vec3 g;
        g.x = a0.x * x0.x + h.x * x0.y;
        g.yz = a0.yz * x12.xz + h.yz * x12.yw;
        return 130.0 * dot(m, g);
    }

    float neuralNode(vec2 uv, vec2 center, float radius, float time) {
        float dist = length(uv - center);
        float pulse = sin(time * 2.0 + length(center) * 10.0) * 0.5 + 0.5;
        float glow = smoothstep(radius * 1.5, radius * 0.5, dist);
        return glow * (0.5 + pulse * 0.5);
    }

    float neuralConnection(vec2 uv, vec2 p1, vec2 p2, float width, float time) {
        vec2 pa = uv - p1;
        vec2 ba = p2 - p1;
        float h = clamp(dot(pa, ba) / dot(ba, ba), 0.0, 1.0);
        float dist = length(pa - ba * h);

        // Pulse travelling along the line
        float pulse = sin(time * 3.0 - h * 6.28) * 0.5 + 0.5;

        return smoothstep(width, width * 0.3, dist) * (0.3 + pulse * 0.7);
    }

    void main() {
        vec2 uv = v_texCoord;
        vec2 aspect = vec2(u_resolution.x / u_resolution.y, 1.0);
        uv *= aspect;

        float time = u_time * 0.5;

        vec3 bgColor = mix(
            u_isDarkMode > 0.5 ? vec3(0.07, 0.035, 0.04) : vec3(0.98, 0.965, 0.945),
            u_isDarkMode > 0.5 ? vec3(0.11, 0.06, 0.07) : vec3(0.96, 0.93, 0.9),
            uv.y
        );

        float nodes = 0.0;
        float connections = 0.0;

        // Node grid with noise displacement and drift
        for (float i = 0.0; i < 5.0; i++) {
            for (float j = 0.0; j < 4.0; j++) {
                vec2 nodePos = vec2(
                    0.15 + i * 0.2 + snoise(vec2(i, j) * 10.0) * 0.05,
                    0.2 + j * 0.25 + snoise(vec2(i + 5.0, j) * 10.0) * 0.05
                ) * aspect;

                nodePos.x += sin(time + i * 1.5) * 0.02;
                nodePos.y += cos(time + j * 1.3) * 0.02;

                nodes += neuralNode(uv, nodePos, 0.015, time + i + j);

                if (i < 4.0) {
                    vec2 nextNode = vec2(
                        0.15 + (i + 1.0) * 0.2 + snoise(vec2(i + 1.0, j) * 10.0) * 0.05,
                        0.2 + j * 0.25 + snoise(vec2(i + 6.0, j) * 10.0) * 0.05
                    ) * aspect;
                    nextNode.x += sin(time + (i + 1.0) * 1.5) * 0.02;
                    nextNode.y += cos(time + j * 1.3) * 0.02;
                    connections += neuralConnection(uv, nodePos, nextNode, 0.002, time + i);
                }

                if (j < 3.0) {
                    vec2 nextNode = vec2(
                        0.15 + i * 0.2 + snoise(vec2(i, j + 1.0) * 10.0) * 0.05,
                        0.2 + (j + 1.0) * 0.25 + snoise(vec2(i + 5.0, j + 1.0) * 10.0) * 0.05
                    ) * aspect;
                    nextNode.x += sin(time + i * 1.5) * 0.02;
                    nextNode.y += cos(time + (j + 1.0) * 1.3) * 0.02;
                    connections += neuralConnection(uv, nodePos, nextNode, 0.002, time + j);
                }
            }
        }

        float noise = snoise(uv * 3.0 + time * 0.1) * 0.03;

        vec3 nodeColor = mix(u_colorSecondary, u_colorPrimary, 0.5);
        vec3 connectionColor = u_colorPrimary;

        vec3 finalColor = bgColor;
        finalColor += connectionColor * connections * 0.15;
        finalColor += nodeColor * nodes * 0.25;
        finalColor += noise * (u_isDarkMode > 0.5 ? 0.05 : 0.02);

        float vignette = 1.0 - smoothstep(0.5, 1.5, length((v_texCoord - 0.5) * 1.5));
        finalColor *= vignette * 0.3 + 0.7;

        gl_FragColor = vec4(finalColor, 1.0);
    }
"#;

pub(super) fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| JsValue::from_str("create_shader failed"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        log::error!("shader compile error: {info}");
        Err(JsValue::from_str("shader compile error"))
    }
}

pub(super) fn link_program(
    gl: &GL,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<WebGlProgram, JsValue> {
    let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex_src)?;
    let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_src)?;
    let program = gl
        .create_program()
        .ok_or_else(|| JsValue::from_str("create_program failed"))?;
    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        log::error!("program link error: {info}");
        Err(JsValue::from_str("program link error"))
    }
}
