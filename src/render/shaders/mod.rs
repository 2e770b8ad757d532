use glium::Program;
use glium::program;
use lazy_static::lazy_static;
use send_wrapper::SendWrapper;

const BOX_VERT: &str = r#"
#version 140

in vec3 pos;
in vec3 color;
out vec3 v_color;

uniform mat4 transform;

void main() {
    v_color = color;
    gl_Position = transform * vec4(pos, 1.0);
}
"#;

const BOX_FRAG: &str = r#"
#version 140

in vec3 v_color;
out vec4 frag_color;

void main() {
    frag_color = vec4(v_color, 1.0);
}
"#;

lazy_static! {
    pub static ref BOX_PROGRAM: SendWrapper<Program> = SendWrapper::new(
        glium::program!(
            &**crate::gui::DISPLAY,
            140 => {
                vertex: BOX_VERT,
                fragment: BOX_FRAG,
                outputs_srgb: false,
            },
        )
        .expect("Failed to compile shader")
    );
}
