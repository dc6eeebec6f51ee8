/// Shader - OpenGL implementation of the Shader trait

use std::rc::Rc;
use glow::HasContext;
use orbit_3d_engine::orbit3d::{
    Error,
    Result,
    device::{Shader, ShaderDesc, UniformCache, UniformValue},
};
use orbit_3d_engine::{engine_debug, engine_error, engine_warn};

use crate::gl_format;

/// Linked OpenGL program
///
/// A program that failed to compile or link is kept as an invalid shader
/// (`program == None`): binding it unbinds any program and every uniform
/// lookup misses.
pub struct GlShader {
    gl: Rc<glow::Context>,
    name: String,
    program: Option<glow::NativeProgram>,
    uniforms: UniformCache<glow::NativeUniformLocation>,
}

impl GlShader {
    pub(crate) fn new(gl: Rc<glow::Context>, desc: ShaderDesc) -> Self {
        let program = unsafe { build_program(&gl, &desc) };
        if program.is_some() {
            engine_debug!("orbit3d::opengl", "Linked shader '{}'", desc.name);
        }
        Self {
            gl,
            name: desc.name,
            program,
            uniforms: UniformCache::new(),
        }
    }

    fn uniform_location(&self, name: &str) -> Option<glow::NativeUniformLocation> {
        let program = self.program?;
        self.uniforms
            .location(name, |name| unsafe { self.gl.get_uniform_location(program, name) })
    }
}

/// Compile every stage and link them; failures are logged and yield `None`
unsafe fn build_program(gl: &glow::Context, desc: &ShaderDesc) -> Option<glow::NativeProgram> {
    let mut shaders = Vec::new();
    let mut failed = false;

    for (stage, source) in desc.sources.stages() {
        let shader = match gl.create_shader(gl_format::shader_stage(stage)) {
            Ok(shader) => shader,
            Err(message) => {
                engine_error!("orbit3d::opengl", "glCreateShader failed for '{}': {}", desc.name, message);
                failed = true;
                break;
            }
        };
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            engine_error!(
                "orbit3d::opengl",
                "{:?} stage of shader '{}' failed to compile:\n{}",
                stage, desc.name, gl.get_shader_info_log(shader)
            );
            gl.delete_shader(shader);
            failed = true;
            break;
        }
        shaders.push(shader);
    }

    if failed {
        for shader in shaders {
            gl.delete_shader(shader);
        }
        return None;
    }

    let program = match gl.create_program() {
        Ok(program) => program,
        Err(message) => {
            engine_error!("orbit3d::opengl", "glCreateProgram failed for '{}': {}", desc.name, message);
            for shader in shaders {
                gl.delete_shader(shader);
            }
            return None;
        }
    };
    for shader in &shaders {
        gl.attach_shader(program, *shader);
    }
    gl.link_program(program);
    let linked = gl.get_program_link_status(program);
    if !linked {
        engine_error!(
            "orbit3d::opengl",
            "Shader '{}' failed to link:\n{}",
            desc.name, gl.get_program_info_log(program)
        );
    }

    for shader in shaders {
        gl.detach_shader(program, shader);
        gl.delete_shader(shader);
    }

    if linked {
        Some(program)
    } else {
        gl.delete_program(program);
        None
    }
}

impl Shader for GlShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self) -> bool {
        self.program.is_some()
    }

    fn bind(&self) {
        unsafe {
            self.gl.use_program(self.program);
        }
    }

    fn unbind(&self) {
        unsafe {
            self.gl.use_program(None);
        }
    }

    fn has_uniform(&self, name: &str) -> bool {
        self.uniform_location(name).is_some()
    }

    fn set_uniform(&self, name: &str, value: UniformValue) -> Result<()> {
        let Some(location) = self.uniform_location(name) else {
            engine_warn!("orbit3d::opengl", "Uniform '{}' not found in shader '{}'", name, self.name);
            return Err(Error::UniformNotFound(name.to_string()));
        };
        let location = Some(&location);

        unsafe {
            match value {
                UniformValue::Int(value) => self.gl.uniform_1_i32(location, value),
                UniformValue::IntArray(values) => self.gl.uniform_1_i32_slice(location, &values),
                UniformValue::Float(value) => self.gl.uniform_1_f32(location, value),
                UniformValue::Vec2(value) => self.gl.uniform_2_f32(location, value.x, value.y),
                UniformValue::Vec3(value) => self.gl.uniform_3_f32(location, value.x, value.y, value.z),
                UniformValue::Vec4(value) => {
                    self.gl.uniform_4_f32(location, value.x, value.y, value.z, value.w)
                }
                UniformValue::Mat3(value) => {
                    self.gl.uniform_matrix_3_f32_slice(location, false, &value.to_cols_array())
                }
                UniformValue::Mat4(value) => {
                    self.gl.uniform_matrix_4_f32_slice(location, false, &value.to_cols_array())
                }
            }
        }
        Ok(())
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        if let Some(program) = self.program.take() {
            unsafe {
                self.gl.delete_program(program);
            }
        }
    }
}
