/// Mock graphics device for unit tests (no GPU required)
///
/// Every backend call is appended to a shared command log so tests can
/// assert ordering, texture slot assignment and uploaded uniform values.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use glam::Vec4;
use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, DeviceLimits, ClearFlags, PrimitiveType,
    Buffer, BufferDesc, BufferUsage, check_buffer_range,
    VertexArrayBinding, AttributeDesc,
    Texture, TextureSpecification,
    Shader, ShaderDesc, ShaderSources, UniformValue, UniformCache,
    Framebuffer, FramebufferSpecification, BlitMask, validate_framebuffer_size,
};

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    CreateBuffer { id: u32, usage: BufferUsage, size: u64 },
    UpdateBuffer { id: u32, offset: u64, len: usize },
    BindBuffer(u32),
    CreateVertexArray(u32),
    BindVertexArray(u32),
    UnbindVertexArray,
    EnableAttribute { vao: u32, buffer: u32, attribute: AttributeDesc },
    AttachIndexBuffer { vao: u32, buffer: u32 },
    CreateTexture { id: u32, spec: TextureSpecification, with_data: bool },
    UploadTexture { id: u32, len: usize },
    BindTexture { id: u32, slot: Option<u32> },
    UnbindTexture(u32),
    CreateShader { id: u32, name: String, valid: bool },
    BindShader(u32),
    UnbindShader,
    SetUniform { shader: u32, name: String, value: UniformValue },
    CreateFramebuffer { id: u32, width: u32, height: u32 },
    BindFramebuffer(u32),
    UnbindFramebuffer,
    ResizeFramebuffer { id: u32, width: u32, height: u32 },
    Blit { source: u32, target: Option<u32>, mask: BlitMask },
    SetViewport { x: i32, y: i32, width: u32, height: u32 },
    SetClearColor(Vec4),
    Clear(ClearFlags),
    SetDepthTest(bool),
    SetFaceCulling(bool),
    DrawIndexed { primitive: PrimitiveType, count: u32 },
    DrawArrays { primitive: PrimitiveType, first: u32, count: u32 },
}

type CommandLog = Rc<RefCell<Vec<MockCommand>>>;

fn record(log: &CommandLog, command: MockCommand) {
    log.borrow_mut().push(command);
}

// ============================================================================
// Mock Buffer
// ============================================================================

pub struct MockBuffer {
    pub id: u32,
    usage: BufferUsage,
    size: u64,
    pub contents: RefCell<Vec<u8>>,
    log: CommandLog,
}

impl Buffer for MockBuffer {
    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn bind(&self) {
        record(&self.log, MockCommand::BindBuffer(self.id));
    }

    fn unbind(&self) {}

    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        check_buffer_range(self.size, offset, data.len())?;
        let start = offset as usize;
        self.contents.borrow_mut()[start..start + data.len()].copy_from_slice(data);
        record(&self.log, MockCommand::UpdateBuffer { id: self.id, offset, len: data.len() });
        Ok(())
    }

    fn native_id(&self) -> u32 {
        self.id
    }
}

// ============================================================================
// Mock Vertex Array
// ============================================================================

pub struct MockVertexArray {
    pub id: u32,
    log: CommandLog,
}

impl VertexArrayBinding for MockVertexArray {
    fn bind(&self) {
        record(&self.log, MockCommand::BindVertexArray(self.id));
    }

    fn unbind(&self) {
        record(&self.log, MockCommand::UnbindVertexArray);
    }

    fn enable_attribute(&self, buffer: &dyn Buffer, attribute: &AttributeDesc) -> Result<()> {
        record(&self.log, MockCommand::EnableAttribute {
            vao: self.id,
            buffer: buffer.native_id(),
            attribute: *attribute,
        });
        Ok(())
    }

    fn attach_index_buffer(&self, buffer: &dyn Buffer) -> Result<()> {
        record(&self.log, MockCommand::AttachIndexBuffer { vao: self.id, buffer: buffer.native_id() });
        Ok(())
    }

    fn native_id(&self) -> u32 {
        self.id
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

pub struct MockTexture {
    pub id: u32,
    spec: TextureSpecification,
    log: CommandLog,
}

impl Texture for MockTexture {
    fn specification(&self) -> &TextureSpecification {
        &self.spec
    }

    fn bind(&self) {
        record(&self.log, MockCommand::BindTexture { id: self.id, slot: None });
    }

    fn bind_to_unit(&self, slot: u32) {
        record(&self.log, MockCommand::BindTexture { id: self.id, slot: Some(slot) });
    }

    fn unbind(&self) {
        record(&self.log, MockCommand::UnbindTexture(self.id));
    }

    fn upload(&self, data: &[u8]) -> Result<()> {
        if data.len() != self.spec.byte_size() {
            crate::engine_bail_warn!(
                "orbit3d::mock::Texture",
                "Texture {} expects {} bytes, got {}",
                self.id, self.spec.byte_size(), data.len()
            );
        }
        record(&self.log, MockCommand::UploadTexture { id: self.id, len: data.len() });
        Ok(())
    }

    fn native_id(&self) -> u32 {
        self.id
    }
}

// ============================================================================
// Mock Shader
// ============================================================================

/// A uniform "exists" when its name appears in one of the stage sources.
/// Sources containing `COMPILE_ERROR` produce an invalid shader.
pub struct MockShader {
    pub id: u32,
    name: String,
    sources: ShaderSources,
    valid: bool,
    pub uniforms: UniformCache<u32>,
    log: CommandLog,
}

impl MockShader {
    pub fn sources(&self) -> &ShaderSources {
        &self.sources
    }
}

impl Shader for MockShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn bind(&self) {
        record(&self.log, MockCommand::BindShader(self.id));
    }

    fn unbind(&self) {
        record(&self.log, MockCommand::UnbindShader);
    }

    fn has_uniform(&self, name: &str) -> bool {
        let sources = &self.sources;
        let next = self.uniforms.len() as u32;
        self.uniforms
            .location(name, |name| {
                sources.stages().any(|(_, source)| source.contains(name)).then_some(next)
            })
            .is_some()
    }

    fn set_uniform(&self, name: &str, value: UniformValue) -> Result<()> {
        if !self.has_uniform(name) {
            crate::engine_bail_warn!(
                "orbit3d::mock::Shader",
                UniformNotFound => "{}",
                name
            );
        }
        record(&self.log, MockCommand::SetUniform { shader: self.id, name: name.to_string(), value });
        Ok(())
    }
}

// ============================================================================
// Mock Framebuffer
// ============================================================================

pub struct MockFramebuffer {
    pub id: u32,
    spec: FramebufferSpecification,
    max_size: u32,
    pub red_integer: RefCell<i32>,
    log: CommandLog,
}

impl Framebuffer for MockFramebuffer {
    fn specification(&self) -> &FramebufferSpecification {
        &self.spec
    }

    fn bind(&self) {
        record(&self.log, MockCommand::BindFramebuffer(self.id));
        record(&self.log, MockCommand::SetViewport {
            x: 0,
            y: 0,
            width: self.spec.width,
            height: self.spec.height,
        });
    }

    fn unbind(&self) {
        record(&self.log, MockCommand::UnbindFramebuffer);
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        validate_framebuffer_size(width, height, self.max_size)?;
        self.spec.width = width;
        self.spec.height = height;
        record(&self.log, MockCommand::ResizeFramebuffer { id: self.id, width, height });
        Ok(())
    }

    fn read_pixel(&self, _attachment_index: u32, _x: i32, _y: i32) -> Result<i32> {
        Ok(*self.red_integer.borrow())
    }

    fn clear_attachment(&self, _attachment_index: u32, value: i32) -> Result<()> {
        *self.red_integer.borrow_mut() = value;
        Ok(())
    }

    fn color_attachment_id(&self, index: u32) -> Option<u32> {
        let count = self.spec.color_attachments().count() as u32;
        (index < count).then_some(self.id * 100 + index)
    }

    fn depth_attachment_id(&self) -> Option<u32> {
        self.spec.depth_attachment().map(|_| self.id * 100 + 99)
    }

    fn blit_to(&self, target: Option<&dyn Framebuffer>, mask: BlitMask) {
        record(&self.log, MockCommand::Blit {
            source: self.id,
            target: target.map(|fb| fb.native_id()),
            mask,
        });
    }

    fn native_id(&self) -> u32 {
        self.id
    }
}

// ============================================================================
// Mock Graphics Device
// ============================================================================

pub struct MockGraphicsDevice {
    limits: DeviceLimits,
    next_id: Cell<u32>,
    log: CommandLog,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::with_limits(DeviceLimits::default())
    }

    pub fn with_limits(limits: DeviceLimits) -> Self {
        Self {
            limits,
            next_id: Cell::new(1),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Snapshot of every recorded command
    pub fn commands(&self) -> Vec<MockCommand> {
        self.log.borrow().clone()
    }

    pub fn clear_commands(&self) {
        self.log.borrow_mut().clear();
    }

    /// Uniform uploads as `(name, value)` pairs, in order
    pub fn uniforms(&self) -> Vec<(String, UniformValue)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|command| match command {
                MockCommand::SetUniform { name, value, .. } => Some((name.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }

    /// Last value uploaded to `name`
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms()
            .into_iter()
            .rev()
            .find(|(uniform, _)| uniform == name)
            .map(|(_, value)| value)
    }

    /// Number of draw calls recorded
    pub fn draw_count(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|command| {
                matches!(command, MockCommand::DrawIndexed { .. } | MockCommand::DrawArrays { .. })
            })
            .count()
    }

    fn allocate_id(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn limits(&self) -> DeviceLimits {
        self.limits
    }

    fn create_buffer(&self, desc: BufferDesc<'_>) -> Result<Box<dyn Buffer>> {
        let id = self.allocate_id();
        let mut contents = vec![0u8; desc.size as usize];
        if let Some(data) = desc.data {
            check_buffer_range(desc.size, 0, data.len())?;
            contents[..data.len()].copy_from_slice(data);
        }
        record(&self.log, MockCommand::CreateBuffer { id, usage: desc.usage, size: desc.size });
        Ok(Box::new(MockBuffer {
            id,
            usage: desc.usage,
            size: desc.size,
            contents: RefCell::new(contents),
            log: self.log.clone(),
        }))
    }

    fn create_vertex_array(&self) -> Result<Box<dyn VertexArrayBinding>> {
        let id = self.allocate_id();
        record(&self.log, MockCommand::CreateVertexArray(id));
        Ok(Box::new(MockVertexArray { id, log: self.log.clone() }))
    }

    fn create_texture(&self, spec: TextureSpecification, data: Option<&[u8]>) -> Result<Rc<dyn Texture>> {
        let id = self.allocate_id();
        record(&self.log, MockCommand::CreateTexture { id, spec, with_data: data.is_some() });
        let texture = MockTexture { id, spec, log: self.log.clone() };
        if let Some(data) = data {
            texture.upload(data)?;
        }
        Ok(Rc::new(texture))
    }

    fn create_shader(&self, desc: ShaderDesc) -> Result<Rc<dyn Shader>> {
        let id = self.allocate_id();
        let valid = !desc.sources.stages().any(|(_, source)| source.contains("COMPILE_ERROR"));
        if !valid {
            crate::engine_error!("orbit3d::mock::Shader", "Shader '{}' failed to compile", desc.name);
        }
        record(&self.log, MockCommand::CreateShader { id, name: desc.name.clone(), valid });
        Ok(Rc::new(MockShader {
            id,
            name: desc.name,
            sources: desc.sources,
            valid,
            uniforms: UniformCache::new(),
            log: self.log.clone(),
        }))
    }

    fn create_framebuffer(&self, spec: FramebufferSpecification) -> Result<Box<dyn Framebuffer>> {
        validate_framebuffer_size(spec.width, spec.height, self.limits.max_framebuffer_size)?;
        let id = self.allocate_id();
        record(&self.log, MockCommand::CreateFramebuffer { id, width: spec.width, height: spec.height });
        Ok(Box::new(MockFramebuffer {
            id,
            spec,
            max_size: self.limits.max_framebuffer_size,
            red_integer: RefCell::new(0),
            log: self.log.clone(),
        }))
    }

    fn set_viewport(&self, x: i32, y: i32, width: u32, height: u32) {
        record(&self.log, MockCommand::SetViewport { x, y, width, height });
    }

    fn set_clear_color(&self, color: Vec4) {
        record(&self.log, MockCommand::SetClearColor(color));
    }

    fn clear(&self, flags: ClearFlags) {
        record(&self.log, MockCommand::Clear(flags));
    }

    fn set_depth_test(&self, enabled: bool) {
        record(&self.log, MockCommand::SetDepthTest(enabled));
    }

    fn set_face_culling(&self, enabled: bool) {
        record(&self.log, MockCommand::SetFaceCulling(enabled));
    }

    fn draw_indexed(&self, primitive: PrimitiveType, index_count: u32) {
        record(&self.log, MockCommand::DrawIndexed { primitive, count: index_count });
    }

    fn draw_arrays(&self, primitive: PrimitiveType, first_vertex: u32, vertex_count: u32) {
        record(&self.log, MockCommand::DrawArrays { primitive, first: first_vertex, count: vertex_count });
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
