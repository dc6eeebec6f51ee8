/// Vertex array object contract

use crate::error::Result;
use crate::graphics_device::{Buffer, DataType};

/// One vertex attribute pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDesc {
    /// Attribute location
    pub index: u32,
    /// Components in this slot (1..=4)
    pub components: u32,
    /// Element data type (matrices are fed one column per slot)
    pub data_type: DataType,
    /// Normalize fixed-point values
    pub normalized: bool,
    /// Byte stride between consecutive vertices
    pub stride: u32,
    /// Byte offset of the attribute inside a vertex
    pub offset: u32,
    /// Instancing divisor (0 = per vertex)
    pub divisor: u32,
}

/// Backend vertex array object
///
/// Records attribute pointers and the element buffer binding. Destroyed when
/// dropped.
pub trait VertexArrayBinding {
    fn bind(&self);

    fn unbind(&self);

    /// Enable an attribute sourced from `buffer`
    fn enable_attribute(&self, buffer: &dyn Buffer, attribute: &AttributeDesc) -> Result<()>;

    /// Bind `buffer` as this vertex array's element buffer
    fn attach_index_buffer(&self, buffer: &dyn Buffer) -> Result<()>;

    fn native_id(&self) -> u32;
}
