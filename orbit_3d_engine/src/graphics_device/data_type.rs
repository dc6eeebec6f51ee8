/// Shader data types and primitive topologies

/// Shader-side data type of a vertex attribute or uniform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Float,
    Float2,
    Float3,
    Float4,
    Mat3,
    Mat4,
    Int,
    Int2,
    Int3,
    Int4,
    UInt,
    Bool,
}

impl DataType {
    /// Every data type, in raw-value order
    pub const ALL: [DataType; 12] = [
        DataType::Float,
        DataType::Float2,
        DataType::Float3,
        DataType::Float4,
        DataType::Mat3,
        DataType::Mat4,
        DataType::Int,
        DataType::Int2,
        DataType::Int3,
        DataType::Int4,
        DataType::UInt,
        DataType::Bool,
    ];

    /// Size in bytes
    pub fn size(&self) -> u32 {
        match self {
            DataType::Float => 4,
            DataType::Float2 => 4 * 2,
            DataType::Float3 => 4 * 3,
            DataType::Float4 => 4 * 4,
            DataType::Mat3 => 4 * 3 * 3,
            DataType::Mat4 => 4 * 4 * 4,
            DataType::Int => 4,
            DataType::Int2 => 4 * 2,
            DataType::Int3 => 4 * 3,
            DataType::Int4 => 4 * 4,
            DataType::UInt => 4,
            DataType::Bool => 1,
        }
    }

    /// Number of components per attribute slot
    ///
    /// Matrices report the size of one column.
    pub fn component_count(&self) -> u32 {
        match self {
            DataType::Float | DataType::Int | DataType::UInt | DataType::Bool => 1,
            DataType::Float2 | DataType::Int2 => 2,
            DataType::Float3 | DataType::Int3 | DataType::Mat3 => 3,
            DataType::Float4 | DataType::Int4 | DataType::Mat4 => 4,
        }
    }

    /// Number of vertex attribute slots consumed (one per matrix column)
    pub fn attribute_slots(&self) -> u32 {
        match self {
            DataType::Mat3 => 3,
            DataType::Mat4 => 4,
            _ => 1,
        }
    }

    /// Integer attributes are fed through the integer attribute path
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::Int | DataType::Int2 | DataType::Int3 | DataType::Int4
                | DataType::UInt | DataType::Bool
        )
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self, DataType::Mat3 | DataType::Mat4)
    }

    /// Convert a raw value read from external data
    ///
    /// Unknown values are a programming error and abort.
    pub fn from_raw(value: u32) -> DataType {
        match Self::ALL.get(value as usize) {
            Some(data_type) => *data_type,
            None => crate::engine_fatal!("orbit3d::DataType", "Unknown data type value {}", value),
        }
    }
}

/// Primitive topology of a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveType {
    #[default]
    Triangles,
    TriangleStrip,
    Lines,
    LineStrip,
    Points,
}

#[cfg(test)]
#[path = "data_type_tests.rs"]
mod tests;
