/// Vertex buffer layout: named, typed elements with computed offsets

use crate::graphics_device::DataType;

/// One vertex attribute inside a layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferElement {
    pub name: String,
    pub data_type: DataType,
    /// Size in bytes (derived from `data_type`)
    pub size: u32,
    /// Byte offset inside a vertex (computed by the layout)
    pub offset: u32,
    pub normalized: bool,
}

impl BufferElement {
    pub fn new(data_type: DataType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type,
            size: data_type.size(),
            offset: 0,
            normalized: false,
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalized = true;
        self
    }

    pub fn component_count(&self) -> u32 {
        self.data_type.component_count()
    }
}

/// Ordered list of elements describing one interleaved vertex
///
/// Offsets and stride are recomputed whenever the element list changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferLayout {
    elements: Vec<BufferElement>,
    stride: u32,
}

impl BufferLayout {
    /// Build a layout from elements in declaration order
    ///
    /// # Example
    ///
    /// ```
    /// use orbit_3d_engine::orbit3d::resource::{BufferElement, BufferLayout};
    /// use orbit_3d_engine::orbit3d::device::DataType;
    ///
    /// let layout = BufferLayout::new(vec![
    ///     BufferElement::new(DataType::Float3, "a_Position"),
    ///     BufferElement::new(DataType::Float2, "a_TexCoord"),
    /// ]);
    /// assert_eq!(layout.stride(), 20);
    /// ```
    pub fn new(elements: Vec<BufferElement>) -> Self {
        let mut layout = Self { elements, stride: 0 };
        layout.calculate_offsets_and_stride();
        layout
    }

    pub fn push(&mut self, element: BufferElement) {
        self.elements.push(element);
        self.calculate_offsets_and_stride();
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn elements(&self) -> &[BufferElement] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BufferElement> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total vertex attribute slots (matrices take one per column)
    pub fn attribute_slots(&self) -> u32 {
        self.elements.iter().map(|element| element.data_type.attribute_slots()).sum()
    }

    fn calculate_offsets_and_stride(&mut self) {
        let mut offset = 0;
        for element in &mut self.elements {
            element.offset = offset;
            offset += element.size;
        }
        self.stride = offset;
    }
}

impl<'a> IntoIterator for &'a BufferLayout {
    type Item = &'a BufferElement;
    type IntoIter = std::slice::Iter<'a, BufferElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
#[path = "buffer_layout_tests.rs"]
mod tests;
