use wgpu::util::DeviceExt;

// Two triangles covering clip space, three floats per vertex.
const QUAD_VERTICES: [[f32; 3]; 6] = [
    [-1.0, 1.0, 0.0],  // top left
    [1.0, 1.0, 0.0],   // top right
    [-1.0, -1.0, 0.0], // bottom left
    [1.0, 1.0, 0.0],   // top right
    [1.0, -1.0, 0.0],  // bottom right
    [-1.0, -1.0, 0.0], // bottom left
];

const QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// Static vertex buffer holding the full-viewport quad.
pub struct QuadBuffer {
    pub buffer: wgpu::Buffer,
}

impl QuadBuffer {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self { buffer }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &QUAD_ATTRIBUTES,
        }
    }

    pub fn vertex_count() -> u32 {
        QUAD_VERTICES.len() as u32
    }
}
