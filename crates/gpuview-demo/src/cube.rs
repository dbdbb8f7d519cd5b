//! Cube mesh and a procedural texture for the demo scene.

use gpuview_engine::pipeline::Vertex;

/// Corners of each face, counter-clockwise seen from outside the cube,
/// starting bottom-left.
const FACES: [[[f32; 3]; 4]; 6] = [
    // +Z
    [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
    // -Z
    [[1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0]],
    // +X
    [[1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0]],
    // -X
    [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
    // +Y
    [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0]],
    // -Y
    [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
];

const FACE_COLORS: [[f32; 4]; 6] = [
    [1.0, 0.3, 0.3, 1.0],
    [0.3, 1.0, 0.3, 1.0],
    [0.3, 0.3, 1.0, 1.0],
    [1.0, 1.0, 0.3, 1.0],
    [0.3, 1.0, 1.0, 1.0],
    [1.0, 0.3, 1.0, 1.0],
];

// Texture v grows downward.
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

const FACE_INDICES: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// Unindexed triangle list, 36 vertices.
pub fn vertices() -> Vec<Vertex> {
    FACES
        .iter()
        .zip(FACE_COLORS)
        .flat_map(|(corners, color)| {
            FACE_INDICES
                .iter()
                .map(move |&i| Vertex::new(corners[i], color, CORNER_UVS[i]))
        })
        .collect()
}

/// RGBA8 checkerboard, `size` x `size` texels with `cell`-texel squares.
pub fn checkerboard(size: u32, cell: u32) -> Vec<u8> {
    let cell = cell.max(1);
    (0..size)
        .flat_map(|y| (0..size).map(move |x| (x, y)))
        .flat_map(|(x, y)| {
            if (x / cell + y / cell) % 2 == 0 {
                [255, 255, 255, 255]
            } else {
                [90, 90, 90, 255]
            }
        })
        .collect()
}
