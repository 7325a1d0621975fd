//! Recording painter double shared by the bridge test suites.

use crate::TexturePainter;

#[derive(Debug, Default)]
pub struct RecordingPainter {
    next_handle: u32,
    /// (texture, max_uv) per draw call, in order.
    pub draws: Vec<(u32, (f32, f32))>,
    /// (handle, width, height) per allocation, in order.
    pub allocations: Vec<(u32, u32, u32)>,
    pub deletions: Vec<u32>,
    pub released: bool,
}

impl TexturePainter for RecordingPainter {
    fn draw(&mut self, texture: u32, max_uv: (f32, f32)) {
        self.draws.push((texture, max_uv));
    }

    fn allocate(&mut self, width: u32, height: u32) -> u32 {
        self.next_handle += 1;
        self.allocations.push((self.next_handle, width, height));
        self.next_handle
    }

    fn delete(&mut self, texture: u32) {
        self.deletions.push(texture);
    }

    fn release(&mut self) {
        self.released = true;
    }
}
