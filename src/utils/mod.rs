// Shared byte, bit and text helpers

pub mod bits;
pub mod encoding;
pub mod io;
