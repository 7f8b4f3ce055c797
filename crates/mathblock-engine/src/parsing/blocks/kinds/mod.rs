pub mod code_fence;
pub mod math_fence;

pub use code_fence::{CodeFence, FenceKind};
pub use math_fence::MathFence;
