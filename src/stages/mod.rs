pub mod stage1_rewrite;
pub mod stage2_realign;
pub mod stage3_render;

pub use stage1_rewrite::*;
pub use stage2_realign::*;
pub use stage3_render::*;
