pub mod position;
pub mod vector3;

/// Edge length of a cubic grid section.
pub const SECTION_SIZE: i32 = 16;

