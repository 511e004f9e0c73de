/// Affine time remapping.
pub mod time;
