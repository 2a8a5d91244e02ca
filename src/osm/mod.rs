pub mod conversion;
#[cfg(test)]
pub mod fixtures;
pub mod primitives;
