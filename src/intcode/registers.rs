// intcode/registers.rs
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cpu {
    pub ip: usize,
    /// offset added to relative-mode parameters
    pub relative_base: i64,
}

impl Cpu {
    #[inline] pub fn advance(&mut self, width: usize) { self.ip += width; }
    #[inline] pub fn adjust_base(&mut self, delta: i64) { self.relative_base = self.relative_base.wrapping_add(delta); }
}
