use tracing::trace;

/// Program memory. Addresses past the end read as zero; writing past the end
/// grows the backing storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    pub fn new(program: Vec<i64>) -> Self {
        Self { cells: program }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn read(&self, addr: usize) -> i64 {
        self.cells.get(addr).copied().unwrap_or(0)
    }

    pub fn write(&mut self, addr: usize, value: i64) {
        if addr >= self.cells.len() {
            self.grow(addr);
        }
        self.cells[addr] = value;
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    // new length is 2 * addr, or addr + 1 for address 0
    fn grow(&mut self, addr: usize) {
        let target = addr.saturating_mul(2).max(addr + 1);
        trace!(from = self.cells.len(), to = target, "memory grown");
        self.cells.resize(target, 0);
    }
}

impl From<Vec<i64>> for Memory {
    fn from(program: Vec<i64>) -> Self {
        Self::new(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_past_end_are_zero() {
        let mem = Memory::new(vec![1, 2, 3]);
        assert_eq!(mem.read(2), 3);
        assert_eq!(mem.read(3), 0);
        assert_eq!(mem.read(10_000), 0);
        assert_eq!(mem.len(), 3);
    }

    #[test]
    fn growth_preserves_contents() {
        let mut mem = Memory::new(vec![7, -8, 9]);
        mem.write(40, 5);
        assert_eq!(mem.len(), 80);
        assert_eq!(mem.as_slice()[..3], [7, -8, 9]);
        assert_eq!(mem.read(1), -8);
        assert_eq!(mem.read(39), 0);
        assert_eq!(mem.read(40), 5);
    }

    #[test]
    fn empty_memory_grows_on_first_write() {
        let mut mem = Memory::default();
        assert!(mem.is_empty());
        mem.write(0, 42);
        assert_eq!(mem.len(), 1);
        assert_eq!(mem.read(0), 42);
    }
}
