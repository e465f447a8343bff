use std::fmt;

/// Binary byte multiples, smallest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteUnit {
    B,
    KiB,
    MiB,
    GiB,
    TiB,
}

impl ByteUnit {
    /// Units `bytes_to_unit` tries before falling through to `TiB`.
    const BOUNDED: [ByteUnit; 4] = [ByteUnit::B, ByteUnit::KiB, ByteUnit::MiB, ByteUnit::GiB];

    pub const fn factor(self) -> u64 {
        match self {
            ByteUnit::B => 1,
            ByteUnit::KiB => 1 << 10,
            ByteUnit::MiB => 1 << 20,
            ByteUnit::GiB => 1 << 30,
            ByteUnit::TiB => 1 << 40,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ByteUnit::B => "B",
            ByteUnit::KiB => "KiB",
            ByteUnit::MiB => "MiB",
            ByteUnit::GiB => "GiB",
            ByteUnit::TiB => "TiB",
        }
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A byte count expressed in a human-scaled unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ByteSize {
    pub magnitude: f64,
    pub unit: ByteUnit,
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {}", self.magnitude, self.unit)
    }
}

/// Picks the smallest unit in which `count` scales to less than 1024, so
/// half a gibibyte reads as `512.0 MiB`. Anything past the GiB range is
/// reported in TiB.
pub fn bytes_to_unit(count: u64) -> ByteSize {
    let unit = ByteUnit::BOUNDED
        .into_iter()
        .find(|unit| count / unit.factor() < 1024)
        .unwrap_or(ByteUnit::TiB);
    ByteSize {
        magnitude: count as f64 / unit.factor() as f64,
        unit,
    }
}
