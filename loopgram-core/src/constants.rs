/// Number of boundary-flanking regions extracted per R-loop
/// (before-start, after-start, before-end, after-end).
pub const REGION_COUNT: usize = 4;

/// Default sliding-window width in nucleotides.
pub const DEFAULT_WINDOW_WIDTH: usize = 4;

/// Default padding added to each boundary flank, in nucleotides.
pub const DEFAULT_PADDING: usize = 13;

/// Column headings of the region weight tables, in output order.
pub const TABLE_HEADING: [&str; 8] = [
    "Sequence",
    "Region Count",
    "#A",
    "#T",
    "#C",
    "#G",
    "Gene Count",
    "Weight",
];

/// Nucleotide alphabet in the column order used by the weight tables.
pub const NUCLEOTIDES: [u8; 4] = [b'A', b'T', b'C', b'G'];
