// Constants for the engines and generators

use std::ops::RangeInclusive;

/// Multiplier of the multiplication hash, (sqrt(5) - 1) / 2
pub const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_894_9;

/// Values placed in a generated sorting array
pub const SORT_VALUE_RANGE: RangeInclusive<i64> = 10..=309;

/// Supported sorting array lengths
pub const ARRAY_SIZE_RANGE: RangeInclusive<usize> = 5..=100;
pub const DEFAULT_ARRAY_SIZE: usize = 30;

/// Search arrays have a fixed length so every cell stays readable
pub const SEARCH_ARRAY_SIZE: usize = 15;
pub const SEARCH_VALUE_RANGE: RangeInclusive<i64> = 1..=100;
/// Binary search arrays are `(i + 1) * STRIDE + jitter` with jitter below `JITTER`
pub const SEARCH_SORTED_STRIDE: i64 = 5;
pub const SEARCH_SORTED_JITTER: i64 = 3;

pub const TREE_NODE_COUNT: RangeInclusive<usize> = 7..=12;
pub const TREE_VALUE_RANGE: RangeInclusive<i64> = 1..=100;

pub const HEAP_NODE_COUNT: RangeInclusive<usize> = 6..=10;
pub const HEAP_VALUE_RANGE: RangeInclusive<i64> = 1..=50;

pub const LINEAR_FILL_COUNT: RangeInclusive<usize> = 4..=8;
pub const LINEAR_NUMBER_RANGE: RangeInclusive<u32> = 1..=100;

pub const TABLE_SIZE_RANGE: RangeInclusive<usize> = 1..=64;
pub const DEFAULT_TABLE_SIZE: usize = 7;

/// Default delays between steps, in milliseconds
pub const DEFAULT_SORT_DELAY_MS: u64 = 50;
pub const DEFAULT_SEARCH_DELAY_MS: u64 = 800;
pub const DEFAULT_TRAVERSAL_DELAY_MS: u64 = 800;
pub const DEFAULT_HEAP_DELAY_MS: u64 = 500;
pub const DEFAULT_OPERATION_DELAY_MS: u64 = 500;

pub const DEFAULT_HISTORY_LINES: usize = 256;
