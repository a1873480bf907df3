//! Decoding of `zfs(8)`/`zpool(8)` output.
//!
//! Scripted mode (`-H`) stdout is tab-delimited and handled by [`parse_tabular`]. Stderr is
//! free-form and classified with a PEG grammar, see [`StderrParser`].

pub mod stderr;
pub use stderr::{Rule, StderrParser};

/// A single line of scripted output split on TAB.
pub type Record = Vec<String>;

/// Split tab-delimited output into records, one per line.
///
/// For example if `zpool get -H size,capacity,altroot` printed:
///
/// ```text
/// zfs-local-test	size	336M	-
/// zfs-local-test	capacity	9%	-
/// zfs-local-test	altroot	-	default
/// ```
///
/// the result is three four-field records followed by one record holding a single empty field,
/// because output ends with a new line. Nothing is validated here: short and long lines are passed
/// through untouched and consumers filter what they can't use. Lines that aren't valid UTF-8 are
/// dropped: a lossy name would point at a different dataset.
pub fn parse_tabular(data: &[u8]) -> Vec<Record> {
    data.split(|byte| *byte == b'\n')
        .filter_map(|line| std::str::from_utf8(line).ok())
        .map(|line| line.split('\t').map(String::from).collect())
        .collect()
}

/// First field of every record that has a non-empty first field. Used for `-o name` listings.
pub fn first_fields(records: Vec<Record>) -> Vec<String> {
    records
        .into_iter()
        .filter_map(|record| record.into_iter().next())
        .filter(|name| !name.is_empty())
        .collect()
}
