//! AWG gauge parsing for trunk-wire sizing.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("leading integer pattern is valid"));

/// Leading integer of a gauge string: `"18 AWG"` → 18.
///
/// Returns `None` for strings without a leading number (`"AWG 18"`, `""`,
/// `"heavy"`), which callers treat as "no gauge".
pub fn awg_number(gauge: &str) -> Option<u32> {
    LEADING_INT
        .captures(gauge)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// The physically thickest gauge (lowest AWG number) among `gauges`.
///
/// Absent and non-numeric entries are skipped. On a tie the first occurrence
/// wins, so the original spelling of that wire is kept.
pub fn thickest_gauge<'a, I>(gauges: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut best: Option<(u32, &'a str)> = None;
    for gauge in gauges.into_iter().flatten() {
        let Some(n) = awg_number(gauge) else {
            continue;
        };
        if best.is_none_or(|(b, _)| n < b) {
            best = Some((n, gauge));
        }
    }
    best.map(|(_, g)| g)
}
