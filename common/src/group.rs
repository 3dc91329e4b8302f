use std::collections::BTreeMap;

use tracing::debug;

use crate::result::{BenchmarkRecord, Metric};

/// Benchmark name split into its series key and optional size parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedName<'a> {
    pub base: &'a str,
    pub param: Option<u64>,
}

/// Split `"<base>"` or `"<base>/n:<size>"` into its two fields.
///
/// The base is the leading run of non-`/` characters. A suffix only counts as
/// a size when it starts with the literal `n:` followed by digits; anything
/// after the digits is ignored. Names with no base segment yield [`None`].
pub fn parse_name(name: &str) -> Option<ParsedName<'_>> {
    let (base, suffix) = match name.split_once('/') {
        Some((base, suffix)) => (base, Some(suffix)),
        None => (name, None),
    };
    if base.is_empty() {
        return None;
    }
    Some(ParsedName {
        base,
        param: suffix.and_then(parse_size_token),
    })
}

fn parse_size_token(token: &str) -> Option<u64> {
    let digits = token.strip_prefix("n:")?;
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// One line series, keyed by the shared base name
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub base: String,
    pub points: Vec<(Option<u64>, f64)>,
}

impl Series {
    /// X/Y pairs: the size parameter, or the point's position within the
    /// sorted series when no parameter was given
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, &(param, value))| (param.map_or(i as f64, |p| p as f64), value))
            .collect()
    }
}

/// Group records by base name, keeping one `(param, value)` pair per record
/// that carries `metric`. Series come out ordered by base, points ordered
/// with unparameterized entries first and then ascending sizes.
pub fn group_benchmarks(records: &[BenchmarkRecord], metric: Metric) -> Vec<Series> {
    let mut groups: BTreeMap<&str, Vec<(Option<u64>, f64)>> = BTreeMap::new();
    for record in records {
        let Some(value) = record.metric(metric) else {
            debug!("Skipping {}: no {metric} field", record.name);
            continue;
        };
        let Some(parsed) = parse_name(&record.name) else {
            debug!("Skipping {}: unparseable name", record.name);
            continue;
        };
        groups
            .entry(parsed.base)
            .or_default()
            .push((parsed.param, value));
    }
    groups
        .into_iter()
        .map(|(base, mut points)| {
            points.sort_by_key(|&(param, _)| param);
            Series {
                base: base.to_owned(),
                points,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, real_time: Option<f64>, cpu_time: Option<f64>) -> BenchmarkRecord {
        BenchmarkRecord {
            name: name.to_owned(),
            real_time,
            cpu_time,
            ..Default::default()
        }
    }

    #[test]
    fn name_with_size_parameter() {
        let parsed = parse_name("Foo/n:16").unwrap();
        assert_eq!(parsed.base, "Foo");
        assert_eq!(parsed.param, Some(16));
    }

    #[test]
    fn name_without_parameter() {
        let parsed = parse_name("Foo").unwrap();
        assert_eq!(parsed.base, "Foo");
        assert_eq!(parsed.param, None);
    }

    #[test]
    fn name_with_unrecognized_suffix() {
        let parsed = parse_name("Foo/threads:4").unwrap();
        assert_eq!(parsed.base, "Foo");
        assert_eq!(parsed.param, None);
    }

    #[test]
    fn size_digits_ignore_trailing_tokens() {
        assert_eq!(parse_name("Foo/n:12abc").unwrap().param, Some(12));
        assert_eq!(parse_name("Foo/n:12/threads:4").unwrap().param, Some(12));
        assert_eq!(parse_name("Foo/n:").unwrap().param, None);
    }

    #[test]
    fn name_without_base_is_rejected() {
        assert_eq!(parse_name(""), None);
        assert_eq!(parse_name("/n:4"), None);
    }

    #[test]
    fn groups_one_series_with_ascending_sizes() {
        let records = vec![
            record("Sum/n:8", Some(100.0), None),
            record("Sum/n:16", Some(210.0), None),
            record("Sum/n:32", Some(430.0), None),
        ];
        let series = group_benchmarks(&records, Metric::RealTime);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].base, "Sum");
        assert_eq!(
            series[0].points,
            vec![(Some(8), 100.0), (Some(16), 210.0), (Some(32), 430.0)]
        );
        assert_eq!(
            series[0].coordinates(),
            vec![(8.0, 100.0), (16.0, 210.0), (32.0, 430.0)]
        );
    }

    #[test]
    fn unparameterized_points_sort_first() {
        let records = vec![
            record("Base/n:4", Some(4.0), None),
            record("Base", Some(1.0), None),
            record("Base/n:2", Some(2.0), None),
        ];
        let series = group_benchmarks(&records, Metric::RealTime);
        assert_eq!(
            series[0].points,
            vec![(None, 1.0), (Some(2), 2.0), (Some(4), 4.0)]
        );
        // position stands in for the missing size
        assert_eq!(series[0].coordinates()[0], (0.0, 1.0));
    }

    #[test]
    fn records_missing_the_metric_are_skipped() {
        let records = vec![
            record("A/n:1", Some(10.0), None),
            record("A/n:2", None, Some(20.0)),
        ];
        let series = group_benchmarks(&records, Metric::CpuTime);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points, vec![(Some(2), 20.0)]);
    }

    #[test]
    fn grouping_is_idempotent() {
        let records = vec![
            record("B/n:16", Some(5.0), None),
            record("A", Some(1.0), None),
            record("B/n:8", Some(3.0), None),
        ];
        let first = group_benchmarks(&records, Metric::RealTime);
        let second = group_benchmarks(&records, Metric::RealTime);
        assert_eq!(first, second);
        assert_eq!(first[0].base, "A");
        assert_eq!(first[1].base, "B");
    }
}
