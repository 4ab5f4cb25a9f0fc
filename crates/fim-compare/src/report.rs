//! Summary and record rendering

use std::fmt::Write as _;

use crate::reconcile::ComparisonReport;

/// Column names of [`RenderedReport::record`], for the first line of a record log.
pub const RECORD_HEADER: &str = "exact,sample,eps,minFreq,largeFIs,inter,fn,fp,nafp,jaccard,\
we,maxabserr,avgabserr,avgrelerr,wcb,wcb2,maxcbsize,avgcbsize";

/// Human-readable summary block and the equivalent single-line record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedReport {
    pub summary: String,
    pub record: String,
}

pub fn format_report(report: &ComparisonReport) -> RenderedReport {
    RenderedReport {
        summary: format_summary(report),
        record: format_record(report),
    }
}

/// Pretty JSON rendering of the full report.
pub fn to_json(report: &ComparisonReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn format_summary(r: &ComparisonReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "large={},sample={},e={},minFreq={},largeFIs={}",
        r.exact_file,
        r.sample_file,
        fmt_float(r.epsilon),
        fmt_float(r.min_freq),
        r.exact_count
    );
    let _ = writeln!(
        out,
        "inter={},fn={},fp={},nafp={},jaccard={}",
        r.intersection,
        r.false_negatives,
        r.false_positives,
        r.non_tolerable_false_positives,
        fmt_float(r.jaccard)
    );
    let _ = writeln!(
        out,
        "we={},maxabserr={},avgabserr={},avgrelerr={}",
        r.wrong_epsilon,
        fmt_float(r.max_abs_error),
        fmt_float(r.avg_abs_error),
        fmt_float(r.avg_rel_error)
    );
    let _ = writeln!(
        out,
        "wcb={},wcb2={},maxcbsize={},avgcbsize={}",
        r.wrong_conf_bounds,
        r.wrong_conf_bounds_width,
        fmt_float(r.max_cb_width),
        fmt_float(r.avg_cb_width)
    );
    out
}

fn format_record(r: &ComparisonReport) -> String {
    let fields = [
        csv_value(&r.exact_file),
        csv_value(&r.sample_file),
        fmt_float(r.epsilon),
        fmt_float(r.min_freq),
        r.exact_count.to_string(),
        r.intersection.to_string(),
        r.false_negatives.to_string(),
        r.false_positives.to_string(),
        r.non_tolerable_false_positives.to_string(),
        fmt_float(r.jaccard),
        r.wrong_epsilon.to_string(),
        fmt_float(r.max_abs_error),
        fmt_float(r.avg_abs_error),
        fmt_float(r.avg_rel_error),
        r.wrong_conf_bounds.to_string(),
        r.wrong_conf_bounds_width.to_string(),
        fmt_float(r.max_cb_width),
        fmt_float(r.avg_cb_width),
    ];
    fields.join(",")
}

/// Shortest round-trip form; integral values keep a `.0` suffix.
fn fmt_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn csv_value(value: &str) -> String {
    let needs_quote = value.contains(',') || value.contains('"') || value.contains('\n');
    if !needs_quote {
        return value.to_owned();
    }
    format!("\"{}\"", value.replace('"', "\"\""))
}
