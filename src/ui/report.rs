use crate::data::stats::{ColumnStatistics, Description, HostRank, Summary};

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Two decimals, or `n/a` for an undefined value.
pub fn fmt_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

// ---------------------------------------------------------------------------
// stats
// ---------------------------------------------------------------------------

pub fn summary_lines(summary: &Summary) -> Vec<String> {
    vec![
        format!("Count: {}", summary.count),
        format!(
            "Average Price Per Room: {}",
            fmt_number(summary.avg_price_per_room)
        ),
    ]
}

// ---------------------------------------------------------------------------
// hostRank
// ---------------------------------------------------------------------------

/// Header, the first and last `preview` hosts separated by `...`, and a
/// pointer to the export. Short rankings are printed whole.
pub fn host_rank_lines(ranking: &[HostRank], preview: usize) -> Vec<String> {
    let fmt = |r: &HostRank| format!("{}, {}", r.host_id, r.host_listings_count);
    let mut lines = vec!["host_id, host_listings_count".to_string()];

    if ranking.len() <= preview * 2 {
        lines.extend(ranking.iter().map(fmt));
    } else {
        lines.extend(ranking[..preview].iter().map(fmt));
        lines.push("...".to_string());
        lines.extend(ranking[ranking.len() - preview..].iter().map(fmt));
    }
    lines.push(String::new());
    lines.push("(export to see all)".to_string());
    lines
}

// ---------------------------------------------------------------------------
// describe
// ---------------------------------------------------------------------------

pub fn column_line(name: &str, stats: &ColumnStatistics) -> String {
    let mut line = format!(
        "{name}: count: {}, distinct: {}, missing: {}",
        stats.count, stats.distinct, stats.missing
    );
    if let Some(n) = stats.numeric {
        let cells = [
            ("mean", n.mean),
            ("std", n.std),
            ("min", n.min),
            ("25%", n.p25),
            ("50%", n.p50),
            ("75%", n.p75),
            ("max", n.max),
        ];
        for (label, value) in cells {
            line.push_str(&format!(", {label}: {value:.2}"));
        }
    }
    line
}

pub fn description_lines(description: &Description) -> Vec<String> {
    if description.is_empty() {
        return vec!["No columns to describe.".to_string()];
    }
    description
        .iter()
        .map(|(name, stats)| column_line(name, stats))
        .collect()
}
