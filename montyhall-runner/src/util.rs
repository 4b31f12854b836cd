pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Render an optional percentage for human-facing output.
pub fn format_pct(pct: Option<f64>) -> String {
    pct.map_or_else(|| "n/a".to_string(), |value| format!("{value:.2}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" 42, ,random,  7 ");
        assert_eq!(parts, vec!["42", "random", "7"]);
    }

    #[test]
    fn format_pct_handles_missing_values() {
        assert_eq!(format_pct(None), "n/a");
        assert_eq!(format_pct(Some(66.6666)), "66.67%");
    }
}
