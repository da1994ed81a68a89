/// Strip invisible export artefacts and collapse runs of whitespace.
pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a `;`-separated cell into trimmed, non-empty entries.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(normalize_label)
        .filter(|entry| !entry.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_label_keeps_case_but_drops_noise() {
        let source = "\u{feff}Tech   Leaders\u{200b} Scholarship ";
        assert_eq!(normalize_label(source), "Tech Leaders Scholarship");
    }

    #[test]
    fn split_list_skips_blank_entries() {
        assert_eq!(
            split_list(" Computer Science ;; Engineering;  "),
            vec!["Computer Science".to_string(), "Engineering".to_string()]
        );
        assert!(split_list("").is_empty());
    }
}
