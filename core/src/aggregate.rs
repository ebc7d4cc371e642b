//! Category aggregation for the bar chart
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::ClassifiedRecord;

/// Count of records sharing one sentiment label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub key: String,
    pub value: u32,
}

/// Group labelled records by sentiment and count each group.
///
/// Records without a label are skipped. The result is sorted by descending
/// count; equal counts keep the order in which their label was first seen.
pub fn aggregate(records: &[ClassifiedRecord]) -> Vec<CategorySummary> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for label in records.iter().filter_map(|r| r.sentiment_label.as_deref()) {
        match slots.get(label) {
            Some(&slot) => summaries[slot].value += 1,
            None => {
                slots.insert(label, summaries.len());
                summaries.push(CategorySummary {
                    key: label.to_owned(),
                    value: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among ties.
    summaries.sort_by(|a, b| b.value.cmp(&a.value));
    summaries
}

/// Largest category count, `0` for an empty summary list
pub fn max_count(summaries: &[CategorySummary]) -> u32 {
    summaries.iter().map(|s| s.value).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::layout::GridLayout;
    use crate::record::{classify, FlagField, RawRecord};

    fn classified(labels: &[&str]) -> Vec<ClassifiedRecord> {
        let records: Vec<RawRecord> = labels.iter().map(|l| RawRecord::new("0", "0", l)).collect();
        let layout = GridLayout::from_config(&CanvasConfig::default()).unwrap();
        classify(&records, FlagField::Positive, &layout)
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
        assert_eq!(max_count(&[]), 0);
    }

    #[test]
    fn test_sorted_descending() {
        let summaries = aggregate(&classified(&["joy", "anger", "anger", "calm", "anger", "calm"]));

        let values: Vec<u32> = summaries.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![3, 2, 1]);
        assert_eq!(summaries[0].key, "anger");
        assert_eq!(summaries[1].key, "calm");
        assert_eq!(summaries[2].key, "joy");
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(max_count(&summaries), 3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let summaries = aggregate(&classified(&["joy", "anger"]));

        assert_eq!(
            summaries,
            vec![
                CategorySummary { key: "joy".into(), value: 1 },
                CategorySummary { key: "anger".into(), value: 1 },
            ]
        );
    }

    #[test]
    fn test_unlabelled_records_skipped() {
        let summaries = aggregate(&classified(&["", "joy", ""]));

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0], CategorySummary { key: "joy".into(), value: 1 });
    }
}
