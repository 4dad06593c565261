use aja_core::entities::{AmountRange, DateRange, FilterValues};

use crate::cli::root_commands::FilterArgs;

/// Filter values selected on the command line.
pub fn filter_values(args: &FilterArgs) -> FilterValues {
    let mut values = FilterValues::default();
    for (dimension, value) in &args.filter {
        values.toggle(*dimension, value);
    }
    if let (Some(start), Some(end)) = (&args.from, &args.to) {
        values.date_range = Some(DateRange {
            start: start.clone(),
            end: end.clone(),
        });
    }
    if let (Some(min), Some(max)) = (args.min_amount, args.max_amount) {
        values.amount_range = Some(AmountRange { min, max });
    }
    values
}

#[cfg(test)]
mod tests {
    use aja_core::entities::FilterDimension;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn repeated_values_accumulate() {
        let args = FilterArgs {
            filter: vec![
                (FilterDimension::Department, "Finance".into()),
                (FilterDimension::Department, "Sales".into()),
            ],
            min_amount: Some(100.0),
            max_amount: Some(5000.0),
            ..FilterArgs::default()
        };
        let values = filter_values(&args);
        assert_eq!(values.department, vec!["Finance", "Sales"]);
        assert_eq!(values.amount_range, Some(AmountRange { min: 100.0, max: 5000.0 }));
        assert!(values.date_range.is_none());
        assert!(values.has_active());
    }

    #[test]
    fn no_flags_means_no_filters() {
        assert!(!filter_values(&FilterArgs::default()).has_active());
    }
}
