//! Processors of column options.

use super::{BooleanProcessor, ProcessingContext, ValueProcessor, non_blank};
use crate::error::ProcessingResult;
use crate::option::standard;
use crate::option::vocabulary::{FilterType, SortDirection};
use crate::value::OptionValue;

/// Makes a column filterable: requests the filtering extension and defaults
/// the filter type to `input` unless one is given for the same column.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterableProcessor;

impl ValueProcessor for FilterableProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let value = BooleanProcessor::parse(raw, ctx)?;
        if value == Some(true) {
            ctx.register_extension("filtering");
            ctx.stage_if_absent(standard::COLUMN_FILTER_TYPE.name(), FilterType::Input)?;
        }
        Ok(value.map(OptionValue::Bool))
    }
}

/// Comma separated list of `asc` / `desc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortDirectionProcessor;

impl ValueProcessor for SortDirectionProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let mut directions = Vec::new();
        for part in raw.split(',').filter_map(non_blank) {
            let direction = SortDirection::parse(part).ok_or_else(|| {
                ctx.error(
                    raw,
                    format!(
                        "'{part}' is not a sort direction, possible values are: {}",
                        SortDirection::possible_values()
                    ),
                )
            })?;
            directions.push(direction);
        }
        Ok((!directions.is_empty()).then_some(OptionValue::SortDirections(directions)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    #[test]
    fn test_filterable_defaults_filter_type() {
        let mut h = Harness::standard();
        assert_eq!(h.run("filterable", "true").unwrap(), Some(OptionValue::Bool(true)));
        assert_eq!(
            h.staged("filtertype"),
            Some(&OptionValue::FilterType(FilterType::Input))
        );
        assert_eq!(h.extensions, vec!["filtering".to_string()]);
    }

    #[test]
    fn test_filterable_keeps_explicit_filter_type() {
        let mut h = Harness::standard();
        h.raw_names.insert("filtertype".to_string());
        h.run("filterable", "true").unwrap();
        assert!(h.staged("filtertype").is_none());
    }

    #[test]
    fn test_filterable_false() {
        let mut h = Harness::standard();
        assert_eq!(h.run("filterable", "false").unwrap(), Some(OptionValue::Bool(false)));
        assert!(h.extensions.is_empty());
    }

    #[test]
    fn test_sort_direction() {
        let mut h = Harness::standard();
        assert_eq!(
            h.run("sortdirection", "desc, ASC").unwrap(),
            Some(OptionValue::SortDirections(vec![
                SortDirection::Desc,
                SortDirection::Asc
            ]))
        );
        assert!(h.run("sortdirection", "asc,up").is_err());
    }
}
