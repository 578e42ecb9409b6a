//! Processors of table-level feature, css and plugin options.

use tracing::info;

use super::{ProcessingContext, ValueProcessor, non_blank};
use crate::error::ProcessingResult;
use crate::option::standard;
use crate::option::vocabulary::{PaginationType, Theme};
use crate::value::OptionValue;

/// `a,b` becomes the JavaScript array literal `['a','b']`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripeClassesProcessor;

impl ValueProcessor for StripeClassesProcessor {
    fn process(
        &self,
        raw: &str,
        _ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let Some(value) = non_blank(raw) else {
            return Ok(None);
        };
        let classes: Vec<String> = value
            .split(',')
            .map(|class| format!("'{}'", class.trim()))
            .collect();
        Ok(Some(OptionValue::Text(format!("[{}]", classes.join(",")))))
    }
}

/// `10,25;ten,twenty-five` becomes `[[10,25],[ten,twenty-five]]`, anything
/// without a `;` becomes `[value]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthMenuProcessor;

impl ValueProcessor for LengthMenuProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let Some(value) = non_blank(raw) else {
            return Ok(None);
        };
        let menu = match value.split_once(';') {
            Some((lengths, labels)) => {
                if lengths.split(',').count() != labels.split(',').count() {
                    return Err(ctx.error(
                        raw,
                        "both sides of ';' must have the same number of elements",
                    ));
                }
                format!("[[{lengths}],[{labels}]]")
            }
            None => format!("[{value}]"),
        };
        Ok(Some(OptionValue::Text(menu)))
    }
}

/// `fadein[,duration]` or anything else (`block`); stages the duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppearProcessor;

impl ValueProcessor for AppearProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let Some(value) = non_blank(raw) else {
            return Ok(None);
        };
        let value = value.to_lowercase();
        let mode = if value.contains(',') || value == "fadein" {
            if let Some(duration) = value.split(',').nth(1).and_then(non_blank) {
                let duration = duration
                    .parse::<i64>()
                    .map_err(|_| ctx.error(raw, "the appear duration must be an integer"))?;
                ctx.stage(standard::FEATURE_APPEAR_DURATION.name(), duration)?;
            }
            "fadein"
        } else {
            "block"
        };
        ctx.register_extension("appear");
        Ok(Some(OptionValue::Text(mode.to_string())))
    }
}

/// One of the predefined [`PaginationType`]s.
///
/// Unknown names are accepted and left unset, so that a custom extension can
/// provide the pagination control.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationTypeProcessor;

impl ValueProcessor for PaginationTypeProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let Some(value) = non_blank(raw) else {
            return Ok(None);
        };
        let Some(kind) = PaginationType::parse(value) else {
            info!(
                pagination_type = value,
                "Unknown pagination type, make sure an extension provides it"
            );
            return Ok(None);
        };
        if let Some(extension) = kind.extension_name() {
            ctx.register_extension(extension);
        }
        Ok(Some(OptionValue::PaginationType(kind)))
    }
}

/// A [`Theme`] name; requests the extension implementing the theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeProcessor;

impl ValueProcessor for ThemeProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let Some(value) = non_blank(raw) else {
            return Ok(None);
        };
        let theme = Theme::parse(value).ok_or_else(|| {
            ctx.error(
                raw,
                format!(
                    "not a valid theme name, possible values are: {}",
                    Theme::possible_values()
                ),
            )
        })?;
        ctx.register_extension(theme.as_str());
        Ok(Some(OptionValue::Theme(theme)))
    }
}

/// The external filtering button: requests multi-column filtering and
/// stages the `click` trigger.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterSelectorProcessor;

impl ValueProcessor for FilterSelectorProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let Some(value) = non_blank(raw) else {
            return Ok(None);
        };
        ctx.register_extension("multiFilter");
        ctx.stage(standard::FEATURE_FILTER_TRIGGER.name(), "click")?;
        Ok(Some(OptionValue::from(value)))
    }
}

/// A string that requests `extension` whenever it is set.
#[derive(Debug, Clone, Copy)]
pub struct TriggerProcessor {
    extension: &'static str,
}

impl TriggerProcessor {
    pub const fn new(extension: &'static str) -> Self {
        Self { extension }
    }
}

impl ValueProcessor for TriggerProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let Some(value) = non_blank(raw) else {
            return Ok(None);
        };
        ctx.register_extension(self.extension);
        Ok(Some(OptionValue::from(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::*;

    #[test]
    fn test_stripe_classes() {
        let mut h = Harness::standard();
        assert_eq!(
            h.run("css.stripeclasses", "odd, even").unwrap(),
            Some("['odd','even']".into())
        );
        assert_eq!(
            h.run("css.stripeclasses", "odd").unwrap(),
            Some("['odd']".into())
        );
    }

    #[test]
    fn test_length_menu() {
        let mut h = Harness::standard();
        assert_eq!(
            h.run("feature.lengthmenu", "10,25;ten,twenty-five").unwrap(),
            Some("[[10,25],[ten,twenty-five]]".into())
        );
        assert_eq!(
            h.run("feature.lengthmenu", "10,25,50").unwrap(),
            Some("[10,25,50]".into())
        );
        assert!(h.run("feature.lengthmenu", "10,25;ten").is_err());
    }

    #[test]
    fn test_appear_with_duration() {
        let mut h = Harness::standard();
        assert_eq!(
            h.run("feature.appear", "fadein,2000").unwrap(),
            Some("fadein".into())
        );
        assert_eq!(
            h.staged("feature.appearduration"),
            Some(&OptionValue::Int(2000))
        );
        assert_eq!(h.extensions, vec!["appear".to_string()]);
    }

    #[test]
    fn test_appear_block() {
        let mut h = Harness::standard();
        assert_eq!(h.run("feature.appear", "show").unwrap(), Some("block".into()));
        assert!(h.staged("feature.appearduration").is_none());
    }

    #[test]
    fn test_pagination_type() {
        let mut h = Harness::standard();
        assert_eq!(
            h.run("feature.paginationtype", "INPUT").unwrap(),
            Some(OptionValue::PaginationType(PaginationType::Input))
        );
        assert_eq!(h.extensions, vec!["paginationTypeInput".to_string()]);

        assert!(h.run("feature.paginationtype", "full_numbers").unwrap().is_some());
        assert_eq!(h.extensions.len(), 1);

        assert_eq!(h.run("feature.paginationtype", "custom").unwrap(), None);
    }

    #[test]
    fn test_theme() {
        let mut h = Harness::standard();
        assert_eq!(
            h.run("css.theme", "bootstrap3").unwrap(),
            Some(OptionValue::Theme(Theme::Bootstrap3))
        );
        assert_eq!(h.extensions, vec!["bootstrap3".to_string()]);

        let err = h.run("css.theme", "neon").unwrap_err();
        assert!(err.reason.contains("bootstrap2, bootstrap2_responsive, bootstrap3, jqueryui"));
    }

    #[test]
    fn test_filter_selector_stages_trigger() {
        let mut h = Harness::standard();
        h.run("feature.filterselector", "#filterButton").unwrap();
        assert_eq!(h.staged("feature.filtertrigger"), Some(&OptionValue::from("click")));
        assert_eq!(h.extensions, vec!["multiFilter".to_string()]);
        // Staged values never leak into resolved entries.
        assert!(h.entries.is_empty());
    }
}
