//! General purpose processors shared by many options.

use std::marker::PhantomData;

use super::{ProcessingContext, ValueProcessor, non_blank};
use crate::error::ProcessingResult;
use crate::option::vocabulary::Vocabulary;
use crate::value::OptionValue;

/// `true` / `false`, case-insensitive. Blank input leaves the option unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanProcessor;

impl BooleanProcessor {
    pub(crate) fn parse(raw: &str, ctx: &ProcessingContext<'_>) -> ProcessingResult<Option<bool>> {
        let Some(value) = non_blank(raw) else {
            return Ok(None);
        };
        if value.eq_ignore_ascii_case("true") {
            Ok(Some(true))
        } else if value.eq_ignore_ascii_case("false") {
            Ok(Some(false))
        } else {
            Err(ctx.error(raw, "expected 'true' or 'false'"))
        }
    }
}

impl ValueProcessor for BooleanProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        Ok(Self::parse(raw, ctx)?.map(OptionValue::Bool))
    }
}

/// Signed integers. Blank input leaves the option unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerProcessor;

impl ValueProcessor for IntegerProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let Some(value) = non_blank(raw) else {
            return Ok(None);
        };
        value
            .parse::<i64>()
            .map(|value| Some(OptionValue::Int(value)))
            .map_err(|_| ctx.error(raw, "expected an integer"))
    }
}

/// Trimmed strings; blank input leaves the option unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringProcessor;

impl ValueProcessor for StringProcessor {
    fn process(
        &self,
        raw: &str,
        _ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        Ok(non_blank(raw).map(OptionValue::from))
    }
}

/// Strings kept verbatim, blank ones included.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyStringProcessor;

impl ValueProcessor for EmptyStringProcessor {
    fn process(
        &self,
        raw: &str,
        _ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        Ok(Some(OptionValue::Text(raw.to_string())))
    }
}

/// Accumulators that can be appended to after resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferProcessor;

impl ValueProcessor for BufferProcessor {
    fn process(
        &self,
        raw: &str,
        _ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        Ok(non_blank(raw).map(|value| OptionValue::Buffer(value.to_string())))
    }
}

/// Comma separated names, trimmed, lower-cased and deduplicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameListProcessor;

impl ValueProcessor for NameListProcessor {
    fn process(
        &self,
        raw: &str,
        _ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let mut names: Vec<String> = Vec::new();
        for name in raw.split(',').filter_map(non_blank) {
            let name = name.to_lowercase();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok((!names.is_empty()).then_some(OptionValue::Names(names)))
    }
}

/// One value of a closed [`Vocabulary`]; anything else is rejected.
pub struct VocabularyProcessor<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> VocabularyProcessor<T> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for VocabularyProcessor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValueProcessor for VocabularyProcessor<T>
where
    T: Vocabulary + Into<OptionValue>,
{
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let Some(value) = non_blank(raw) else {
            return Ok(None);
        };
        T::parse(value).map(|value| Some(value.into())).ok_or_else(|| {
            ctx.error(
                raw,
                format!("possible values are: {}", T::possible_values()),
            )
        })
    }
}

/// A boolean that requests `extension` when set to `true`.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionToggleProcessor {
    extension: &'static str,
}

impl ExtensionToggleProcessor {
    pub const fn new(extension: &'static str) -> Self {
        Self { extension }
    }
}

impl ValueProcessor for ExtensionToggleProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let value = BooleanProcessor::parse(raw, ctx)?;
        if value == Some(true) {
            ctx.register_extension(self.extension);
        }
        Ok(value.map(OptionValue::Bool))
    }
}
