//! Processors of the `export.*` options.
//!
//! Export settings are not stored as option values. They are collected into
//! the entity's export configuration, keyed by format.

use tracing::debug;

use super::{ProcessingContext, ValueProcessor, non_blank};
use crate::error::ProcessingResult;
use crate::value::OptionValue;

/// Which [`ExportConf`](crate::value::ExportConf) field a family key sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportField {
    Class,
    FileName,
    Label,
    MimeType,
}

/// Handles the `export.<format>.{class,filename,label,mimetype}` families.
#[derive(Debug, Clone, Copy)]
pub struct ExportFormatProcessor {
    field: ExportField,
}

impl ExportFormatProcessor {
    pub const fn new(field: ExportField) -> Self {
        Self { field }
    }
}

impl ValueProcessor for ExportFormatProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let Some(value) = non_blank(raw) else {
            return Ok(None);
        };
        let format = ctx
            .catalog()
            .family_capture(ctx.key())
            .and_then(non_blank)
            .map(str::to_lowercase)
            .ok_or_else(|| ctx.error(raw, "no export format found in the option name"))?;

        debug!(format = %format, field = ?self.field, "Export format found");
        let conf = ctx.export_conf(&format);
        let value = value.to_string();
        match self.field {
            ExportField::Class => conf.export_class = Some(value),
            ExportField::FileName => conf.file_name = value,
            ExportField::Label => conf.label = value,
            ExportField::MimeType => conf.mime_type = Some(value),
        }
        Ok(None)
    }
}

/// Comma separated list of enabled export formats.
///
/// Creates a default export configuration for every format and requests the
/// export extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportEnabledFormatsProcessor;

impl ValueProcessor for ExportEnabledFormatsProcessor {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        let mut formats: Vec<String> = Vec::new();
        for format in raw.split(',').filter_map(non_blank) {
            let format = format.to_lowercase();
            ctx.export_conf(&format);
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        if formats.is_empty() {
            return Ok(None);
        }
        ctx.register_extension("export");
        Ok(Some(OptionValue::Names(formats)))
    }
}
