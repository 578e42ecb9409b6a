//! The script assembled for one table.

use crate::config::ConfigMap;

/// The five code slots an extension can write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    BeforeAll,
    BeforeDocumentReadyStart,
    AfterDocumentReadyStart,
    BeforeDocumentReadyEnd,
    AfterAll,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::BeforeAll,
        Slot::BeforeDocumentReadyStart,
        Slot::AfterDocumentReadyStart,
        Slot::BeforeDocumentReadyEnd,
        Slot::AfterAll,
    ];
}

/// Script sections shared by every extension of one table.
///
/// `trailer_calls` holds the post-init function chained after the widget
/// initialization; `extra_configuration` holds its argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBuffer {
    pub before_all: String,
    pub before_document_ready_start: String,
    pub after_document_ready_start: String,
    pub before_document_ready_end: String,
    pub after_all: String,
    pub trailer_calls: String,
    pub extra_configuration: String,
}

impl ScriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, slot: Slot) -> &str {
        match slot {
            Slot::BeforeAll => &self.before_all,
            Slot::BeforeDocumentReadyStart => &self.before_document_ready_start,
            Slot::AfterDocumentReadyStart => &self.after_document_ready_start,
            Slot::BeforeDocumentReadyEnd => &self.before_document_ready_end,
            Slot::AfterAll => &self.after_all,
        }
    }

    pub fn append(&mut self, slot: Slot, code: &str) {
        let section = match slot {
            Slot::BeforeAll => &mut self.before_all,
            Slot::BeforeDocumentReadyStart => &mut self.before_document_ready_start,
            Slot::AfterDocumentReadyStart => &mut self.after_document_ready_start,
            Slot::BeforeDocumentReadyEnd => &mut self.before_document_ready_end,
            Slot::AfterAll => &mut self.after_all,
        };
        section.push_str(code);
    }

    pub fn append_trailer_call(&mut self, function: &str) {
        self.trailer_calls.push_str(function);
    }

    pub fn append_extra_configuration(&mut self, conf: &str) {
        self.extra_configuration.push_str(conf);
    }

    /// Assembles the final script of table `table_id` configured by `config`.
    pub fn render(&self, table_id: &str, config: &ConfigMap) -> String {
        let mut out = String::new();
        if !self.before_all.is_empty() {
            out.push_str(&self.before_all);
            out.push('\n');
        }

        out.push_str(&format!("var oTable_{table_id} = $('#{table_id}');\n"));
        out.push_str(&format!(
            "var oTable_{table_id}_params = {};\n",
            config.to_js()
        ));
        out.push('\n');

        if !self.before_document_ready_start.is_empty() {
            out.push_str(&self.before_document_ready_start);
            out.push('\n');
        }

        out.push_str("$(document).ready(function(){\n");
        if !self.after_document_ready_start.is_empty() {
            out.push_str("   ");
            out.push_str(&self.after_document_ready_start);
            out.push('\n');
        }

        out.push_str(&format!(
            "   oTable_{table_id}.dataTable(oTable_{table_id}_params)"
        ));
        if !self.trailer_calls.is_empty() {
            out.push('.');
            out.push_str(&self.trailer_calls);
            out.push('(');
            out.push_str(&self.extra_configuration);
            out.push(')');
        }
        out.push_str(";\n");

        if !self.before_document_ready_end.is_empty() {
            out.push_str("   ");
            out.push_str(&self.before_document_ready_end);
            out.push('\n');
        }
        out.push_str("});\n");

        if !self.after_all.is_empty() {
            out.push_str(&self.after_all);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_to_sections() {
        let mut buffer = ScriptBuffer::new();
        buffer.append(Slot::BeforeAll, "a");
        buffer.append(Slot::BeforeAll, "b");
        buffer.append(Slot::AfterAll, "z");
        assert_eq!(buffer.section(Slot::BeforeAll), "ab");
        assert_eq!(buffer.section(Slot::AfterAll), "z");
        assert_eq!(buffer.section(Slot::BeforeDocumentReadyEnd), "");
    }

    #[test]
    fn test_render_minimal() {
        let mut config = ConfigMap::new();
        config.insert("bInfo", false);
        let script = ScriptBuffer::new().render("users", &config);
        assert_eq!(
            script,
            "var oTable_users = $('#users');\n\
             var oTable_users_params = {\"bInfo\":false};\n\
             \n\
             $(document).ready(function(){\n   \
             oTable_users.dataTable(oTable_users_params);\n\
             });\n"
        );
    }

    #[test]
    fn test_render_with_trailer_call() {
        let mut buffer = ScriptBuffer::new();
        buffer.append_trailer_call("columnFilter");
        buffer.append_extra_configuration("{}");
        buffer.append(Slot::BeforeDocumentReadyEnd, "done();");
        let script = buffer.render("t", &ConfigMap::new());
        assert!(script.contains("oTable_t.dataTable(oTable_t_params).columnFilter({});\n"));
        assert!(script.contains("   done();\n});\n"));
    }
}
