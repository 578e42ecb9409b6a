//! Plugin extensions.

use tessera_core::{TableConfiguration, standard};

use crate::config::{ConfigMap, MergeMode};
use crate::error::ExtensionResult;
use crate::extension::{Extension, ExtensionContribution};
use crate::generator::keys;
use crate::register_extension;
use crate::script::Slot;

/// Virtual scrolling.
#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct Scroller;

impl Extension for Scroller {
    fn name(&self) -> &str {
        "scroller"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let mut contribution = ExtensionContribution::new();
        let dom = table
            .value(standard::FEATURE_DOM)
            .filter(|dom| !dom.trim().is_empty());
        if dom.is_some() {
            contribution.add_parameter_with(keys::S_DOM, "S", MergeMode::Append);
        } else if table.value_or(standard::FEATURE_JQUERY_UI, false) {
            contribution.add_parameter(keys::S_DOM, "<\"H\"lfr>t<\"F\"ip>S");
        } else {
            contribution.add_parameter(keys::S_DOM, "frtiS");
        }
        Ok(contribution)
    }
}

/// Keeps the header (or another side) visible while scrolling the page.
#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct FixedHeader;

impl FixedHeader {
    fn configuration(table: &TableConfiguration) -> ConfigMap {
        let mut conf = ConfigMap::new();
        let side = match table
            .value(standard::PLUGIN_FIXED_POSITION)
            .map(|position| position.trim().to_lowercase())
            .as_deref()
        {
            Some("bottom") => "bottom",
            Some("right") => "right",
            Some("left") => "left",
            _ => "top",
        };
        conf.insert(side, true);
        if let Some(offset) = table.value(standard::PLUGIN_FIXED_OFFSET_TOP) {
            conf.insert("offsetTop", offset);
        }
        conf
    }
}

impl Extension for FixedHeader {
    fn name(&self) -> &str {
        "fixedHeader"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let conf = Self::configuration(table);
        let mut contribution = ExtensionContribution::new();
        contribution.append(
            Slot::BeforeDocumentReadyEnd,
            &format!("new FixedHeader(oTable_{},{});", table.id(), conf.to_js()),
        );
        Ok(contribution)
    }
}

/// Column reordering by drag and drop.
#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct ColReorder;

impl Extension for ColReorder {
    fn name(&self) -> &str {
        "colReorder"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let mut contribution = ExtensionContribution::new();
        let dom = table
            .value(standard::FEATURE_DOM)
            .filter(|dom| !dom.trim().is_empty());
        if dom.is_some() {
            contribution.add_parameter_with(keys::S_DOM, "R", MergeMode::Prepend);
        } else {
            contribution.add_parameter(keys::S_DOM, "Rlfrtip");
        }
        Ok(contribution)
    }
}
