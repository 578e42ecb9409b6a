//! Theme extensions.

use tessera_core::option::vocabulary::{PaginationType, ThemeOption};
use tessera_core::{TableConfiguration, standard};

use crate::config::ConfigValue;
use crate::error::{ExtensionError, ExtensionResult};
use crate::extension::{Callback, Extension, ExtensionContribution};
use crate::generator::keys;
use crate::register_extension;
use crate::script::Slot;

/// Bootstrap themes style rows themselves.
fn clear_stripe_classes(contribution: &mut ExtensionContribution) {
    contribution.add_parameter(keys::AS_STRIPE_CLASSES, ConfigValue::snippet("[]"));
}

#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct Bootstrap2;

impl Extension for Bootstrap2 {
    fn name(&self) -> &str {
        "bootstrap2"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        if let Some(option) = table.value(standard::CSS_THEME_OPTION) {
            if option != ThemeOption::Tablecloth {
                return Err(ExtensionError::configuration(format!(
                    "only the '{}' theme option is compatible with the 'bootstrap2' theme, got '{option}'",
                    ThemeOption::Tablecloth
                )));
            }
        }

        let mut contribution = ExtensionContribution::new();
        if table.value_or(standard::FEATURE_PAGEABLE, false)
            && table.value(standard::FEATURE_PAGINATION_TYPE).is_none()
        {
            contribution.add_parameter(keys::S_PAGINATION_TYPE, PaginationType::Bootstrap.as_str());
        }
        clear_stripe_classes(&mut contribution);
        Ok(contribution)
    }
}

/// Bootstrap 2 with rows collapsing on small screens.
#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct Bootstrap2Responsive;

impl Extension for Bootstrap2Responsive {
    fn name(&self) -> &str {
        "bootstrap2_responsive"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let id = table.id();
        let helper = format!("responsiveHelper_{id}");

        let mut contribution = ExtensionContribution::new();
        contribution.append(
            Slot::BeforeAll,
            &format!(
                "var {helper};\nvar breakpointDefinition = {{ tablet: 1024, phone : 480 }};\n"
            ),
        );
        contribution.add_parameter(keys::B_AUTO_WIDTH, false);
        contribution.add_callback(
            Callback::PreDraw,
            &format!(
                "if (!{helper}) {{ {helper} = new ResponsiveDatatablesHelper(oTable_{id}, breakpointDefinition); }}"
            ),
        );
        contribution.add_callback(Callback::Row, &format!("{helper}.createExpandIcon(nRow);"));
        contribution.add_callback(Callback::Draw, &format!("{helper}.respond();"));
        Ok(contribution)
    }
}

#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct Bootstrap3;

impl Extension for Bootstrap3 {
    fn name(&self) -> &str {
        "bootstrap3"
    }

    fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let mut contribution = ExtensionContribution::new();
        if table.value_or(standard::FEATURE_PAGEABLE, false) {
            contribution.add_parameter(keys::S_PAGINATION_TYPE, PaginationType::Bootstrap.as_str());
        }
        clear_stripe_classes(&mut contribution);
        Ok(contribution)
    }
}

#[derive(Debug, Default)]
#[register_extension(builtin)]
pub struct JQueryUi;

impl Extension for JQueryUi {
    fn name(&self) -> &str {
        "jqueryui"
    }

    fn setup(&self, _table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
        let mut contribution = ExtensionContribution::new();
        contribution.add_parameter(keys::B_JQUERY_UI, true);
        Ok(contribution)
    }
}
