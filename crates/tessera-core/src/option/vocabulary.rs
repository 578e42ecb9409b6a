//! Enumerated vocabularies accepted by some options.
//!
//! Every vocabulary parses case-insensitively and serializes to its lower-case
//! textual form.

use std::fmt;

use serde::{Serialize, Serializer};

/// A closed set of textual values.
pub trait Vocabulary: Copy + fmt::Display + Send + Sync + 'static {
    /// Parses a raw value, ignoring case and surrounding whitespace.
    fn parse(raw: &str) -> Option<Self>;

    /// Comma separated list of accepted values.
    fn possible_values() -> String;
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every value of this vocabulary, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the canonical textual form.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            /// Parses a raw value, ignoring case and surrounding whitespace.
            pub fn parse(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str().eq_ignore_ascii_case(raw))
            }

            /// Comma separated list of accepted values, for error messages.
            pub fn possible_values() -> String {
                Self::ALL
                    .iter()
                    .map(|value| value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl Vocabulary for $name {
            fn parse(raw: &str) -> Option<Self> {
                $name::parse(raw)
            }

            fn possible_values() -> String {
                $name::possible_values()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Where the column filtering widgets are rendered.
    pub enum FilterPlaceholder {
        HeadBefore => "head_before",
        HeadAfter => "head_after",
        Foot => "foot",
        /// Widgets are rendered by the page author, outside the table.
        None => "none",
    }
}

vocabulary! {
    /// Widget used to filter a single column.
    pub enum FilterType {
        Input => "input",
        Number => "number",
        Select => "select",
        NumberRange => "number_range",
    }
}

impl FilterType {
    /// Name of the widget type understood by the column filtering add-on.
    pub fn widget(self) -> &'static str {
        match self {
            Self::Input => "text",
            Self::Number => "number",
            Self::Select => "select",
            Self::NumberRange => "number-range",
        }
    }
}

vocabulary! {
    /// Predefined pagination controls.
    pub enum PaginationType {
        Simple => "simple",
        SimpleNumbers => "simple_numbers",
        Full => "full",
        FullNumbers => "full_numbers",
        TwoButton => "two_button",
        Input => "input",
        Listbox => "listbox",
        Scrolling => "scrolling",
        FourButton => "four_button",
        ExtJs => "extjs",
        Bootstrap => "bootstrap",
        BootstrapFourButton => "bootstrap_four_button",
        BootstrapFullNumbers => "bootstrap_full_numbers",
    }
}

impl PaginationType {
    /// The extension that ships the client-side code of this pagination type,
    /// if the type is not built into the widget.
    pub fn extension_name(self) -> Option<&'static str> {
        match self {
            Self::Input => Some("paginationTypeInput"),
            Self::Listbox => Some("paginationTypeListbox"),
            Self::Scrolling => Some("paginationTypeScrolling"),
            Self::FourButton => Some("paginationTypeFourButton"),
            Self::ExtJs => Some("paginationTypeExtJs"),
            Self::Bootstrap => Some("paginationTypeBootstrap"),
            Self::BootstrapFourButton => Some("paginationTypeBootstrapFourButton"),
            Self::BootstrapFullNumbers => Some("paginationTypeBootstrapFullNumbers"),
            _ => None,
        }
    }
}

vocabulary! {
    /// Visual themes, each backed by an extension of the same name.
    pub enum Theme {
        Bootstrap2 => "bootstrap2",
        Bootstrap2Responsive => "bootstrap2_responsive",
        Bootstrap3 => "bootstrap3",
        JQueryUi => "jqueryui",
    }
}

vocabulary! {
    /// Variations of a theme.
    pub enum ThemeOption {
        Base => "base",
        BlackTie => "blacktie",
        Blitzer => "blitzer",
        Cupertino => "cupertino",
        DarkHive => "darkhive",
        DotLuv => "dotluv",
        Eggplant => "eggplant",
        ExciteBike => "excitebike",
        Flick => "flick",
        HotSneaks => "hotsneaks",
        Humanity => "humanity",
        LeFrog => "lefrog",
        MintChoc => "mintchoc",
        Overcast => "overcast",
        PepperGrinder => "peppergrinder",
        Redmond => "redmond",
        Smoothness => "smoothness",
        SouthStreet => "southstreet",
        Start => "start",
        Sunny => "sunny",
        SwankyPurse => "swankypurse",
        Trontastic => "trontastic",
        UiDarkness => "uidarkness",
        UiLightness => "uilightness",
        Vader => "vader",
        /// Only option compatible with the Bootstrap themes.
        Tablecloth => "tablecloth",
    }
}

vocabulary! {
    /// Sorting direction of a column.
    pub enum SortDirection {
        Asc => "asc",
        Desc => "desc",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        assert_eq!(
            FilterPlaceholder::parse(" HEAD_AFTER "),
            Some(FilterPlaceholder::HeadAfter)
        );
        assert_eq!(Theme::parse("Bootstrap3"), Some(Theme::Bootstrap3));
        assert_eq!(PaginationType::parse("nope"), None);
    }

    #[test]
    fn test_possible_values() {
        assert_eq!(SortDirection::possible_values(), "asc, desc");
    }

    #[test]
    fn test_serializes_as_text() {
        let json = serde_json::to_string(&FilterType::NumberRange).unwrap();
        assert_eq!(json, "\"number_range\"");
        assert_eq!(FilterType::NumberRange.widget(), "number-range");
    }
}
