use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

macro_rules! api_code_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Code as it appears in chart option values.
            #[must_use]
            pub fn as_code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            /// Comma-separated list of accepted codes, for error messages.
            #[must_use]
            pub fn accepted_codes() -> String {
                Self::ALL
                    .iter()
                    .map(|value| value.as_code())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl FromStr for $name {
            type Err = ChartError;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                match input {
                    $($code => Ok(Self::$variant),)+
                    other => Err(ChartError::Validation(format!(
                        "unknown {} \"{other}\"; valid values are: {}",
                        $what,
                        Self::accepted_codes()
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_code())
            }
        }
    };
}

api_code_enum! {
    /// Legend placement accepted under the labels `position` option.
    LabelPosition, "label position" {
        Bottom => "b",
        BottomVertical => "bv",
        Top => "t",
        TopVertical => "tv",
        Right => "r",
        Left => "l",
    }
}

api_code_enum! {
    /// Title alignment accepted under the title `text-align` option.
    TitleAlign, "title alignment" {
        Left => "left",
        Center => "center",
        Right => "right",
    }
}

api_code_enum! {
    /// Region painted by the `fill` option group.
    #[derive(Default)]
    FillType, "fill type" {
        Chart => "chart",
        #[default]
        Background => "background",
    }
}

api_code_enum! {
    /// Frequently used chart-type codes. `set_type` accepts any string; these
    /// exist for discoverability and presets.
    ChartKind, "chart kind" {
        Line => "lc",
        SparkLine => "ls",
        LineXy => "lxy",
        BarHorizontalStacked => "bhs",
        BarVerticalStacked => "bvs",
        BarHorizontalGrouped => "bhg",
        BarVerticalGrouped => "bvg",
        Pie => "p",
        Pie3d => "p3",
        PieConcentric => "pc",
        Venn => "v",
        Scatter => "s",
        Radar => "r",
        Map => "t",
        GoogleOMeter => "gom",
        QrCode => "qr",
    }
}

impl FillType {
    /// Fill region code used in the `chf` parameter.
    #[must_use]
    pub fn fill_code(self) -> &'static str {
        match self {
            Self::Chart => "c",
            Self::Background => "bg",
        }
    }
}

/// The six margin keys, in `chma` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarginKey {
    Top,
    Bottom,
    Left,
    Right,
    LegendWidth,
    LegendHeight,
}

impl MarginKey {
    pub const ALL: [Self; 6] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::LegendWidth,
        Self::LegendHeight,
    ];

    #[must_use]
    pub fn as_key(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::LegendWidth => "legend-width",
            Self::LegendHeight => "legend-height",
        }
    }
}
