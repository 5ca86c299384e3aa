//! Static table of every ANSI style this crate knows about.

use lazy_static::lazy_static;
use std::collections::BTreeMap;
use std::fmt;

/// SGR parameters to enter and leave a style, e.g. `(31, 39)` for red.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleCode {
    pub open: u8,
    pub close: u8,
}

impl StyleCode {
    pub const fn new(open: u8, close: u8) -> Self {
        Self { open, close }
    }

    pub fn open_sequence(&self) -> String {
        format!("\x1b[{}m", self.open)
    }

    pub fn close_sequence(&self) -> String {
        format!("\x1b[{}m", self.close)
    }
}

pub const RESET: StyleCode = StyleCode::new(0, 0);

macro_rules! styles {
    ( $( $variant:ident => $name:literal ),* $(,)? ) => {
        /// Every style name that can appear in a dotted style path.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Style {
            $( $variant, )*
        }

        impl Style {
            pub const ALL: &'static [Style] = &[ $( Style::$variant, )* ];

            pub fn name(self) -> &'static str {
                match self {
                    $( Style::$variant => $name, )*
                }
            }
        }
    };
}

styles! {
    Black => "black",
    Red => "red",
    Green => "green",
    Yellow => "yellow",
    Blue => "blue",
    Magenta => "magenta",
    Cyan => "cyan",
    White => "white",
    Gray => "gray",
    BrightRed => "brightRed",
    BrightGreen => "brightGreen",
    BrightYellow => "brightYellow",
    BrightBlue => "brightBlue",
    BrightMagenta => "brightMagenta",
    BrightCyan => "brightCyan",
    BrightWhite => "brightWhite",
    BgBlack => "bgBlack",
    BgRed => "bgRed",
    BgGreen => "bgGreen",
    BgYellow => "bgYellow",
    BgBlue => "bgBlue",
    BgMagenta => "bgMagenta",
    BgCyan => "bgCyan",
    BgWhite => "bgWhite",
    BgGray => "bgGray",
    BgBrightRed => "bgBrightRed",
    BgBrightGreen => "bgBrightGreen",
    BgBrightYellow => "bgBrightYellow",
    BgBrightBlue => "bgBrightBlue",
    BgBrightMagenta => "bgBrightMagenta",
    BgBrightCyan => "bgBrightCyan",
    BgBrightWhite => "bgBrightWhite",
    Reset => "reset",
    Bold => "bold",
    Dim => "dim",
    Italic => "italic",
    Underline => "underline",
    Inverse => "inverse",
    Hidden => "hidden",
    Strikethrough => "strikethrough",
}

const COLORS: &[(Style, StyleCode)] = &[
    (Style::Black, StyleCode::new(30, 39)),
    (Style::Red, StyleCode::new(31, 39)),
    (Style::Green, StyleCode::new(32, 39)),
    (Style::Yellow, StyleCode::new(33, 39)),
    (Style::Blue, StyleCode::new(34, 39)),
    (Style::Magenta, StyleCode::new(35, 39)),
    (Style::Cyan, StyleCode::new(36, 39)),
    (Style::White, StyleCode::new(37, 39)),
    (Style::Gray, StyleCode::new(90, 39)),
    (Style::BrightRed, StyleCode::new(91, 39)),
    (Style::BrightGreen, StyleCode::new(92, 39)),
    (Style::BrightYellow, StyleCode::new(93, 39)),
    (Style::BrightBlue, StyleCode::new(94, 39)),
    (Style::BrightMagenta, StyleCode::new(95, 39)),
    (Style::BrightCyan, StyleCode::new(96, 39)),
    (Style::BrightWhite, StyleCode::new(97, 39)),
    (Style::BgBlack, StyleCode::new(40, 49)),
    (Style::BgRed, StyleCode::new(41, 49)),
    (Style::BgGreen, StyleCode::new(42, 49)),
    (Style::BgYellow, StyleCode::new(43, 49)),
    (Style::BgBlue, StyleCode::new(44, 49)),
    (Style::BgMagenta, StyleCode::new(45, 49)),
    (Style::BgCyan, StyleCode::new(46, 49)),
    (Style::BgWhite, StyleCode::new(47, 49)),
    (Style::BgGray, StyleCode::new(100, 49)),
    (Style::BgBrightRed, StyleCode::new(101, 49)),
    (Style::BgBrightGreen, StyleCode::new(102, 49)),
    (Style::BgBrightYellow, StyleCode::new(103, 49)),
    (Style::BgBrightBlue, StyleCode::new(104, 49)),
    (Style::BgBrightMagenta, StyleCode::new(105, 49)),
    (Style::BgBrightCyan, StyleCode::new(106, 49)),
    (Style::BgBrightWhite, StyleCode::new(107, 49)),
];

const MODIFIERS: &[(Style, StyleCode)] = &[
    (Style::Reset, RESET),
    (Style::Bold, StyleCode::new(1, 22)),
    (Style::Dim, StyleCode::new(2, 22)),
    (Style::Italic, StyleCode::new(3, 23)),
    (Style::Underline, StyleCode::new(4, 24)),
    (Style::Inverse, StyleCode::new(7, 27)),
    (Style::Hidden, StyleCode::new(8, 28)),
    (Style::Strikethrough, StyleCode::new(9, 29)),
];

lazy_static! {
    // Modifiers are merged last, so they win on a name collision.
    static ref REGISTRY: BTreeMap<&'static str, (Style, StyleCode)> = {
        let mut registry = BTreeMap::new();
        for (style, code) in COLORS.iter().chain(MODIFIERS.iter()) {
            registry.insert(style.name(), (*style, *code));
        }
        registry
    };
}

impl Style {
    pub fn from_name(name: &str) -> Option<Style> {
        REGISTRY.get(name).map(|(style, _)| *style)
    }

    pub fn code(self) -> StyleCode {
        REGISTRY
            .get(self.name())
            .map(|(_, code)| *code)
            .unwrap_or(RESET)
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Style {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Style::from_name(s).ok_or_else(|| anyhow::anyhow!("unknown style `{}`", s))
    }
}

pub fn lookup(name: &str) -> Option<StyleCode> {
    REGISTRY.get(name).map(|(_, code)| *code)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}
