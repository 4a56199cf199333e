/// Named colors of one theme, as CSS color strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub error: &'static str,
    pub success: &'static str,
    pub tab_bar_active: &'static str,
    pub tab_bar_inactive: &'static str,
    pub shadow: &'static str,
    pub gradient: [&'static str; 2],
    pub overlay: &'static str,
}

pub const LIGHT_PALETTE: Palette = Palette {
    primary: "#E50914",
    secondary: "#00D9FF",
    background: "#FFFFFF",
    surface: "#F5F5F5",
    card: "#FFFFFF",
    text: "#1A1F3A",
    text_secondary: "#757575",
    border: "#E0E0E0",
    error: "#FF3B30",
    success: "#34C759",
    tab_bar_active: "#E50914",
    tab_bar_inactive: "#9E9E9E",
    shadow: "rgba(0, 0, 0, 0.1)",
    gradient: ["#E50914", "#831010"],
    overlay: "rgba(0, 0, 0, 0.5)",
};

pub const DARK_PALETTE: Palette = Palette {
    primary: "#E50914",
    secondary: "#00D9FF",
    background: "#0A0E27",
    surface: "#1A1F3A",
    card: "#1A1F3A",
    text: "#FFFFFF",
    text_secondary: "#B0B0B0",
    border: "#2A2F4A",
    error: "#FF453A",
    success: "#32D74B",
    tab_bar_active: "#E50914",
    tab_bar_inactive: "#7A7A7A",
    shadow: "rgba(0, 0, 0, 0.5)",
    gradient: ["#E50914", "#B00710"],
    overlay: "rgba(0, 0, 0, 0.7)",
};
