use super::{ResolvedTheme, Theme, ThemeColor, ThemeColors, ThemeMeta, ThemeVariant};

pub fn all_themes() -> Vec<Theme> {
    vec![
        default_dark(),
        default_light(),
        monokai(),
        dracula(),
        nord(),
        solarized_light(),
    ]
}

pub fn by_name(name: &str) -> Option<Theme> {
    all_themes().into_iter().find(|t| t.name == name)
}

pub fn default_for_variant(variant: ThemeVariant) -> ResolvedTheme {
    match variant {
        ThemeVariant::Dark => monokai().into(),
        ThemeVariant::Light => default_light().into(),
    }
}

fn named(s: &str) -> ThemeColor {
    ThemeColor::Named(s.to_string())
}

fn hex(s: &str) -> ThemeColor {
    ThemeColor::Named(s.to_string())
}

pub fn default_dark() -> Theme {
    Theme {
        name: "default-dark".to_string(),
        meta: ThemeMeta {
            author: Some("datecell".to_string()),
            description: Some("Default dark theme using terminal colors".to_string()),
            variant: ThemeVariant::Dark,
        },
        colors: ThemeColors {
            foreground: named("white"),
            foreground_dim: hex("#6A9A9A"),
            background: named("black"),
            border: hex("#6A9A9A"),
            header: named("yellow"),
            selection_bg: named("darkgray"),
            primary: named("yellow"),
            error: named("red"),
            relative_time: hex("#6A9A9A"),
            status_bar_bg: named("blue"),
            status_bar_fg: named("white"),
        },
    }
}

pub fn default_light() -> Theme {
    Theme {
        name: "default-light".to_string(),
        meta: ThemeMeta {
            author: Some("datecell".to_string()),
            description: Some("Default light theme using terminal colors".to_string()),
            variant: ThemeVariant::Light,
        },
        colors: ThemeColors {
            foreground: named("black"),
            foreground_dim: named("darkgray"),
            background: named("white"),
            border: named("darkgray"),
            header: named("blue"),
            selection_bg: named("lightblue"),
            primary: named("blue"),
            error: named("red"),
            relative_time: named("darkgray"),
            status_bar_bg: named("blue"),
            status_bar_fg: named("white"),
        },
    }
}

pub fn monokai() -> Theme {
    Theme {
        name: "monokai".to_string(),
        meta: ThemeMeta {
            author: Some("Wimer Hazenberg".to_string()),
            description: Some("Classic Monokai color scheme".to_string()),
            variant: ThemeVariant::Dark,
        },
        colors: ThemeColors {
            foreground: hex("#F8F8F2"),
            foreground_dim: hex("#75715E"),
            background: hex("#272822"),
            border: hex("#75715E"),
            header: hex("#E6DB74"),
            selection_bg: hex("#49483E"),
            primary: hex("#A6E22E"),
            error: hex("#F92672"),
            relative_time: hex("#75715E"),
            status_bar_bg: hex("#A6E22E"),
            status_bar_fg: hex("#272822"),
        },
    }
}

pub fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        meta: ThemeMeta {
            author: Some("Zeno Rocha".to_string()),
            description: Some("Dark theme with vibrant colors".to_string()),
            variant: ThemeVariant::Dark,
        },
        colors: ThemeColors {
            foreground: hex("#F8F8F2"),
            foreground_dim: hex("#6272A4"),
            background: hex("#282A36"),
            border: hex("#6272A4"),
            header: hex("#FF79C6"),
            selection_bg: hex("#44475A"),
            primary: hex("#BD93F9"),
            error: hex("#FF5555"),
            relative_time: hex("#6272A4"),
            status_bar_bg: hex("#BD93F9"),
            status_bar_fg: hex("#282A36"),
        },
    }
}

pub fn nord() -> Theme {
    Theme {
        name: "nord".to_string(),
        meta: ThemeMeta {
            author: Some("Arctic Ice Studio".to_string()),
            description: Some("Arctic, north-bluish color palette".to_string()),
            variant: ThemeVariant::Dark,
        },
        colors: ThemeColors {
            foreground: hex("#ECEFF4"),
            foreground_dim: hex("#4C566A"),
            background: hex("#2E3440"),
            border: hex("#4C566A"),
            header: hex("#88C0D0"),
            selection_bg: hex("#434C5E"),
            primary: hex("#88C0D0"),
            error: hex("#BF616A"),
            relative_time: hex("#81A1C1"),
            status_bar_bg: hex("#5E81AC"),
            status_bar_fg: hex("#ECEFF4"),
        },
    }
}

pub fn solarized_light() -> Theme {
    Theme {
        name: "solarized-light".to_string(),
        meta: ThemeMeta {
            author: Some("Ethan Schoonover".to_string()),
            description: Some("Precision colors for machines and people (light)".to_string()),
            variant: ThemeVariant::Light,
        },
        colors: ThemeColors {
            foreground: hex("#657B83"),
            foreground_dim: hex("#93A1A1"),
            background: hex("#FDF6E3"),
            border: hex("#93A1A1"),
            header: hex("#B58900"),
            selection_bg: hex("#EEE8D5"),
            primary: hex("#268BD2"),
            error: hex("#DC322F"),
            relative_time: hex("#93A1A1"),
            status_bar_bg: hex("#268BD2"),
            status_bar_fg: hex("#FDF6E3"),
        },
    }
}
