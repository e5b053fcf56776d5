use ratatui::style::Color;

pub const PALETTE: Palette = Palette {
    background: Color::Rgb(17, 24, 39),
    accent: Color::Rgb(147, 197, 253),
    muted: Color::Rgb(156, 163, 175),
    highlight: Color::Rgb(75, 85, 99),
    success: Color::Rgb(0, 176, 80),
    failure: Color::Rgb(255, 51, 0),
};

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    loading_ms: 1400,
    transition_ms: 300,
    target_fps: 30,
};

pub const TYPEWRITER_SETTINGS: TypewriterSettings = TypewriterSettings {
    type_ms: 150,
    delete_ms: 100,
    pause_ms: 2000,
};

pub const LOADING_TYPIST_SETTINGS: LoadingTypistSettings = LoadingTypistSettings {
    type_ms: 40,
    delete_ms: 60,
    hold_ms: 300,
};

pub const SCRAMBLE_SETTINGS: ScrambleSettings = ScrambleSettings {
    interval_ms: 50,
    alphabet: "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+",
};

pub const VISITOR_SETTINGS: VisitorSettings = VisitorSettings {
    seed_min: 500,
    seed_max: 1499,
    date_key: "visitorDate",
    count_key: "visitorCount",
    date_format: "%a %b %d %Y",
};

pub const NAV_LABELS: [(&str, char); 4] = [
    ("Intro", '1'),
    ("Projects", '2'),
    ("Resume", '3'),
    ("Contact", '4'),
];

pub const EASTER_EGG: &str = "You found my secret! I hate runny eggs.";

pub struct Palette {
    pub background: Color,
    pub accent: Color,
    pub muted: Color,
    pub highlight: Color,
    pub success: Color,
    pub failure: Color,
}

pub struct TimeSettings {
    pub loading_ms: u64,
    pub transition_ms: u64,
    pub target_fps: u64,
}

pub struct TypewriterSettings {
    pub type_ms: u64,
    pub delete_ms: u64,
    pub pause_ms: u64,
}

pub struct LoadingTypistSettings {
    pub type_ms: u64,
    pub delete_ms: u64,
    pub hold_ms: u64,
}

pub struct ScrambleSettings {
    pub interval_ms: u64,
    pub alphabet: &'static str,
}

pub struct VisitorSettings {
    pub seed_min: u64,
    pub seed_max: u64,
    pub date_key: &'static str,
    pub count_key: &'static str,
    pub date_format: &'static str,
}
