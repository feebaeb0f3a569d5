//! Overlay / HUD view models and localized strings
//!
//! Pure data so the DOM glue only copies text into elements.

use serde::{Deserialize, Serialize};

use crate::sim::RoundPhase;

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Traditional Chinese (Taiwan)
    #[default]
    ZhTw,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::ZhTw => "zh-TW",
            Locale::En => "en",
        }
    }

    /// Parse a BCP 47-ish language tag (`navigator.language`)
    pub fn from_str(s: &str) -> Option<Self> {
        let tag = s.trim().to_lowercase();
        if tag.starts_with("zh") {
            Some(Locale::ZhTw)
        } else if tag.starts_with("en") {
            Some(Locale::En)
        } else {
            None
        }
    }

    pub fn strings(&self) -> &'static Strings {
        match self {
            Locale::ZhTw => &ZH_TW,
            Locale::En => &EN,
        }
    }
}

/// Every user-facing string
#[derive(Debug)]
pub struct Strings {
    pub ready_title: &'static str,
    pub ready_desc: &'static str,
    pub start_label: &'static str,
    pub restart_label: &'static str,
    pub time_up_title: &'static str,
    /// `{secs}` and `{score}` are substituted
    pub final_score: &'static str,
    pub assets_loading: &'static str,
    pub fullscreen_label: &'static str,
}

impl Strings {
    pub fn final_score_message(&self, secs: u32, score: u32) -> String {
        self.final_score
            .replace("{secs}", &secs.to_string())
            .replace("{score}", &score.to_string())
    }
}

static ZH_TW: Strings = Strings {
    ready_title: "接住愛心！",
    ready_desc: "左右滑動移動角色，在 60 秒內接住越多 ❤️ 越好。",
    start_label: "開始",
    restart_label: "再玩一次",
    time_up_title: "時間到！",
    final_score: "你在 {secs} 秒內接住了 {score} 顆 ❤️",
    assets_loading: "素材載入中…如果你是離線打開，請確認 assets 資料夾與 index.html 放在同一層。",
    fullscreen_label: "全螢幕",
};

static EN: Strings = Strings {
    ready_title: "Catch the hearts!",
    ready_desc: "Slide left and right to catch as many ❤️ as you can in 60 seconds.",
    start_label: "Start",
    restart_label: "Play again",
    time_up_title: "Time's up!",
    final_score: "You caught {score} ❤️ in {secs} seconds",
    assets_loading: "Loading images… if you opened this offline, make sure the assets folder sits next to index.html.",
    fullscreen_label: "Fullscreen",
};

/// What the start/end overlay shows
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub visible: bool,
    pub title: String,
    pub description: String,
    pub button_label: String,
}

impl OverlayView {
    /// Overlay contents for the current round phase.
    ///
    /// The asset advisory replaces the idle description until every image
    /// is ready.
    pub fn for_phase(phase: RoundPhase, score: u32, round_secs: u32, assets_ready: bool, strings: &Strings) -> Self {
        match phase {
            RoundPhase::Idle => Self {
                visible: true,
                title: strings.ready_title.to_string(),
                description: if assets_ready {
                    strings.ready_desc.to_string()
                } else {
                    strings.assets_loading.to_string()
                },
                button_label: strings.start_label.to_string(),
            },
            RoundPhase::Running => Self {
                visible: false,
                title: String::new(),
                description: String::new(),
                button_label: strings.start_label.to_string(),
            },
            RoundPhase::Ended => Self {
                visible: true,
                title: strings.time_up_title.to_string(),
                description: strings.final_score_message(round_secs, score),
                button_label: strings.restart_label.to_string(),
            },
        }
    }
}

/// HUD values that changed since the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudUpdate {
    pub score: Option<u32>,
    pub time_left: Option<u32>,
}

impl HudUpdate {
    pub fn is_empty(&self) -> bool {
        self.score.is_none() && self.time_left.is_none()
    }
}

/// Remembers what the HUD currently shows so text is only written on change
#[derive(Debug, Clone, Default)]
pub struct HudCache {
    score: Option<u32>,
    time_left: Option<u32>,
}

impl HudCache {
    pub fn update(&mut self, score: u32, time_left: u32) -> HudUpdate {
        let mut out = HudUpdate::default();
        if self.score != Some(score) {
            self.score = Some(score);
            out.score = Some(score);
        }
        if self.time_left != Some(time_left) {
            self.time_left = Some(time_left);
            out.time_left = Some(time_left);
        }
        out
    }

    /// Force the next update to report both values
    pub fn invalidate(&mut self) {
        self.score = None;
        self.time_left = None;
    }
}
