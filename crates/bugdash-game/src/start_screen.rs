//! Start screen: description, controls, difficulty and character row.

use bugdash_engine::paint::Rgba8;
use bugdash_engine::render::{DrawCtx, Font, TextAlign, TextStyle};

use crate::sprites::{self, CHARACTERS};

const TEXT_SIZE: f32 = 26.0;
const TEXT_FILL: Rgba8 = Rgba8::from_hex(0x556B2F);
const TEXT_OUTLINE: Rgba8 = Rgba8::from_hex(0xCCCCCC);

/// Centered text lines and their baselines.
const LINES: [(&str, f32); 6] = [
    ("Collect all Gems and reach the Water to win!", 78.0),
    ("Avoid the Bugs! Collect Hearts to gain lives", 110.0),
    ("...Good Luck!", 145.0),
    ("Move your Player", 204.0),
    ("Choose your Difficulty", 417.0),
    ("Choose your Player. Press Enter to Start Game", 540.0),
];

const ARROWS: [(&str, i32, i32); 4] = [
    (sprites::ARROW_UP, 364, 220),
    (sprites::ARROW_LEFT, 292, 295),
    (sprites::ARROW_DOWN, 369, 295),
    (sprites::ARROW_RIGHT, 440, 295),
];

const BUTTONS: [(&str, i32); 3] = [
    (sprites::BUTTON_EASY, 192),
    (sprites::BUTTON_MEDIUM, 354),
    (sprites::BUTTON_HARD, 516),
];
const BUTTON_Y: i32 = 435;

const ROW_LEFT: i32 = 152;
const STONE_Y: i32 = 540;
const CHARACTER_Y: i32 = 504;
const BACKGROUND_Y: i32 = 680;

const FONT_PATHS: [&str; 5] = [
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/noto/NotoSans-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
];

/// First bold system font that parses, if any.
pub fn load_system_font() -> Option<Font> {
    let font = FONT_PATHS.iter().find_map(|path| {
        let bytes = std::fs::read(path).ok()?;
        match Font::from_bytes(&bytes) {
            Ok(font) => {
                log::debug!("start screen font: {path}");
                Some(font)
            }
            Err(e) => {
                log::warn!("skipping font {path}: {e}");
                None
            }
        }
    });

    if font.is_none() {
        log::warn!("no system font found; start screen text disabled");
    }
    font
}

pub struct StartScreen {
    font: Option<Font>,
    selected: usize,
}

impl StartScreen {
    pub fn new(font: Option<Font>) -> Self {
        Self { font, selected: 0 }
    }

    pub fn selected_character(&self) -> &'static str {
        CHARACTERS[self.selected]
    }

    pub fn render(&self, ctx: &mut DrawCtx<'_>) -> anyhow::Result<()> {
        ctx.draw_asset(sprites::BACKGROUND, 0, BACKGROUND_Y)?;

        if let Some(font) = &self.font {
            let style = TextStyle::new(TEXT_SIZE, TEXT_FILL)
                .outline(TEXT_OUTLINE)
                .align(TextAlign::Center);
            let center = ctx.width() as f32 / 2.0;
            for (line, baseline) in LINES {
                ctx.draw_text(font, line, center, baseline, &style);
            }
        }

        for (arrow, x, y) in ARROWS {
            ctx.draw_asset(arrow, x, y)?;
        }
        for (button, x) in BUTTONS {
            ctx.draw_asset(button, x, BUTTON_Y)?;
        }

        let step = sprites::CELL.width as i32;
        for col in 0..CHARACTERS.len() as i32 {
            ctx.draw_asset(sprites::STONE, ROW_LEFT + col * step, STONE_Y)?;
        }
        ctx.draw_asset(sprites::SELECTOR, ROW_LEFT + self.selected as i32 * step, CHARACTER_Y)?;
        for (i, character) in CHARACTERS.iter().enumerate() {
            ctx.draw_asset(character, ROW_LEFT + i as i32 * step, CHARACTER_Y)?;
        }
        Ok(())
    }
}
