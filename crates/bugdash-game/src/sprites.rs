//! Image identifiers and board geometry.

use bugdash_engine::assets::AssetManifest;
use bugdash_engine::level::CellSize;

pub const STONE: &str = "images/stone-block.png";
pub const WATER: &str = "images/water-block.png";
pub const GRASS: &str = "images/grass-block.png";

pub const BUG: &str = "images/enemy-bug.png";
pub const BUG_REVERSED: &str = "images/enemy-bug-r.png";

pub const GEM: &str = "images/Gem-Blue1.png";
pub const HEART: &str = "images/Heart1.png";
pub const ROCK: &str = "images/Rock1.png";
pub const SELECTOR: &str = "images/Selector.png";

pub const ARROW_UP: &str = "images/aUp.png";
pub const ARROW_LEFT: &str = "images/aLeft.png";
pub const ARROW_DOWN: &str = "images/aDown.png";
pub const ARROW_RIGHT: &str = "images/aRight.png";

pub const BUTTON_EASY: &str = "images/green_button02.png";
pub const BUTTON_MEDIUM: &str = "images/yellow_button02.png";
pub const BUTTON_HARD: &str = "images/red_button01.png";

pub const BACKGROUND: &str = "images/background-11.png";

/// Selectable characters, in start-screen order.
pub const CHARACTERS: [&str; 5] = [
    "images/char-boy.png",
    "images/char-cat-girl.png",
    "images/char-horn-girl.png",
    "images/char-pink-girl.png",
    "images/char-princess-girl.png",
];

pub const ROWS: usize = 8;
pub const COLS: usize = 8;
pub const CELL: CellSize = CellSize::new(101, 83);

/// Sprites are taller than a cell; this lifts them onto the block face.
pub const SPRITE_LIFT: i32 = 25;

/// Row images of the board, top to bottom.
pub fn row_images() -> [&'static str; ROWS] {
    [WATER, GRASS, GRASS, GRASS, GRASS, GRASS, GRASS, STONE]
}

/// Top-left pixel of a sprite standing on `(row, col)`.
pub fn sprite_origin(row: usize, col: usize) -> (i32, i32) {
    let x = col as i32 * CELL.width as i32;
    let y = row as i32 * CELL.height as i32 - SPRITE_LIFT;
    (x, y)
}

/// Every image the game draws.
pub fn manifest() -> AssetManifest {
    let [boy, cat_girl, horn_girl, pink_girl, princess] = CHARACTERS;
    [
        STONE, WATER, GRASS, BUG, boy, cat_girl, horn_girl, pink_girl, princess,
        BUG_REVERSED, GEM, HEART, ROCK, SELECTOR, ARROW_LEFT, ARROW_DOWN, ARROW_RIGHT,
        ARROW_UP, BUTTON_EASY, BUTTON_MEDIUM, BUTTON_HARD, BACKGROUND,
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_lists_every_image_once() {
        let manifest = manifest();
        assert_eq!(manifest.len(), 22);
        for id in row_images().into_iter().chain(CHARACTERS) {
            assert!(manifest.contains(id), "{id} missing");
        }
        assert_eq!(manifest.iter().next().map(|id| id.as_str()), Some(STONE));
    }

    #[test]
    fn bundled_images_decode() {
        use bugdash_engine::assets::{AssetLoader, FileLoader};

        let loader = FileLoader::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"));
        for id in manifest().iter() {
            let image = loader.load(id).unwrap_or_else(|e| panic!("{e}"));
            assert!(image.width() > 0 && image.height() > 0, "{id} is empty");
        }
        let grass = loader.load(&GRASS.into()).unwrap();
        assert_eq!((grass.width(), grass.height()), (101, 171));
    }

    #[test]
    fn sprites_sit_on_their_cell() {
        assert_eq!(sprite_origin(0, 0), (0, -25));
        assert_eq!(sprite_origin(3, 2), (202, 224));
    }
}
