//! Piano keyboard from C2 to E4. Key ids use the staff spelling
//! (`"c/2"`); black keys answer to both the sharp and the flat name.

use serde::Serialize;

use crate::error::QuizError;
use crate::xml::XmlOut;

pub const WHITE_WIDTH: f32 = 20.0;
pub const WHITE_HEIGHT: f32 = 100.0;
pub const BLACK_WIDTH: f32 = 12.0;
pub const BLACK_HEIGHT: f32 = 60.0;

const OCTAVES: [i32; 3] = [2, 3, 4];
const LETTERS: [char; 7] = ['c', 'd', 'e', 'f', 'g', 'a', 'b'];
const HIGHLIGHT: &str = "#FF4500";

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KeyColor {
    White,
    Black,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Key {
    pub color: KeyColor,
    pub x: f32,
    pub ids: Vec<String>,
}

impl Key {
    fn width(&self) -> f32 {
        match self.color {
            KeyColor::White => WHITE_WIDTH,
            KeyColor::Black => BLACK_WIDTH,
        }
    }

    fn height(&self) -> f32 {
        match self.color {
            KeyColor::White => WHITE_HEIGHT,
            KeyColor::Black => BLACK_HEIGHT,
        }
    }

    fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width() && y >= 0.0 && y < self.height()
    }

    pub fn answers_to(&self, pitch_key: &str) -> bool {
        self.ids.iter().any(|id| id == pitch_key)
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct KeyboardLayout {
    pub width: f32,
    pub white: Vec<Key>,
    pub black: Vec<Key>,
}

fn black_ids(letter: char, octave: i32) -> Vec<String> {
    let (sharp, flat) = match letter {
        'c' => ("c#", "db"),
        'd' => ("d#", "eb"),
        'f' => ("f#", "gb"),
        'g' => ("g#", "ab"),
        'a' => ("a#", "bb"),
        _ => return Vec::new(),
    };
    vec![format!("{}/{}", sharp, octave), format!("{}/{}", flat, octave)]
}

impl KeyboardLayout {
    pub fn new() -> Self {
        let mut white = Vec::new();
        let mut black = Vec::new();
        let mut x = 0.0;

        for octave in OCTAVES {
            for letter in LETTERS {
                if octave == 4 && matches!(letter, 'f' | 'g' | 'a' | 'b') {
                    continue;
                }

                white.push(Key {
                    color: KeyColor::White,
                    x,
                    ids: vec![format!("{}/{}", letter, octave)],
                });

                let ids = black_ids(letter, octave);
                if !ids.is_empty() {
                    black.push(Key {
                        color: KeyColor::Black,
                        x: x + WHITE_WIDTH - BLACK_WIDTH / 2.0,
                        ids,
                    });
                }

                x += WHITE_WIDTH;
            }
        }

        KeyboardLayout {
            width: x,
            white,
            black,
        }
    }

    /// Black keys sit on top, so they win overlapping clicks. Returns the
    /// key's first id.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&str> {
        self.black
            .iter()
            .chain(self.white.iter())
            .find(|k| k.contains(x, y))
            .and_then(|k| k.ids.first())
            .map(String::as_str)
    }

    /// SVG for the keyboard; `active_note` is coloured only when `active`.
    pub fn render_svg(&self, active_note: Option<&str>, active: bool) -> Result<String, QuizError> {
        let target = active_note
            .filter(|_| active)
            .map(|n| n.to_lowercase());

        let mut out = XmlOut::new();
        let width = format!("{}", self.width);
        let height = format!("{}", WHITE_HEIGHT);
        out.start(
            "svg",
            &[
                ("xmlns", "http://www.w3.org/2000/svg"),
                ("width", width.as_str()),
                ("height", height.as_str()),
            ],
        )?;

        for key in self.white.iter().chain(self.black.iter()) {
            let lit = target.as_deref().is_some_and(|t| key.answers_to(t));
            let fill = match (lit, key.color) {
                (true, _) => HIGHLIGHT,
                (false, KeyColor::White) => "white",
                (false, KeyColor::Black) => "black",
            };
            let x = format!("{}", key.x);
            let w = format!("{}", key.width());
            let h = format!("{}", key.height());
            out.empty(
                "rect",
                &[
                    ("x", x.as_str()),
                    ("y", "0"),
                    ("width", w.as_str()),
                    ("height", h.as_str()),
                    ("fill", fill),
                    ("stroke", "black"),
                    ("stroke-width", "1"),
                    ("data-key", key.ids[0].as_str()),
                ],
            )?;
        }

        out.end("svg")?;
        out.finish()
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        KeyboardLayout::new()
    }
}
