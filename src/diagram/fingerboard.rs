//! First-position cello fingerboard, nut at the top, strings C G D A from
//! left to right.

use crate::catalog::notes::CELLO_STRINGS;
use crate::error::QuizError;
use crate::xml::XmlOut;

pub const WIDTH: f32 = 150.0;
pub const HEIGHT: f32 = 300.0;

const STRING_X: [f32; 4] = [30.0, 60.0, 90.0, 120.0];
const FINGER_Y: [f32; 5] = [20.0, 80.0, 120.0, 160.0, 200.0];
const DOT_RADIUS: f32 = 12.0;
const STRING_HIT_SLOP: f32 = 15.0;
const FINGER_HIT_SLOP: f32 = 20.0;

pub fn string_x(string: &str) -> Option<f32> {
    CELLO_STRINGS
        .iter()
        .position(|s| *s == string)
        .map(|i| STRING_X[i])
}

/// Y of a finger slot. Accepts a bare digit or a full label like `"0 (Open)"`.
pub fn finger_y(finger: &str) -> Option<f32> {
    let digit: usize = finger.split(' ').next()?.parse().ok()?;
    FINGER_Y.get(digit).copied()
}

/// Map a click on the board to `(string, finger digit)`.
pub fn hit_test(x: f32, y: f32) -> Option<(String, String)> {
    let (string_idx, dx) = STRING_X
        .iter()
        .enumerate()
        .map(|(i, sx)| (i, (x - sx).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))?;
    if dx > STRING_HIT_SLOP {
        return None;
    }

    let (finger, dy) = FINGER_Y
        .iter()
        .enumerate()
        .map(|(i, fy)| (i, (y - fy).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))?;
    if dy > FINGER_HIT_SLOP {
        return None;
    }

    Some((CELLO_STRINGS[string_idx].to_string(), finger.to_string()))
}

fn num(v: f32) -> String {
    format!("{}", v)
}

/// SVG for the board. The string is highlighted when both `string` and
/// `finger` resolve; a dot marks stopped (non-open) notes. With `clickable`
/// every slot gets a transparent target carrying `data-string` and
/// `data-finger`.
pub fn render_svg(
    string: Option<&str>,
    finger: Option<&str>,
    clickable: bool,
) -> Result<String, QuizError> {
    let mut out = XmlOut::new();
    out.start(
        "svg",
        &[
            ("xmlns", "http://www.w3.org/2000/svg"),
            ("width", num(WIDTH).as_str()),
            ("height", num(HEIGHT).as_str()),
            ("viewBox", "0 0 150 300"),
        ],
    )?;

    out.empty("path", &[("d", "M 20 20 L 130 20 L 135 300 L 15 300 Z"), ("fill", "#333")])?;
    out.empty(
        "rect",
        &[("x", "20"), ("y", "15"), ("width", "110"), ("height", "10"), ("fill", "#666")],
    )?;

    for x in STRING_X {
        let x = num(x);
        out.empty(
            "line",
            &[
                ("x1", x.as_str()),
                ("y1", "20"),
                ("x2", x.as_str()),
                ("y2", "300"),
                ("stroke", "#999"),
                ("stroke-width", "2"),
            ],
        )?;
    }

    let finger = finger.filter(|f| !f.split(' ').next().unwrap_or("").is_empty());
    let active = string.and_then(string_x).zip(finger);
    if let Some((x, finger)) = active {
        let xs = num(x);
        out.empty(
            "line",
            &[
                ("x1", xs.as_str()),
                ("y1", "20"),
                ("x2", xs.as_str()),
                ("y2", "300"),
                ("stroke", "#FFD700"),
                ("stroke-width", "4"),
                ("opacity", "0.6"),
            ],
        )?;
        let prefix = finger.split(' ').next().unwrap_or("");
        if prefix != "0" {
            let y = finger_y(finger).unwrap_or(FINGER_Y[0]);
            out.empty(
                "circle",
                &[
                    ("cx", xs.as_str()),
                    ("cy", num(y).as_str()),
                    ("r", num(DOT_RADIUS).as_str()),
                    ("fill", "#FF4500"),
                    ("stroke", "white"),
                    ("stroke-width", "2"),
                ],
            )?;
        }
    }

    if clickable {
        for (string, x) in CELLO_STRINGS.iter().zip(STRING_X) {
            for (digit, y) in FINGER_Y.iter().enumerate() {
                out.empty(
                    "circle",
                    &[
                        ("cx", num(x).as_str()),
                        ("cy", num(*y).as_str()),
                        ("r", num(DOT_RADIUS).as_str()),
                        ("fill", "transparent"),
                        ("data-string", *string),
                        ("data-finger", digit.to_string().as_str()),
                    ],
                )?;
            }
        }
    }

    out.end("svg")?;
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        assert_eq!(string_x("C"), Some(30.0));
        assert_eq!(string_x("A"), Some(120.0));
        assert_eq!(string_x("E"), None);
        assert_eq!(finger_y("0 (Open)"), Some(20.0));
        assert_eq!(finger_y("4"), Some(200.0));
        assert_eq!(finger_y("5"), None);
    }

    #[test]
    fn test_hit_test() {
        assert_eq!(hit_test(31.0, 82.0), Some(("C".to_string(), "1".to_string())));
        assert_eq!(hit_test(118.0, 18.0), Some(("A".to_string(), "0".to_string())));
        assert_eq!(hit_test(90.0, 205.0), Some(("D".to_string(), "4".to_string())));
        assert_eq!(hit_test(0.0, 80.0), None);
        assert_eq!(hit_test(60.0, 280.0), None);
    }

    #[test]
    fn test_open_string_highlights_without_dot() {
        let svg = render_svg(Some("G"), Some("0 (Open)"), false).unwrap();
        assert!(svg.contains("#FFD700"));
        assert!(!svg.contains("#FF4500"));
    }

    #[test]
    fn test_stopped_note_draws_dot() {
        let svg = render_svg(Some("D"), Some("3"), false).unwrap();
        assert!(svg.contains("#FFD700"));
        assert!(svg.contains(r#"cx="90" cy="160""#));
    }

    #[test]
    fn test_no_highlight_without_both_parts() {
        let svg = render_svg(Some("D"), None, false).unwrap();
        assert!(!svg.contains("#FFD700"));
        let svg = render_svg(Some("X"), Some("1"), false).unwrap();
        assert!(!svg.contains("#FFD700"));
        let svg = render_svg(Some("C"), Some(""), false).unwrap();
        assert!(!svg.contains("#FFD700"));
        assert!(!svg.contains("#FF4500"));
        let svg = render_svg(Some("C"), Some(" (Open)"), false).unwrap();
        assert!(!svg.contains("#FFD700"));
    }

    #[test]
    fn test_clickable_targets() {
        let svg = render_svg(None, None, true).unwrap();
        assert_eq!(svg.matches("data-finger").count(), 20);
        assert!(svg.contains(r#"data-string="C" data-finger="0""#));
    }
}
