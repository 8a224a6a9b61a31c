use crate::catalog::{Accidental, PitchKey};
use crate::error::QuizError;
use crate::xml::XmlOut;

/// One-measure bass-clef MusicXML document holding a single quarter note,
/// with an accidental mark for sharps and flats.
pub fn note_document(key: &PitchKey) -> Result<String, QuizError> {
    let mut out = XmlOut::new();
    out.declaration()?;
    out.start("score-partwise", &[("version", "3.1")])?;

    out.start("part-list", &[])?;
    out.start("score-part", &[("id", "P1")])?;
    out.text("part-name", "Bass")?;
    out.end("score-part")?;
    out.end("part-list")?;

    out.start("part", &[("id", "P1")])?;
    out.start("measure", &[("number", "1")])?;

    out.start("attributes", &[])?;
    out.text("divisions", "1")?;
    out.start("key", &[])?;
    out.text("fifths", "0")?;
    out.end("key")?;
    out.start("time", &[])?;
    out.text("beats", "1")?;
    out.text("beat-type", "4")?;
    out.end("time")?;
    out.start("clef", &[])?;
    out.text("sign", "F")?;
    out.text("line", "4")?;
    out.end("clef")?;
    out.end("attributes")?;

    out.start("note", &[])?;
    out.start("pitch", &[])?;
    out.text("step", &key.step().to_string())?;
    if key.accidental != Accidental::Natural {
        out.text("alter", &key.accidental.alter().to_string())?;
    }
    out.text("octave", &key.octave.to_string())?;
    out.end("pitch")?;
    out.text("duration", "1")?;
    out.text("type", "quarter")?;
    match key.accidental {
        Accidental::Sharp => out.text("accidental", "sharp")?,
        Accidental::Flat => out.text("accidental", "flat")?,
        Accidental::Natural => {}
    }
    out.end("note")?;

    out.end("measure")?;
    out.end("part")?;
    out.end("score-partwise")?;
    out.finish()
}
