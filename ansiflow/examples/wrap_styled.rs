//! Pipe a styled paragraph through every transformation.
use ansiflow::{
    Indent, Linkify, Pad, WordWrap, WordWrapOptions, indent_str, truncate_str, wrap_str,
};

fn main() -> ansiflow::Result<()> {
    let text = "Hello \x1b[1mansiflow\x1b[0m! Docs live at https://example.com/docs \
                and \x1b[32mthe changelog sits in ./docs/CHANGELOG.md\x1b[0m.";

    let mut words = WordWrap::new(WordWrapOptions::new(24).break_ansi(true))
        .with_break_fill(' ', 2);
    words.write_str(text)?;
    let wrapped = words.into_string()?;
    println!("{wrapped}\n");

    let mut linkify = Linkify::new();
    linkify.write_str(&wrapped)?;
    let linked = linkify.into_string()?;

    let mut pad = Pad::new(28).with_fill('.');
    pad.write_str(&linked)?;
    println!("{}\n", pad.into_string()?);

    let mut indent = Indent::new(4);
    indent.write_str(&wrap_str(text, 30))?;
    println!("{}\n", indent.into_string()?);

    println!("{}", indent_str(&truncate_str(text, 16, "…"), 2));
    Ok(())
}
