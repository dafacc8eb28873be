use ansiflow_vte::{AnsiTracker, CommandCollector, printable_width_bytes, strip};

fn main() {
    let input = b"\x1b[31mhi\x1b]8;;https://example.com\x07 there\x1b[0m";

    let mut collector = CommandCollector::new();
    for &byte in input {
        let (transition, command) = collector.next(byte);
        if transition.is_printing() {
            println!("print: {:?}", byte as char);
        }
        if let Some(command) = command {
            println!(
                "{:?}: id={:?} params={:?}",
                command.kind,
                String::from_utf8_lossy(&command.id),
                command.params
            );
        }
    }

    let mut tracker = AnsiTracker::new();
    for &byte in input {
        tracker.next(byte);
    }
    println!("dirty: {}", tracker.is_dirty());
    println!("restore: {:?}", String::from_utf8_lossy(&tracker.restore_sequence()));
    println!("stripped: {:?}", String::from_utf8_lossy(&strip(input)));
    println!("width: {}", printable_width_bytes(input));
}
