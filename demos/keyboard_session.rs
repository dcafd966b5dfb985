// Example: a touch session with browser chrome and a virtual keyboard.
use viewport_stabilizer::{
    HeightChange, Orientation, Outcome, Pointer, Publisher, Stabilizer, StabilizerOptions,
    ViewportSample,
};

struct Printer;

impl Publisher for Printer {
    fn set_property(&mut self, name: &'static str, value: &str) {
        println!("    set {name} = {value}");
    }

    fn remove_property(&mut self, name: &'static str) {
        println!("    remove {name}");
    }

    fn height_changed(&mut self, change: HeightChange) {
        println!("    notify height={}", change.height);
    }
}

fn frame(height: f64) -> ViewportSample {
    ViewportSample::new(height)
        .with_width(Some(390.0))
        .with_orientation(Some(Orientation::Portrait))
        .with_screen_height(Some(844.0))
        .with_visual_viewport_height(Some(height))
}

fn main() {
    let mut s = Stabilizer::new(StabilizerOptions::new());
    s.set_pointer(Pointer::Coarse);
    let mut out = Printer;

    // (now_ms, visual viewport height)
    let script = [
        (0u64, 664.0),
        // Address bar hides: growth above the floor is ignored.
        (200, 745.0),
        (216, 830.0),
        // Keyboard opens in a few animation frames.
        (1_000, 600.0),
        (1_016, 420.0),
        (1_032, 380.0),
        // Keyboard closes.
        (3_000, 664.0),
    ];

    let mut now_ms = 0u64;
    for (at, height) in script {
        while now_ms < at {
            now_ms += 16;
            if let Some(h) = s.tick(now_ms, &mut out) {
                println!("t={now_ms}ms settled at {h}");
            }
        }
        let outcome = s.update_sample(&frame(height), at, &mut out);
        println!("t={at}ms h={height} -> {outcome:?}");
        if let Outcome::Deferred { due_ms, .. } = outcome {
            println!("    commit due at {due_ms}ms");
        }
    }
    s.tick(u64::MAX, &mut out);

    s.teardown(&mut out);
}
