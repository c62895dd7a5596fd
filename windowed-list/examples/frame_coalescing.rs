// Example: a burst of scroll events delivered once per frame.
use windowed_list::{Coalesce, ListWindow, WindowOptions};

fn main() -> Result<(), windowed_list::ConfigError> {
    let opts = WindowOptions::new(24, 480).with_coalesce(Coalesce::PerFrame);
    let mut w = ListWindow::new(opts, 50_000)?;
    w.tracker_mut()
        .subscribe(|s| println!("delivered offset={} viewport={}", s.offset, s.viewport_extent));

    // Many wheel events arrive between two display refreshes.
    for offset in (0..=2_400).step_by(120) {
        w.on_scroll(offset);
    }
    if let Some(state) = w.flush_frame() {
        println!("render once: {:?} for {:?}", w.visible_range_for(state), state);
    }
    println!("deliveries={}", w.tracker().deliveries());
    Ok(())
}
