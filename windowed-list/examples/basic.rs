// Example: minimal usage, scroll updates and scroll-to helper.
use windowed_list::{Align, ListWindow, WindowOptions};

fn main() -> Result<(), windowed_list::ConfigError> {
    let mut w = ListWindow::new(WindowOptions::new(70, 500), 1_000)?;
    w.on_scroll(700);

    let mut items = Vec::new();
    w.collect_visible_items(&mut items);
    println!("total_extent={}", w.total_extent());
    println!("visible_range={:?}", w.visible_range());
    println!("first_visible={:?}", items.first());

    let off = w.scroll_to_index(999, Align::End);
    println!("after scroll_to_index: offset={off} range={:?}", w.visible_range());
    Ok(())
}
