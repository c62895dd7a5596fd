// Example: a food log list filtered, sorted and rendered through a list surface.
use tracing_subscriber::EnvFilter;
use windowed_list::WindowOptions;
use windowed_list_surface::{ListSurface, OrderingPipeline, Query, SortDirection};

#[derive(Clone, Debug)]
struct FoodEntry {
    id: u64,
    name: String,
    calories: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let foods = ["Oatmeal", "Banana", "Greek yogurt", "Chicken salad", "Apple"];
    let log: Vec<FoodEntry> = (0..10_000u64)
        .map(|id| FoodEntry {
            id,
            name: format!("{} #{id}", foods[id as usize % foods.len()]),
            calories: ((id * 37) % 900) as u32,
        })
        .collect();

    let pipeline = OrderingPipeline::new()
        .with_text_field("name", |e: &FoodEntry| e.name.as_str())
        .with_sort_key("calories", |e: &FoodEntry| e.calories)
        .with_sort_by("name", |a: &FoodEntry, b: &FoodEntry| a.name.cmp(&b.name));

    let mut surface: ListSurface<FoodEntry, String> = ListSurface::new(
        WindowOptions::new(70, 500),
        |e: &FoodEntry, _| format!("{:<24} {:>4} kcal", e.name, e.calories),
    )?
    .with_item_key(|e: &FoodEntry, _| Some(e.id))
    .with_on_scroll(|offset| println!("-- scrolled to {offset}"));

    let mut query = Query::default()
        .with_filter("apple")
        .with_sort("calories", SortDirection::Ascending);

    let ordered = pipeline.apply(&log, &query)?;
    let frame = surface.render(&ordered);
    println!(
        "{} matches, spacer={} rendering {:?}",
        ordered.iter().count(),
        frame.spacer_extent,
        frame.range
    );
    for it in &frame.items {
        println!("{:>6} {}", it.offset, it.visual);
    }

    surface.on_scroll(700);
    query.toggle_direction();
    let ordered = pipeline.apply(&log, &query)?;
    let frame = surface.render(&ordered);
    println!(
        "descending: range={:?} entered={} exited={}",
        frame.range,
        frame.entered.len(),
        frame.exited.len()
    );
    for it in &frame.items {
        println!("{:>6} {}", it.offset, it.visual);
    }
    Ok(())
}
