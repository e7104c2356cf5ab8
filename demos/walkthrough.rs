//! Walkthrough: draws two rooms, bridges them, adds a door and prints the
//! resulting state and wall count.
//!
//! Usage:
//! ```text
//! cargo run --example walkthrough
//! RUST_LOG=vaultplan=debug cargo run --example walkthrough
//! ```

use vaultplan::dungeon::MemoryDocument;
use vaultplan::geometry::{text::to_wkt, Rectangle};
use vaultplan::math::segment::Segment;
use vaultplan::synthesis::MemoryWallStore;
use vaultplan::{Dungeon, DungeonState, Permission, VaultplanError};

fn main() -> Result<(), VaultplanError> {
    // Default: WARN for everything, INFO for vaultplan.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("vaultplan=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut renders = 0;
    let renderer = |_: &DungeonState| renders += 1;
    let mut dungeon = Dungeon::load(
        MemoryDocument::new(),
        MemoryWallStore::new(),
        renderer,
        Permission::Owner,
    )?;

    dungeon.add_rectangle(Rectangle::new(0.0, 0.0, 200.0, 150.0))?;
    dungeon.add_rectangle(Rectangle::new(300.0, 0.0, 200.0, 150.0))?;
    dungeon.add_rectangle(Rectangle::new(200.0, 50.0, 100.0, 50.0))?;
    dungeon.add_door(Segment::from_coords(200.0, 60.0, 200.0, 90.0))?;

    if let Some(geometry) = &dungeon.state().geometry {
        println!("floor: {}", to_wkt(geometry));
    }
    println!("interior walls: {:?}", dungeon.state().interior_walls);
    println!("walls in store: {}", dungeon.wall_store().len());
    println!("history: {} states", dungeon.history().len());

    while dungeon.undo()? {}
    println!("after undoing everything: {:?}", dungeon.state().geometry);

    drop(dungeon);
    println!("renders: {renders}");
    Ok(())
}
