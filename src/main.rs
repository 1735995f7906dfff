//! Candy Slicer demo entry point
//!
//! The browser build is driven from JavaScript through `WebApp`. Natively this
//! plays one scripted Beginner round headlessly and prints the ranking.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use candy_slicer::audio::LogSink;
    use candy_slicer::consts::{PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH};
    use candy_slicer::persistence::MemoryStore;
    use candy_slicer::platform::{Clock, ManualClock};
    use candy_slicer::sim::SoundCue;
    use candy_slicer::{App, Difficulty, NavEvent, Screen};
    use glam::Vec2;

    env_logger::init();
    log::info!("Candy Slicer (native) starting...");

    let clock = ManualClock::new(0.0);
    let mut app = App::new(MemoryStore::new(), LogSink::new(), 2024);
    app.navigate(NavEvent::StartGame(Difficulty::Beginner), clock.now_ms());

    let center = Vec2::new(PLAY_AREA_WIDTH / 2.0, PLAY_AREA_HEIGHT / 2.0);
    // Above the lane; always a miss
    let sky = Vec2::new(PLAY_AREA_WIDTH / 2.0, 4.0);

    let mut frame = 0u32;
    while app.screen().is_playing() {
        app.frame(clock.now_ms());
        frame += 1;
        if frame % 90 == 0 {
            app.pointer(sky, clock.now_ms());
        } else if frame % 20 == 0 {
            app.pointer(center, clock.now_ms());
        }
        clock.advance(1000.0 / 60.0);
    }

    let Screen::Result {
        score, name_prompt, ..
    } = app.screen()
    else {
        log::warn!("Round ended on {}", app.screen().name());
        return;
    };
    println!("Round over after {frame} frames: score {score}");
    println!(
        "Sounds: {} slices, {} combos, {} misses, {} BGM phrases",
        app.audio().count(SoundCue::Slice),
        app.audio().count(SoundCue::Combo),
        app.audio().count(SoundCue::Miss),
        app.audio().count(SoundCue::Bgm),
    );

    if name_prompt {
        app.submit_name("Demo", clock.now_ms());
    }

    println!("\nBeginner ranking:");
    for (rank, entry) in app
        .rankings()
        .get(Difficulty::Beginner)
        .entries()
        .iter()
        .enumerate()
    {
        println!("{:>2}. {:<10} {:>6}  {}", rank + 1, entry.name, entry.score, entry.date);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::wasm_start`, this is just to satisfy the compiler
}
