use std::{
    env, thread,
    time::{Duration, SystemTime},
};

use campusnav::{
    animation::{AnimatorConfig, MarkerAnimator, PlaybackState},
    routing::{RouteQuery, resolve, synthesize},
    services::{
        build::build_map,
        persistence::{load_map, save_map},
    },
    structures::{Config, NodeId},
};

fn main() {
    tracing_subscriber::fmt::init();

    let config = match Config::load("config.yml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let map = match load_map(&config.build.output) {
        Ok(map) => map,
        Err(_) => {
            let map = match build_map(&config.build) {
                Some(map) => map,
                None => {
                    eprintln!("Failed to build the campus map");
                    return;
                }
            };
            if let Err(e) = save_map(&map, &config.build.output) {
                eprintln!("{e}");
            }
            map
        }
    };

    let args: Vec<String> = env::args().collect();
    let (start, end) = match (
        args.get(1).and_then(|a| a.parse::<u32>().ok()),
        args.get(2).and_then(|a| a.parse::<u32>().ok()),
    ) {
        (Some(start), Some(end)) => (NodeId(start), NodeId(end)),
        _ => {
            eprintln!("Usage: campus-nav <start-node-id> <end-node-id>");
            return;
        }
    };

    let before = SystemTime::now();
    let query = RouteQuery { start, end };
    let route = match resolve(&map, &query) {
        Some(route) => route,
        None => {
            println!("No route found between {start} and {end}");
            return;
        }
    };
    match before.elapsed() {
        Ok(elapsed) => println!("Resolved in {}ms", elapsed.as_millis()),
        Err(e) => println!("Went backward ?? {}", e),
    }

    println!(
        "Route: {} points, length {:.2} units",
        route.points.len(),
        route.length
    );
    for step in synthesize(&route, &map) {
        println!("- {}: {}", step.title, step.detail);
    }

    let mut animator = MarkerAnimator::create(
        &route,
        AnimatorConfig {
            duration_ms: config.default_animation.duration_ms,
            speed_multiplier: config.default_animation.speed_multiplier,
        },
    );
    animator.on_segment_change(|idx| println!("Entering segment {idx}"));
    animator.on_complete(|| println!("Marker reached the destination"));

    animator.play();
    while animator.state() == PlaybackState::Playing {
        animator.tick();
        thread::sleep(Duration::from_millis(16));
    }
    animator.destroy();
}
