//! Trajectory interpolation demo.
//!
//! Replays a small recorded trajectory at a mix of sample and in-between
//! times. Interpolated results (times that are not recorded samples) are
//! highlighted in green.

use std::collections::BTreeMap;
use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use nalgebra::{Quaternion, Vector3};
use serde::Serialize;

use pose_interp_rs::{
    euclidean_distance, interpolate_at, parallel_for_each, Pose, TimeKey, TimedPose, Trajectory,
};

#[derive(Parser, Debug)]
#[command(name = "interp_demo")]
#[command(about = "Pose trajectory interpolation demo", long_about = None)]
struct Args {
    /// Re-run every query against an ordered-map backing and compare
    #[arg(long)]
    check_map: bool,

    /// Interpolate this many evenly spread query times through the
    /// parallel for-each utility and report the elapsed time
    #[arg(long, default_value = "0")]
    batch: usize,

    /// Emit results as JSON instead of the colored table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct QueryRecord {
    time: f64,
    position: [f64; 3],
    /// Orientation components in (w, x, y, z) order.
    orientation: [f64; 4],
    /// Straight-line distance from the trajectory start position.
    distance_from_start: f64,
    interpolated: bool,
}

fn demo_trajectory() -> Result<Trajectory> {
    let mut trajectory = Trajectory::new();
    trajectory.push(
        0.0,
        Pose::new(Vector3::new(0.0, 0.0, 0.0), Quaternion::new(1.0, 0.0, 0.0, 0.0)),
    )?;
    trajectory.push(
        1.0,
        Pose::new(
            Vector3::new(1.0, 0.0, 0.0),
            Quaternion::new(0.7071, 0.0, 0.7071, 0.0),
        ),
    )?;
    trajectory.push(
        2.0,
        Pose::new(Vector3::new(1.0, 1.0, 0.0), Quaternion::new(0.0, 0.0, 1.0, 0.0)),
    )?;
    trajectory.push(
        3.0,
        Pose::new(
            Vector3::new(0.0, 1.0, 0.0),
            Quaternion::new(0.0, 0.0, 0.7071, 0.7071),
        ),
    )?;
    trajectory.push(
        4.0,
        Pose::new(Vector3::new(0.0, 0.0, 1.0), Quaternion::new(0.0, 0.0, 0.0, 1.0)),
    )?;
    Ok(trajectory)
}

fn is_sample_time(trajectory: &Trajectory, time: f64) -> bool {
    trajectory
        .samples()
        .iter()
        .any(|tp| (tp.timestamp - time).abs() < 1e-9)
}

fn query_record(trajectory: &Trajectory, result: &TimedPose, interpolated: bool) -> QueryRecord {
    let p = result.pose.position;
    let q = result.pose.orientation;
    let start = trajectory
        .first()
        .map(|tp| tp.pose.position)
        .unwrap_or_else(Vector3::zeros);
    let distance_from_start = euclidean_distance(
        &[start.x, start.y, start.z],
        &[p.x, p.y, p.z],
    )
    .unwrap_or(0.0);
    QueryRecord {
        time: result.timestamp,
        position: [p.x, p.y, p.z],
        orientation: [q.w, q.i, q.j, q.k],
        distance_from_start,
        interpolated,
    }
}

fn print_record(record: &QueryRecord) {
    if record.interpolated {
        print!("{}", SetForegroundColor(Color::Green));
    }
    println!("Time: {}", record.time);
    println!(
        "Position: [{:.4}, {:.4}, {:.4}]  (distance from start: {:.4})",
        record.position[0], record.position[1], record.position[2], record.distance_from_start
    );
    println!(
        "Orientation: [{:.4}, {:.4}, {:.4}, {:.4}]",
        record.orientation[0], record.orientation[1], record.orientation[2], record.orientation[3]
    );
    if record.interpolated {
        print!("{}", ResetColor);
    }
    println!("----------------------------------------");
}

fn run_batch(trajectory: &Trajectory, count: usize) {
    let (start, end) = trajectory.time_range().expect("trajectory is not empty");
    let span = end - start;
    let mut results: Vec<(f64, Option<TimedPose>)> = (0..count)
        .map(|i| (start + span * (i as f64 + 0.5) / count as f64, None))
        .collect();

    let started = Instant::now();
    parallel_for_each(&mut results, |slot| {
        slot.1 = interpolate_at(trajectory.samples(), slot.0).ok();
    });
    let elapsed = started.elapsed();

    let resolved = results.iter().filter(|slot| slot.1.is_some()).count();
    println!(
        "Batch: interpolated {}/{} poses in {:.2?}",
        resolved, count, elapsed
    );
}

fn check_map_agreement(trajectory: &Trajectory, test_times: &[f64]) {
    let map: BTreeMap<TimeKey, Pose> = trajectory
        .samples()
        .iter()
        .map(|tp| (TimeKey(tp.timestamp), tp.pose))
        .collect();

    let mut mismatches = 0;
    for &time in test_times {
        let from_slice = interpolate_at(trajectory.samples(), time);
        let from_map = interpolate_at(&map, time);
        if from_slice != from_map {
            mismatches += 1;
            eprintln!("Backing disagreement at t={time}");
        }
    }
    if mismatches == 0 {
        println!(
            "Ordered-map backing agrees with the contiguous backing on all {} queries",
            test_times.len()
        );
    }
}

fn ts_now() -> String {
    Utc::now().format("%H:%M:%S").to_string()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let trajectory = demo_trajectory()?;

    println!("[{}] pose interpolation demo", ts_now());

    let test_times = [0.0, 0.5, 1.0, 1.75, 2.5, 3.5, 4.0];
    let mut records = Vec::with_capacity(test_times.len());
    for &time in &test_times {
        let result = interpolate_at(trajectory.samples(), time)?;
        let interpolated = !is_sample_time(&trajectory, time);
        records.push(query_record(&trajectory, &result, interpolated));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            print_record(record);
        }
    }

    // Queries outside the recorded range are rejected, not extrapolated.
    let (_, end) = trajectory.time_range().expect("trajectory is not empty");
    if let Err(err) = interpolate_at(trajectory.samples(), end + 1.0) {
        println!("Query at t={}: {}", end + 1.0, err);
    }

    if args.check_map {
        check_map_agreement(&trajectory, &test_times);
    }

    if args.batch > 0 {
        run_batch(&trajectory, args.batch);
    }

    Ok(())
}
