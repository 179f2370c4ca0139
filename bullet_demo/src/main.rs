// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bullet chart demo.
//!
//! Renders five KPI bullets, samples frames of their entering and update transitions, and
//! writes the snapshots (plus a right-oriented variant) into one HTML report.
mod html;
mod style;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bullet_charts::{BulletChart, BulletDatum};
use bullet_scene::{Attr, NodeId, Scene, SvgOptions, Tag, Translate};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::html::HtmlSection;
use crate::style::BulletStyle;

const CANVAS_WIDTH: f64 = 960.0;
const MARGIN_LEFT: f64 = 120.0;
const MARGIN_TOP: f64 = 5.0;
const ROW_HEIGHT: f64 = 50.0;
const BULLET_WIDTH: f64 = 800.0;
const BULLET_HEIGHT: f64 = 25.0;

#[derive(Debug, Parser)]
#[command(name = "bullet_demo")]
#[command(about = "Render animated bullet charts into an HTML report", long_about = None)]
struct Args {
    /// Report file to write.
    #[arg(short, long, value_name = "FILE", default_value = "bullet_demo.html")]
    out: PathBuf,

    /// Transition duration in milliseconds.
    #[arg(short, long, default_value_t = 1000)]
    duration_ms: u64,

    /// Number of intermediate frames sampled from the update transition.
    #[arg(short, long, default_value_t = 2)]
    frames: u32,

    /// Seed for the randomized update.
    #[arg(short, long, default_value_t = 7)]
    seed: u64,
}

#[derive(Clone, Debug)]
struct Kpi {
    title: &'static str,
    subtitle: &'static str,
    datum: BulletDatum,
}

fn kpis() -> Vec<Kpi> {
    vec![
        Kpi {
            title: "Revenue",
            subtitle: "US$, in thousands",
            datum: BulletDatum::new([150.0, 225.0, 300.0], [250.0], [220.0, 270.0]),
        },
        Kpi {
            title: "Profit",
            subtitle: "%",
            datum: BulletDatum::new([20.0, 25.0, 30.0], [26.0], [21.0, 23.0]),
        },
        Kpi {
            title: "Order Size",
            subtitle: "US$, average",
            datum: BulletDatum::new([350.0, 500.0, 600.0], [550.0], [100.0, 320.0]),
        },
        Kpi {
            title: "New Customers",
            subtitle: "count",
            datum: BulletDatum::new([1400.0, 2000.0, 2500.0], [2100.0], [1000.0, 1650.0]),
        },
        Kpi {
            title: "Satisfaction",
            subtitle: "out of 5",
            datum: BulletDatum::new([3.5, 4.25, 5.0], [4.4], [3.2, 4.7]),
        },
    ]
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let duration = Duration::from_millis(args.duration_ms);

    let mut kpis = kpis();
    let options = SvgOptions::new()
        .with_size(CANVAS_WIDTH, MARGIN_TOP + ROW_HEIGHT * kpis.len() as f64)
        .with_stylesheet(BulletStyle::default().stylesheet());
    let mut sections = Vec::new();

    let (mut scene, containers) = board(&kpis)?;
    let mut chart = BulletChart::new();
    chart
        .set_width(BULLET_WIDTH)
        .set_height(BULLET_HEIGHT)
        .set_duration(duration);

    chart.render(&mut scene, selection(&containers, &kpis))?;
    scene.advance_by(duration / 2)?;
    sections.push(snapshot(
        &scene,
        &options,
        format!("Initial render, t = {} ms", (duration / 2).as_millis()),
        "Nothing was rendered before, so every component grows out of zero and the ticks fade in.",
    ));
    scene.advance_by(duration)?;
    sections.push(snapshot(
        &scene,
        &options,
        "Initial render, settled".into(),
        "Ranges in grey, measures in blue, the target marker in black.",
    ));

    let mut rng = StdRng::seed_from_u64(args.seed);
    for kpi in &mut kpis {
        kpi.datum = randomize(&kpi.datum, &mut rng);
    }
    let start = scene.timeline.now();
    chart.render(&mut scene, selection(&containers, &kpis))?;
    for k in 1..=args.frames {
        let at = start + duration * k / (args.frames + 1);
        scene.advance_to(at)?;
        sections.push(snapshot(
            &scene,
            &options,
            format!("Randomized update, t = {} ms", (at - start).as_millis()),
            "Components move from the previous scale to the new one; ticks are matched by label.",
        ));
    }
    scene.advance_to(start + duration)?;
    info!(pending = scene.timeline.pending(), "update settled");
    sections.push(snapshot(
        &scene,
        &options,
        "Randomized update, settled".into(),
        "Ticks that no longer fit the new domain have been removed.",
    ));

    let (mut mirrored, containers) = board(&kpis)?;
    let mut right = BulletChart::new();
    right
        .set_orient("right")
        .set_width(BULLET_WIDTH)
        .set_height(BULLET_HEIGHT);
    right.render(&mut mirrored, selection(&containers, &kpis))?;
    sections.push(snapshot(
        &mirrored,
        &options,
        "Right-oriented".into(),
        "The same data with orient = right: zero sits on the right and values grow leftwards.",
    ));

    let html = html::render_report("Bullet charts", &sections);
    std::fs::write(&args.out, html)
        .with_context(|| format!("write {}", args.out.display()))?;
    info!(path = %args.out.display(), sections = sections.len(), "wrote report");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Builds one `g.bullet` container per KPI, stacked vertically, each with its title.
fn board(kpis: &[Kpi]) -> Result<(Scene, Vec<NodeId>)> {
    let mut scene = Scene::new();
    let doc = &mut scene.document;
    let mut containers = Vec::with_capacity(kpis.len());
    for (i, kpi) in kpis.iter().enumerate() {
        let g = doc.append(doc.root(), Tag::G)?;
        doc.set_attr(g, Attr::Class, "bullet")?;
        doc.set_attr(
            g,
            Attr::Transform,
            Translate::new(MARGIN_LEFT, MARGIN_TOP + ROW_HEIGHT * i as f64),
        )?;

        let label = doc.append(g, Tag::G)?;
        doc.set_attr(label, Attr::Transform, Translate::new(-6.0, BULLET_HEIGHT / 2.0))?;
        let title = doc.append(label, Tag::Text)?;
        doc.set_attr(title, Attr::Class, "title")?;
        doc.set_attr(title, Attr::TextAnchor, "end")?;
        doc.set_text(title, kpi.title)?;
        let subtitle = doc.append(label, Tag::Text)?;
        doc.set_attr(subtitle, Attr::Class, "subtitle")?;
        doc.set_attr(subtitle, Attr::TextAnchor, "end")?;
        doc.set_attr(subtitle, Attr::Dy, "1em")?;
        doc.set_text(subtitle, kpi.subtitle)?;

        containers.push(g);
    }
    Ok((scene, containers))
}

fn selection<'a>(
    containers: &'a [NodeId],
    kpis: &'a [Kpi],
) -> impl Iterator<Item = (NodeId, &'a BulletDatum)> {
    containers
        .iter()
        .copied()
        .zip(kpis.iter().map(|kpi| &kpi.datum))
}

/// Jitters every value by up to 10% of the largest range, never below zero.
fn randomize(datum: &BulletDatum, rng: &mut StdRng) -> BulletDatum {
    let k = datum.ranges.iter().copied().fold(0.0, f64::max) * 0.2;
    let mut jitter = |values: &[f64]| -> Vec<f64> {
        values
            .iter()
            .map(|&v| (v + k * rng.gen_range(-0.5_f64..0.5)).max(0.0))
            .collect()
    };
    let ranges = jitter(&datum.ranges);
    let markers = jitter(&datum.markers);
    let measures = jitter(&datum.measures);
    BulletDatum::new(ranges, markers, measures)
}

fn snapshot(
    scene: &Scene,
    options: &SvgOptions,
    title: String,
    description: &str,
) -> HtmlSection {
    HtmlSection {
        title,
        description: description.into(),
        svg: scene.to_svg_with(options),
    }
}
