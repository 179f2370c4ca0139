// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bullet_charts::{BulletChart, BulletDatum};
use bullet_scene::{Scene, Tag};
use proptest::prelude::*;

fn render_svg(datum: &BulletDatum, orient: &str) -> String {
    let mut scene = Scene::new();
    let g = scene
        .document
        .append(scene.root(), Tag::G)
        .expect("root exists");
    let mut chart = BulletChart::new();
    chart.set_orient(orient);
    chart.render(&mut scene, [(g, datum)]).expect("render");
    scene.to_svg()
}

fn values_strategy(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..10_000.0, 1..=max_len)
}

fn datum_and_shuffle() -> impl Strategy<Value = (BulletDatum, BulletDatum)> {
    (values_strategy(5), values_strategy(3), values_strategy(3)).prop_flat_map(
        |(ranges, markers, measures)| {
            let original = BulletDatum::new(ranges.clone(), markers.clone(), measures.clone());
            (
                Just(original),
                Just(ranges).prop_shuffle(),
                Just(markers).prop_shuffle(),
                Just(measures).prop_shuffle(),
            )
                .prop_map(|(original, r, m, s)| (original, BulletDatum::new(r, m, s)))
        },
    )
}

proptest! {
    #[test]
    fn render_ignores_input_order((original, shuffled) in datum_and_shuffle()) {
        prop_assert_eq!(render_svg(&original, "left"), render_svg(&shuffled, "left"));
    }

    #[test]
    fn reversed_render_ignores_input_order((original, shuffled) in datum_and_shuffle()) {
        prop_assert_eq!(render_svg(&original, "right"), render_svg(&shuffled, "right"));
    }

    #[test]
    fn ceiling_is_max_of_all_values((original, _) in datum_and_shuffle()) {
        let mut scene = Scene::new();
        let g = scene.document.append(scene.root(), Tag::G).expect("root exists");
        let mut chart = BulletChart::new();
        chart.render(&mut scene, [(g, &original)]).expect("render");

        let max = original
            .ranges
            .iter()
            .chain(&original.markers)
            .chain(&original.measures)
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let scale = chart.previous_scale(g).expect("scale stored");
        prop_assert_eq!(scale.domain(), (0.0, max));
    }
}
