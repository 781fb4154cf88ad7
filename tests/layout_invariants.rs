//! Property tests for grid snapping, boundary sizing, frame conversion and
//! the overlap resolver

use deployment_diagram::layout::{
    effective_size, resolve, snap_to_grid, BoundingBox, OverlapGroup, OverlapItem, Point, Scene,
};
use deployment_diagram::{Boundary, Component, LayoutConfig, Placement, Positioning, Zone};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f64> {
    (-2000i32..2000).prop_map(f64::from)
}

fn child_strategy() -> impl Strategy<Value = (f64, f64, bool)> {
    ((0i32..800).prop_map(f64::from), (0i32..1200).prop_map(f64::from), any::<bool>())
}

fn boundary() -> Boundary {
    Boundary::new("box", "Box", Zone::Private, 600.0, 20.0, 270.0, 470.0).with_padding(30.0)
}

fn children(specs: &[(f64, f64, bool)]) -> Vec<Component> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(x, y, visible))| {
            Component::new(format!("c{i}"), format!("C{i}"), Zone::Private, x, y)
                .in_boundary("box")
                .with_visible(visible)
        })
        .collect()
}

fn item_strategy() -> impl Strategy<Value = (f64, f64, bool)> {
    ((0i32..600).prop_map(f64::from), (0i32..600).prop_map(f64::from), any::<bool>())
}

fn items(specs: &[(f64, f64, bool)]) -> Vec<OverlapItem> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(x, y, locked))| {
            OverlapItem::new(
                format!("i{i}"),
                BoundingBox::new(x, y, 180.0, 110.0),
                OverlapGroup::Zone(Zone::Public),
            )
            .locked(locked)
        })
        .collect()
}

proptest! {
    #[test]
    fn snapped_value_is_on_grid(value in -5000.0f64..5000.0, grid in 1u32..50) {
        let grid = f64::from(grid);
        let snapped = snap_to_grid(value, grid);
        prop_assert_eq!(snapped % grid, 0.0);
        prop_assert!((snapped - value).abs() <= grid / 2.0 + 1e-9);
    }

    #[test]
    fn snapping_is_idempotent(value in -5000.0f64..5000.0, grid in 1u32..50) {
        let grid = f64::from(grid);
        let once = snap_to_grid(value, grid);
        prop_assert_eq!(snap_to_grid(once, grid), once);
    }

    #[test]
    fn effective_size_never_below_declared(specs in prop::collection::vec(child_strategy(), 0..8)) {
        let config = LayoutConfig::default();
        let b = boundary();
        let size = effective_size(&b, &children(&specs), &config);
        prop_assert!(size.width >= b.width);
        prop_assert!(size.height >= b.height);
    }

    #[test]
    fn effective_size_covers_visible_children(
        specs in prop::collection::vec(child_strategy(), 1..8),
    ) {
        let config = LayoutConfig::default();
        let b = boundary();
        let components = children(&specs);
        let size = effective_size(&b, &components, &config);
        for c in components.iter().filter(|c| c.visible) {
            prop_assert!(c.position.x + 180.0 + 30.0 <= size.width);
            prop_assert!(c.position.y + 110.0 + 30.0 <= size.height);
        }
    }

    #[test]
    fn hiding_every_child_restores_declared_size(
        specs in prop::collection::vec(child_strategy(), 0..8),
    ) {
        let config = LayoutConfig::default();
        let b = boundary();
        let hidden: Vec<Component> = children(&specs)
            .into_iter()
            .map(|c| c.with_visible(false))
            .collect();
        let size = effective_size(&b, &hidden, &config);
        prop_assert_eq!((size.width, size.height), (b.width, b.height));
    }

    #[test]
    fn showing_a_child_never_shrinks_boundary(
        specs in prop::collection::vec(child_strategy(), 1..8),
        index in any::<prop::sample::Index>(),
    ) {
        let config = LayoutConfig::default();
        let b = boundary();
        let mut components = children(&specs);
        let i = index.index(components.len());
        components[i].visible = false;
        let before = effective_size(&b, &components, &config);
        components[i].visible = true;
        let after = effective_size(&b, &components, &config);
        prop_assert!(after.width >= before.width);
        prop_assert!(after.height >= before.height);
    }

    #[test]
    fn localize_inverts_absolute_position(x in coordinate(), y in coordinate()) {
        let config = LayoutConfig::default();
        let boundaries = vec![boundary()];
        let components = vec![
            Component::new("free", "Free", Zone::Private, 700.0, 600.0),
            Component::new("child", "Child", Zone::Private, 30.0, 30.0).in_boundary("box"),
            Component::new("below", "Below", Zone::Private, 0.0, 0.0)
                .with_positioning(Positioning::new("box", Placement::Below, 30.0, 40.0)),
            Component::new("left", "Left", Zone::Private, 0.0, 0.0)
                .with_positioning(Positioning::new("box", Placement::Left, 200.0, 0.0)),
        ];
        let scene = Scene::new(&components, &boundaries, &config);
        let target = Point::new(x, y);

        for c in &components {
            let placed = scene.localize(c, target);
            prop_assert_eq!(scene.absolute_position(&placed), target, "{}", c.id);
        }
    }

    #[test]
    fn resolver_keeps_ids_sizes_and_locked_items(
        specs in prop::collection::vec(item_strategy(), 0..6),
    ) {
        let config = LayoutConfig::default();
        let input = items(&specs);
        let resolution = resolve(input.clone(), &config, 30);

        prop_assert!(resolution.iterations <= 30);
        prop_assert_eq!(resolution.items.len(), input.len());
        for (before, after) in input.iter().zip(&resolution.items) {
            prop_assert_eq!(&before.id, &after.id);
            prop_assert_eq!(before.bounds.size(), after.bounds.size());
            if before.locked {
                prop_assert_eq!(before.bounds, after.bounds);
            }
        }
    }

    #[test]
    fn resolver_is_deterministic(specs in prop::collection::vec(item_strategy(), 0..6)) {
        let config = LayoutConfig::default();
        let first = resolve(items(&specs), &config, 30);
        let second = resolve(items(&specs), &config, 30);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn clean_input_is_left_alone(count in 0usize..6) {
        let config = LayoutConfig::default();
        // One card per 220px column leaves exactly the minimum spacing
        let specs: Vec<(f64, f64, bool)> =
            (0..count).map(|i| (i as f64 * 220.0, 0.0, false)).collect();
        let input = items(&specs);
        let resolution = resolve(input.clone(), &config, 30);

        prop_assert!(resolution.converged);
        prop_assert_eq!(resolution.iterations, 0);
        prop_assert_eq!(resolution.items, input);
    }
}

#[test]
fn resolver_separates_a_crowded_pair() {
    let config = LayoutConfig::default();
    let resolution = resolve(items(&[(100.0, 100.0, false), (120.0, 110.0, false)]), &config, 100);

    assert!(resolution.converged);
    let a = resolution.items[0].bounds;
    let b = resolution.items[1].bounds;
    assert!(!a.intersects(&b));
}

fn overlapping_pairs(items: &[OverlapItem], spacing: f64) -> usize {
    let mut count = 0;
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            if a.group == b.group && a.bounds.overlaps_with_spacing(&b.bounds, spacing) {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn resolver_never_adds_overlapping_pairs() {
    let config = LayoutConfig::default();
    let input = items(&[
        (0.0, 0.0, false),
        (5.0, 5.0, false),
        (10.0, 0.0, true),
        (0.0, 10.0, false),
    ]);
    let before = overlapping_pairs(&input, config.min_spacing);

    let resolution = resolve(input, &config, 2);

    assert!(overlapping_pairs(&resolution.items, config.min_spacing) <= before);
}
