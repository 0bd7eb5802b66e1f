//! Nearest-target search.

use bevy::prelude::*;

/// Find the candidate closest to `origin`.
///
/// `exclude` skips candidates it returns true for. A lone candidate is
/// returned without consulting it. Equal distances keep the earlier
/// candidate.
pub fn find_target(
    origin: Vec2,
    candidates: &[(Entity, Vec2)],
    exclude: Option<&dyn Fn(Entity) -> bool>,
) -> Option<Entity> {
    if let [(only, _)] = candidates {
        return Some(*only);
    }

    let mut best: Option<(Entity, f32)> = None;
    for &(entity, position) in candidates {
        if exclude.is_some_and(|skip| skip(entity)) {
            continue;
        }
        let distance = origin.distance_squared(position);
        if best.map_or(true, |(_, closest)| distance < closest) {
            best = Some((entity, distance));
        }
    }

    best.map(|(entity, _)| entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    #[test]
    fn no_candidates_no_target() {
        assert_eq!(find_target(Vec2::ZERO, &[], None), None);
    }

    #[test]
    fn lone_candidate_ignores_the_filter() {
        let exclude_all = |_: Entity| true;
        let candidates = [(e(1), Vec2::new(50.0, 0.0))];

        assert_eq!(find_target(Vec2::ZERO, &candidates, Some(&exclude_all)), Some(e(1)));
    }

    #[test]
    fn picks_the_nearest_not_the_first() {
        let candidates = [
            (e(1), Vec2::new(10.0, 0.0)),
            (e(2), Vec2::new(-3.0, 0.0)),
            (e(3), Vec2::new(0.0, 4.0)),
        ];

        assert_eq!(find_target(Vec2::ZERO, &candidates, None), Some(e(2)));
    }

    #[test]
    fn ties_go_to_the_first_found() {
        let candidates = [(e(1), Vec2::new(2.0, 0.0)), (e(2), Vec2::new(-2.0, 0.0))];

        assert_eq!(find_target(Vec2::ZERO, &candidates, None), Some(e(1)));
    }

    #[test]
    fn excluded_candidates_are_skipped() {
        let busy = e(2);
        let exclude = move |entity: Entity| entity == busy;
        let candidates = [(e(1), Vec2::new(10.0, 0.0)), (busy, Vec2::new(1.0, 0.0))];

        assert_eq!(find_target(Vec2::ZERO, &candidates, Some(&exclude)), Some(e(1)));
    }

    #[test]
    fn everything_excluded_gives_none() {
        let exclude_all = |_: Entity| true;
        let candidates = [(e(1), Vec2::X), (e(2), Vec2::Y)];

        assert_eq!(find_target(Vec2::ZERO, &candidates, Some(&exclude_all)), None);
    }
}
