use glam::Vec2;
use pacman_core::entity::strategy::{select_direction, Ambivalent, Ambush, DirectChase, Flank, Pursuit, TargetStrategy};
use pacman_core::map::direction::Direction;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

const TILE: f32 = 12.0;

fn pursuit(player_position: Vec2, player_facing: Option<Direction>) -> Pursuit {
    Pursuit {
        ghost_position: Vec2::new(0.0, 0.0),
        player_position,
        player_facing,
        partner_position: None,
        scatter_anchor: Vec2::new(-50.0, -50.0),
        tile_size: TILE,
    }
}

#[test]
fn test_direct_chase_targets_player() {
    let p = pursuit(Vec2::new(120.0, 60.0), Some(Direction::Left));
    assert_eq!(DirectChase.target(&p), Vec2::new(120.0, 60.0));
}

#[test]
fn test_ambush_leads_along_facing() {
    let ambush = Ambush { lead_tiles: 4.0 };
    let player = Vec2::new(100.0, 100.0);

    assert_eq!(
        ambush.target(&pursuit(player, Some(Direction::Right))),
        Vec2::new(100.0 + 4.0 * TILE, 100.0)
    );
    assert_eq!(
        ambush.target(&pursuit(player, Some(Direction::Up))),
        Vec2::new(100.0, 100.0 - 4.0 * TILE)
    );
}

#[test]
fn test_ambush_without_facing_targets_player() {
    let ambush = Ambush { lead_tiles: 4.0 };
    let player = Vec2::new(100.0, 100.0);
    assert_eq!(ambush.target(&pursuit(player, None)), player);
}

#[test]
fn test_flank_reflection() {
    assert_eq!(Flank::reflect(Vec2::new(10.0, 10.0), Vec2::ZERO), Vec2::new(20.0, 20.0));
}

#[test]
fn test_flank_reflects_through_partner() {
    let flank = Flank { lead_tiles: 2.0 };
    let mut p = pursuit(Vec2::new(36.0, 60.0), Some(Direction::Down));
    p.partner_position = Some(Vec2::new(30.0, 30.0));

    // Pivot is two tiles below the player: (36, 84).
    assert_eq!(flank.target(&p), Vec2::new(42.0, 138.0));
}

#[test]
fn test_flank_without_partner_targets_pivot() {
    let flank = Flank { lead_tiles: 2.0 };
    let p = pursuit(Vec2::new(36.0, 60.0), Some(Direction::Left));
    assert_eq!(flank.target(&p), Vec2::new(12.0, 60.0));
}

#[test]
fn test_ambivalent_boundary() {
    let ambivalent = Ambivalent { radius_tiles: 8.0 };

    // Exactly eight tiles away: retreat.
    let at_radius = pursuit(Vec2::new(8.0 * TILE, 0.0), None);
    assert_eq!(ambivalent.target(&at_radius), at_radius.scatter_anchor);

    let beyond = pursuit(Vec2::new(8.0 * TILE + 1.0, 0.0), None);
    assert_eq!(ambivalent.target(&beyond), beyond.player_position);

    let near = pursuit(Vec2::new(TILE, TILE), None);
    assert_eq!(ambivalent.target(&near), near.scatter_anchor);
}

#[test]
fn test_badness_is_distance_to_target() {
    let p = pursuit(Vec2::new(0.0, 50.0), None);
    assert_eq!(DirectChase.badness(Vec2::new(0.0, 20.0), &p), 30.0);
}

#[test]
fn test_select_direction_tie_break_is_stable() {
    let candidates = [
        (Direction::Up, 5.0),
        (Direction::Down, 2.0),
        (Direction::Left, 2.0),
        (Direction::Right, 2.0),
    ];
    for _ in 0..4 {
        assert_that(&select_direction(candidates)).is_equal_to(Some(Direction::Down));
    }
    assert_that(&select_direction([(Direction::Right, 1.0), (Direction::Up, 1.0)])).is_equal_to(Some(Direction::Right));
}
