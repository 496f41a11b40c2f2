//! Rack layouts: where the object balls go for each layout mode.
//! The cue ball is always added separately at the table's spawn point.

use glam::Vec2;
use potshot_engine::keys;
use rand::Rng;

use crate::ball::BallColor;
use crate::table::Table;

pub const RED_COUNT: usize = 15;
const TRIANGLE_ROWS: usize = 5;
// As fractions of table width
const APEX_X: f32 = 0.7;
const BLACK_SPOT_X: f32 = 0.8;
// Rows sit closer than a diameter apart so the triangle packs tight
const ROW_SHIFT: f32 = 0.8;

/// The three mutually exclusive ways to rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RackLayout {
    /// Red triangle, blue on the center spot, black near the foot.
    Start,
    /// Fifteen reds scattered at random.
    RandomReds,
    /// Fifteen reds plus blue and black, all scattered at random.
    RandomAll,
}

impl RackLayout {
    /// Keys `1`, `2`, `3` pick a layout.
    pub fn from_key(key_code: u32) -> Option<Self> {
        match key_code {
            keys::DIGIT_1 => Some(RackLayout::Start),
            keys::DIGIT_2 => Some(RackLayout::RandomReds),
            keys::DIGIT_3 => Some(RackLayout::RandomAll),
            _ => None,
        }
    }
}

/// Positions and colors of the object balls for `layout`, reds first.
pub fn object_balls<R: Rng>(layout: RackLayout, table: &Table, rng: &mut R) -> Vec<(Vec2, BallColor)> {
    let mut placed = Vec::with_capacity(RED_COUNT + 2);
    match layout {
        RackLayout::Start => {
            placed.extend(triangle(table).map(|pos| (pos, BallColor::Red)));
            placed.push((table.center(), BallColor::Blue));
            placed.push((
                Vec2::new(table.width() * BLACK_SPOT_X, table.height() / 2.0),
                BallColor::Black,
            ));
        }
        RackLayout::RandomReds | RackLayout::RandomAll => {
            for _ in 0..RED_COUNT {
                placed.push((random_point(table, rng), BallColor::Red));
            }
            if layout == RackLayout::RandomAll {
                placed.push((random_point(table, rng), BallColor::Blue));
                placed.push((random_point(table, rng), BallColor::Black));
            }
        }
    }
    placed
}

/// Five-row triangle, apex toward the cue ball. Row `r` holds `r + 1`
/// balls one diameter apart, centered on the long axis.
fn triangle(table: &Table) -> impl Iterator<Item = Vec2> + '_ {
    let d = table.ball_diameter();
    let apex = Vec2::new(table.width() * APEX_X, table.height() / 2.0);
    (0..TRIANGLE_ROWS).flat_map(move |row| {
        (0..=row).map(move |i| {
            let x = apex.x + row as f32 * d * ROW_SHIFT;
            let y = apex.y + i as f32 * d - row as f32 * d / 2.0;
            Vec2::new(x, y)
        })
    })
}

fn random_point<R: Rng>(table: &Table, rng: &mut R) -> Vec2 {
    let (min, max) = table.placement_bounds();
    Vec2::new(rng.gen_range(min.x..max.x), rng.gen_range(min.y..max.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn count(placed: &[(Vec2, BallColor)], color: BallColor) -> usize {
        placed.iter().filter(|(_, c)| *c == color).count()
    }

    #[test]
    fn keys_select_layouts() {
        assert_eq!(RackLayout::from_key(keys::DIGIT_1), Some(RackLayout::Start));
        assert_eq!(RackLayout::from_key(keys::DIGIT_2), Some(RackLayout::RandomReds));
        assert_eq!(RackLayout::from_key(keys::DIGIT_3), Some(RackLayout::RandomAll));
        assert_eq!(RackLayout::from_key(keys::SPACE), None);
    }

    #[test]
    fn start_layout_triangle_and_spots() {
        let table = Table::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let placed = object_balls(RackLayout::Start, &table, &mut rng);

        assert_eq!(placed.len(), 17);
        assert_eq!(count(&placed, BallColor::Red), 15);
        assert_eq!(placed[15], (Vec2::new(400.0, 200.0), BallColor::Blue));
        assert_eq!(placed[16], (Vec2::new(640.0, 200.0), BallColor::Black));

        let d = table.ball_diameter();
        // Apex
        assert_eq!(placed[0].0, Vec2::new(560.0, 200.0));
        // Row 1 straddles the axis
        assert!((placed[1].0.x - (560.0 + 0.8 * d)).abs() < 1e-3);
        assert!((placed[1].0.y - (200.0 - d / 2.0)).abs() < 1e-3);
        assert!((placed[2].0.y - (200.0 + d / 2.0)).abs() < 1e-3);
        // Back row: five balls, symmetric about the axis
        let back: Vec<Vec2> = placed[10..15].iter().map(|(p, _)| *p).collect();
        for p in &back {
            assert!((p.x - (560.0 + 4.0 * 0.8 * d)).abs() < 1e-3);
        }
        assert!((back[0].y - (200.0 - 2.0 * d)).abs() < 1e-3);
        assert!((back[2].y - 200.0).abs() < 1e-3);
        assert!((back[4].y - (200.0 + 2.0 * d)).abs() < 1e-3);
    }

    #[test]
    fn start_layout_ignores_rng() {
        let table = Table::default();
        let a = object_balls(RackLayout::Start, &table, &mut ChaCha8Rng::seed_from_u64(1));
        let b = object_balls(RackLayout::Start, &table, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn random_layouts_stay_in_bounds() {
        let table = Table::default();
        let d = table.ball_diameter();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..50 {
            let reds = object_balls(RackLayout::RandomReds, &table, &mut rng);
            assert_eq!(reds.len(), 15);
            assert_eq!(count(&reds, BallColor::Red), 15);

            let all = object_balls(RackLayout::RandomAll, &table, &mut rng);
            assert_eq!(all.len(), 17);
            assert_eq!(count(&all, BallColor::Blue), 1);
            assert_eq!(count(&all, BallColor::Black), 1);

            for (p, _) in reds.iter().chain(all.iter()) {
                assert!(p.x >= d && p.x <= table.width() - d, "x out of bounds: {}", p.x);
                assert!(p.y >= d && p.y <= table.height() - d, "y out of bounds: {}", p.y);
            }
        }
    }

    #[test]
    fn random_layouts_follow_the_seed() {
        let table = Table::default();
        let a = object_balls(RackLayout::RandomAll, &table, &mut ChaCha8Rng::seed_from_u64(42));
        let b = object_balls(RackLayout::RandomAll, &table, &mut ChaCha8Rng::seed_from_u64(42));
        let c = object_balls(RackLayout::RandomAll, &table, &mut ChaCha8Rng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
