//! Echo generation - trailing and leading copies of the pivot chain
//!
//! Every echo is derived from its neighbour one step closer to the base
//! chain, never from the base chain directly, so the offsets compound into
//! a rope-like trail behind the hands and an overshooting trail ahead.

use crate::geometry::{Chain, Point, NUM_POINTS};

/// Number of trailing echoes (negative offsets)
pub const NUM_BEHIND_ECHOES: usize = 15;
/// Number of leading echoes (positive offsets)
pub const NUM_AHEAD_ECHOES: usize = 15;
/// Total chains held by an [`EchoSet`], base chain included
pub const NUM_CHAINS: usize = NUM_BEHIND_ECHOES + 1 + NUM_AHEAD_ECHOES;
/// Step length between an echo point and the point it follows
pub const FOLLOW_DISTANCE: i64 = 8;

/// Floor of the square root
pub fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    // Newton's method from an overestimate converges from above
    let mut x = n;
    let mut y = x / 2 + (x & 1);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Vector `from -> to` rescaled to [`FOLLOW_DISTANCE`], or `None` when the
/// points coincide
///
/// Works in 64/128-bit so any pair of `i32` points is accepted.
fn step_along(from: Point, to: Point) -> Option<(i32, i32)> {
    let dx = i64::from(to.x) - i64::from(from.x);
    let dy = i64::from(to.y) - i64::from(from.y);
    let squared = u128::from(dx.unsigned_abs()).pow(2) + u128::from(dy.unsigned_abs()).pow(2);
    // At most sqrt(2) * 2^32
    let distance = isqrt(squared) as i64;
    if distance == 0 {
        return None;
    }
    // |dx| <= distance, so each component is within FOLLOW_DISTANCE
    Some((
        (dx * FOLLOW_DISTANCE / distance) as i32,
        (dy * FOLLOW_DISTANCE / distance) as i32,
    ))
}

/// Pull `target` one step back toward `prev`
///
/// Returns `target` unchanged when the two points coincide. Results clamp
/// at the `i32` range.
pub fn follow(prev: Point, target: Point) -> Point {
    match step_along(prev, target) {
        Some((sx, sy)) => Point::new(target.x.saturating_sub(sx), target.y.saturating_sub(sy)),
        None => target,
    }
}

/// Push `cur` one step further along the direction from `prev`
///
/// Returns `cur` unchanged when the two points coincide. Results clamp at
/// the `i32` range.
pub fn unfollow(prev: Point, cur: Point) -> Point {
    match step_along(prev, cur) {
        Some((sx, sy)) => Point::new(cur.x.saturating_add(sx), cur.y.saturating_add(sy)),
        None => cur,
    }
}

/// The base chain surrounded by its trailing and leading echoes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoSet {
    chains: [Chain; NUM_CHAINS],
}

impl EchoSet {
    /// Offset of the furthest trailing echo
    pub const MIN_OFFSET: i32 = -(NUM_BEHIND_ECHOES as i32);
    /// Offset of the furthest leading echo
    pub const MAX_OFFSET: i32 = NUM_AHEAD_ECHOES as i32;

    /// Derive all echoes of `base` for the first `point_count` pivots
    ///
    /// Pivots past `point_count` are left at the origin in every echo.
    pub fn generate(base: &Chain, point_count: usize) -> Self {
        let point_count = point_count.min(base.len());
        let mut chains = [[Point::default(); NUM_POINTS]; NUM_CHAINS];
        chains[NUM_BEHIND_ECHOES] = *base;

        // Trailing: each point follows the less-trailing chain, anchored on
        // the point just computed in this chain
        for i in 1..=NUM_BEHIND_ECHOES {
            let less_trailing = chains[NUM_BEHIND_ECHOES - i + 1];
            let active = &mut chains[NUM_BEHIND_ECHOES - i];
            active[0] = base[0];
            for p in 1..point_count {
                active[p] = follow(active[p - 1], less_trailing[p]);
            }
        }

        // Leading: each point extends the segment of the less-leading chain
        for i in 1..=NUM_AHEAD_ECHOES {
            let less_leading = chains[NUM_BEHIND_ECHOES + i - 1];
            let active = &mut chains[NUM_BEHIND_ECHOES + i];
            active[0] = base[0];
            for p in 1..point_count {
                active[p] = unfollow(less_leading[p - 1], less_leading[p]);
            }
        }

        Self { chains }
    }

    /// Chain at `offset` in `MIN_OFFSET..=MAX_OFFSET`
    ///
    /// # Panics
    ///
    /// Panics if `offset` is out of range.
    pub fn chain(&self, offset: i32) -> &Chain {
        assert!(
            (Self::MIN_OFFSET..=Self::MAX_OFFSET).contains(&offset),
            "echo offset {} out of range",
            offset
        );
        &self.chains[(offset - Self::MIN_OFFSET) as usize]
    }

    /// The undisplaced chain at offset 0
    pub fn base(&self) -> &Chain {
        self.chain(0)
    }

    /// Chains with their offsets, furthest trailing first
    pub fn iter(&self) -> impl Iterator<Item = (i32, &Chain)> + '_ {
        (Self::MIN_OFFSET..=Self::MAX_OFFSET).zip(self.chains.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{build_chain, Bounds};
    use shared::TimeSnapshot;

    fn length(v: Point) -> f64 {
        (v.length_squared() as f64).sqrt()
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(3), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(99), 9);
        assert_eq!(isqrt(100), 10);
        assert_eq!(isqrt(u128::from(u32::MAX) * u128::from(u32::MAX)), u128::from(u32::MAX));
        assert_eq!(isqrt(1 << 63), 3_037_000_499);
        for n in 0..2000_u128 {
            let r = isqrt(n);
            assert!(r * r <= n && (r + 1) * (r + 1) > n, "n={}", n);
        }
    }

    #[test]
    fn test_follow_axis_aligned_is_exact() {
        let prev = Point::new(10, 10);
        for target in [Point::new(10, 60), Point::new(-40, 10), Point::new(10, 19)] {
            let result = follow(prev, target);
            assert_eq!(length(target - result), 8.0);
            // Pulled toward prev
            assert!(length(result - prev) < length(target - prev));
        }
    }

    #[test]
    fn test_follow_step_length_within_rounding() {
        let prev = Point::new(3, -7);
        for (dx, dy) in [(30, 40), (17, -91), (-55, 12), (100, 100), (-13, -29)] {
            let target = Point::new(prev.x + dx, prev.y + dy);
            let step = length(target - follow(prev, target));
            assert!((step - 8.0).abs() <= 1.5, "({}, {}) stepped {}", dx, dy, step);
        }
    }

    #[test]
    fn test_unfollow_step_length_within_rounding() {
        let prev = Point::new(-20, 5);
        for (dx, dy) in [(0, 50), (30, 40), (-64, 0), (21, -33), (90, 7)] {
            let cur = Point::new(prev.x + dx, prev.y + dy);
            let result = unfollow(prev, cur);
            let step = length(result - cur);
            assert!((step - 8.0).abs() <= 1.5, "({}, {}) stepped {}", dx, dy, step);
            // Pushed away from prev
            assert!(length(result - prev) > length(cur - prev));
        }
    }

    #[test]
    fn test_zero_vector_returns_target() {
        let p = Point::new(42, -7);
        assert_eq!(follow(p, p), p);
        assert_eq!(unfollow(p, p), p);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        // Far apart along x: exact step of 8
        let result = follow(Point::new(-2_000_000_000, 0), Point::new(2_000_000_000, 0));
        assert_eq!(result, Point::new(2_000_000_000 - 8, 0));
        let result = follow(Point::new(i32::MAX, 0), Point::new(i32::MIN, 0));
        assert_eq!(result, Point::new(i32::MIN + 8, 0));

        // Diagonal of 2^31 on both axes: 8 / sqrt(2) truncates to 5
        let result = unfollow(Point::new(i32::MIN, i32::MIN), Point::new(0, 0));
        assert_eq!(result, Point::new(5, 5));

        // Stepping past the edge clamps
        assert_eq!(unfollow(Point::new(0, 0), Point::new(i32::MAX, 0)), Point::new(i32::MAX, 0));
        assert_eq!(
            unfollow(Point::new(0, 0), Point::new(i32::MIN, i32::MIN)),
            Point::new(i32::MIN, i32::MIN)
        );
    }

    #[test]
    fn test_echo_set_has_31_chains_pinned_to_base_pivot() {
        let base = build_chain(Bounds::new(144, 168), &TimeSnapshot::new(123, 45_678));
        let echoes = EchoSet::generate(&base, NUM_POINTS);
        assert_eq!(echoes.iter().count(), 31);
        assert_eq!(echoes.base(), &base);
        for (_, chain) in echoes.iter() {
            assert_eq!(chain[0], base[0]);
        }
    }

    #[test]
    fn test_trailing_points_follow_previous_echo() {
        let base = build_chain(Bounds::new(144, 168), &TimeSnapshot::new(0, 0));
        let echoes = EchoSet::generate(&base, NUM_POINTS);
        for i in 1..=15 {
            let active = echoes.chain(-i);
            let less_trailing = echoes.chain(-i + 1);
            for p in 1..NUM_POINTS {
                assert_eq!(active[p], follow(active[p - 1], less_trailing[p]));
            }
        }
    }

    #[test]
    fn test_leading_points_extend_previous_echo() {
        let base = build_chain(Bounds::new(144, 168), &TimeSnapshot::new(200, 40_000));
        let echoes = EchoSet::generate(&base, NUM_POINTS);
        for i in 1..=15 {
            let active = echoes.chain(i);
            let less_leading = echoes.chain(i - 1);
            for p in 1..NUM_POINTS {
                assert_eq!(active[p], unfollow(less_leading[p - 1], less_leading[p]));
            }
        }
    }

    #[test]
    fn test_midnight_new_year_trail() {
        let base = build_chain(Bounds::new(144, 168), &TimeSnapshot::new(0, 0));
        let echoes = EchoSet::generate(&base, NUM_POINTS);

        // Every chain is distinct
        for (a, chain_a) in echoes.iter() {
            for (b, chain_b) in echoes.iter() {
                if a != b {
                    assert_ne!(chain_a, chain_b, "offsets {} and {}", a, b);
                }
            }
        }

        // All hands point straight up, so trailing hour tips stack below the
        // base hour tip, exactly one step from the tip they follow
        for i in 1..=15 {
            let tip = echoes.chain(-i)[3];
            let followed = echoes.chain(-i + 1)[3];
            assert_eq!(tip.x, base[2].x);
            assert_eq!(tip.y - followed.y, 8);
            assert!(tip.y > base[3].y);
        }
        assert_eq!(echoes.chain(-15)[3], Point::new(72, 48 + 15 * 8));
        assert_eq!(echoes.chain(15)[3], Point::new(72, 48 - 15 * 8));
    }

    #[test]
    fn test_reduced_precision_leaves_second_tip_untouched() {
        let base = build_chain(Bounds::new(144, 168), &TimeSnapshot::new(10, 1_000));
        let full = EchoSet::generate(&base, NUM_POINTS);
        let reduced = EchoSet::generate(&base, NUM_POINTS - 1);
        for offset in EchoSet::MIN_OFFSET..=EchoSet::MAX_OFFSET {
            assert_eq!(full.chain(offset)[..5], reduced.chain(offset)[..5]);
            if offset != 0 {
                assert_eq!(reduced.chain(offset)[5], Point::default());
            }
        }
    }

    #[test]
    fn test_zero_bounds_echoes_collapse() {
        let base = build_chain(Bounds::new(0, 0), &TimeSnapshot::new(0, 0));
        let echoes = EchoSet::generate(&base, NUM_POINTS);
        for (_, chain) in echoes.iter() {
            assert_eq!(chain, &base);
        }
    }

    #[test]
    #[should_panic]
    fn test_offset_out_of_range() {
        let base = [Point::default(); NUM_POINTS];
        let echoes = EchoSet::generate(&base, NUM_POINTS);
        let _ = echoes.chain(16);
    }
}
