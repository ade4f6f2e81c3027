//! Geometry module - fixed-point angles and the base pivot chain
//!
//! All coordinates live in the integer display space of the virtual watch
//! (origin top-left, y grows downward). Angles use a full circle of
//! [`TRIG_MAX_ANGLE`] units and trig ratios are scaled by [`TRIG_MAX_RATIO`].

use std::ops::Sub;
use std::sync::OnceLock;

use shared::{TimeSnapshot, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Units in one full turn
pub const TRIG_MAX_ANGLE: i32 = 0x10000;
/// Fixed-point scale of the trig lookups (sin of a quarter turn)
pub const TRIG_MAX_RATIO: i32 = 0xffff;

const QUARTER_TURN: i32 = TRIG_MAX_ANGLE / 4;
const HALF_TURN: i32 = TRIG_MAX_ANGLE / 2;

/// Number of pivots in a chain
pub const NUM_POINTS: usize = 6;

/// Days on the year and month scales
const DAYS_PER_YEAR: i64 = 365;
const MONTHS_PER_YEAR: i64 = 12;

/// Rotation on the [`TRIG_MAX_ANGLE`] scale
pub type Angle = i32;

/// Integer point in display coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean length of this point taken as a vector
    pub fn length_squared(self) -> u64 {
        let x = u64::from(self.x.unsigned_abs());
        let y = u64::from(self.y.unsigned_abs());
        x * x + y * y
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Size of the drawable area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }
}

/// Pivots of one clock chain: year anchor, month anchor, face center,
/// hour tip, minute tip, second tip
pub type Chain = [Point; NUM_POINTS];

fn quarter_wave() -> &'static [i32] {
    static TABLE: OnceLock<Vec<i32>> = OnceLock::new();
    TABLE.get_or_init(|| {
        (0..=QUARTER_TURN)
            .map(|step| {
                let radians =
                    f64::from(step) * std::f64::consts::TAU / f64::from(TRIG_MAX_ANGLE);
                (radians.sin() * f64::from(TRIG_MAX_RATIO)).round() as i32
            })
            .collect()
    })
}

/// Fixed-point sine for any angle, in `[-TRIG_MAX_RATIO, TRIG_MAX_RATIO]`
pub fn sin_lookup(angle: Angle) -> i32 {
    let angle = angle.rem_euclid(TRIG_MAX_ANGLE);
    let table = quarter_wave();
    // Fold every quadrant onto the first
    match angle / QUARTER_TURN {
        0 => table[angle as usize],
        1 => table[(HALF_TURN - angle) as usize],
        2 => -table[(angle - HALF_TURN) as usize],
        _ => -table[(TRIG_MAX_ANGLE - angle) as usize],
    }
}

/// Fixed-point cosine for any angle, in `[-TRIG_MAX_RATIO, TRIG_MAX_RATIO]`
pub fn cos_lookup(angle: Angle) -> i32 {
    sin_lookup(angle.rem_euclid(TRIG_MAX_ANGLE) + QUARTER_TURN)
}

/// Map `x` out of `outof` onto the circle, with position 0 pointing up
///
/// `outof` must be positive.
pub fn clock_angle(x: i64, outof: i64) -> Angle {
    let turned = x * i64::from(TRIG_MAX_ANGLE) / outof;
    (turned - i64::from(QUARTER_TURN)) as Angle
}

/// Day of the year on a one-year dial
pub fn year_angle(time: &TimeSnapshot) -> Angle {
    clock_angle(i64::from(time.day_of_year), DAYS_PER_YEAR)
}

/// Month dial position, approximated as twelve equal slices of the year
pub fn month_angle(time: &TimeSnapshot) -> Angle {
    clock_angle(i64::from(time.day_of_year) * MONTHS_PER_YEAR, DAYS_PER_YEAR)
}

/// Hour hand over a 12-hour dial
pub fn hour_angle(seconds_since_midnight: u32) -> Angle {
    clock_angle(
        i64::from(seconds_since_midnight),
        i64::from(SECONDS_PER_HOUR * 12),
    )
}

/// Minute hand over one hour
pub fn minute_angle(seconds_since_midnight: u32) -> Angle {
    clock_angle(
        i64::from(seconds_since_midnight),
        i64::from(SECONDS_PER_HOUR),
    )
}

/// Second hand over one minute
pub fn second_angle(seconds_since_midnight: u32) -> Angle {
    clock_angle(
        i64::from(seconds_since_midnight),
        i64::from(SECONDS_PER_MINUTE),
    )
}

/// Point at `radius` from `center` in the direction of `angle`
pub fn angular_point(center: Point, radius: i32, angle: Angle) -> Point {
    let r = i64::from(radius);
    let ratio = i64::from(TRIG_MAX_RATIO);
    Point::new(
        center.x + (r * i64::from(cos_lookup(angle)) / ratio) as i32,
        center.y + (r * i64::from(sin_lookup(angle)) / ratio) as i32,
    )
}

/// Build the base pivot chain for the given display bounds and time
///
/// The month and year arms are flipped by a half turn so they sweep
/// outward from the face, producing the long background strokes.
pub fn build_chain(bounds: Bounds, time: &TimeSnapshot) -> Chain {
    let secs = time.seconds_since_midnight;
    let mut points = [Point::default(); NUM_POINTS];

    points[2] = bounds.center();
    points[1] = angular_point(points[2], bounds.width / 3, month_angle(time) + HALF_TURN);
    points[0] = angular_point(
        points[1],
        bounds.height + bounds.width,
        year_angle(time) + HALF_TURN,
    );

    points[3] = angular_point(points[2], bounds.width / 4, hour_angle(secs));
    points[4] = angular_point(points[3], bounds.width / 6, minute_angle(secs));

    let sec_radius = (bounds.width / 8).max(0);
    points[5] = angular_point(points[4], sec_radius, second_angle(secs));

    points
}
