//! Swept segment vs block-grid collision.
//!
//! A 3D DDA walks the blocks a segment passes through; each solid block is
//! confirmed with a slab-method intersection against its unit box before
//! counting as a hit. Every visited block is reported so rest caches can
//! be invalidated when one of them changes.

use copper_utils::math::Vector3;
use rustc_hash::FxHashSet;

/// Segments shorter than this degenerate to a point-in-block test.
const DEGENERATE_EPSILON: f64 = 1e-9;

/// Outcome of a swept collision query.
pub struct SweepResult {
    /// Whether the segment crossed a solid block.
    pub hit: bool,
    /// Every block the traversal looked at.
    pub blocks_checked: FxHashSet<(i32, i32, i32)>,
}

/// Walks the segment from `from` to `to` through the block grid, asking
/// `is_solid` about each visited block, and early-exits on the first box
/// the segment actually intersects.
pub fn sweep_segment(
    from: Vector3<f64>,
    to: Vector3<f64>,
    mut is_solid: impl FnMut(i32, i32, i32) -> bool,
) -> SweepResult {
    let mut blocks_checked = FxHashSet::default();
    let delta = to - from;

    if delta.length() < DEGENERATE_EPSILON {
        let block = from.floor_i32();
        blocks_checked.insert((block.x, block.y, block.z));
        return SweepResult {
            hit: is_solid(block.x, block.y, block.z),
            blocks_checked,
        };
    }

    let mut block = from.floor_i32();
    let end_block = to.floor_i32();

    let step = [sign(delta.x), sign(delta.y), sign(delta.z)];
    let axes = [delta.x, delta.y, delta.z];

    // Parametric distance to each axis' next integer plane, and per-unit
    // crossing cost, both in t units of the full segment.
    let mut t_next = [f64::INFINITY; 3];
    let mut dt = [f64::INFINITY; 3];
    let origin = [from.x, from.y, from.z];
    let start = [block.x, block.y, block.z];
    for axis in 0..3 {
        if axes[axis].abs() > DEGENERATE_EPSILON {
            dt[axis] = 1.0 / axes[axis].abs();
            let boundary = if step[axis] > 0 {
                f64::from(start[axis] + 1)
            } else {
                f64::from(start[axis])
            };
            t_next[axis] = (boundary - origin[axis]) / axes[axis];
        }
    }

    let max_steps = (end_block.x - block.x).abs()
        + (end_block.y - block.y).abs()
        + (end_block.z - block.z).abs()
        + 1;

    for _ in 0..max_steps {
        blocks_checked.insert((block.x, block.y, block.z));

        if is_solid(block.x, block.y, block.z)
            && segment_intersects_box(from, delta, block)
        {
            return SweepResult {
                hit: true,
                blocks_checked,
            };
        }

        if passed_end(&block, &end_block, &step) {
            break;
        }

        // Advance along whichever axis crosses its plane first.
        let axis = if t_next[0] <= t_next[1] && t_next[0] <= t_next[2] {
            0
        } else if t_next[1] <= t_next[2] {
            1
        } else {
            2
        };
        t_next[axis] += dt[axis];
        match axis {
            0 => block.x += step[0],
            1 => block.y += step[1],
            _ => block.z += step[2],
        }
    }

    SweepResult {
        hit: false,
        blocks_checked,
    }
}

fn sign(value: f64) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

fn passed_end(block: &Vector3<i32>, end: &Vector3<i32>, step: &[i32; 3]) -> bool {
    (step[0] > 0 && block.x >= end.x || step[0] < 0 && block.x <= end.x || step[0] == 0)
        && (step[1] > 0 && block.y >= end.y || step[1] < 0 && block.y <= end.y || step[1] == 0)
        && (step[2] > 0 && block.z >= end.z || step[2] < 0 && block.z <= end.z || step[2] == 0)
}

/// Slab-method intersection of the segment `from + t * delta`, t in
/// `[0, 1]`, against the unit box at `block`.
fn segment_intersects_box(from: Vector3<f64>, delta: Vector3<f64>, block: Vector3<i32>) -> bool {
    let mut t_min = 0.0f64;
    let mut t_max = 1.0f64;

    let origins = [from.x, from.y, from.z];
    let deltas = [delta.x, delta.y, delta.z];
    let mins = [
        f64::from(block.x),
        f64::from(block.y),
        f64::from(block.z),
    ];

    for axis in 0..3 {
        let min = mins[axis];
        let max = min + 1.0;

        if deltas[axis].abs() < DEGENERATE_EPSILON {
            if origins[axis] < min || origins[axis] >= max {
                return false;
            }
            continue;
        }

        let mut t1 = (min - origins[axis]) / deltas[axis];
        let mut t2 = (max - origins[axis]) / deltas[axis];
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_at(y: i32) -> impl FnMut(i32, i32, i32) -> bool {
        move |_, by, _| by == y
    }

    #[test]
    fn test_vertical_fall_hits_floor() {
        // Falling from above y 65 into the solid layer at y 64.
        let result = sweep_segment(
            Vector3::new(0.5, 65.2, 0.5),
            Vector3::new(0.5, 64.8, 0.5),
            floor_at(64),
        );
        assert!(result.hit);
        assert!(result.blocks_checked.contains(&(0, 64, 0)));
    }

    #[test]
    fn test_vertical_fall_above_floor_misses() {
        let result = sweep_segment(
            Vector3::new(0.5, 66.9, 0.5),
            Vector3::new(0.5, 65.1, 0.5),
            floor_at(64),
        );
        assert!(!result.hit);
        assert!(result.blocks_checked.contains(&(0, 66, 0)));
        assert!(result.blocks_checked.contains(&(0, 65, 0)));
    }

    #[test]
    fn test_degenerate_segment_is_point_test() {
        let result = sweep_segment(
            Vector3::new(0.5, 64.5, 0.5),
            Vector3::new(0.5, 64.5, 0.5),
            floor_at(64),
        );
        assert!(result.hit);
        assert_eq!(result.blocks_checked.len(), 1);
    }

    #[test]
    fn test_diagonal_traversal_visits_crossed_blocks() {
        let result = sweep_segment(
            Vector3::new(0.5, 70.5, 0.5),
            Vector3::new(2.5, 70.5, 2.5),
            |_, _, _| false,
        );
        assert!(!result.hit);
        assert!(result.blocks_checked.contains(&(0, 70, 0)));
        assert!(result.blocks_checked.contains(&(2, 70, 2)));
        // A diagonal through three columns crosses intermediate blocks too.
        assert!(result.blocks_checked.len() >= 4);
    }

    #[test]
    fn test_horizontal_sweep_into_wall() {
        let result = sweep_segment(
            Vector3::new(0.5, 64.5, 0.5),
            Vector3::new(3.5, 64.5, 0.5),
            |bx, _, _| bx == 2,
        );
        assert!(result.hit);
        assert!(result.blocks_checked.contains(&(1, 64, 0)));
        assert!(result.blocks_checked.contains(&(2, 64, 0)));
        // Early exit: the block behind the wall is never visited.
        assert!(!result.blocks_checked.contains(&(3, 64, 0)));
    }

    #[test]
    fn test_grazing_corner_requires_real_intersection() {
        // The segment passes through the column of a solid block without
        // entering its box.
        let result = sweep_segment(
            Vector3::new(0.5, 65.5, 0.5),
            Vector3::new(1.5, 65.5, 0.5),
            |bx, by, _| bx == 1 && by == 64,
        );
        assert!(!result.hit);
    }
}
