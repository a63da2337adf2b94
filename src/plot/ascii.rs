//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual comparison of correlations in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - formula curves: `1`..`9` (formula-set order)
//! - mean curve: `#` (optional)
//! - per-formula values at the input Nspt: `o`
//! - mean at the input Nspt: `*` (optional)

use crate::domain::{SetEstimate, SweepEstimate};

/// Render one parameter's comparison chart.
///
/// `show_mean` adds the mean curve and the highlighted mean at the input point.
pub fn render_ascii_chart(
    sweep: &SweepEstimate,
    point: &SetEstimate,
    show_mean: bool,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(&sweep.nspt).unwrap_or((0.0, 30.0));
    let (y_min, y_max) = y_range(sweep, point, show_mean).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    let bounds = Bounds {
        x_min,
        x_max,
        y_min,
        y_max,
    };

    let mut grid = vec![vec![' '; width]; height];

    // Mean first so it stays visible where formula curves cross it.
    if show_mean {
        draw_curve(&mut grid, &sweep.mean_points(), &bounds, '#');
    }
    for (i, series) in sweep.series.iter().enumerate() {
        draw_curve(&mut grid, &series.points(&sweep.nspt), &bounds, series_marker(i));
    }

    // Input-point markers overlay the curves.
    for e in &point.estimates {
        plot_point(&mut grid, point.nspt, e.value, &bounds, 'o');
    }
    if show_mean {
        plot_point(&mut grid, point.nspt, point.mean, &bounds, '*');
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{} vs Nspt | nspt=[{x_min:.2}, {x_max:.2}] | y=[{y_min:.2}, {y_max:.2}]\n",
        sweep.kind.axis_label()
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    for (i, series) in sweep.series.iter().enumerate() {
        out.push_str(&format!("{} = {} {}\n", series_marker(i), series.id, series.label()));
    }
    if show_mean {
        out.push_str("# = mean\n");
    }
    out.push_str(&format!("o = estimates at Nspt = {:.2}\n", point.nspt));
    if show_mean {
        out.push_str(&format!(
            "* = mean at Nspt = {:.2} ({})\n",
            point.nspt,
            point.kind.format_value(point.mean)
        ));
    }

    out
}

struct Bounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

fn series_marker(i: usize) -> char {
    u32::try_from(i + 1)
        .ok()
        .and_then(|d| char::from_digit(d, 10))
        .unwrap_or('+')
}

fn x_range(xs: &[f64]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &x in xs.iter().filter(|x| x.is_finite()) {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(sweep: &SweepEstimate, point: &SetEstimate, show_mean: bool) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut take = |y: f64| {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    };

    for series in &sweep.series {
        series.values.iter().copied().for_each(&mut take);
    }
    point.estimates.iter().for_each(|e| take(e.value));
    if show_mean {
        sweep.mean.iter().copied().for_each(&mut take);
        take(point.mean);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, b: &Bounds, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - b.x_min) / (b.x_max - b.x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, b: &Bounds, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - b.y_min) / (b.y_max - b.y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn plot_point(grid: &mut [Vec<char>], x: f64, y: f64, b: &Bounds, ch: char) {
    if !(x.is_finite() && y.is_finite()) {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();
    grid[map_y(y, b, height)][map_x(x, b, width)] = ch;
}

/// Draw a polyline; non-finite samples break the line.
fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], b: &Bounds, ch: char) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !(x.is_finite() && y.is_finite()) {
            prev = None;
            continue;
        }
        let col = map_x(x, b, width);
        let row = map_y(y, b, height);
        match prev {
            Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
            None => {
                if grid[row][col] == ' ' {
                    grid[row][col] = ch;
                }
            }
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{estimate, estimate_sweep};
    use crate::app::sweep::sweep_domain;
    use crate::domain::{FormulaEstimate, FormulaSeries, ParameterKind};

    #[test]
    fn plot_golden_snapshot_small() {
        let sweep = SweepEstimate {
            kind: ParameterKind::Cohesion,
            nspt: vec![0.0, 10.0],
            series: vec![FormulaSeries {
                id: "c1",
                authors: "A",
                year: 2000,
                values: vec![0.0, 10.0],
            }],
            mean: vec![0.0, 10.0],
        };
        let point = SetEstimate {
            kind: ParameterKind::Cohesion,
            nspt: 10.0,
            estimates: vec![FormulaEstimate {
                id: "c1",
                authors: "A",
                year: 2000,
                value: 10.0,
            }],
            mean: 10.0,
        };

        let txt = render_ascii_chart(&sweep, &point, false, 10, 5);
        let expected = concat!(
            "c (kPa) vs Nspt | nspt=[0.00, 10.00] | y=[-0.50, 10.50]\n",
            "        1o\n",
            "      11  \n",
            "    11    \n",
            "  11      \n",
            "11        \n",
            "1 = c1 A (2000)\n",
            "o = estimates at Nspt = 10.00\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn friction_chart_shows_every_curve_and_mean() {
        let grid = sweep_domain(300).unwrap();
        let sweep = estimate_sweep(ParameterKind::FrictionAngle, &grid).unwrap();
        let point = estimate(ParameterKind::FrictionAngle, 10.0).unwrap();
        let txt = render_ascii_chart(&sweep, &point, true, 72, 20);

        let body: String = txt.lines().skip(1).take(20).collect();
        for ch in ['1', '2', '3', '4', '5', '#', '*', 'o'] {
            assert!(body.contains(ch), "missing marker {ch}");
        }
        assert!(txt.contains("* = mean at Nspt = 10.00 (32.34°)"));
    }

    fn grid_rows(txt: &str, height: usize) -> Vec<Vec<char>> {
        txt.lines().skip(1).take(height).map(|l| l.chars().collect()).collect()
    }

    #[test]
    fn nan_samples_are_skipped() {
        // Nspt -2 and -1 map to columns 0 and 6; Nspt 0 maps to column 13.
        let sweep = estimate_sweep(ParameterKind::FrictionAngle, &[-2.0, -1.0, 0.0, 1.0]).unwrap();
        let point = estimate(ParameterKind::FrictionAngle, -1.0).unwrap();
        let txt = render_ascii_chart(&sweep, &point, true, 20, 6);
        assert_eq!(txt.lines().count(), 1 + 6 + 5 + 1 + 1 + 1);

        let rows = grid_rows(&txt, 6);
        for row in &rows {
            assert!(
                !row[..13].iter().any(|&c| c == '1' || c == '2' || c == '#' || c == '*'),
                "square-root curves drawn at negative Nspt: {row:?}"
            );
        }
        let right: Vec<char> = rows.iter().flat_map(|r| r[13..].iter().copied()).collect();
        assert!(right.contains(&'1'));
        // Log and linear correlations stay finite over the whole sweep.
        let left: Vec<char> = rows.iter().flat_map(|r| r[..13].iter().copied()).collect();
        assert!(left.contains(&'3') || left.contains(&'4') || left.contains(&'5'));
        assert!(left.contains(&'o'));
    }

    #[test]
    fn nan_gap_breaks_the_line() {
        let sweep = SweepEstimate {
            kind: ParameterKind::Cohesion,
            nspt: vec![-2.0, -1.0, 0.0, 1.0],
            series: vec![
                FormulaSeries {
                    id: "c1",
                    authors: "A",
                    year: 2000,
                    values: vec![f64::NAN, f64::NAN, 0.0, 10.0],
                },
                FormulaSeries {
                    id: "c2",
                    authors: "B",
                    year: 2001,
                    values: vec![5.0, f64::NAN, f64::NAN, 5.0],
                },
            ],
            mean: vec![f64::NAN; 4],
        };
        let point = SetEstimate {
            kind: ParameterKind::Cohesion,
            nspt: 0.0,
            estimates: Vec::new(),
            mean: f64::NAN,
        };

        let txt = render_ascii_chart(&sweep, &point, false, 20, 5);
        let rows = grid_rows(&txt, 5);

        // Series 2 is only its two isolated endpoints, nothing bridges the gap.
        assert_eq!(rows[2][0], '2');
        assert_eq!(rows[2][19], '2');
        assert!(rows[2][1..13].iter().all(|&c| c == ' '));
        let twos = rows.iter().flatten().filter(|&&c| c == '2').count();
        assert_eq!(twos, 2);

        // Series 1 starts at Nspt 0 (column 13).
        for row in &rows {
            assert!(!row[..13].contains(&'1'));
        }
        assert_eq!(rows[4][13], '1');
        assert_eq!(rows[0][19], '1');
    }
}
